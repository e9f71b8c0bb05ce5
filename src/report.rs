//! Absence report: both comparisons, their summaries and conclusions
//!
//! Comparisons are independent. A comparison whose groups are too small
//! or degenerate is reported as failed with the specific error, the other
//! one still runs.

use crate::config::ReportConfig;
use crate::dataset::AbsenceDataset;
use crate::grouping::{self, GroupPair};
use crate::hypothesis::{Alternative, HypothesisEngine, HypothesisError, TestVerdict};
use crate::summary::GroupSummary;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Which business question a comparison answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonKind {
    /// Men vs women
    Sex,
    /// Employees at or above the age threshold vs younger ones
    Age,
}

impl ComparisonKind {
    pub const ALL: [ComparisonKind; 2] = [ComparisonKind::Sex, ComparisonKind::Age];

    fn title(&self) -> &'static str {
        match self {
            ComparisonKind::Sex => "Hypothesis 1: sex",
            ComparisonKind::Age => "Hypothesis 2: age",
        }
    }

    // Subject and reference group as they read in a sentence
    fn parties(&self, config: &ReportConfig) -> (String, String) {
        match self {
            ComparisonKind::Sex => ("men".to_string(), "women".to_string()),
            ComparisonKind::Age => (
                format!("employees aged {} and over", config.age_threshold),
                "younger employees".to_string(),
            ),
        }
    }

    fn split(&self, dataset: &AbsenceDataset, config: &ReportConfig) -> crate::hypothesis::Result<GroupPair> {
        match self {
            ComparisonKind::Sex => grouping::split_by_sex(dataset, config.min_work_days),
            ComparisonKind::Age => {
                grouping::split_by_age(dataset, config.min_work_days, config.age_threshold)
            }
        }
    }

    /// The alternative hypothesis in plain words
    pub fn claim(&self, config: &ReportConfig) -> String {
        let (subject, reference) = self.parties(config);
        format!(
            "{} miss more than {} work days a year due to sickness significantly {} {}",
            capitalize(&subject),
            config.min_work_days,
            direction(config.hypothesis.alternative),
            reference
        )
    }

    /// Verdict sentence for this comparison
    pub fn conclusion(&self, verdict: &TestVerdict, config: &ReportConfig) -> String {
        let (subject, reference) = self.parties(config);
        let dir = direction(verdict.alternative);
        if verdict.reject_null() {
            format!(
                "The null hypothesis is rejected (p = {:.4} <= alpha = {}): {} miss work days due to sickness significantly {} {}.",
                verdict.p_value, verdict.alpha, subject, dir, reference
            )
        } else {
            format!(
                "The null hypothesis cannot be rejected (p = {:.4} > alpha = {}): there is no evidence that {} miss work days due to sickness significantly {} {}.",
                verdict.p_value, verdict.alpha, subject, dir, reference
            )
        }
    }
}

fn direction(alternative: Alternative) -> &'static str {
    match alternative {
        Alternative::Greater => "more often than",
        Alternative::Less => "less often than",
        Alternative::TwoSided => "at a different rate than",
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Verdict with its conclusion, or the reason no verdict exists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum ComparisonOutcome {
    Completed {
        verdict: TestVerdict,
        conclusion: String,
    },
    Failed {
        /// Machine-readable failure, e.g. "insufficient-data"
        error: String,
        message: String,
    },
}

impl ComparisonOutcome {
    fn failed(err: &HypothesisError) -> Self {
        ComparisonOutcome::Failed {
            error: err.kind().to_string(),
            message: err.to_string(),
        }
    }

    pub fn verdict(&self) -> Option<&TestVerdict> {
        match self {
            ComparisonOutcome::Completed { verdict, .. } => Some(verdict),
            ComparisonOutcome::Failed { .. } => None,
        }
    }
}

/// One comparison of the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub kind: ComparisonKind,
    pub title: String,
    pub claim: String,
    /// First group (tested as greater), then the reference group
    pub groups: Vec<GroupSummary>,
    pub outcome: ComparisonOutcome,
}

/// Complete report over a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsenceReport {
    /// Rows in the dataset
    pub records: usize,
    /// Rows above the missed-days cutoff
    pub eligible: usize,
    pub config: ReportConfig,
    pub comparisons: Vec<ComparisonReport>,
}

/// Run both comparisons over a dataset
///
/// Fails only on an invalid configuration; statistical and summary
/// failures end up in the comparison's outcome.
///
/// # Example
/// ```
/// use sickday::config::ReportConfig;
/// use sickday::dataset::AbsenceDataset;
/// use sickday::report::build_report;
///
/// let csv = "days,age,sex\n5,39,F\n4,54,M\n";
/// let dataset = AbsenceDataset::from_reader(csv.as_bytes()).unwrap();
/// let report = build_report(&dataset, &ReportConfig::default()).unwrap();
///
/// assert_eq!(report.comparisons.len(), 2);
/// assert!(report.comparisons[0].outcome.verdict().is_none()); // one man, one woman
/// ```
pub fn build_report(dataset: &AbsenceDataset, config: &ReportConfig) -> Result<AbsenceReport> {
    config.validate()?;
    let engine = HypothesisEngine::new(config.hypothesis.clone())?;

    let comparisons = ComparisonKind::ALL
        .iter()
        .map(|kind| run_comparison(&engine, dataset, config, *kind))
        .collect();

    Ok(AbsenceReport {
        records: dataset.len(),
        eligible: grouping::eligible(dataset, config.min_work_days).count(),
        config: config.clone(),
        comparisons,
    })
}

fn run_comparison(
    engine: &HypothesisEngine,
    dataset: &AbsenceDataset,
    config: &ReportConfig,
    kind: ComparisonKind,
) -> ComparisonReport {
    let mut report = ComparisonReport {
        kind,
        title: kind.title().to_string(),
        claim: kind.claim(config),
        groups: Vec::new(),
        outcome: ComparisonOutcome::Failed {
            error: String::new(),
            message: String::new(),
        },
    };

    let pair = match kind.split(dataset, config) {
        Ok(pair) => pair,
        Err(err) => {
            tracing::warn!("{} failed: {}", report.title, err);
            report.outcome = ComparisonOutcome::failed(&err);
            return report;
        }
    };

    let groups = [&pair.first, &pair.second]
        .into_iter()
        .map(GroupSummary::from_sample)
        .collect::<Result<Vec<_>>>();
    report.groups = match groups {
        Ok(groups) => groups,
        Err(err) => {
            tracing::warn!("{} failed: {:#}", report.title, err);
            report.outcome = ComparisonOutcome::Failed {
                error: "summary".to_string(),
                message: format!("{:#}", err),
            };
            return report;
        }
    };

    report.outcome = match engine.select_and_run(&pair.first, &pair.second) {
        Ok(verdict) => {
            tracing::info!(
                "{}: {} p={:.6} reject={}",
                report.title,
                verdict.procedure,
                verdict.p_value,
                verdict.reject_null()
            );
            ComparisonOutcome::Completed {
                conclusion: kind.conclusion(&verdict, config),
                verdict,
            }
        }
        Err(err) => {
            tracing::warn!("{} failed: {}", report.title, err);
            ComparisonOutcome::failed(&err)
        }
    };

    report
}

impl AbsenceReport {
    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        report.push_str("📊 Sick-leave absence report\n");
        report.push_str(&format!(
            "Records: {} ({} with more than {} missed work days)\n",
            self.records, self.eligible, self.config.min_work_days
        ));
        report.push_str(&format!(
            "Significance level: {}, alternative: {}\n",
            self.config.hypothesis.alpha, self.config.hypothesis.alternative
        ));

        for comparison in &self.comparisons {
            report.push_str(&format!("\n=== {} ===\n", comparison.title));
            report.push_str(&format!("Claim: {}\n\n", comparison.claim));

            if !comparison.groups.is_empty() {
                report.push_str(&format!(
                    "  {:<16} {:>5} {:>8} {:>8} {:>7} {:>7} {:>7} {:>7} {:>7}\n",
                    "group", "n", "mean", "std", "min", "q1", "median", "q3", "max"
                ));
                for group in &comparison.groups {
                    match &group.stats {
                        Some(s) => report.push_str(&format!(
                            "  {:<16} {:>5} {:>8.2} {:>8.2} {:>7.1} {:>7.1} {:>7.1} {:>7.1} {:>7.1}\n",
                            group.label, group.n, s.mean, s.std_dev, s.min, s.q1, s.median, s.q3, s.max
                        )),
                        None => report.push_str(&format!("  {:<16} {:>5}\n", group.label, group.n)),
                    }
                }
                report.push('\n');
            }

            match &comparison.outcome {
                ComparisonOutcome::Completed {
                    verdict,
                    conclusion,
                } => {
                    report.push_str(&verdict.to_report_string());
                    report.push_str(&format!("\nConclusion: {}\n", conclusion));
                }
                ComparisonOutcome::Failed { error, message } => {
                    report.push_str(&format!("⚠️  Comparison not performed ({})\n", error));
                    report.push_str(&format!("  {}\n", message));
                }
            }
        }

        report
    }
}
