// Verdict of a two-sample comparison
//
// The verdict only carries numbers and the reject/keep decision; the
// domain sentence ("men miss more days than women") is composed by the
// caller, which knows what the samples mean.

use crate::hypothesis::config::Alternative;
use crate::hypothesis::normality::NormalityResult;
use crate::hypothesis::rank::RankMethod;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Family of the test that produced the verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestKind {
    /// Normality held for both samples: t-test on the means
    Parametric,
    /// Normality rejected (or untestable) for a sample: Mann-Whitney U
    RankBased,
}

impl TestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestKind::Parametric => "parametric",
            TestKind::RankBased => "rank-based",
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete procedure within the test family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Procedure {
    StudentT,
    WelchT,
    MannWhitneyU,
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Procedure::StudentT => "Student's t-test",
            Procedure::WelchT => "Welch's t-test",
            Procedure::MannWhitneyU => "Mann-Whitney U test",
        })
    }
}

/// Conditions the engine handled without failing, surfaced to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum VerdictWarning {
    /// Sample had zero variance; normality check skipped, rank-based test used
    ZeroVariance { sample: String },
    /// Sample exceeds the size the normality p-value is calibrated for
    LargeSample { sample: String, size: usize },
}

impl fmt::Display for VerdictWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerdictWarning::ZeroVariance { sample } => write!(
                f,
                "{}: all observations identical, normality check skipped, rank-based test used",
                sample
            ),
            VerdictWarning::LargeSample { sample, size } => write!(
                f,
                "{}: {} observations exceed the Shapiro-Wilk calibration range, normality p-value is approximate",
                sample, size
            ),
        }
    }
}

/// Immutable result of `select_and_run`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestVerdict {
    /// Which family of test was selected
    pub test: TestKind,

    /// Which procedure computed the statistic
    pub procedure: Procedure,

    /// t statistic or U of sample_a
    pub statistic: f64,

    /// p-value for `alternative`, always within [0, 1]
    pub p_value: f64,

    /// Significance threshold used for both the normality gate and the decision
    pub alpha: f64,

    pub alternative: Alternative,

    /// Degrees of freedom (t-tests only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub df: Option<f64>,

    /// Exact or asymptotic p-value (rank test only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank_method: Option<RankMethod>,

    pub n_a: usize,
    pub n_b: usize,

    /// Shapiro-Wilk result for sample_a (None when the check was skipped)
    pub normality_a: Option<NormalityResult>,

    /// Shapiro-Wilk result for sample_b (None when the check was skipped)
    pub normality_b: Option<NormalityResult>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<VerdictWarning>,
}

impl TestVerdict {
    /// Name of the selected test family: "parametric" or "rank-based"
    pub fn test_name(&self) -> &'static str {
        self.test.as_str()
    }

    /// Reject the null hypothesis (p <= alpha)
    pub fn reject_null(&self) -> bool {
        self.p_value <= self.alpha
    }

    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        if self.reject_null() {
            report.push_str("❌ NULL HYPOTHESIS REJECTED\n\n");
        } else {
            report.push_str("✅ NULL HYPOTHESIS NOT REJECTED\n\n");
        }

        report.push_str(&format!("Test: {} ({})\n", self.procedure, self.test));
        report.push_str(&format!("Alternative: {}\n", self.alternative));
        match self.df {
            Some(df) => report.push_str(&format!("Statistic: {:.3} (df={:.2})\n", self.statistic, df)),
            None => report.push_str(&format!("Statistic: {:.3}\n", self.statistic)),
        }
        report.push_str(&format!("P-value: {:.5}\n", self.p_value));
        report.push_str(&format!(
            "Significance level: {} ({}% confidence)\n",
            self.alpha,
            (1.0 - self.alpha) * 100.0
        ));

        report.push_str("\n📊 Normality (Shapiro-Wilk):\n");
        for (name, n, normality) in [
            ("sample_a", self.n_a, &self.normality_a),
            ("sample_b", self.n_b, &self.normality_b),
        ] {
            match normality {
                Some(result) => report.push_str(&format!(
                    "  {} (n={}, W={:.4}, p={:.4})\n",
                    name, n, result.statistic, result.p_value
                )),
                None => report.push_str(&format!("  {} (n={}, skipped)\n", name, n)),
            }
        }

        if !self.warnings.is_empty() {
            report.push_str("\n⚠️  Warnings:\n");
            for warning in &self.warnings {
                report.push_str(&format!("  - {}\n", warning));
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(p_value: f64) -> TestVerdict {
        TestVerdict {
            test: TestKind::Parametric,
            procedure: Procedure::StudentT,
            statistic: 2.5,
            p_value,
            alpha: 0.05,
            alternative: Alternative::Greater,
            df: Some(12.0),
            rank_method: None,
            n_a: 7,
            n_b: 7,
            normality_a: Some(NormalityResult {
                statistic: 0.84,
                p_value: 0.099,
            }),
            normality_b: None,
            warnings: vec![],
        }
    }

    #[test]
    fn test_reject_null_boundary_is_inclusive() {
        assert!(verdict(0.05).reject_null());
        assert!(verdict(0.01).reject_null());
        assert!(!verdict(0.050001).reject_null());
    }

    #[test]
    fn test_test_name() {
        let mut v = verdict(0.5);
        assert_eq!(v.test_name(), "parametric");
        v.test = TestKind::RankBased;
        assert_eq!(v.test_name(), "rank-based");
    }

    #[test]
    fn test_report_string_rejected() {
        let report = verdict(0.001).to_report_string();
        assert!(report.contains("NULL HYPOTHESIS REJECTED"));
        assert!(report.contains("Student's t-test (parametric)"));
        assert!(report.contains("df=12.00"));
        assert!(report.contains("sample_b (n=7, skipped)"));
    }

    #[test]
    fn test_report_string_warnings() {
        let mut v = verdict(0.7);
        v.warnings.push(VerdictWarning::ZeroVariance {
            sample: "women".to_string(),
        });
        let report = v.to_report_string();
        assert!(report.contains("NOT REJECTED"));
        assert!(report.contains("women: all observations identical"));
    }

    #[test]
    fn test_serializes_kebab_case() {
        let json = serde_json::to_string(&verdict(0.2)).unwrap();
        assert!(json.contains("\"test\":\"parametric\""));
        assert!(json.contains("\"procedure\":\"student-t\""));
        assert!(json.contains("\"alternative\":\"greater\""));
        assert!(!json.contains("rank_method"));
        assert!(!json.contains("warnings"));
    }
}
