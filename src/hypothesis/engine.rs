// Test selection: normality gate, then parametric or rank-based comparison
//
// 1. Shapiro-Wilk on each sample
// 2. Both p-values above alpha → t-test (variance policy from config)
// 3. Otherwise → Mann-Whitney U
//
// Zero-variance samples cannot be checked for normality. Depending on
// DegeneratePolicy they either fail the call or skip straight to the rank
// test with a warning attached to the verdict.

use crate::hypothesis::config::{Alternative, DegeneratePolicy, HypothesisConfig, VariancePolicy};
use crate::hypothesis::error::{HypothesisError, Result};
use crate::hypothesis::normality::{
    normality_test, NormalityResult, MAX_CALIBRATED_SAMPLES, MIN_NORMALITY_SAMPLES,
};
use crate::hypothesis::parametric::t_test;
use crate::hypothesis::rank::mann_whitney_u;
use crate::hypothesis::sample::Sample;
use crate::hypothesis::verdict::{Procedure, TestKind, TestVerdict, VerdictWarning};

/// Stateless selector between the parametric and the rank-based test
///
/// Holds only its configuration, so one engine can serve any number of
/// concurrent comparisons.
#[derive(Debug, Clone)]
pub struct HypothesisEngine {
    config: HypothesisConfig,
}

impl Default for HypothesisEngine {
    fn default() -> Self {
        Self {
            config: HypothesisConfig::default(),
        }
    }
}

impl HypothesisEngine {
    /// Create an engine, rejecting an invalid configuration
    pub fn new(config: HypothesisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &HypothesisConfig {
        &self.config
    }

    /// Shapiro-Wilk check of a single sample
    pub fn normality_test(&self, sample: &Sample) -> Result<NormalityResult> {
        normality_test(sample)
    }

    /// Select the appropriate test for the pair and run it
    ///
    /// # Errors
    /// - `InsufficientData` when a sample has fewer than 3 observations
    /// - `DegenerateSample` when a sample is constant and the policy is
    ///   `Reject`, or when every pooled observation is identical
    ///
    /// # Example
    /// ```
    /// use sickday::hypothesis::{HypothesisEngine, Sample, TestKind};
    ///
    /// let a = Sample::new("a", vec![5.0, 5.0, 6.0, 5.0, 4.0, 6.0, 5.0]).unwrap();
    /// let b = Sample::new("b", vec![1.0, 2.0, 1.0, 3.0, 2.0, 1.0, 2.0]).unwrap();
    ///
    /// let verdict = HypothesisEngine::default().select_and_run(&a, &b).unwrap();
    /// assert_eq!(verdict.test, TestKind::Parametric);
    /// assert!(verdict.reject_null());
    /// ```
    pub fn select_and_run(&self, sample_a: &Sample, sample_b: &Sample) -> Result<TestVerdict> {
        let alpha = self.config.alpha;

        sample_a.require_len(MIN_NORMALITY_SAMPLES)?;
        sample_b.require_len(MIN_NORMALITY_SAMPLES)?;

        let mut warnings = Vec::new();

        for sample in [sample_a, sample_b] {
            if !sample.is_degenerate() {
                continue;
            }
            match self.config.on_degenerate {
                DegeneratePolicy::Reject => {
                    return Err(HypothesisError::DegenerateSample {
                        sample: sample.label().to_string(),
                    });
                }
                DegeneratePolicy::RankBased => {
                    tracing::warn!(
                        "Sample {} has zero variance; skipping normality check, using rank-based test",
                        sample.label()
                    );
                    warnings.push(VerdictWarning::ZeroVariance {
                        sample: sample.label().to_string(),
                    });
                }
            }
        }

        for sample in [sample_a, sample_b] {
            if sample.len() > MAX_CALIBRATED_SAMPLES {
                warnings.push(VerdictWarning::LargeSample {
                    sample: sample.label().to_string(),
                    size: sample.len(),
                });
            }
        }

        let normality_a = checked_normality(sample_a)?;
        let normality_b = checked_normality(sample_b)?;

        let both_normal = matches!(
            (&normality_a, &normality_b),
            (Some(a), Some(b)) if a.is_normal(alpha) && b.is_normal(alpha)
        );

        tracing::debug!(
            "Normality {}: {:?}, {}: {:?} (alpha={}) → {}",
            sample_a.label(),
            normality_a.map(|r| r.p_value),
            sample_b.label(),
            normality_b.map(|r| r.p_value),
            alpha,
            if both_normal { "parametric" } else { "rank-based" }
        );

        let verdict = if both_normal {
            let result = t_test(
                sample_a,
                sample_b,
                self.config.alternative,
                self.config.variance,
            )?;
            TestVerdict {
                test: TestKind::Parametric,
                procedure: match self.config.variance {
                    VariancePolicy::Pooled => Procedure::StudentT,
                    VariancePolicy::Welch => Procedure::WelchT,
                },
                statistic: result.statistic,
                p_value: result.p_value,
                alpha,
                alternative: self.config.alternative,
                df: Some(result.df),
                rank_method: None,
                n_a: sample_a.len(),
                n_b: sample_b.len(),
                normality_a,
                normality_b,
                warnings,
            }
        } else {
            let result = mann_whitney_u(sample_a, sample_b, self.config.alternative)?;
            TestVerdict {
                test: TestKind::RankBased,
                procedure: Procedure::MannWhitneyU,
                statistic: result.statistic,
                p_value: result.p_value,
                alpha,
                alternative: self.config.alternative,
                df: None,
                rank_method: Some(result.method),
                n_a: sample_a.len(),
                n_b: sample_b.len(),
                normality_a,
                normality_b,
                warnings,
            }
        };

        tracing::debug!(
            "{} → statistic={:.4}, p={:.6}, reject={}",
            verdict.procedure,
            verdict.statistic,
            verdict.p_value,
            verdict.reject_null()
        );

        Ok(verdict)
    }
}

// Degenerate samples were already dealt with by policy; they get no normality result
fn checked_normality(sample: &Sample) -> Result<Option<NormalityResult>> {
    if sample.is_degenerate() {
        return Ok(None);
    }
    normality_test(sample).map(Some)
}

/// Run the selection with the default policies and an explicit direction and alpha
///
/// # Example
/// ```
/// use sickday::hypothesis::{select_and_run, Alternative, Sample, TestKind};
///
/// let a = Sample::new("a", vec![1.0, 1.0, 1.0, 1.0, 50.0]).unwrap();
/// let b = Sample::new("b", vec![2.0, 2.0, 2.0, 2.0, 2.0]).unwrap();
///
/// let verdict = select_and_run(&a, &b, Alternative::Greater, 0.05).unwrap();
/// assert_eq!(verdict.test, TestKind::RankBased);
/// assert!(!verdict.p_value.is_nan());
/// ```
pub fn select_and_run(
    sample_a: &Sample,
    sample_b: &Sample,
    alternative: Alternative,
    alpha: f64,
) -> Result<TestVerdict> {
    let config = HypothesisConfig::default()
        .with_alpha(alpha)
        .with_alternative(alternative);
    HypothesisEngine::new(config)?.select_and_run(sample_a, sample_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hypothesis::rank::RankMethod;

    fn sample(label: &str, values: &[f64]) -> Sample {
        Sample::new(label, values.to_vec()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_alpha() {
        let config = HypothesisConfig::default().with_alpha(0.0);
        assert!(matches!(
            HypothesisEngine::new(config),
            Err(HypothesisError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_insufficient_checked_before_degenerate() {
        let a = sample("a", &[1.0, 1.0]);
        let b = sample("b", &[1.0, 2.0, 3.0]);
        let err = HypothesisEngine::default().select_and_run(&a, &b).unwrap_err();
        assert!(matches!(err, HypothesisError::InsufficientData { actual: 2, .. }));
    }

    #[test]
    fn test_reject_policy() {
        let config = HypothesisConfig {
            on_degenerate: DegeneratePolicy::Reject,
            ..HypothesisConfig::default()
        };
        let engine = HypothesisEngine::new(config).unwrap();
        let a = sample("a", &[1.0, 1.0, 1.0, 1.0, 50.0]);
        let b = sample("b", &[2.0, 2.0, 2.0, 2.0, 2.0]);

        assert_eq!(
            engine.select_and_run(&a, &b).unwrap_err(),
            HypothesisError::DegenerateSample {
                sample: "b".to_string()
            }
        );
    }

    #[test]
    fn test_rank_policy_records_warning_and_skips_normality() {
        let a = sample("a", &[1.0, 2.0, 3.0, 4.0, 5.0]);
        let b = sample("b", &[2.0, 2.0, 2.0, 2.0, 2.0]);
        let verdict = HypothesisEngine::default().select_and_run(&a, &b).unwrap();

        assert_eq!(verdict.test, TestKind::RankBased);
        assert!(verdict.normality_a.is_some());
        assert!(verdict.normality_b.is_none());
        assert_eq!(
            verdict.warnings,
            vec![VerdictWarning::ZeroVariance {
                sample: "b".to_string()
            }]
        );
    }

    #[test]
    fn test_welch_policy_reports_welch_procedure() {
        let config = HypothesisConfig {
            variance: VariancePolicy::Welch,
            ..HypothesisConfig::default()
        };
        let engine = HypothesisEngine::new(config).unwrap();
        let a = sample("a", &[5.0, 5.0, 6.0, 5.0, 4.0, 6.0, 5.0]);
        let b = sample("b", &[1.0, 2.0, 1.0, 3.0, 2.0, 1.0, 2.0]);

        let verdict = engine.select_and_run(&a, &b).unwrap();
        assert_eq!(verdict.procedure, Procedure::WelchT);
        assert!(verdict.df.unwrap() < 12.0);
    }

    #[test]
    fn test_rank_verdict_carries_method() {
        let a = sample("a", &[1.0, 1.0, 1.0, 1.0, 50.0]);
        let b = sample("b", &[2.0, 3.0, 4.0, 5.0, 6.0]);
        let verdict = HypothesisEngine::default().select_and_run(&a, &b).unwrap();
        assert_eq!(verdict.test, TestKind::RankBased);
        assert_eq!(verdict.rank_method, Some(RankMethod::Asymptotic));
        assert!(verdict.df.is_none());
    }

    #[test]
    fn test_engine_normality_test_delegates() {
        let engine = HypothesisEngine::default();
        let s = sample("a", &[-1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5]);
        assert_eq!(engine.normality_test(&s).unwrap(), normality_test(&s).unwrap());
    }
}
