// Independent two-sample t-test
//
// Pooled (Student): t = (x̄₁ - x̄₂) / √(s²ₚ (1/n₁ + 1/n₂)), df = n₁ + n₂ - 2
// Welch:            t = (x̄₁ - x̄₂) / √(s²₁/n₁ + s²₂/n₂), Welch-Satterthwaite df

use crate::hypothesis::config::{Alternative, VariancePolicy};
use crate::hypothesis::distribution::students_t;
use crate::hypothesis::error::{HypothesisError, Result};
use crate::hypothesis::sample::Sample;
use statrs::distribution::ContinuousCDF;

/// Fewest observations per sample for a variance estimate
pub const MIN_T_TEST_SAMPLES: usize = 2;

/// Result of a two-sample t-test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTestResult {
    pub statistic: f64,
    pub df: f64,
    pub p_value: f64,
}

/// Compare the means of two samples
///
/// # Errors
/// - `InsufficientData` when a sample has fewer than 2 observations
/// - `DegenerateSample` when the standard error is zero (both samples constant)
pub fn t_test(
    a: &Sample,
    b: &Sample,
    alternative: Alternative,
    variance: VariancePolicy,
) -> Result<TTestResult> {
    a.require_len(MIN_T_TEST_SAMPLES)?;
    b.require_len(MIN_T_TEST_SAMPLES)?;

    let n1 = a.len() as f64;
    let n2 = b.len() as f64;
    let var1 = a.variance();
    let var2 = b.variance();

    let (se_sq, df) = match variance {
        VariancePolicy::Pooled => {
            let df = n1 + n2 - 2.0;
            let pooled = ((n1 - 1.0) * var1 + (n2 - 1.0) * var2) / df;
            (pooled * (1.0 / n1 + 1.0 / n2), df)
        }
        VariancePolicy::Welch => {
            let v1 = var1 / n1;
            let v2 = var2 / n2;
            let df = (v1 + v2).powi(2) / (v1 * v1 / (n1 - 1.0) + v2 * v2 / (n2 - 1.0));
            (v1 + v2, df)
        }
    };

    if se_sq.is_nan() || se_sq <= 0.0 || !df.is_finite() {
        let sample = if a.is_degenerate() { a } else { b };
        return Err(HypothesisError::DegenerateSample {
            sample: sample.label().to_string(),
        });
    }

    let statistic = (a.mean() - b.mean()) / se_sq.sqrt();
    let dist = students_t(df)?;

    let p_value = match alternative {
        Alternative::Greater => dist.sf(statistic),
        Alternative::Less => dist.cdf(statistic),
        Alternative::TwoSided => 2.0 * dist.sf(statistic.abs()),
    };

    Ok(TTestResult {
        statistic,
        df,
        p_value: p_value.clamp(0.0, 1.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(label: &str, values: &[f64]) -> Sample {
        Sample::new(label, values.to_vec()).unwrap()
    }

    #[test]
    fn test_pooled_clear_difference() {
        let a = sample("a", &[5.0, 5.0, 6.0, 5.0, 4.0, 6.0, 5.0]);
        let b = sample("b", &[1.0, 2.0, 1.0, 3.0, 2.0, 1.0, 2.0]);

        let result = t_test(&a, &b, Alternative::Greater, VariancePolicy::Pooled).unwrap();
        assert_eq!(result.df, 12.0);
        assert!((result.statistic - 8.8626).abs() < 1e-3, "t = {}", result.statistic);
        assert!(result.p_value < 1e-5);
    }

    #[test]
    fn test_direction() {
        let a = sample("a", &[5.0, 5.0, 6.0, 5.0, 4.0, 6.0, 5.0]);
        let b = sample("b", &[1.0, 2.0, 1.0, 3.0, 2.0, 1.0, 2.0]);

        let less = t_test(&a, &b, Alternative::Less, VariancePolicy::Pooled).unwrap();
        assert!(less.p_value > 0.99999);

        let greater = t_test(&a, &b, Alternative::Greater, VariancePolicy::Pooled).unwrap();
        let two_sided = t_test(&a, &b, Alternative::TwoSided, VariancePolicy::Pooled).unwrap();
        assert!((two_sided.p_value - 2.0 * greater.p_value).abs() < 1e-12);
    }

    #[test]
    fn test_no_difference() {
        let a = sample("a", &[10.0, 12.0, 11.0, 13.0, 10.0]);
        let b = sample("b", &[11.0, 13.0, 10.0, 12.0, 11.0]);

        let result = t_test(&a, &b, Alternative::TwoSided, VariancePolicy::Pooled).unwrap();
        assert!(result.p_value >= 0.05, "p = {}", result.p_value);
    }

    #[test]
    fn test_welch_equals_pooled_for_equal_sizes_and_variances() {
        let a = sample("a", &[1.0, 2.0, 3.0, 4.0]);
        let b = sample("b", &[2.0, 3.0, 4.0, 5.0]);

        let pooled = t_test(&a, &b, Alternative::Greater, VariancePolicy::Pooled).unwrap();
        let welch = t_test(&a, &b, Alternative::Greater, VariancePolicy::Welch).unwrap();
        assert!((pooled.statistic - welch.statistic).abs() < 1e-12);
        assert!((pooled.df - welch.df).abs() < 1e-9);
    }

    #[test]
    fn test_welch_df_smaller_with_unequal_variances() {
        let a = sample("a", &[1.0, 1.1, 0.9, 1.0, 1.05]);
        let b = sample("b", &[0.0, 10.0, 3.0, 8.0, 1.0, 6.0, 4.0]);

        let welch = t_test(&a, &b, Alternative::Greater, VariancePolicy::Welch).unwrap();
        assert!(welch.df < 10.0);
        assert!(welch.df > 4.0);
    }

    #[test]
    fn test_insufficient() {
        let a = sample("a", &[1.0]);
        let b = sample("b", &[1.0, 2.0]);
        assert!(matches!(
            t_test(&a, &b, Alternative::Greater, VariancePolicy::Pooled),
            Err(HypothesisError::InsufficientData { .. })
        ));
    }

    #[test]
    fn test_both_constant_is_degenerate() {
        let a = sample("a", &[3.0, 3.0, 3.0]);
        let b = sample("b", &[1.0, 1.0, 1.0]);
        assert!(matches!(
            t_test(&a, &b, Alternative::Greater, VariancePolicy::Pooled),
            Err(HypothesisError::DegenerateSample { .. })
        ));
    }
}
