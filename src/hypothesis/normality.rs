// Shapiro-Wilk normality test
//
// Royston's approximation (Applied Statistics AS R94, 1995):
// - coefficients from Blom scores with polynomial corrections of the
//   one (n <= 5) or two (n > 5) extreme weights
// - W = (Σ aᵢ (x₍ₙ₊₁₋ᵢ₎ - x₍ᵢ₎))² / Σ (xᵢ - x̄)²
// - p-value through a normalising transformation of log(1 - W)
//
// n = 3 has an exact null distribution and is handled separately.

use crate::hypothesis::distribution::standard_normal;
use crate::hypothesis::error::{HypothesisError, Result};
use crate::hypothesis::sample::Sample;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// Fewest observations the normality check accepts
pub const MIN_NORMALITY_SAMPLES: usize = 3;

/// Largest sample the p-value approximation is calibrated for
pub const MAX_CALIBRATED_SAMPLES: usize = 5000;

const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const G: [f64; 2] = [-2.273, 0.459];

/// Outcome of a normality check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalityResult {
    /// Shapiro-Wilk W (0 < W <= 1, close to 1 for normal-looking data)
    pub statistic: f64,
    /// Probability of a W this small under normality
    pub p_value: f64,
}

impl NormalityResult {
    /// Normality is not rejected at `alpha`
    pub fn is_normal(&self, alpha: f64) -> bool {
        self.p_value > alpha
    }
}

/// Run the Shapiro-Wilk test on one sample
///
/// # Errors
/// - `InsufficientData` with fewer than 3 observations
/// - `DegenerateSample` when all observations are identical
///
/// # Example
/// ```
/// use sickday::hypothesis::{normality_test, Sample};
///
/// let sample = Sample::new("a", vec![-1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5]).unwrap();
/// let result = normality_test(&sample).unwrap();
/// assert!(result.statistic > 0.9);
/// assert!(result.p_value > 0.05);
/// ```
pub fn normality_test(sample: &Sample) -> Result<NormalityResult> {
    sample.require_len(MIN_NORMALITY_SAMPLES)?;
    if sample.is_degenerate() {
        return Err(HypothesisError::DegenerateSample {
            sample: sample.label().to_string(),
        });
    }

    // W is location and scale invariant; working on [0, 1] keeps tiny spreads from underflowing
    let x = unit_range(&sample.sorted());
    let n = x.len();
    let ss = sum_of_squares(&x);
    if !ss.is_finite() || ss <= 0.0 {
        return Err(HypothesisError::DegenerateSample {
            sample: sample.label().to_string(),
        });
    }

    if n == 3 {
        return Ok(exact_three(&x, ss));
    }

    let normal = standard_normal()?;
    let a = coefficients(n, &normal)?;
    let w = w_statistic(&x, &a, ss).min(1.0);
    let p_value = p_value(w, n, &normal).clamp(0.0, 1.0);

    Ok(NormalityResult {
        statistic: w,
        p_value,
    })
}

// n = 3: a = (√½, 0, -√½) and P(W <= w) = (6/π)(asin √w - asin √¾)
fn exact_three(x: &[f64], ss: f64) -> NormalityResult {
    let range = std::f64::consts::FRAC_1_SQRT_2 * (x[2] - x[0]);
    let w = (range * range / ss).clamp(0.75, 1.0);
    let p_value = 1.0 - (6.0 / std::f64::consts::PI) * w.sqrt().acos();

    NormalityResult {
        statistic: w,
        p_value: p_value.clamp(0.0, 1.0),
    }
}

// c[0] + c[1]·x + c[2]·x² + ...
fn poly(c: &[f64], x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, &ci| acc * x + ci)
}

/// Half of the antisymmetric weight vector (a₁ >= a₂ >= ... > 0)
pub(crate) fn coefficients(n: usize, normal: &Normal) -> Result<Vec<f64>> {
    let half = n / 2;
    let an25 = n as f64 + 0.25;

    // Blom scores of the lower half (negative)
    let m: Vec<f64> = (1..=half)
        .map(|i| normal.inverse_cdf((i as f64 - 0.375) / an25))
        .collect();
    let summ2 = 2.0 * m.iter().map(|mi| mi * mi).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / (n as f64).sqrt();

    let a1 = poly(&C1, rsn) - m[0] / ssumm2;
    let (corrected, fac_sq, one_minus) = if n > 5 {
        let a2 = poly(&C2, rsn) - m[1] / ssumm2;
        (
            vec![a1, a2],
            summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1],
            1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2,
        )
    } else {
        (vec![a1], summ2 - 2.0 * m[0] * m[0], 1.0 - 2.0 * a1 * a1)
    };

    if fac_sq <= 0.0 || one_minus <= 0.0 {
        return Err(HypothesisError::Distribution(format!(
            "Shapiro-Wilk coefficients undefined for n={}",
            n
        )));
    }
    let fac = (fac_sq / one_minus).sqrt();

    let mut a: Vec<f64> = m.iter().map(|mi| -mi / fac).collect();
    a[..corrected.len()].copy_from_slice(&corrected);
    Ok(a)
}

// Sorted values mapped onto [0, 1] by their range
fn unit_range(sorted: &[f64]) -> Vec<f64> {
    let (Some(&lo), Some(&hi)) = (sorted.first(), sorted.last()) else {
        return Vec::new();
    };
    let range = hi - lo;
    sorted.iter().map(|v| (v - lo) / range).collect()
}

fn sum_of_squares(x: &[f64]) -> f64 {
    let mean = x.iter().sum::<f64>() / x.len() as f64;
    x.iter().map(|v| (v - mean).powi(2)).sum()
}

fn w_statistic(sorted: &[f64], a: &[f64], ss: f64) -> f64 {
    let n = sorted.len();
    let numerator: f64 = a
        .iter()
        .enumerate()
        .map(|(i, ai)| ai * (sorted[n - 1 - i] - sorted[i]))
        .sum();

    numerator * numerator / ss
}

fn p_value(w: f64, n: usize, normal: &Normal) -> f64 {
    let w1 = 1.0 - w;
    if w1 <= 0.0 {
        return 1.0;
    }
    let y = w1.ln();
    let nf = n as f64;

    let z = if n <= 11 {
        let gamma = poly(&G, nf);
        if y >= gamma {
            return 0.0;
        }
        let y = -(gamma - y).ln();
        let m = poly(&C3, nf);
        let s = poly(&C4, nf).exp();
        (y - m) / s
    } else {
        let ln_n = nf.ln();
        let m = poly(&C5, ln_n);
        let s = poly(&C6, ln_n).exp();
        (y - m) / s
    };

    normal.sf(z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(values: &[f64]) -> Sample {
        Sample::new("test", values.to_vec()).unwrap()
    }

    #[test]
    fn test_poly_horner() {
        // 1 + 2x + 3x² at x = 2
        assert_eq!(poly(&[1.0, 2.0, 3.0], 2.0), 17.0);
    }

    #[test]
    fn test_coefficients_match_published_table_n7() {
        // Shapiro & Wilk (1965) table: 0.6233, 0.3031, 0.1401
        let normal = standard_normal().unwrap();
        let a = coefficients(7, &normal).unwrap();
        assert_eq!(a.len(), 3);
        assert!((a[0] - 0.6233).abs() < 0.005, "a1 = {}", a[0]);
        assert!((a[1] - 0.3031).abs() < 0.005, "a2 = {}", a[1]);
        assert!((a[2] - 0.1401).abs() < 0.005, "a3 = {}", a[2]);
    }

    #[test]
    fn test_coefficients_are_normalised() {
        // Σ aᵢ² over the full antisymmetric vector is 1
        let normal = standard_normal().unwrap();
        for n in [4, 5, 6, 10, 25, 100] {
            let a = coefficients(n, &normal).unwrap();
            let total: f64 = 2.0 * a.iter().map(|ai| ai * ai).sum::<f64>();
            assert!((total - 1.0).abs() < 1e-9, "n={} Σa²={}", n, total);
        }
    }

    #[test]
    fn test_symmetric_data_is_normal() {
        let result = normality_test(&sample(&[-1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5])).unwrap();
        assert!(result.statistic > 0.9);
        assert!(result.is_normal(0.05));
    }

    #[test]
    fn test_extreme_outlier_is_not_normal() {
        let result = normality_test(&sample(&[1.0, 1.0, 1.0, 1.0, 50.0])).unwrap();
        assert!(result.statistic < 0.7, "W = {}", result.statistic);
        assert!(!result.is_normal(0.05), "p = {}", result.p_value);
    }

    #[test]
    fn test_skewed_large_sample_is_not_normal() {
        // Geometric growth: heavily right-skewed
        let values: Vec<f64> = (0..40).map(|i| 1.1_f64.powi(i * 2)).collect();
        let result = normality_test(&sample(&values)).unwrap();
        assert!(result.p_value < 0.01, "p = {}", result.p_value);
    }

    #[test]
    fn test_n3_exact() {
        // Equally spaced points reach W = 1
        let result = normality_test(&sample(&[1.0, 2.0, 3.0])).unwrap();
        assert!((result.statistic - 1.0).abs() < 1e-12);
        assert!((result.p_value - 1.0).abs() < 1e-12);

        // Two equal values and one apart reach the minimum W = 0.75
        let result = normality_test(&sample(&[1.0, 1.0, 4.0])).unwrap();
        assert!((result.statistic - 0.75).abs() < 1e-12);
        assert!(result.p_value.abs() < 1e-12);
    }

    #[test]
    fn test_order_does_not_matter() {
        let a = normality_test(&sample(&[5.0, 5.0, 6.0, 5.0, 4.0, 6.0, 5.0])).unwrap();
        let b = normality_test(&sample(&[4.0, 5.0, 5.0, 5.0, 5.0, 6.0, 6.0])).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_too_small() {
        let err = normality_test(&sample(&[1.0, 2.0])).unwrap_err();
        assert_eq!(
            err,
            HypothesisError::InsufficientData {
                sample: "test".to_string(),
                required: 3,
                actual: 2,
            }
        );
    }

    #[test]
    fn test_constant_sample_is_degenerate() {
        let err = normality_test(&sample(&[2.0, 2.0, 2.0, 2.0])).unwrap_err();
        assert!(matches!(err, HypothesisError::DegenerateSample { .. }));
    }

    #[test]
    fn test_tiny_spread_is_scale_invariant() {
        let tiny = normality_test(&sample(&[0.0, 0.0, 1e-170])).unwrap();
        let unit = normality_test(&sample(&[0.0, 0.0, 1.0])).unwrap();
        assert!((tiny.statistic - 0.75).abs() < 1e-12);
        assert!((0.0..=1.0).contains(&tiny.p_value));
        assert_eq!(tiny, unit);

        let tiny = normality_test(&sample(&[0.0, 0.0, 0.0, 1e-170])).unwrap();
        let unit = normality_test(&sample(&[0.0, 0.0, 0.0, 1.0])).unwrap();
        assert!(tiny.statistic < 1.0);
        assert!(!tiny.is_normal(0.05), "p = {}", tiny.p_value);
        assert_eq!(tiny, unit);
    }

    #[test]
    fn test_scaling_keeps_w() {
        let base = [2.0, 3.5, 4.0, 4.5, 5.0, 7.0, 9.5];
        let shifted: Vec<f64> = base.iter().map(|v| 1e6 + v * 1e-3).collect();
        let a = normality_test(&sample(&base)).unwrap();
        let b = normality_test(&sample(&shifted)).unwrap();
        assert!((a.statistic - b.statistic).abs() < 1e-6);
        assert!((a.p_value - b.p_value).abs() < 1e-5);
    }

    #[test]
    fn test_p_value_in_unit_interval() {
        for values in [
            vec![1.0, 2.0, 4.0, 8.0],
            vec![0.0, 0.0, 0.0, 1.0, 100.0, 1000.0],
            vec![3.0, 3.1, 2.9, 3.0, 3.05, 2.95, 3.0, 3.02, 2.98, 3.01, 2.99, 3.0, 3.0],
        ] {
            let result = normality_test(&sample(&values)).unwrap();
            assert!((0.0..=1.0).contains(&result.p_value));
            assert!(result.statistic > 0.0 && result.statistic <= 1.0);
        }
    }
}
