// Mann-Whitney U rank-sum test
//
// U_a = R_a - n_a(n_a + 1)/2 counts the pairs (x from a, y from b) with
// x > y (ties count one half). Under H₀ both samples come from the same
// distribution and U_a is symmetric around n_a·n_b/2.
//
// p-value:
// - exact null distribution when there are no ties and at least one
//   sample has 8 or fewer observations
// - otherwise normal approximation with tie-corrected variance and a
//   0.5 continuity correction

use crate::hypothesis::config::Alternative;
use crate::hypothesis::distribution::standard_normal;
use crate::hypothesis::error::{HypothesisError, Result};
use crate::hypothesis::sample::Sample;
use serde::{Deserialize, Serialize};
use statrs::distribution::ContinuousCDF;

/// Exact p-values only when one sample has at most this many observations
pub const EXACT_MAX_SMALLER: usize = 8;

/// Upper bound on n_a·n_b for the exact distribution (keeps the count table small)
pub const EXACT_MAX_CELLS: usize = 10_000;

/// How the p-value was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankMethod {
    Exact,
    Asymptotic,
}

/// Result of a Mann-Whitney U test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MannWhitneyResult {
    /// U of the first sample
    pub statistic: f64,
    pub p_value: f64,
    pub method: RankMethod,
}

/// Compare two samples by ranks
///
/// # Errors
/// - `InsufficientData` when a sample is empty
/// - `DegenerateSample` when every pooled observation is identical
///
/// # Example
/// ```
/// use sickday::hypothesis::{mann_whitney_u, Alternative, Sample};
///
/// let a = Sample::new("a", vec![6.0, 7.0, 8.0, 9.0, 10.0]).unwrap();
/// let b = Sample::new("b", vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// let result = mann_whitney_u(&a, &b, Alternative::Greater).unwrap();
/// assert_eq!(result.statistic, 25.0);
/// assert!(result.p_value < 0.01);
/// ```
pub fn mann_whitney_u(a: &Sample, b: &Sample, alternative: Alternative) -> Result<MannWhitneyResult> {
    a.require_len(1)?;
    b.require_len(1)?;

    let n1 = a.len();
    let n2 = b.len();
    let n = n1 + n2;

    let mut pooled: Vec<(f64, bool)> = a
        .values()
        .iter()
        .map(|&v| (v, true))
        .chain(b.values().iter().map(|&v| (v, false)))
        .collect();
    pooled.sort_by(|x, y| x.0.total_cmp(&y.0));

    let (ranks, tie_term) = average_ranks(&pooled);
    let nf = n as f64;
    if tie_term >= nf * nf * nf - nf {
        return Err(HypothesisError::DegenerateSample {
            sample: format!("{} + {}", a.label(), b.label()),
        });
    }

    let rank_sum_a: f64 = pooled
        .iter()
        .zip(&ranks)
        .filter(|((_, from_a), _)| *from_a)
        .map(|(_, rank)| rank)
        .sum();

    let n1f = n1 as f64;
    let n2f = n2 as f64;
    let u_a = rank_sum_a - n1f * (n1f + 1.0) / 2.0;
    let u_b = n1f * n2f - u_a;

    let (u, factor) = match alternative {
        Alternative::Greater => (u_a, 1.0),
        Alternative::Less => (u_b, 1.0),
        Alternative::TwoSided => (u_a.max(u_b), 2.0),
    };

    let exact = tie_term == 0.0 && n1.min(n2) <= EXACT_MAX_SMALLER && n1 * n2 <= EXACT_MAX_CELLS;

    let (p_value, method) = if exact {
        let tail = exact_upper_tail(n1, n2, u.round() as usize);
        (factor * tail, RankMethod::Exact)
    } else {
        let mu = n1f * n2f / 2.0;
        let sigma = (n1f * n2f / 12.0 * ((nf + 1.0) - tie_term / (nf * (nf - 1.0)))).sqrt();
        let z = (u - mu - 0.5) / sigma;
        (factor * standard_normal()?.sf(z), RankMethod::Asymptotic)
    };

    Ok(MannWhitneyResult {
        statistic: u_a,
        p_value: p_value.clamp(0.0, 1.0),
        method,
    })
}

/// Average ranks (1-based) of sorted observations and the tie term Σ(t³ - t)
fn average_ranks(sorted: &[(f64, bool)]) -> (Vec<f64>, f64) {
    let n = sorted.len();
    let mut ranks = vec![0.0; n];
    let mut tie_term = 0.0;

    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && sorted[j].0 == sorted[i].0 {
            j += 1;
        }
        let average = (i + 1 + j) as f64 / 2.0;
        ranks[i..j].fill(average);

        let t = (j - i) as f64;
        tie_term += t * t * t - t;
        i = j;
    }

    (ranks, tie_term)
}

/// P(U >= u) under H₀ for sample sizes n1, n2 without ties
///
/// Builds the frequency table of U by adding observations in increasing
/// order: a new largest value from the first sample beats all j values of
/// the second sample already placed, so
/// f(i, j, k) = f(i, j - 1, k) + f(i - 1, j, k - j).
fn exact_upper_tail(n1: usize, n2: usize, u: usize) -> f64 {
    let max_u = n1 * n2;
    if u == 0 {
        return 1.0;
    }
    if u > max_u {
        return 0.0;
    }

    // The distribution only depends on the unordered pair of sizes
    let (m, n) = if n1 <= n2 { (n1, n2) } else { (n2, n1) };

    // freq[i][k]: arrangements of i first-sample and j second-sample values with U = k
    let mut freq: Vec<Vec<f64>> = (0..=m)
        .map(|_| {
            let mut row = vec![0.0; max_u + 1];
            row[0] = 1.0;
            row
        })
        .collect();

    for j in 1..=n {
        for i in 1..=m {
            let (lower, upper) = freq.split_at_mut(i);
            let previous = &lower[i - 1];
            let current = &mut upper[0];
            for k in (j..=i * j).rev() {
                current[k] += previous[k - j];
            }
        }
    }

    let counts = &freq[m];
    let total: f64 = counts.iter().sum();
    let tail: f64 = counts[u..].iter().sum();
    tail / total
}
