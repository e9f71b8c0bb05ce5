// Automatic selection of a two-sample significance test
//
// Given two groups of observations and a one-sided alternative ("the
// first group's values tend to be greater"), the engine checks each group
// for normality and runs either a t-test on the means or a Mann-Whitney
// rank-sum test, returning a typed verdict.
//
// Scientific Foundation:
// [1] Shapiro, S. S. & Wilk, M. B. (1965). An analysis of variance test for
//     normality (complete samples). Biometrika, 52(3-4), 591-611.
// [2] Royston, P. (1995). Remark AS R94: A remark on Algorithm AS 181.
//     Applied Statistics, 44(4), 547-551.
// [3] Mann, H. B. & Whitney, D. R. (1947). On a test of whether one of two
//     random variables is stochastically larger than the other.
//     Annals of Mathematical Statistics, 18(1), 50-60.
//
// The module is pure: no I/O, no shared state. Probability tails come from
// statrs.

mod config;
mod distribution;
mod engine;
mod error;
mod normality;
mod parametric;
mod rank;
mod sample;
mod verdict;

pub use config::{Alternative, DegeneratePolicy, HypothesisConfig, VariancePolicy};
pub use engine::{select_and_run, HypothesisEngine};
pub use error::{HypothesisError, Result};
pub use normality::{normality_test, NormalityResult, MAX_CALIBRATED_SAMPLES, MIN_NORMALITY_SAMPLES};
pub use parametric::{t_test, TTestResult};
pub use rank::{mann_whitney_u, MannWhitneyResult, RankMethod};
pub use sample::Sample;
pub use verdict::{Procedure, TestKind, TestVerdict, VerdictWarning};
