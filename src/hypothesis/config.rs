// Configuration for hypothesis test selection
//
// alpha and the alternative direction are explicit options, never constants
// buried inside the test code.

use crate::hypothesis::error::{HypothesisError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of the alternative hypothesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alternative {
    /// sample_a's values tend to be greater than sample_b's
    #[default]
    Greater,
    /// sample_a's values tend to be smaller than sample_b's
    Less,
    /// The samples differ in either direction
    TwoSided,
}

/// Variance assumption of the parametric test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariancePolicy {
    /// Student's t-test with pooled variance
    #[default]
    Pooled,
    /// Welch's t-test (unequal variances, Welch-Satterthwaite df)
    Welch,
}

/// What to do when a sample has zero variance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DegeneratePolicy {
    /// Skip the normality check and run the rank-based test, recording a warning
    #[default]
    RankBased,
    /// Fail with `DegenerateSample`
    Reject,
}

macro_rules! impl_kebab_enum {
    ($ty:ty, $what:literal, [$(($variant:path, $name:literal)),+ $(,)?]) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($variant => $name,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($name => Ok($variant),)+
                    other => Err(format!(
                        "unknown {} '{}' (expected one of: {})",
                        $what,
                        other,
                        [$($name),+].join(", ")
                    )),
                }
            }
        }
    };
}

impl_kebab_enum!(
    Alternative,
    "alternative",
    [
        (Alternative::Greater, "greater"),
        (Alternative::Less, "less"),
        (Alternative::TwoSided, "two-sided"),
    ]
);

impl_kebab_enum!(
    VariancePolicy,
    "variance policy",
    [(VariancePolicy::Pooled, "pooled"), (VariancePolicy::Welch, "welch")]
);

impl_kebab_enum!(
    DegeneratePolicy,
    "degenerate policy",
    [
        (DegeneratePolicy::RankBased, "rank-based"),
        (DegeneratePolicy::Reject, "reject"),
    ]
);

/// Configuration for the hypothesis engine
///
/// # Example
/// ```
/// use sickday::hypothesis::HypothesisConfig;
///
/// let config = HypothesisConfig::default();
/// assert_eq!(config.alpha, 0.05); // 95% confidence
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HypothesisConfig {
    /// Significance level
    ///
    /// Used twice: a sample whose Shapiro-Wilk p-value is at or below alpha is
    /// treated as non-normal, and the null hypothesis is rejected when the
    /// comparison p-value is at or below alpha.
    pub alpha: f64,

    /// Direction of the alternative hypothesis
    pub alternative: Alternative,

    /// Pooled (Student) or Welch variance for the parametric test
    pub variance: VariancePolicy,

    /// Handling of zero-variance samples
    pub on_degenerate: DegeneratePolicy,
}

impl Default for HypothesisConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            alternative: Alternative::Greater,
            variance: VariancePolicy::Pooled,
            on_degenerate: DegeneratePolicy::RankBased,
        }
    }
}

impl HypothesisConfig {
    /// Create a strict configuration (fewer false positives, more false negatives)
    pub fn strict() -> Self {
        Self {
            alpha: 0.01,
            on_degenerate: DegeneratePolicy::Reject,
            ..Self::default()
        }
    }

    /// Create a permissive configuration (more false positives, fewer false negatives)
    pub fn permissive() -> Self {
        Self {
            alpha: 0.10,
            ..Self::default()
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_alternative(mut self, alternative: Alternative) -> Self {
        self.alternative = alternative;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(HypothesisError::InvalidConfig(format!(
                "alpha must be in (0, 1), got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}
