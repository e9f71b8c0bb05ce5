//! Report configuration loaded from TOML
//!
//! ```toml
//! age_threshold = 40
//! min_work_days = 3
//!
//! [hypothesis]
//! alpha = 0.01
//! alternative = "greater"
//! variance = "welch"
//! on_degenerate = "reject"
//! ```
//!
//! Every key is optional; command-line flags override the file.

use crate::hypothesis::HypothesisConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings of one report run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Employees of this age and over form the "older" group
    ///
    /// Default: 35
    pub age_threshold: u32,

    /// Only employees who missed strictly more days are compared
    ///
    /// Default: 2
    pub min_work_days: f64,

    /// Significance level, direction and test policies
    pub hypothesis: HypothesisConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            age_threshold: 35,
            min_work_days: 2.0,
            hypothesis: HypothesisConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Load a configuration file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sickday::config::ReportConfig;
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = ReportConfig::from_file("sickday.toml")?;
    /// println!("alpha = {}", config.hypothesis.alpha);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }

    /// Reject settings no report can be built with
    pub fn validate(&self) -> Result<()> {
        if self.age_threshold == 0 {
            anyhow::bail!("age_threshold must be at least 1 year");
        }
        if !self.min_work_days.is_finite() || self.min_work_days < 0.0 {
            anyhow::bail!(
                "min_work_days must be a non-negative number, got {}",
                self.min_work_days
            );
        }
        self.hypothesis.validate()?;
        Ok(())
    }
}
