//! CLI argument parsing for sickday

use crate::config::ReportConfig;
use crate::hypothesis::{Alternative, DegeneratePolicy, VariancePolicy};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for absence reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// Self-contained HTML document
    Html,
}

#[derive(Parser, Debug)]
#[command(name = "sickday")]
#[command(version)]
#[command(
    about = "Sick-leave absence hypothesis testing with automatic test selection",
    long_about = None
)]
pub struct Cli {
    /// CSV file with three columns: missed work days, age, sex (header row required)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Age at which an employee counts as older (default: 35)
    #[arg(long = "age", value_name = "YEARS")]
    pub age: Option<u32>,

    /// Only compare employees who missed more than this many days (default: 2)
    #[arg(long = "work-days", value_name = "DAYS")]
    pub work_days: Option<f64>,

    /// Significance level for the normality gate and the decision (default: 0.05)
    #[arg(long = "alpha", value_name = "ALPHA")]
    pub alpha: Option<f64>,

    /// Alternative hypothesis: greater, less or two-sided (default: greater)
    #[arg(long = "alternative", value_name = "DIRECTION")]
    pub alternative: Option<Alternative>,

    /// Variance assumption of the t-test: pooled or welch (default: pooled)
    #[arg(long = "variance", value_name = "POLICY")]
    pub variance: Option<VariancePolicy>,

    /// Zero-variance groups: rank-based or reject (default: rank-based)
    #[arg(long = "on-degenerate", value_name = "POLICY")]
    pub on_degenerate: Option<DegeneratePolicy>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// TOML configuration file (flags override its values)
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Leave the cumulative distribution tables out of the HTML report
    #[arg(long = "no-ecdf")]
    pub no_ecdf: bool,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Apply the flags given on the command line on top of `config`
    pub fn apply_overrides(&self, config: &mut ReportConfig) {
        if let Some(age) = self.age {
            config.age_threshold = age;
        }
        if let Some(work_days) = self.work_days {
            config.min_work_days = work_days;
        }
        if let Some(alpha) = self.alpha {
            config.hypothesis.alpha = alpha;
        }
        if let Some(alternative) = self.alternative {
            config.hypothesis.alternative = alternative;
        }
        if let Some(variance) = self.variance {
            config.hypothesis.variance = variance;
        }
        if let Some(on_degenerate) = self.on_degenerate {
            config.hypothesis.on_degenerate = on_degenerate;
        }
    }
}
