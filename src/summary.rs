//! Descriptive statistics of a group
//!
//! Box-plot numbers (quartiles via aprender's R-7 quantiles) and the
//! empirical CDF polygon of each compared group.
//!
//! - Uses trueno::Vector for mean, standard deviation and range
//! - Uses aprender::stats::DescriptiveStats for quartiles

use crate::hypothesis::Sample;
use anyhow::{Context, Result};
use aprender::stats::DescriptiveStats;
use serde::{Deserialize, Serialize};
use trueno::Vector;

/// Box-plot statistics of a non-empty group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxStats {
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// One vertex of the cumulative probability polygon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EcdfPoint {
    pub value: f64,
    /// Share of observations at or below this vertex, i/n
    pub cumulative: f64,
}

/// Summary of one group of a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub label: String,
    pub n: usize,
    /// Absent for an empty group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<BoxStats>,
    pub ecdf: Vec<EcdfPoint>,
}

impl GroupSummary {
    pub fn from_sample(sample: &Sample) -> Result<Self> {
        let stats = if sample.is_empty() {
            None
        } else {
            Some(box_stats(sample.values())?)
        };

        Ok(Self {
            label: sample.label().to_string(),
            n: sample.len(),
            stats,
            ecdf: ecdf(sample),
        })
    }
}

fn box_stats(values: &[f64]) -> Result<BoxStats> {
    let data: Vec<f32> = values.iter().map(|&v| v as f32).collect();
    if let Some(v) = values.iter().find(|v| !(**v as f32).is_finite()) {
        anyhow::bail!("Value {:e} exceeds the single-precision summary range", v);
    }
    let vector = Vector::from_slice(&data);

    // trueno 0.7 returns Result for every reduction
    let mean = vector.mean().context("Failed to compute mean")?;
    let std_dev = vector.stddev().context("Failed to compute standard deviation")?;
    let min = vector.min().context("Failed to compute minimum")?;
    let max = vector.max().context("Failed to compute maximum")?;

    let stats = DescriptiveStats::new(&vector);
    let quantile = |q: f64| {
        stats
            .quantile(q)
            .map_err(|e| anyhow::anyhow!("Failed to compute quantile {}: {}", q, e))
    };

    Ok(BoxStats {
        mean: f64::from(mean),
        std_dev: f64::from(std_dev),
        min: f64::from(min),
        q1: f64::from(quantile(0.25)?),
        median: f64::from(quantile(0.5)?),
        q3: f64::from(quantile(0.75)?),
        max: f64::from(max),
    })
}

/// Sorted observations paired with i/n, duplicates kept as steps
pub fn ecdf(sample: &Sample) -> Vec<EcdfPoint> {
    let n = sample.len() as f64;
    sample
        .sorted()
        .into_iter()
        .enumerate()
        .map(|(i, value)| EcdfPoint {
            value,
            cumulative: (i + 1) as f64 / n,
        })
        .collect()
}
