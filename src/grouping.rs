//! Partition the dataset into the two groups of each comparison
//!
//! Both comparisons only look at employees who missed more than
//! `min_work_days` days. Sample values are the missed work days.

use crate::dataset::{AbsenceDataset, AbsenceRecord, Sex};
use crate::hypothesis::{Result, Sample};

/// The two samples of a comparison, first one is tested as "greater"
#[derive(Debug, Clone, PartialEq)]
pub struct GroupPair {
    pub first: Sample,
    pub second: Sample,
}

/// Records with strictly more than `min_work_days` missed days
pub fn eligible(
    dataset: &AbsenceDataset,
    min_work_days: f64,
) -> impl Iterator<Item = &AbsenceRecord> + '_ {
    dataset
        .records()
        .iter()
        .filter(move |r| r.work_days > min_work_days)
}

/// Men vs women
pub fn split_by_sex(dataset: &AbsenceDataset, min_work_days: f64) -> Result<GroupPair> {
    let (men, women): (Vec<&AbsenceRecord>, Vec<&AbsenceRecord>) =
        eligible(dataset, min_work_days).partition(|r| r.sex == Sex::Male);

    tracing::debug!(
        "Sex split (work_days > {}): {} men, {} women",
        min_work_days,
        men.len(),
        women.len()
    );

    Ok(GroupPair {
        first: Sample::new("men", work_days(&men))?,
        second: Sample::new("women", work_days(&women))?,
    })
}

/// Employees aged `age_threshold` and over vs younger ones
///
/// Ages are compared as `age > age_threshold - 1`, which for whole years
/// puts exactly `age_threshold` into the older group.
pub fn split_by_age(
    dataset: &AbsenceDataset,
    min_work_days: f64,
    age_threshold: u32,
) -> Result<GroupPair> {
    let boundary = f64::from(age_threshold) - 1.0;
    let (older, younger): (Vec<&AbsenceRecord>, Vec<&AbsenceRecord>) =
        eligible(dataset, min_work_days).partition(|r| r.age > boundary);

    tracing::debug!(
        "Age split at {} (work_days > {}): {} older, {} younger",
        age_threshold,
        min_work_days,
        older.len(),
        younger.len()
    );

    Ok(GroupPair {
        first: Sample::new(format!("aged {}+", age_threshold), work_days(&older))?,
        second: Sample::new(format!("under {}", age_threshold), work_days(&younger))?,
    })
}

fn work_days(records: &[&AbsenceRecord]) -> Vec<f64> {
    records.iter().map(|r| r.work_days).collect()
}
