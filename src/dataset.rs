//! Sick-leave absence dataset
//!
//! The input is a CSV export with a header row and three positional
//! columns: work days missed due to sickness, age in years, sex. Header
//! names are ignored (exports come with localized titles), only the
//! position matters.
//!
//! ```csv
//! "Количество больничных дней","Возраст","Пол"
//! 5,39,"Ж"
//! 4,54,"М"
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Number of positional columns in every row
pub const COLUMN_COUNT: usize = 3;

const COLUMN_NAMES: [&str; COLUMN_COUNT] = ["work_days", "age", "sex"];

/// Largest accepted numeric cell; group summaries run in single precision
pub const MAX_VALUE: f64 = f32::MAX as f64;

/// Errors while reading an absence dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Line {line}: expected {expected} columns (work_days, age, sex), found {found}")]
    ColumnCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: {column} is empty")]
    MissingValue { line: u64, column: &'static str },

    #[error("Line {line}: {column} value '{value}' is not a finite number")]
    InvalidNumber {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("Line {line}: {column} value {value} must not be negative")]
    Negative {
        line: u64,
        column: &'static str,
        value: f64,
    },

    #[error("Line {line}: {column} value {value:e} exceeds the supported maximum {:e}", MAX_VALUE)]
    TooLarge {
        line: u64,
        column: &'static str,
        value: f64,
    },
}

/// Sex as recorded in the export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Normalize a raw label
    ///
    /// Anything carrying an "M" (Cyrillic "М" or Latin "M") is male,
    /// every other value is female.
    pub fn from_label(label: &str) -> Self {
        if label.contains('М') || label.contains('M') {
            Sex::Male
        } else {
            Sex::Female
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sex::Male => "male",
            Sex::Female => "female",
        })
    }
}

/// One employee row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbsenceRecord {
    /// Work days missed due to sickness over the year
    pub work_days: f64,
    /// Age in years
    pub age: f64,
    pub sex: Sex,
}

/// Parsed dataset, rows in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AbsenceDataset {
    records: Vec<AbsenceRecord>,
}

impl AbsenceDataset {
    pub fn from_records(records: Vec<AbsenceRecord>) -> Self {
        Self { records }
    }

    /// Load a dataset from a CSV file
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let file = File::open(path)?;
        let dataset = Self::from_reader(file)?;
        tracing::info!(
            "Loaded {} absence records from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Parse a dataset from any reader (header row required)
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?;
        if headers.len() != COLUMN_COUNT {
            return Err(DatasetError::ColumnCount {
                line: 1,
                expected: COLUMN_COUNT,
                found: headers.len(),
            });
        }

        let mut records = Vec::new();
        for row in csv_reader.records() {
            let row = row?;
            let line = row.position().map_or(0, |p| p.line());

            // Blank lines come through as a single empty field
            if row.iter().all(str::is_empty) {
                continue;
            }
            if row.len() != COLUMN_COUNT {
                return Err(DatasetError::ColumnCount {
                    line,
                    expected: COLUMN_COUNT,
                    found: row.len(),
                });
            }

            let work_days = parse_number(line, 0, &row[0])?;
            let age = parse_number(line, 1, &row[1])?;
            let sex = &row[2];
            if sex.is_empty() {
                return Err(DatasetError::MissingValue {
                    line,
                    column: COLUMN_NAMES[2],
                });
            }

            records.push(AbsenceRecord {
                work_days,
                age,
                sex: Sex::from_label(sex),
            });
        }

        tracing::debug!("Parsed {} rows", records.len());
        Ok(Self { records })
    }

    pub fn records(&self) -> &[AbsenceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn parse_number(line: u64, column: usize, raw: &str) -> Result<f64, DatasetError> {
    let name = COLUMN_NAMES[column];
    if raw.is_empty() {
        return Err(DatasetError::MissingValue { line, column: name });
    }

    // Spreadsheet exports may use a decimal comma
    let value: f64 = raw
        .replace(',', ".")
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| DatasetError::InvalidNumber {
            line,
            column: name,
            value: raw.to_string(),
        })?;

    if value < 0.0 {
        return Err(DatasetError::Negative {
            line,
            column: name,
            value,
        });
    }
    if value > MAX_VALUE {
        return Err(DatasetError::TooLarge {
            line,
            column: name,
            value,
        });
    }
    Ok(value)
}
