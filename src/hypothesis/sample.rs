// Labeled numeric samples
//
// A Sample owns the observations of one group. Construction validates that
// every value is finite; emptiness and size are checked by the operations
// that need a minimum, so the error can name the required count.

use crate::hypothesis::error::{HypothesisError, Result};

/// Largest accepted magnitude: sums of squares must stay finite
pub const MAX_ABS_VALUE: f64 = 1e150;

/// One group's observations (e.g. missed work days of everyone older than 35)
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    label: String,
    values: Vec<f64>,
}

impl Sample {
    /// Create a sample, rejecting NaN and infinite observations
    ///
    /// # Example
    /// ```
    /// use sickday::hypothesis::Sample;
    ///
    /// let sample = Sample::new("men", vec![3.0, 4.0, 7.0]).unwrap();
    /// assert_eq!(sample.len(), 3);
    /// assert!(Sample::new("women", vec![1.0, f64::NAN]).is_err());
    /// ```
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        let label = label.into();

        if let Some(position) = values.iter().position(|v| !v.is_finite()) {
            return Err(HypothesisError::InvalidInput {
                reason: format!(
                    "observation #{} is not a finite number ({})",
                    position + 1,
                    values[position]
                ),
                sample: label,
            });
        }

        if let Some(position) = values.iter().position(|v| v.abs() > MAX_ABS_VALUE) {
            return Err(HypothesisError::InvalidInput {
                reason: format!(
                    "observation #{} is too large in magnitude ({:e})",
                    position + 1,
                    values[position]
                ),
                sample: label,
            });
        }

        Ok(Self { label, values })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fail with `InsufficientData` unless the sample has `required` observations
    pub fn require_len(&self, required: usize) -> Result<()> {
        if self.values.len() < required {
            return Err(HypothesisError::InsufficientData {
                sample: self.label.clone(),
                required,
                actual: self.values.len(),
            });
        }
        Ok(())
    }

    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Unbiased sample variance (divides by n - 1)
    pub fn variance(&self) -> f64 {
        let n = self.values.len();
        if n < 2 {
            return 0.0;
        }
        let mean = self.mean();
        self.values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    }

    /// True when every observation is identical
    ///
    /// Compares the range exactly: any two distinct observations make the
    /// sample non-degenerate.
    pub fn is_degenerate(&self) -> bool {
        match self.values.split_first() {
            Some((first, rest)) => rest.iter().all(|v| v == first),
            None => false,
        }
    }

    /// Observations in ascending order
    pub fn sorted(&self) -> Vec<f64> {
        let mut sorted = self.values.clone();
        sorted.sort_by(f64::total_cmp);
        sorted
    }
}
