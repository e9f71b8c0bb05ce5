// Reference distributions used for p-values (statrs)

use crate::hypothesis::error::{HypothesisError, Result};
use statrs::distribution::{Normal, StudentsT};

pub(crate) fn standard_normal() -> Result<Normal> {
    Normal::new(0.0, 1.0).map_err(|e| HypothesisError::Distribution(e.to_string()))
}

pub(crate) fn students_t(df: f64) -> Result<StudentsT> {
    StudentsT::new(0.0, 1.0, df)
        .map_err(|e| HypothesisError::Distribution(format!("Student's t with df={}: {}", df, e)))
}
