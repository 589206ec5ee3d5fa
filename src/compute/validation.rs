//! Validation of caller-supplied parameters.
//!
//! These checks cover contract violations that make a whole computation
//! meaningless. Per-record problems are handled by the calculators.

use crate::dataset::Dataset;
use crate::error::{MorphoError, Result};

/// Validates a search radius.
///
/// Non-positive radii are accepted: they simply find no neighbours.
///
/// # Examples
///
/// ```
/// use morpho::compute::validation::validate_radius;
///
/// assert!(validate_radius(400.0).is_ok());
/// assert!(validate_radius(0.0).is_ok());
/// assert!(validate_radius(f64::NAN).is_err());
/// ```
pub fn validate_radius(radius: f64) -> Result<()> {
    if !radius.is_finite() {
        return Err(MorphoError::InvalidInput(format!(
            "Radius must be finite, got: {}",
            radius
        )));
    }
    Ok(())
}

/// Validates a column name used for output.
pub fn validate_column_name(column: &str) -> Result<()> {
    if column.trim().is_empty() {
        return Err(MorphoError::InvalidInput(
            "Column name must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Checks that every named column exists in `dataset`.
pub fn require_columns(dataset: &Dataset, columns: &[&str]) -> Result<()> {
    for column in columns {
        validate_column_name(column)?;
        dataset.require_column(column)?;
    }
    Ok(())
}

/// Logs when an output column will replace existing values.
pub(crate) fn check_output_column(dataset: &Dataset, column: &str) -> Result<()> {
    validate_column_name(column)?;
    if dataset.has_column(column) {
        log::warn!(
            "Column '{}' already exists in {} and will be overwritten",
            column,
            dataset.name()
        );
    }
    Ok(())
}
