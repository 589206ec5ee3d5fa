//! Result of a column-producing computation.

use crate::config::FailurePolicy;
use crate::dataset::{Dataset, RecordId};
use crate::error::{MorphoError, Result};
use morpho_types::Value;

/// A record that could not produce a value.
#[derive(Debug)]
pub struct RecordIssue {
    pub id: RecordId,
    pub error: MorphoError,
}

/// The objects dataset with its new column, plus the records whose cell
/// was left missing.
#[derive(Debug)]
pub struct Outcome {
    pub dataset: Dataset,
    pub issues: Vec<RecordIssue>,
}

impl Outcome {
    /// True when every record received a value.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }

    /// Attach per-record `cells` (in record order) to `objects` as `column`.
    ///
    /// Failed cells become [`Value::Missing`] under
    /// [`FailurePolicy::Collect`]; under [`FailurePolicy::FailFast`] the
    /// first failure in record order is returned instead.
    pub(crate) fn assemble(
        objects: &Dataset,
        column: &str,
        cells: Vec<Result<Value>>,
        policy: FailurePolicy,
    ) -> Result<Self> {
        let mut values = Vec::with_capacity(cells.len());
        let mut issues = Vec::new();

        for (record, cell) in objects.iter().zip(cells) {
            match cell {
                Ok(value) => values.push(value),
                Err(error) => {
                    if policy == FailurePolicy::FailFast {
                        return Err(error);
                    }
                    log::warn!("{} record {}: {}", objects.name(), record.id, error);
                    values.push(Value::Missing);
                    issues.push(RecordIssue {
                        id: record.id,
                        error,
                    });
                }
            }
        }

        if !issues.is_empty() {
            log::warn!(
                "{} of {} records left without '{}'",
                issues.len(),
                objects.len(),
                column
            );
        }

        Ok(Self {
            dataset: objects.clone().with_column(column, values)?,
            issues,
        })
    }
}
