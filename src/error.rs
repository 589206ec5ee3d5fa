//! Error types for intensity computations.

use morpho_types::Key;
use thiserror::Error;

use crate::dataset::RecordId;

#[derive(Error, Debug)]
pub enum MorphoError {
    #[error("Column '{column}' not found in {dataset} dataset")]
    ColumnNotFound { dataset: String, column: String },

    #[error("Record id {0} already present in dataset")]
    DuplicateRecordId(RecordId),

    #[error("Key {key} appears more than once in column '{column}'")]
    DuplicateKey { column: String, key: Key },

    #[error("Key {key} from column '{column}' has no match in the joined dataset")]
    JoinMismatch { column: String, key: Key },

    #[error("Block {0} not found in blocks dataset")]
    MissingBlock(Key),

    #[error("Record {id} has no usable key in column '{column}'")]
    InvalidKey { id: RecordId, column: String },

    #[error("Record {id} holds a non-numeric value in column '{column}'")]
    NonNumeric { id: RecordId, column: String },

    #[error("Record {0} has an empty geometry")]
    EmptyGeometry(RecordId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[cfg(feature = "toml")]
    #[error("TOML error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[cfg(feature = "toml")]
    #[error("TOML error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, MorphoError>;
