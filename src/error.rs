use thiserror::Error;

use crate::ir::RawRow;

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Account map has no DEFAULT entry")]
    MissingDefault,
    #[error("Invalid account name '{label}' for pattern '{pattern}': {reason}")]
    InvalidAccount {
        pattern: String,
        label: String,
        reason: String,
    },
    #[error("Account map entries must be strings, found {0}")]
    NonStringEntry(String),
    #[error("No account map configured for provider '{0}'")]
    MissingProvider(String),
    #[error("Failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Unknown income/expense type '{value}' in row {row}")]
    Classification { value: String, row: RawRow },
    #[error("Invalid timestamp '{value}' in row {row}")]
    InvalidTimestamp { value: String, row: RawRow },
    #[error("Invalid amount '{value}' in row {row}")]
    InvalidAmount { value: String, row: RawRow },
    #[error("Missing column {index} in row {row}")]
    MissingField { index: usize, row: RawRow },
}
