use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub type CohortResult<T> = Result<T, CohortError>;

/// Which input table a row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Customers,
    Orders,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Customers => f.write_str("customers"),
            InputKind::Orders => f.write_str("orders"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CohortError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("{input} file has unexpected format at line {line}: {reason}")]
    MalformedRow {
        input: InputKind,
        line: u64,
        reason: String,
    },

    #[error("customers file {} has no data rows", .0.display())]
    NoCustomers(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CohortError {
    pub fn malformed(input: InputKind, line: u64, reason: impl Into<String>) -> Self {
        CohortError::MalformedRow {
            input,
            line,
            reason: reason.into(),
        }
    }
}
