use crate::types::AmountError;
use thiserror::Error;

/// Reasons a dataset load is rejected. Any of these fails the whole load.
#[derive(Debug, Error)]
pub enum DatasetLoadError {
    #[error("Unable to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed CSV input: {0}")]
    Csv(#[from] csv::Error),
    #[error("Required column [{0}] is missing from the header")]
    MissingColumn(&'static str),
    #[error("Row [{row}] has an unparseable transaction_time [{value}]")]
    InvalidTimestamp {
        row: usize,
        value: String
    },
    #[error("Row [{row}] has an invalid amount: {source}")]
    InvalidAmount {
        row: usize,
        #[source]
        source: AmountError
    },
    #[error("Row [{row}] has an invalid {column} value [{value}]")]
    InvalidField {
        row: usize,
        column: &'static str,
        value: String
    }
}

impl DatasetLoadError {
    pub fn invalid_timestamp(row: usize, value: &str) -> Self {
        Self::InvalidTimestamp { row, value: value.to_string() }
    }

    pub fn invalid_amount(row: usize, source: AmountError) -> Self {
        Self::InvalidAmount { row, source }
    }

    pub fn invalid_field(row: usize, column: &'static str, value: &str) -> Self {
        Self::InvalidField { row, column, value: value.to_string() }
    }
}
