use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmountError {
    #[error("Amount error: {0}")]
    InvalidFormat(String),
}
