use thiserror::Error;

/// Error type that captures storage and query failures in the ledger core.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// A date-based filter hit a record whose stored date cannot be read as a
    /// calendar date. Fatal to that filter invocation, unlike load-time
    /// tolerance of malformed lines.
    #[error("data file corrupted: cannot read transaction date `{0}`")]
    DataCorrupted(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
