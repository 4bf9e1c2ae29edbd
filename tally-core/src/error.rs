use std::path::PathBuf;
use thiserror::Error;

/// A single stored line that could not be parsed into an [`Entry`].
///
/// These are recovered locally: the offending line is skipped during a load
/// and reported as a [`LoadWarning`], never aborting the whole load.
///
/// [`Entry`]: crate::Entry
/// [`LoadWarning`]: crate::LoadWarning
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected 5 `|`-separated fields, found {0}")]
    FieldCount(usize),
    #[error("invalid date `{0}`, expected YYYY-MM-DD")]
    Date(String),
    #[error("invalid time `{0}`, expected HH:MM:SS")]
    Time(String),
    #[error("invalid amount `{0}`")]
    Amount(String),
}

/// Errors a ledger operation can surface to the caller.
///
/// Each of these aborts only the requested operation, never the process,
/// and leaves both the in-memory collection and the backing file unchanged.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("{field} may not contain `|`")]
    ReservedDelimiter { field: &'static str },
    #[error("could not append to {}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
