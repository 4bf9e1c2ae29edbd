pub mod amount;
pub mod config;
pub mod error;
pub mod ledger;
pub mod reports;

pub use amount::Amount;
pub use config::Config;
pub use error::{LedgerError, RecordError};
pub use ledger::{Entry, EntryKind, Ledger, LoadResult, LoadWarning, RecordStore};
pub use reports::{DateWindow, ReportKind};
