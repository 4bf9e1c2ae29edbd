mod entry;
mod ledger;
mod store;

pub use entry::{Entry, EntryKind};
pub use ledger::Ledger;
pub use store::{LoadResult, LoadWarning, RecordStore, parse_ledger, parse_line, serialize_entry};
