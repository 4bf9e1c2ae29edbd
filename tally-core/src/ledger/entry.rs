use crate::amount::Amount;
use chrono::{NaiveDate, NaiveTime};

/// Whether an entry moves money in or out of the account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Deposit,
    Payment,
}

/// One ledger record.
///
/// Entries are append-only: once recorded they are never mutated or removed
/// during a process run. Collection order is insertion order, which matches
/// file order; nothing re-sorts by `date`/`time`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub description: String,
    pub vendor: String,
    /// Signed; payments are stored as the negated entered magnitude.
    pub amount: Amount,
}

impl Entry {
    /// Classifies by the sign of the stored amount.
    ///
    /// A non-negative amount is a deposit; zero counts as a deposit.
    pub fn kind(&self) -> EntryKind {
        if self.amount.is_negative() {
            EntryKind::Payment
        } else {
            EntryKind::Deposit
        }
    }
}
