//! The core `Ledger` struct and its associated types, providing the primary API for interaction.
use super::entry::{Entry, EntryKind};
use super::store::{self, LoadWarning, RecordStore};
use crate::amount::Amount;
use crate::config::Config;
use crate::error::LedgerError;
use crate::reports::{self, ReportKind};
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use std::fs::{self, OpenOptions};
use std::io::Write;

/// The central struct for all ledger operations.
///
/// A `Ledger` owns the configuration, the in-memory entry collection, and
/// any warnings produced while loading the backing file. Queries only read
/// the collection; the recording operations are the only mutation points.
#[derive(Debug)]
pub struct Ledger {
    pub config: Config,
    store: RecordStore,
    warnings: Vec<LoadWarning>,
}

impl Ledger {
    /// Creates a new `Ledger`, loading configuration from standard paths.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::with_config(config)
    }

    /// Creates a new `Ledger` with a specific `Config`.
    ///
    /// Ensures the ledger file's parent directory exists, then performs the
    /// one-shot load. A missing file is an empty ledger, not an error. Lines
    /// that fail to parse are skipped and kept as [`LoadWarning`]s for the
    /// caller to render; the load itself never aborts on them.
    pub fn with_config(config: Config) -> Result<Self> {
        if let Some(parent) = config.ledger_file.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let (store, warnings) = if config.ledger_file.exists() {
            let content = fs::read_to_string(&config.ledger_file)
                .with_context(|| format!("reading {}", config.ledger_file.display()))?;
            let result = store::parse_ledger(&content);
            (RecordStore::from_entries(result.entries), result.warnings)
        } else {
            (RecordStore::new(), Vec::new())
        };

        Ok(Self {
            config,
            store,
            warnings,
        })
    }

    /// All recorded entries, in insertion order.
    pub fn entries(&self) -> &[Entry] {
        self.store.entries()
    }

    /// Lines skipped while loading the backing file.
    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    /// Records incoming money. `entered` must be strictly positive.
    pub fn add_deposit(
        &mut self,
        date: NaiveDate,
        time: NaiveTime,
        description: String,
        vendor: String,
        entered: Amount,
    ) -> Result<&Entry, LedgerError> {
        let amount = validate_entered(entered)?;
        validate_fields(&description, &vendor)?;
        self.commit(Entry {
            date,
            time,
            description,
            vendor,
            amount,
        })
    }

    /// Records outgoing money. `entered` must be strictly positive; the
    /// stored amount is its negation (a payment of 50.00 persists as -50.00).
    pub fn add_payment(
        &mut self,
        date: NaiveDate,
        time: NaiveTime,
        description: String,
        vendor: String,
        entered: Amount,
    ) -> Result<&Entry, LedgerError> {
        let amount = -validate_entered(entered)?;
        validate_fields(&description, &vendor)?;
        self.commit(Entry {
            date,
            time,
            description,
            vendor,
            amount,
        })
    }

    /// Entries classified as deposits, in collection order.
    pub fn deposits(&self) -> impl Iterator<Item = &Entry> {
        reports::filter_by_kind(self.entries(), EntryKind::Deposit)
    }

    /// Entries classified as payments, in collection order.
    pub fn payments(&self) -> impl Iterator<Item = &Entry> {
        reports::filter_by_kind(self.entries(), EntryKind::Payment)
    }

    /// Entries whose date falls inside the report window relative to `today`.
    ///
    /// `today` is injected rather than sampled here, so canned reports stay
    /// testable without wall-clock mocking.
    pub fn report(&self, kind: ReportKind, today: NaiveDate) -> impl Iterator<Item = &Entry> {
        reports::filter_by_date_range(self.entries(), kind.window(today))
    }

    /// Entries whose vendor equals `query` case-insensitively (exact match).
    pub fn search_vendor(&self, query: &str) -> impl Iterator<Item = &Entry> {
        reports::filter_by_vendor(self.entries(), query)
    }

    /// Appends to the collection and the backing file as one operation.
    ///
    /// The in-memory append is rolled back if the write fails, so memory and
    /// disk never disagree about what was recorded.
    fn commit(&mut self, entry: Entry) -> Result<&Entry, LedgerError> {
        let line = self.store.append(entry);
        if let Err(source) = self.persist_line(&line) {
            self.store.rollback_last();
            return Err(LedgerError::Persistence {
                path: self.config.ledger_file.clone(),
                source,
            });
        }
        Ok(self.store.entries().last().expect("entry just appended"))
    }

    fn persist_line(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.config.ledger_file)?;
        writeln!(file, "{line}")
    }
}

fn validate_entered(entered: Amount) -> Result<Amount, LedgerError> {
    if entered.is_positive() {
        Ok(entered)
    } else {
        Err(LedgerError::InvalidAmount(format!(
            "expected a positive amount, got {entered}"
        )))
    }
}

/// The stored format has no escaping, so the delimiter is forbidden in
/// free-text fields rather than silently corrupting the record on reload.
fn validate_fields(description: &str, vendor: &str) -> Result<(), LedgerError> {
    if description.contains('|') {
        return Err(LedgerError::ReservedDelimiter {
            field: "description",
        });
    }
    if vendor.contains('|') {
        return Err(LedgerError::ReservedDelimiter { field: "vendor" });
    }
    Ok(())
}
