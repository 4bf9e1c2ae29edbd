//! Translates between entries and their one-line pipe-delimited form, and
//! owns the in-memory ordered collection.
use super::entry::Entry;
use crate::error::RecordError;
use chrono::{NaiveDate, NaiveTime};

/// Fixed persisted formats. The display layer may render dates differently,
/// but stored lines always use these patterns.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const TIME_FORMAT: &str = "%H:%M:%S";

/// A stored line that was skipped during a load.
#[derive(Debug)]
pub struct LoadWarning {
    /// 1-based line number in the backing file.
    pub line: usize,
    pub reason: RecordError,
}

/// The complete result of loading the backing text.
/// Contains successfully parsed entries and any skipped lines.
#[derive(Debug)]
pub struct LoadResult {
    pub entries: Vec<Entry>,
    pub warnings: Vec<LoadWarning>,
}

/// Parses one stored line: `date|time|description|vendor|amount`.
///
/// A successful parse never validates amount sign or field emptiness; any
/// signed decimal and any string content are accepted. The format has no
/// escaping, so a `|` embedded in a free-text field shifts the field count
/// and fails the line.
pub fn parse_line(line: &str) -> Result<Entry, RecordError> {
    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() != 5 {
        return Err(RecordError::FieldCount(fields.len()));
    }
    let date = NaiveDate::parse_from_str(fields[0], DATE_FORMAT)
        .map_err(|_| RecordError::Date(fields[0].to_string()))?;
    let time = NaiveTime::parse_from_str(fields[1], TIME_FORMAT)
        .map_err(|_| RecordError::Time(fields[1].to_string()))?;
    let amount = fields[4]
        .parse()
        .map_err(|_| RecordError::Amount(fields[4].to_string()))?;
    Ok(Entry {
        date,
        time,
        description: fields[2].to_string(),
        vendor: fields[3].to_string(),
        amount,
    })
}

/// Renders the canonical persisted form of an entry, amount with exactly
/// two decimal digits. `parse_line` reconstructs it field for field.
pub fn serialize_entry(entry: &Entry) -> String {
    format!(
        "{}|{}|{}|{}|{}",
        entry.date.format(DATE_FORMAT),
        entry.time.format(TIME_FORMAT),
        entry.description,
        entry.vendor,
        entry.amount,
    )
}

/// Parses the whole backing text, one record per line.
///
/// Empty lines are ignored. A line that fails to parse becomes a
/// [`LoadWarning`] and is skipped; loading always continues with the
/// remaining lines.
pub fn parse_ledger(content: &str) -> LoadResult {
    let mut entries = Vec::new();
    let mut warnings = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(entry) => entries.push(entry),
            Err(reason) => warnings.push(LoadWarning {
                line: idx + 1,
                reason,
            }),
        }
    }
    LoadResult { entries, warnings }
}

/// The ordered in-memory collection of entries.
///
/// The store never touches the filesystem; it mutates the collection and
/// hands serialized lines back to the caller, keeping file-handle lifecycle
/// a concern of the surrounding layer.
#[derive(Debug, Default)]
pub struct RecordStore {
    entries: Vec<Entry>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already-parsed collection, preserving its order.
    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds `entry` to the tail and returns the serialized line for the
    /// caller to persist.
    pub fn append(&mut self, entry: Entry) -> String {
        let line = serialize_entry(&entry);
        self.entries.push(entry);
        line
    }

    /// Removes the most recently appended entry. Used to keep the in-memory
    /// collection consistent with the backing file when a write fails.
    pub(crate) fn rollback_last(&mut self) -> Option<Entry> {
        self.entries.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;

    fn sample_entry() -> Entry {
        Entry {
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            time: NaiveTime::from_hms_opt(14, 5, 9).unwrap(),
            description: "Weekly groceries".to_string(),
            vendor: "Corner Market".to_string(),
            amount: Amount::from_cents(-4250),
        }
    }

    #[test]
    fn serialize_renders_canonical_line() {
        assert_eq!(
            serialize_entry(&sample_entry()),
            "2024-03-15|14:05:09|Weekly groceries|Corner Market|-42.50"
        );
    }

    #[test]
    fn parse_line_round_trips_every_field() {
        let entry = sample_entry();
        let parsed = parse_line(&serialize_entry(&entry)).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn parse_line_accepts_any_sign_and_empty_text() {
        let parsed = parse_line("2023-01-01|00:00:00|||0.00").unwrap();
        assert!(parsed.description.is_empty());
        assert!(parsed.vendor.is_empty());
        assert_eq!(parsed.amount, Amount::ZERO);
    }

    #[test]
    fn parse_line_rejects_wrong_field_count() {
        assert_eq!(
            parse_line("2023-01-01|12:00:00|only three"),
            Err(RecordError::FieldCount(3))
        );
        // An embedded `|` shifts the count; the record is corrupt, not repaired.
        assert_eq!(
            parse_line("2023-01-01|12:00:00|a|b|c|10.00"),
            Err(RecordError::FieldCount(6))
        );
    }

    #[test]
    fn parse_line_rejects_bad_fields() {
        assert_eq!(
            parse_line("01/02/2023|12:00:00|d|v|10.00"),
            Err(RecordError::Date("01/02/2023".to_string()))
        );
        assert_eq!(
            parse_line("2023-01-01|12:00|d|v|10.00"),
            Err(RecordError::Time("12:00".to_string()))
        );
        assert_eq!(
            parse_line("2023-01-01|12:00:00|d|v|ten"),
            Err(RecordError::Amount("ten".to_string()))
        );
    }

    #[test]
    fn parse_ledger_skips_malformed_lines_and_keeps_order() {
        let content = "\
2024-01-02|08:00:00|Salary|Employer Inc|2500.00
not a record
2024-01-05|19:30:00|Dinner|Bistro|-34.20

2024-01-06|09:00:00|Refund|Shop|12.00";
        let result = parse_ledger(content);
        assert_eq!(result.entries.len(), 3);
        assert_eq!(result.entries[0].vendor, "Employer Inc");
        assert_eq!(result.entries[1].vendor, "Bistro");
        assert_eq!(result.entries[2].vendor, "Shop");
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].line, 2);
        assert_eq!(result.warnings[0].reason, RecordError::FieldCount(1));
    }

    #[test]
    fn append_pushes_to_tail_and_returns_line() {
        let mut store = RecordStore::new();
        let line = store.append(sample_entry());
        assert_eq!(line, "2024-03-15|14:05:09|Weekly groceries|Corner Market|-42.50");
        assert_eq!(store.len(), 1);
        assert_eq!(store.entries()[0], sample_entry());
    }
}
