//! Calendar report windows and the filters that run over the entry collection.
//!
//! Every window is a pure function of an injected `today`, so the canned
//! reports are testable without touching the wall clock. Filters are lazy
//! and preserve collection order; an empty result is a normal outcome.
use crate::ledger::{Entry, EntryKind};
use chrono::{Datelike, Duration, NaiveDate};
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// An inclusive calendar range `(start, end)` used for reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The four canned calendar reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ReportKind {
    MonthToDate,
    PreviousMonth,
    YearToDate,
    PreviousYear,
}

impl ReportKind {
    /// Resolves the window relative to `today`.
    ///
    /// Month and year lengths follow the actual calendar, so a previous-month
    /// report covers every day of a 28-, 29-, 30- or 31-day month.
    pub fn window(self, today: NaiveDate) -> DateWindow {
        match self {
            ReportKind::MonthToDate => DateWindow {
                start: today.with_day(1).unwrap(),
                end: today,
            },
            ReportKind::PreviousMonth => {
                let first_of_this_month = today.with_day(1).unwrap();
                let end = first_of_this_month - Duration::days(1);
                DateWindow {
                    start: end.with_day(1).unwrap(),
                    end,
                }
            }
            ReportKind::YearToDate => DateWindow {
                start: today.with_ordinal(1).unwrap(),
                end: today,
            },
            ReportKind::PreviousYear => {
                let year = today.year() - 1;
                DateWindow {
                    start: NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
                    end: NaiveDate::from_ymd_opt(year, 12, 31).unwrap(),
                }
            }
        }
    }
}

/// Yields every entry whose date satisfies `start <= date <= end`,
/// preserving collection order.
pub fn filter_by_date_range(entries: &[Entry], window: DateWindow) -> impl Iterator<Item = &Entry> {
    entries.iter().filter(move |e| window.contains(e.date))
}

/// Yields every entry whose vendor equals `query` under case-insensitive
/// comparison. Exact match after case folding; no substring matching.
pub fn filter_by_vendor<'a>(entries: &'a [Entry], query: &str) -> impl Iterator<Item = &'a Entry> {
    let query = query.to_ascii_lowercase();
    entries
        .iter()
        .filter(move |e| e.vendor.eq_ignore_ascii_case(&query))
}

/// Yields every entry classified as `kind`, preserving collection order.
pub fn filter_by_kind(entries: &[Entry], kind: EntryKind) -> impl Iterator<Item = &Entry> {
    entries.iter().filter(move |e| e.kind() == kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;
    use chrono::NaiveTime;
    use strum::IntoEnumIterator;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(d: NaiveDate, vendor: &str, cents: i64) -> Entry {
        Entry {
            date: d,
            time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            description: "entry".to_string(),
            vendor: vendor.to_string(),
            amount: Amount::from_cents(cents),
        }
    }

    #[test]
    fn month_to_date_starts_on_the_first() {
        let window = ReportKind::MonthToDate.window(date(2024, 3, 15));
        assert_eq!(
            window,
            DateWindow {
                start: date(2024, 3, 1),
                end: date(2024, 3, 15),
            }
        );
    }

    #[test]
    fn previous_month_covers_leap_february() {
        let window = ReportKind::PreviousMonth.window(date(2024, 3, 15));
        assert_eq!(
            window,
            DateWindow {
                start: date(2024, 2, 1),
                end: date(2024, 2, 29),
            }
        );
    }

    #[test]
    fn previous_month_handles_january_rollover() {
        let window = ReportKind::PreviousMonth.window(date(2025, 1, 7));
        assert_eq!(
            window,
            DateWindow {
                start: date(2024, 12, 1),
                end: date(2024, 12, 31),
            }
        );
    }

    #[test]
    fn year_to_date_starts_on_january_first() {
        let window = ReportKind::YearToDate.window(date(2023, 6, 1));
        assert_eq!(
            window,
            DateWindow {
                start: date(2023, 1, 1),
                end: date(2023, 6, 1),
            }
        );
    }

    #[test]
    fn previous_year_is_the_whole_prior_year() {
        let window = ReportKind::PreviousYear.window(date(2023, 6, 1));
        assert_eq!(
            window,
            DateWindow {
                start: date(2022, 1, 1),
                end: date(2022, 12, 31),
            }
        );
    }

    #[test]
    fn report_kinds_parse_from_their_kebab_case_names() {
        for kind in ReportKind::iter() {
            assert_eq!(kind.as_ref().parse::<ReportKind>().unwrap(), kind);
        }
        assert_eq!(
            "previous-month".parse::<ReportKind>().unwrap(),
            ReportKind::PreviousMonth
        );
        assert!("last-month".parse::<ReportKind>().is_err());
    }

    #[test]
    fn date_range_filter_is_inclusive_ordered_and_idempotent() {
        let entries = vec![
            entry(date(2024, 1, 31), "a", 100),
            entry(date(2024, 2, 1), "b", 200),
            entry(date(2024, 2, 29), "c", 300),
            entry(date(2024, 3, 1), "d", 400),
            entry(date(2024, 2, 15), "e", 500),
        ];
        let window = DateWindow {
            start: date(2024, 2, 1),
            end: date(2024, 2, 29),
        };

        let first: Vec<Entry> = filter_by_date_range(&entries, window).cloned().collect();
        let vendors: Vec<&str> = first.iter().map(|e| e.vendor.as_str()).collect();
        assert_eq!(vendors, ["b", "c", "e"]);

        let second: Vec<Entry> = filter_by_date_range(&first, window).cloned().collect();
        assert_eq!(second, first);
    }

    #[test]
    fn empty_range_result_is_not_an_error() {
        let entries = vec![entry(date(2024, 5, 1), "a", 100)];
        let window = DateWindow {
            start: date(2020, 1, 1),
            end: date(2020, 12, 31),
        };
        assert_eq!(filter_by_date_range(&entries, window).count(), 0);
    }

    #[test]
    fn vendor_filter_is_case_insensitive_and_exact() {
        let entries = vec![
            entry(date(2024, 1, 1), "amazon", 100),
            entry(date(2024, 1, 2), "AMAZON", 200),
            entry(date(2024, 1, 3), "Amazon.com", 300),
        ];
        let matched: Vec<&Entry> = filter_by_vendor(&entries, "Amazon").collect();
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].vendor, "amazon");
        assert_eq!(matched[1].vendor, "AMAZON");
    }

    #[test]
    fn kind_filter_keeps_zero_amounts_with_deposits() {
        let entries = vec![
            entry(date(2024, 1, 1), "a", 0),
            entry(date(2024, 1, 2), "b", -100),
            entry(date(2024, 1, 3), "c", 100),
        ];
        let deposits: Vec<&Entry> = filter_by_kind(&entries, EntryKind::Deposit).collect();
        let payments: Vec<&Entry> = filter_by_kind(&entries, EntryKind::Payment).collect();
        assert_eq!(deposits.len(), 2);
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].vendor, "b");
    }
}
