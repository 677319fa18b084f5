//! Entry date parsing and ordering.
//!
//! Entry dates are free-form strings: whatever the author wrote on the
//! second line of the file. They are never normalized or rewritten; parsing
//! exists only so the journal can be ordered newest-first. A date the parser
//! does not understand is not an error: the entry keeps its string and sorts
//! after every dated entry.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use std::cmp::Ordering;

/// Datetime formats tried before falling back to date-only formats.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Date-only formats. Midnight is assumed for ordering purposes.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Interpret an entry's date line for sorting.
///
/// Accepts RFC 3339, then the formats above, in order. Returns `None` for
/// anything unrecognized, including the empty string.
pub fn parse_entry_date(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }

    None
}

/// Compare two date strings for newest-first ordering.
///
/// Unparseable dates sort after parseable ones. When both sides are
/// unparseable the result is `Equal`, so a stable sort keeps their
/// original relative order.
pub fn compare_date_strings(a: &str, b: &str) -> Ordering {
    match (parse_entry_date(a), parse_entry_date(b)) {
        (Some(date_a), Some(date_b)) => date_b.cmp(&date_a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
