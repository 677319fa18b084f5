//! Search and category filtering over loaded entries.
//!
//! Everything here is pure: filters take the already-loaded slice and
//! return borrowed views in the input's order. Nothing is refetched, so
//! repeated searches over one load are free.

use crate::entry::Entry;

/// Whether an entry survives the query and category filters.
///
/// The query is matched case-insensitively as a substring of the title,
/// preview, subject, and body. A query that trims to nothing matches every
/// entry; any other query matches verbatim, surrounding whitespace
/// included. The category filter is an exact subject match; `None` means
/// all categories.
pub fn matches(entry: &Entry, query: &str, category: Option<&str>) -> bool {
    if let Some(category) = category {
        if entry.subject != category {
            return false;
        }
    }

    if query.trim().is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    entry.title.to_lowercase().contains(&needle)
        || entry.preview.to_lowercase().contains(&needle)
        || entry.subject.to_lowercase().contains(&needle)
        || entry
            .content
            .as_ref()
            .is_some_and(|body| body.to_lowercase().contains(&needle))
}

/// Filter entries by query and category, keeping the input's order.
pub fn filter_entries<'a>(
    entries: &'a [Entry],
    query: &str,
    category: Option<&str>,
) -> Vec<&'a Entry> {
    entries
        .iter()
        .filter(|entry| matches(entry, query, category))
        .collect()
}

/// Distinct non-empty subjects across the loaded entries, sorted.
pub fn categories(entries: &[Entry]) -> Vec<String> {
    let mut subjects: Vec<String> = entries
        .iter()
        .map(|entry| entry.subject.clone())
        .filter(|subject| !subject.is_empty())
        .collect();
    subjects.sort();
    subjects.dedup();
    subjects
}
