//! Shared constructors for tests.

use crate::entry::{self, Entry};

/// Build an entry through the real parser from its parts.
///
/// The id becomes `{subject}-{stem}` and the preview is derived from the
/// body exactly as loading derives it.
pub(crate) fn entry(subject: &str, stem: &str, title: &str, date: &str, body: &str) -> Entry {
    let raw = format!("{title}\n{date}\n{body}");
    entry::parse_entry(&raw, subject, &format!("{stem}.txt")).expect("test entry should parse")
}

/// Same as [`entry`], with image URLs attached.
pub(crate) fn entry_with_images(
    subject: &str,
    stem: &str,
    title: &str,
    date: &str,
    body: &str,
    images: &[&str],
) -> Entry {
    let mut built = entry(subject, stem, title, date, body);
    built.images = images.iter().map(|url| url.to_string()).collect();
    built
}
