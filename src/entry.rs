//! The entry model and the plain-text entry format.
//!
//! An entry is a single `.txt` file inside a topic folder. The format is
//! deliberately minimal, with no front matter and no markup:
//!
//! ```text
//! Morning hike up the ridge        ← title (first non-blank line)
//! 2024-03-01                       ← date (next non-blank line)
//!
//! Left before sunrise. The fog     ← body (everything after the date line,
//! burned off around eight...         may be empty)
//! ```
//!
//! Blank lines before the title, between title and date, and around the
//! body are tolerated. A file that cannot yield both a title and a date is
//! rejected with a [`ParseError`] and the loader skips it.
//!
//! Entry identity is `{topic}-{filename}` with the `.txt` suffix stripped
//! (case-insensitively), so `Nature/a.txt` becomes `Nature-a`. Filenames
//! are assumed distinct within a topic; `check` reports collisions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no title line")]
    MissingTitle,
    #[error("no date line after the title")]
    MissingDate,
}

/// Maximum preview length in characters, before the `...` marker.
pub const PREVIEW_CHARS: usize = 100;

/// A parsed journal entry.
///
/// `date` is kept exactly as written: ordering interprets it, display does
/// not. `images` holds the owning topic's image URLs, shared by every entry
/// in that topic; it is attached by the loader after parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub date: String,
    pub title: String,
    /// First [`PREVIEW_CHARS`] characters of the body, `...`-suffixed when
    /// truncated. Empty when the body is empty.
    pub preview: String,
    /// Owning topic name.
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

/// Parse one entry file's text into an [`Entry`].
///
/// `topic` and `filename` provide context only, the id and subject; the
/// text itself carries title, date, and body.
pub fn parse_entry(raw: &str, topic: &str, filename: &str) -> Result<Entry, ParseError> {
    let lines: Vec<&str> = raw.lines().collect();

    let title_idx = lines
        .iter()
        .position(|line| !line.trim().is_empty())
        .ok_or(ParseError::MissingTitle)?;
    let title = lines[title_idx].trim().to_string();

    let date_idx = lines
        .iter()
        .skip(title_idx + 1)
        .position(|line| !line.trim().is_empty())
        .map(|offset| title_idx + 1 + offset)
        .ok_or(ParseError::MissingDate)?;
    let date = lines[date_idx].trim().to_string();

    let body = lines
        .get(date_idx + 1..)
        .unwrap_or_default()
        .join("\n")
        .trim()
        .to_string();

    let preview = make_preview(&body);
    let content = if body.is_empty() { None } else { Some(body) };

    Ok(Entry {
        id: entry_id(topic, filename),
        date,
        title,
        preview,
        subject: topic.to_string(),
        content,
        images: Vec::new(),
    })
}

/// Derive an entry id from its topic and filename.
pub fn entry_id(topic: &str, filename: &str) -> String {
    format!("{topic}-{}", strip_txt_suffix(filename))
}

/// Strip a trailing `.txt` regardless of case. Boundary-safe for
/// multi-byte filenames.
fn strip_txt_suffix(filename: &str) -> &str {
    match filename.char_indices().rev().nth(3) {
        Some((idx, _)) if filename[idx..].eq_ignore_ascii_case(".txt") => &filename[..idx],
        _ => filename,
    }
}

fn make_preview(body: &str) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
