//! CLI output formatting for loaded journals.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not transport-centric**. The primary
//! display for every entry is its semantic identity, positional index and
//! title, with date, subject, and preview shown as indented context lines.
//! URLs appear only where they are the information, like the image listing
//! in `show`.
//!
//! # Output Format
//!
//! ## Entry list (`load`, `search`)
//!
//! ```text
//! 001 Morning Hike
//!     Date: 2024-03-01
//!     Subject: Nature
//!     Great day on the ridge.
//!     Images: 2
//! 002 Rain
//!     Date: 2023-11-02
//!     Subject: Nature
//! ```
//!
//! ## Entry detail (`show`)
//!
//! ```text
//! Morning Hike
//!     Id: Nature-hike
//!     Date: 2024-03-01
//!     Subject: Nature
//!
//! Great day on the ridge. We left before sunrise.
//!
//! Images
//!     http://localhost:8000/subjects/Nature/photo.png
//! ```
//!
//! ## Check
//!
//! ```text
//! Topics
//! 001 Nature (2 entries, 1 images)
//! 002 travel (1 entries)
//!
//! Skipped descriptors
//!     003: no topic name (empty or missing "name"/"topic" key)
//!
//! 2 topics, 3 entries, 1 skipped
//! ```
//!
//! # Architecture
//!
//! Each surface has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::entry::Entry;
use crate::load::{LoadEvent, ManifestReport, SkipReason};

/// Preview truncation width in list output.
const LIST_PREVIEW_CHARS: usize = 60;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
///
/// Counts characters, not bytes; entry text is arbitrary UTF-8.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    }
}

/// Format a topic's file counts: `(2 entries, 1 images, 3 other)`, with the
/// image and other counts shown only when non-zero.
fn topic_detail(text_files: usize, image_files: usize, other_files: usize) -> String {
    let mut detail = format!("({} entries", text_files);
    if image_files > 0 {
        detail.push_str(&format!(", {} images", image_files));
    }
    if other_files > 0 {
        detail.push_str(&format!(", {} other", other_files));
    }
    detail.push(')');
    detail
}

fn skip_reason_text(reason: &SkipReason) -> String {
    match reason {
        SkipReason::Fetch(msg) => format!("fetch failed: {msg}"),
        SkipReason::HtmlBody => "got an HTML page instead of the entry file".to_string(),
        SkipReason::Unparseable(err) => err.to_string(),
    }
}

// ============================================================================
// Load progress output
// ============================================================================

/// Format a single load progress event as display lines.
///
/// Topic headers sit at the left margin; per-entry and per-file lines are
/// indented beneath the topic they belong to.
pub fn format_load_event(event: &LoadEvent) -> Vec<String> {
    match event {
        LoadEvent::TopicStarted {
            name,
            text_files,
            image_files,
        } => {
            vec![format!(
                "{} {}",
                name,
                topic_detail(*text_files, *image_files, 0)
            )]
        }
        LoadEvent::EntryLoaded { id, title, date } => {
            vec![
                format!("    {} ({})", title, date),
                format!("        Id: {}", id),
            ]
        }
        LoadEvent::FileSkipped { file, reason, .. } => {
            vec![format!("    Skipped {}: {}", file, skip_reason_text(reason))]
        }
        LoadEvent::TopicSkipped { index, reason } => {
            vec![format!(
                "Skipped topic {}: {}",
                format_index(index + 1),
                reason
            )]
        }
        LoadEvent::LoadFailed { reason } => {
            vec![format!("Load failed: {}", reason)]
        }
    }
}

// ============================================================================
// Entry list output
// ============================================================================

/// Format an entry list for `load` and `search`.
///
/// Information-first: each entry leads with its positional index and title.
/// Date, subject, truncated preview, and image count are indented context.
pub fn format_entry_list(entries: &[&Entry]) -> Vec<String> {
    if entries.is_empty() {
        return vec!["No entries found".to_string()];
    }

    let mut lines = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), entry.title));
        lines.push(format!("{}Date: {}", indent(1), entry.date));
        lines.push(format!("{}Subject: {}", indent(1), entry.subject));
        if !entry.preview.is_empty() {
            lines.push(format!(
                "{}{}",
                indent(1),
                truncate(&entry.preview, LIST_PREVIEW_CHARS)
            ));
        }
        if !entry.images.is_empty() {
            lines.push(format!("{}Images: {}", indent(1), entry.images.len()));
        }
    }
    lines
}

/// Print an entry list to stdout.
pub fn print_entry_list(entries: &[&Entry]) {
    for line in format_entry_list(entries) {
        println!("{}", line);
    }
}

// ============================================================================
// Entry detail output
// ============================================================================

/// Format a single entry in full for `show`.
///
/// The body is printed whole and unindented after a blank line; the preview
/// never appears here. Image URLs get their own section, since the URL is
/// the information for a text terminal.
pub fn format_entry_detail(entry: &Entry) -> Vec<String> {
    let mut lines = vec![
        entry.title.clone(),
        format!("{}Id: {}", indent(1), entry.id),
        format!("{}Date: {}", indent(1), entry.date),
        format!("{}Subject: {}", indent(1), entry.subject),
    ];

    if let Some(ref body) = entry.content {
        lines.push(String::new());
        for line in body.lines() {
            lines.push(line.to_string());
        }
    }

    if !entry.images.is_empty() {
        lines.push(String::new());
        lines.push("Images".to_string());
        for url in &entry.images {
            lines.push(format!("{}{}", indent(1), url));
        }
    }

    lines
}

/// Print a single entry in full to stdout.
pub fn print_entry_detail(entry: &Entry) {
    for line in format_entry_detail(entry) {
        println!("{}", line);
    }
}

// ============================================================================
// Categories output
// ============================================================================

/// Format the category list, one per line.
pub fn format_categories(categories: &[String]) -> Vec<String> {
    if categories.is_empty() {
        return vec!["No categories found".to_string()];
    }
    categories.to_vec()
}

/// Print the category list to stdout.
pub fn print_categories(categories: &[String]) {
    for line in format_categories(categories) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format a manifest check report.
///
/// Topics lead with index, name, and file counts. Skipped descriptors and
/// duplicate ids get their own sections, shown only when present, so a
/// clean manifest reads as just the topic inventory plus the summary line.
pub fn format_check_report(report: &ManifestReport) -> Vec<String> {
    let mut lines = vec!["Topics".to_string()];

    let mut total_entries = 0;
    for (i, topic) in report.topics.iter().enumerate() {
        total_entries += topic.text_files;
        lines.push(format!(
            "{} {} {}",
            format_index(i + 1),
            topic.name,
            topic_detail(topic.text_files, topic.image_files, topic.other_files)
        ));
    }

    if !report.skipped.is_empty() {
        lines.push(String::new());
        lines.push("Skipped descriptors".to_string());
        for (index, reason) in &report.skipped {
            lines.push(format!(
                "{}{}: {}",
                indent(1),
                format_index(index + 1),
                reason
            ));
        }
    }

    if !report.duplicate_ids.is_empty() {
        lines.push(String::new());
        lines.push("Duplicate ids".to_string());
        for id in &report.duplicate_ids {
            lines.push(format!("{}{}", indent(1), id));
        }
    }

    let mut summary = format!("{} topics, {} entries", report.topics.len(), total_entries);
    if !report.skipped.is_empty() {
        summary.push_str(&format!(", {} skipped", report.skipped.len()));
    }
    if !report.duplicate_ids.is_empty() {
        summary.push_str(&format!(", {} duplicate ids", report.duplicate_ids.len()));
    }
    lines.push(String::new());
    lines.push(summary);

    lines
}

/// Print a manifest check report to stdout.
pub fn print_check_report(report: &ManifestReport) {
    for line in format_check_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
