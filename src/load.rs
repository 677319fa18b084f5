//! Journal loading: manifest → topic files → sorted entries.
//!
//! The loader walks a remote content tree shaped like this:
//!
//! ```text
//! <root_url>/
//! ├── manifest.json     # {"topics": [{"name": "Nature", "files": [...]}]}
//! ├── Nature/
//! │   ├── a.txt         # title line, date line, body
//! │   └── photo.png     # listed in the manifest, attached to entries by URL
//! └── travel/
//!     └── tokyo.txt
//! ```
//!
//! One pass per invocation: fetch the manifest, read its descriptors in
//! order, fetch each topic's text files one by one, parse them, attach the
//! topic's image URLs, then sort everything newest-first. Nothing is cached
//! and nothing survives between invocations.
//!
//! ## Failure budget
//!
//! Failures below the manifest are soft. A file that cannot be fetched or
//! parsed, or a descriptor that does not resolve, is skipped and reported on
//! the event channel while the rest of the journal loads. Only the manifest
//! itself is load-bearing: its failures are the [`LoadError`] variants.
//! [`load`] collapses even those to an empty list for callers whose only
//! move is showing an empty journal; [`load_with`] keeps the distinction.
//!
//! ## Events
//!
//! Progress and every skip decision go out as [`LoadEvent`]s over an
//! optional channel, in fetch order. The CLI drains the channel from a
//! printer thread; tests collect the events and assert on them.

use crate::config::JournalConfig;
use crate::dates;
use crate::entry::{self, Entry, ParseError};
use crate::fetch::{FetchBackend, HttpBackend};
use crate::manifest::{self, Topic, TopicDescriptorError};
use std::collections::HashSet;
use std::fmt;
use std::sync::mpsc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("manifest fetch failed: {0}")]
    ManifestFetch(#[from] crate::fetch::FetchError),
    #[error("manifest is not valid JSON: {0}")]
    ManifestJson(#[from] serde_json::Error),
    #[error("manifest has no \"topics\" array")]
    ManifestShape,
}

/// Filename suffixes treated as images, matched case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// Progress and diagnostic events emitted during a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadEvent {
    TopicStarted {
        name: String,
        text_files: usize,
        image_files: usize,
    },
    EntryLoaded {
        id: String,
        title: String,
        date: String,
    },
    FileSkipped {
        topic: String,
        file: String,
        reason: SkipReason,
    },
    TopicSkipped {
        index: usize,
        reason: TopicDescriptorError,
    },
    /// Emitted by [`load`] when it collapses a failed load to an empty list.
    LoadFailed { reason: String },
}

/// Why a text file produced no entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Fetch(String),
    HtmlBody,
    Unparseable(ParseError),
}

/// Summary counts for a load run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub topics: u32,
    pub entries: u32,
    pub skipped_files: u32,
    pub skipped_topics: u32,
}

/// Format a count with the grammatical noun form: `count(1, "entry",
/// "entries")` is `"1 entry"`.
fn count(n: u32, one: &str, many: &str) -> String {
    let noun = if n == 1 { one } else { many };
    format!("{n} {noun}")
}

impl fmt::Display for LoadStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} from {}",
            count(self.entries, "entry", "entries"),
            count(self.topics, "topic", "topics")
        )?;
        if self.skipped_files > 0 {
            write!(f, ", {} skipped", count(self.skipped_files, "file", "files"))?;
        }
        if self.skipped_topics > 0 {
            write!(f, ", {} skipped", count(self.skipped_topics, "topic", "topics"))?;
        }
        Ok(())
    }
}

/// Result of a full journal load.
#[derive(Debug)]
pub struct LoadResult {
    /// All entries, sorted newest-first; undated entries last, in
    /// manifest order.
    pub entries: Vec<Entry>,
    pub stats: LoadStats,
}

/// Load the journal over HTTP, collapsing every failure to an empty list.
///
/// The embedding surface: a caller whose only recourse is an empty journal
/// page gets entries or nothing, never an error. The failure reason still
/// goes out as [`LoadEvent::LoadFailed`]. Callers that want to distinguish
/// "empty journal" from "load failed" use [`load_with`].
pub fn load(config: &JournalConfig, events: Option<mpsc::Sender<LoadEvent>>) -> Vec<Entry> {
    let backend = match HttpBackend::new(config.timeout()) {
        Ok(backend) => backend,
        Err(err) => {
            send(
                events.as_ref(),
                LoadEvent::LoadFailed {
                    reason: err.to_string(),
                },
            );
            return Vec::new();
        }
    };
    match load_with(&backend, config, events.clone()) {
        Ok(result) => result.entries,
        Err(err) => {
            send(
                events.as_ref(),
                LoadEvent::LoadFailed {
                    reason: err.to_string(),
                },
            );
            Vec::new()
        }
    }
}

/// Load the journal using a specific backend (allows testing with mock).
pub fn load_with(
    backend: &impl FetchBackend,
    config: &JournalConfig,
    events: Option<mpsc::Sender<LoadEvent>>,
) -> Result<LoadResult, LoadError> {
    let events = events.as_ref();
    let descriptors = fetch_topic_descriptors(backend, config)?;

    let mut entries = Vec::new();
    let mut stats = LoadStats::default();

    for (index, raw) in descriptors.iter().enumerate() {
        match manifest::read_descriptor(raw) {
            Ok(topic) => {
                stats.topics += 1;
                load_topic(backend, config, &topic, events, &mut entries, &mut stats);
            }
            Err(reason) => {
                stats.skipped_topics += 1;
                send(events, LoadEvent::TopicSkipped { index, reason });
            }
        }
    }

    // Stable: undated and same-dated entries keep manifest order.
    entries.sort_by(|a, b| dates::compare_date_strings(&a.date, &b.date));

    Ok(LoadResult { entries, stats })
}

/// Fetch and shape-check the manifest, returning the raw descriptor values.
fn fetch_topic_descriptors(
    backend: &impl FetchBackend,
    config: &JournalConfig,
) -> Result<Vec<serde_json::Value>, LoadError> {
    let body = backend.fetch_text(&config.manifest_url())?;
    let value: serde_json::Value = serde_json::from_str(&body)?;
    value
        .get("topics")
        .and_then(|topics| topics.as_array())
        .cloned()
        .ok_or(LoadError::ManifestShape)
}

/// Load one topic's entries, appending to `entries`.
///
/// Never fails: every per-file problem becomes a [`LoadEvent::FileSkipped`].
fn load_topic(
    backend: &impl FetchBackend,
    config: &JournalConfig,
    topic: &Topic,
    events: Option<&mpsc::Sender<LoadEvent>>,
    entries: &mut Vec<Entry>,
    stats: &mut LoadStats,
) {
    let text_files: Vec<&String> = topic.files.iter().filter(|f| is_text_file(f)).collect();
    let image_urls = topic_image_urls(config, topic);

    send(
        events,
        LoadEvent::TopicStarted {
            name: topic.name.clone(),
            text_files: text_files.len(),
            image_files: image_urls.len(),
        },
    );

    for file in text_files {
        let body = match fetch_entry_text(backend, config, &topic.name, file) {
            Ok(body) => body,
            Err(reason) => {
                stats.skipped_files += 1;
                send(
                    events,
                    LoadEvent::FileSkipped {
                        topic: topic.name.clone(),
                        file: file.clone(),
                        reason,
                    },
                );
                continue;
            }
        };

        match entry::parse_entry(&body, &topic.name, file) {
            Ok(mut entry) => {
                entry.images = image_urls.clone();
                send(
                    events,
                    LoadEvent::EntryLoaded {
                        id: entry.id.clone(),
                        title: entry.title.clone(),
                        date: entry.date.clone(),
                    },
                );
                stats.entries += 1;
                entries.push(entry);
            }
            Err(parse_err) => {
                stats.skipped_files += 1;
                send(
                    events,
                    LoadEvent::FileSkipped {
                        topic: topic.name.clone(),
                        file: file.clone(),
                        reason: SkipReason::Unparseable(parse_err),
                    },
                );
            }
        }
    }
}

/// Fetch one entry file's text.
///
/// A failed fetch is retried once against the lowercased folder name when
/// the manifest-cased name contains anything lowercasing would change;
/// folder casing drifts between manifest edits. The retry applies to the
/// fetch only, never to the HTML check, and never to image URLs.
fn fetch_entry_text(
    backend: &impl FetchBackend,
    config: &JournalConfig,
    topic: &str,
    file: &str,
) -> Result<String, SkipReason> {
    let body = match backend.fetch_text(&config.file_url(topic, file)) {
        Ok(body) => body,
        Err(err) => {
            let lowered = topic.to_lowercase();
            if lowered == topic {
                return Err(SkipReason::Fetch(err.to_string()));
            }
            match backend.fetch_text(&config.file_url(&lowered, file)) {
                Ok(body) => body,
                Err(retry_err) => return Err(SkipReason::Fetch(retry_err.to_string())),
            }
        }
    };

    if looks_like_html(&body) {
        return Err(SkipReason::HtmlBody);
    }
    Ok(body)
}

/// SPA hosts answer missing files with the app shell and a 200. A body
/// that opens as an HTML document is an error page, not an entry.
fn looks_like_html(body: &str) -> bool {
    let head: String = body.trim_start().chars().take(9).collect();
    let head = head.to_lowercase();
    head.starts_with("<!doctype") || head.starts_with("<html")
}

/// Image URLs for a topic, in manifest order.
///
/// Composed from the manifest-cased topic name and handed out unprobed.
fn topic_image_urls(config: &JournalConfig, topic: &Topic) -> Vec<String> {
    topic
        .files
        .iter()
        .filter(|f| is_image_file(f))
        .map(|f| config.file_url(&topic.name, f))
        .collect()
}

fn is_text_file(file: &str) -> bool {
    file.to_lowercase().ends_with(".txt")
}

fn is_image_file(file: &str) -> bool {
    let lower = file.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

fn send(events: Option<&mpsc::Sender<LoadEvent>>, event: LoadEvent) {
    if let Some(tx) = events {
        // A dropped receiver is the caller's way of not listening.
        let _ = tx.send(event);
    }
}

// ============================================================================
// Manifest inspection (`check`)
// ============================================================================

/// What one topic descriptor contributes, derived from filenames alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSummary {
    pub name: String,
    pub text_files: usize,
    pub image_files: usize,
    pub other_files: usize,
}

/// Manifest validation report for the `check` command.
#[derive(Debug, Default)]
pub struct ManifestReport {
    pub topics: Vec<TopicSummary>,
    pub skipped: Vec<(usize, TopicDescriptorError)>,
    /// Entry ids claimed by more than one file, in first-collision order.
    pub duplicate_ids: Vec<String>,
}

/// Fetch and validate the manifest without touching any topic files.
///
/// Ids are derivable from filenames alone, so duplicate detection needs no
/// body fetches.
pub fn inspect_manifest(
    backend: &impl FetchBackend,
    config: &JournalConfig,
) -> Result<ManifestReport, LoadError> {
    let descriptors = fetch_topic_descriptors(backend, config)?;

    let mut report = ManifestReport::default();
    let mut seen_ids = HashSet::new();

    for (index, raw) in descriptors.iter().enumerate() {
        match manifest::read_descriptor(raw) {
            Ok(topic) => {
                let mut summary = TopicSummary {
                    name: topic.name.clone(),
                    text_files: 0,
                    image_files: 0,
                    other_files: 0,
                };
                for file in &topic.files {
                    if is_text_file(file) {
                        summary.text_files += 1;
                        let id = entry::entry_id(&topic.name, file);
                        if !seen_ids.insert(id.clone()) {
                            report.duplicate_ids.push(id);
                        }
                    } else if is_image_file(file) {
                        summary.image_files += 1;
                    } else {
                        summary.other_files += 1;
                    }
                }
                report.topics.push(summary);
            }
            Err(reason) => report.skipped.push((index, reason)),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::tests::MockBackend;

    fn test_config() -> JournalConfig {
        JournalConfig {
            root_url: "http://test/subjects".to_string(),
            ..Default::default()
        }
    }

    fn collect_events(rx: mpsc::Receiver<LoadEvent>) -> Vec<LoadEvent> {
        rx.try_iter().collect()
    }

    // =========================================================================
    // File classification tests
    // =========================================================================

    #[test]
    fn text_files_matched_case_insensitively() {
        assert!(is_text_file("a.txt"));
        assert!(is_text_file("a.TXT"));
        assert!(!is_text_file("a.text"));
        assert!(!is_text_file("photo.png"));
    }

    #[test]
    fn image_files_matched_case_insensitively() {
        assert!(is_image_file("p.jpg"));
        assert!(is_image_file("p.JPEG"));
        assert!(is_image_file("p.png"));
        assert!(is_image_file("p.gif"));
        assert!(is_image_file("p.webp"));
        assert!(!is_image_file("p.svg"));
        assert!(!is_image_file("a.txt"));
    }

    #[test]
    fn html_detection_matches_doctype_and_html_tags() {
        assert!(looks_like_html("<!DOCTYPE html><html>...</html>"));
        assert!(looks_like_html("  \n<html lang=\"en\">"));
        assert!(looks_like_html("<HTML>"));
        assert!(!looks_like_html("Title\n2024-01-01\n<html> is mentioned"));
        assert!(!looks_like_html("Plain entry text"));
    }

    // =========================================================================
    // Happy path
    // =========================================================================

    #[test]
    fn loads_entries_with_images_attached() {
        let backend = MockBackend::with_routes(&[
            (
                "http://test/subjects/manifest.json",
                r#"{"topics": [{"name": "Nature", "files": ["a.txt", "photo.png"]}]}"#,
            ),
            (
                "http://test/subjects/Nature/a.txt",
                "Hike\n2024-03-01\nGreat day.",
            ),
        ]);

        let result = load_with(&backend, &test_config(), None).unwrap();

        assert_eq!(result.entries.len(), 1);
        let entry = &result.entries[0];
        assert_eq!(entry.id, "Nature-a");
        assert_eq!(entry.title, "Hike");
        assert_eq!(entry.date, "2024-03-01");
        assert_eq!(entry.subject, "Nature");
        assert_eq!(entry.content.as_deref(), Some("Great day."));
        assert_eq!(entry.images, vec!["http://test/subjects/Nature/photo.png"]);
        assert_eq!(result.stats.topics, 1);
        assert_eq!(result.stats.entries, 1);
        assert_eq!(result.stats.skipped_files, 0);
    }

    #[test]
    fn image_urls_compose_from_bare_path_root() {
        let backend = MockBackend::with_routes(&[
            (
                "/subjects/manifest.json",
                r#"{"topics": [{"name": "Nature", "files": ["a.txt", "photo.png"]}]}"#,
            ),
            ("/subjects/Nature/a.txt", "Hike\n2024-03-01\nGreat day."),
        ]);
        let config = JournalConfig {
            root_url: "/subjects".to_string(),
            ..Default::default()
        };

        let result = load_with(&backend, &config, None).unwrap();
        assert_eq!(result.entries[0].images, vec!["/subjects/Nature/photo.png"]);
    }

    #[test]
    fn entries_sorted_newest_first_with_undated_last() {
        let backend = MockBackend::with_routes(&[
            (
                "http://test/subjects/manifest.json",
                r#"{"topics": [
                    {"name": "one", "files": ["old.txt", "undated.txt"]},
                    {"name": "two", "files": ["new.txt"]}
                ]}"#,
            ),
            ("http://test/subjects/one/old.txt", "Old\n2023-06-15\nx"),
            ("http://test/subjects/one/undated.txt", "Undated\nn/a\nx"),
            ("http://test/subjects/two/new.txt", "New\n2024-01-01\nx"),
        ]);

        let result = load_with(&backend, &test_config(), None).unwrap();
        let titles: Vec<&str> = result.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Old", "Undated"]);
    }

    #[test]
    fn undated_entries_keep_manifest_order() {
        let backend = MockBackend::with_routes(&[
            (
                "http://test/subjects/manifest.json",
                r#"{"topics": [{"name": "t", "files": ["first.txt", "second.txt"]}]}"#,
            ),
            ("http://test/subjects/t/first.txt", "First\nsomeday\nx"),
            ("http://test/subjects/t/second.txt", "Second\nlater\nx"),
        ]);

        let result = load_with(&backend, &test_config(), None).unwrap();
        let titles: Vec<&str> = result.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn non_text_non_image_files_are_ignored() {
        let backend = MockBackend::with_routes(&[
            (
                "http://test/subjects/manifest.json",
                r#"{"topics": [{"name": "t", "files": ["a.txt", "notes.pdf"]}]}"#,
            ),
            ("http://test/subjects/t/a.txt", "T\n2024-01-01\nx"),
        ]);

        let result = load_with(&backend, &test_config(), None).unwrap();
        assert_eq!(result.entries.len(), 1);
        assert!(result.entries[0].images.is_empty());
        // The pdf was never fetched.
        assert!(
            !backend
                .requested_urls()
                .iter()
                .any(|url| url.contains("notes.pdf"))
        );
    }

    #[test]
    fn topic_with_empty_file_list_contributes_nothing() {
        let backend = MockBackend::with_routes(&[(
            "http://test/subjects/manifest.json",
            r#"{"topics": [{"name": "empty", "files": []}]}"#,
        )]);

        let (tx, rx) = mpsc::channel();
        let result = load_with(&backend, &test_config(), Some(tx)).unwrap();
        assert!(result.entries.is_empty());
        assert_eq!(result.stats.topics, 1);
        assert_eq!(
            collect_events(rx),
            vec![LoadEvent::TopicStarted {
                name: "empty".to_string(),
                text_files: 0,
                image_files: 0,
            }]
        );
    }

    // =========================================================================
    // Manifest-level failures
    // =========================================================================

    #[test]
    fn manifest_fetch_failure_is_error() {
        let backend = MockBackend::new();
        let result = load_with(&backend, &test_config(), None);
        assert!(matches!(result, Err(LoadError::ManifestFetch(_))));
    }

    #[test]
    fn manifest_invalid_json_is_error() {
        let backend =
            MockBackend::with_routes(&[("http://test/subjects/manifest.json", "not json {")]);
        let result = load_with(&backend, &test_config(), None);
        assert!(matches!(result, Err(LoadError::ManifestJson(_))));
    }

    #[test]
    fn manifest_html_error_page_is_json_error() {
        let backend = MockBackend::with_routes(&[(
            "http://test/subjects/manifest.json",
            "<!DOCTYPE html><html><body>404</body></html>",
        )]);
        let result = load_with(&backend, &test_config(), None);
        assert!(matches!(result, Err(LoadError::ManifestJson(_))));
    }

    #[test]
    fn manifest_without_topics_array_is_shape_error() {
        for body in [r#"{}"#, r#"{"topics": "Nature"}"#, r#"{"topics": 3}"#] {
            let backend = MockBackend::with_routes(&[("http://test/subjects/manifest.json", body)]);
            let result = load_with(&backend, &test_config(), None);
            assert!(matches!(result, Err(LoadError::ManifestShape)), "{body}");
        }
    }

    // =========================================================================
    // Descriptor skips
    // =========================================================================

    #[test]
    fn malformed_descriptor_skipped_others_load() {
        let backend = MockBackend::with_routes(&[
            (
                "http://test/subjects/manifest.json",
                r#"{"topics": [
                    {"files": ["orphan.txt"]},
                    {"name": "ok", "files": ["a.txt"]}
                ]}"#,
            ),
            ("http://test/subjects/ok/a.txt", "T\n2024-01-01\nx"),
        ]);

        let (tx, rx) = mpsc::channel();
        let result = load_with(&backend, &test_config(), Some(tx)).unwrap();

        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.stats.topics, 1);
        assert_eq!(result.stats.skipped_topics, 1);
        let events = collect_events(rx);
        assert_eq!(
            events[0],
            LoadEvent::TopicSkipped {
                index: 0,
                reason: TopicDescriptorError::MissingName,
            }
        );
    }

    #[test]
    fn descriptor_without_file_list_is_skipped() {
        let backend = MockBackend::with_routes(&[(
            "http://test/subjects/manifest.json",
            r#"{"topics": [{"name": "nofiles"}]}"#,
        )]);

        let (tx, rx) = mpsc::channel();
        let result = load_with(&backend, &test_config(), Some(tx)).unwrap();
        assert!(result.entries.is_empty());
        assert_eq!(result.stats.skipped_topics, 1);
        assert_eq!(
            collect_events(rx),
            vec![LoadEvent::TopicSkipped {
                index: 0,
                reason: TopicDescriptorError::MissingFiles,
            }]
        );
    }

    // =========================================================================
    // File skips
    // =========================================================================

    #[test]
    fn unfetchable_file_skipped_others_load() {
        let backend = MockBackend::with_routes(&[
            (
                "http://test/subjects/manifest.json",
                r#"{"topics": [{"name": "t", "files": ["missing.txt", "a.txt"]}]}"#,
            ),
            ("http://test/subjects/t/a.txt", "T\n2024-01-01\nx"),
        ]);

        let (tx, rx) = mpsc::channel();
        let result = load_with(&backend, &test_config(), Some(tx)).unwrap();

        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.stats.skipped_files, 1);
        let events = collect_events(rx);
        let skipped: Vec<&LoadEvent> = events
            .iter()
            .filter(|e| matches!(e, LoadEvent::FileSkipped { .. }))
            .collect();
        assert_eq!(skipped.len(), 1);
        assert!(matches!(
            skipped[0],
            LoadEvent::FileSkipped {
                file,
                reason: SkipReason::Fetch(_),
                ..
            } if file == "missing.txt"
        ));
    }

    #[test]
    fn html_body_skipped_as_error_page() {
        let backend = MockBackend::with_routes(&[
            (
                "http://test/subjects/manifest.json",
                r#"{"topics": [{"name": "t", "files": ["a.txt"]}]}"#,
            ),
            (
                "http://test/subjects/t/a.txt",
                "<!doctype html><html><body>app shell</body></html>",
            ),
        ]);

        let (tx, rx) = mpsc::channel();
        let result = load_with(&backend, &test_config(), Some(tx)).unwrap();
        assert!(result.entries.is_empty());
        let events = collect_events(rx);
        assert!(events.contains(&LoadEvent::FileSkipped {
            topic: "t".to_string(),
            file: "a.txt".to_string(),
            reason: SkipReason::HtmlBody,
        }));
    }

    #[test]
    fn unparseable_body_skipped_with_parse_reason() {
        let backend = MockBackend::with_routes(&[
            (
                "http://test/subjects/manifest.json",
                r#"{"topics": [{"name": "t", "files": ["a.txt"]}]}"#,
            ),
            ("http://test/subjects/t/a.txt", "Only a title"),
        ]);

        let (tx, rx) = mpsc::channel();
        let result = load_with(&backend, &test_config(), Some(tx)).unwrap();
        assert!(result.entries.is_empty());
        assert_eq!(result.stats.skipped_files, 1);
        let events = collect_events(rx);
        assert!(events.contains(&LoadEvent::FileSkipped {
            topic: "t".to_string(),
            file: "a.txt".to_string(),
            reason: SkipReason::Unparseable(ParseError::MissingDate),
        }));
    }

    // =========================================================================
    // Lowercase folder fallback
    // =========================================================================

    #[test]
    fn failed_fetch_retries_lowercased_folder() {
        let backend = MockBackend::with_routes(&[
            (
                "http://test/subjects/manifest.json",
                r#"{"topics": [{"name": "Nature", "files": ["a.txt"]}]}"#,
            ),
            ("http://test/subjects/nature/a.txt", "T\n2024-01-01\nx"),
        ]);

        let result = load_with(&backend, &test_config(), None).unwrap();
        assert_eq!(result.entries.len(), 1);
        // Subject keeps the manifest casing even when the fetch fell back.
        assert_eq!(result.entries[0].subject, "Nature");
        assert_eq!(
            backend.requested_urls(),
            vec![
                "http://test/subjects/manifest.json",
                "http://test/subjects/Nature/a.txt",
                "http://test/subjects/nature/a.txt",
            ]
        );
    }

    #[test]
    fn lowercase_topic_gets_no_retry() {
        let backend = MockBackend::with_routes(&[(
            "http://test/subjects/manifest.json",
            r#"{"topics": [{"name": "nature", "files": ["a.txt"]}]}"#,
        )]);

        let result = load_with(&backend, &test_config(), None).unwrap();
        assert!(result.entries.is_empty());
        assert_eq!(
            backend.requested_urls(),
            vec![
                "http://test/subjects/manifest.json",
                "http://test/subjects/nature/a.txt",
            ]
        );
    }

    #[test]
    fn html_body_does_not_trigger_retry() {
        let backend = MockBackend::with_routes(&[
            (
                "http://test/subjects/manifest.json",
                r#"{"topics": [{"name": "Nature", "files": ["a.txt"]}]}"#,
            ),
            ("http://test/subjects/Nature/a.txt", "<html>shell</html>"),
            ("http://test/subjects/nature/a.txt", "T\n2024-01-01\nx"),
        ]);

        let result = load_with(&backend, &test_config(), None).unwrap();
        // The cased fetch succeeded (with an error page), so no retry happens.
        assert!(result.entries.is_empty());
        assert_eq!(
            backend.requested_urls(),
            vec![
                "http://test/subjects/manifest.json",
                "http://test/subjects/Nature/a.txt",
            ]
        );
    }

    #[test]
    fn image_urls_never_use_the_lowercase_fallback() {
        let backend = MockBackend::with_routes(&[
            (
                "http://test/subjects/manifest.json",
                r#"{"topics": [{"name": "Nature", "files": ["a.txt", "p.jpg"]}]}"#,
            ),
            ("http://test/subjects/nature/a.txt", "T\n2024-01-01\nx"),
        ]);

        let result = load_with(&backend, &test_config(), None).unwrap();
        assert_eq!(result.entries[0].images, vec!["http://test/subjects/Nature/p.jpg"]);
    }

    // =========================================================================
    // Event stream
    // =========================================================================

    #[test]
    fn events_arrive_in_fetch_order() {
        let backend = MockBackend::with_routes(&[
            (
                "http://test/subjects/manifest.json",
                r#"{"topics": [{"name": "t", "files": ["a.txt", "p.png"]}]}"#,
            ),
            ("http://test/subjects/t/a.txt", "Hello\n2024-01-01\nBody"),
        ]);

        let (tx, rx) = mpsc::channel();
        load_with(&backend, &test_config(), Some(tx)).unwrap();
        let events = collect_events(rx);
        assert_eq!(
            events,
            vec![
                LoadEvent::TopicStarted {
                    name: "t".to_string(),
                    text_files: 1,
                    image_files: 1,
                },
                LoadEvent::EntryLoaded {
                    id: "t-a".to_string(),
                    title: "Hello".to_string(),
                    date: "2024-01-01".to_string(),
                },
            ]
        );
    }

    // =========================================================================
    // The collapsing boundary
    // =========================================================================

    #[test]
    fn load_collapses_failure_to_empty_list() {
        // Port 0 is never routable, so the manifest fetch fails fast.
        let config = JournalConfig {
            root_url: "http://127.0.0.1:0/subjects".to_string(),
            ..Default::default()
        };

        let (tx, rx) = mpsc::channel();
        let entries = load(&config, Some(tx));
        assert!(entries.is_empty());
        let events = collect_events(rx);
        assert!(matches!(events.last(), Some(LoadEvent::LoadFailed { .. })));
    }

    // =========================================================================
    // LoadStats display
    // =========================================================================

    #[test]
    fn stats_display_clean_run() {
        let stats = LoadStats {
            topics: 2,
            entries: 5,
            ..Default::default()
        };
        assert_eq!(format!("{stats}"), "5 entries from 2 topics");
    }

    #[test]
    fn stats_display_with_skips() {
        let stats = LoadStats {
            topics: 2,
            entries: 5,
            skipped_files: 2,
            skipped_topics: 1,
        };
        assert_eq!(
            format!("{stats}"),
            "5 entries from 2 topics, 2 files skipped, 1 topic skipped"
        );
    }

    #[test]
    fn stats_display_singular_counts() {
        let stats = LoadStats {
            topics: 1,
            entries: 1,
            skipped_files: 1,
            skipped_topics: 0,
        };
        assert_eq!(format!("{stats}"), "1 entry from 1 topic, 1 file skipped");
    }

    // =========================================================================
    // Manifest inspection
    // =========================================================================

    #[test]
    fn inspect_classifies_files_per_topic() {
        let backend = MockBackend::with_routes(&[(
            "http://test/subjects/manifest.json",
            r#"{"topics": [
                {"name": "Nature", "files": ["a.txt", "b.TXT", "p.png", "notes.pdf"]}
            ]}"#,
        )]);

        let report = inspect_manifest(&backend, &test_config()).unwrap();
        assert_eq!(
            report.topics,
            vec![TopicSummary {
                name: "Nature".to_string(),
                text_files: 2,
                image_files: 1,
                other_files: 1,
            }]
        );
        assert!(report.duplicate_ids.is_empty());
        // Only the manifest was fetched.
        assert_eq!(backend.requested_urls().len(), 1);
    }

    #[test]
    fn inspect_reports_duplicate_ids() {
        let backend = MockBackend::with_routes(&[(
            "http://test/subjects/manifest.json",
            r#"{"topics": [
                {"name": "t", "files": ["a.txt", "a.TXT"]},
                {"name": "u", "files": ["a.txt"]}
            ]}"#,
        )]);

        let report = inspect_manifest(&backend, &test_config()).unwrap();
        assert_eq!(report.duplicate_ids, vec!["t-a"]);
    }

    #[test]
    fn inspect_reports_skipped_descriptors() {
        let backend = MockBackend::with_routes(&[(
            "http://test/subjects/manifest.json",
            r#"{"topics": [{"name": "ok", "files": []}, {"entries": ["x.txt"]}]}"#,
        )]);

        let report = inspect_manifest(&backend, &test_config()).unwrap();
        assert_eq!(report.topics.len(), 1);
        assert_eq!(
            report.skipped,
            vec![(1, TopicDescriptorError::MissingName)]
        );
    }

    #[test]
    fn inspect_propagates_manifest_errors() {
        let backend = MockBackend::new();
        assert!(matches!(
            inspect_manifest(&backend, &test_config()),
            Err(LoadError::ManifestFetch(_))
        ));
    }
}
