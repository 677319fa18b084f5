//! Manifest schema: the `topics` index of the journal.
//!
//! The manifest is a single JSON document listing every topic folder and
//! the files inside it:
//!
//! ```json
//! {
//!   "topics": [
//!     { "name": "Nature", "files": ["a.txt", "photo.png"] }
//!   ]
//! }
//! ```
//!
//! Two key spellings are accepted per descriptor, a concession to manifests
//! written by hand: the topic name may appear under `name` or `topic`, and
//! the file list under `files` or `entries` (first non-empty name wins,
//! `files` wins over `entries`). No other aliases are recognized. Unknown
//! extra keys are ignored.
//!
//! Descriptor validation is per-item: one malformed descriptor is skipped
//! with a [`TopicDescriptorError`] while the rest of the manifest loads.

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopicDescriptorError {
    #[error("no topic name (empty or missing \"name\"/\"topic\" key)")]
    MissingName,
    #[error("no file list (missing \"files\"/\"entries\" key)")]
    MissingFiles,
    #[error("malformed descriptor: {0}")]
    Malformed(String),
}

/// A validated topic descriptor: a folder name and the files it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub name: String,
    pub files: Vec<String>,
}

/// Raw descriptor shape before key resolution.
#[derive(Debug, Deserialize)]
struct RawTopic {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    topic: Option<String>,
    #[serde(default)]
    files: Option<Vec<String>>,
    #[serde(default)]
    entries: Option<Vec<String>>,
}

impl RawTopic {
    fn resolve(self) -> Result<Topic, TopicDescriptorError> {
        let name = self
            .name
            .filter(|n| !n.is_empty())
            .or(self.topic.filter(|t| !t.is_empty()))
            .ok_or(TopicDescriptorError::MissingName)?;
        // An empty list is a present list: `files = []` beats `entries`.
        let files = self
            .files
            .or(self.entries)
            .ok_or(TopicDescriptorError::MissingFiles)?;
        Ok(Topic { name, files })
    }
}

/// Read and validate one element of the `topics` array.
pub fn read_descriptor(raw: &serde_json::Value) -> Result<Topic, TopicDescriptorError> {
    let raw_topic: RawTopic = serde_json::from_value(raw.clone())
        .map_err(|err| TopicDescriptorError::Malformed(err.to_string()))?;
    raw_topic.resolve()
}
