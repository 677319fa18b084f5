//! Viewer configuration module.
//!
//! Handles loading and validating `journal.toml`. Configuration is flat and
//! sparse: stock defaults cover everything, and a config file only needs the
//! keys it wants to override.
//!
//! ## Config File Location
//!
//! `--config <path>` names a file explicitly; otherwise `journal.toml` in
//! the working directory is used when present, and stock defaults apply when
//! it is not. The `--root-url` flag overrides the file's `root_url`.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! root_url = "http://localhost:8000/subjects"  # Journal content root
//! manifest_file = "manifest.json"              # Manifest name under the root
//! timeout_secs = 30                            # Per-request HTTP timeout
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default config filename looked up in the working directory.
pub const CONFIG_FILE: &str = "journal.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Viewer configuration loaded from `journal.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JournalConfig {
    /// Base URL of the journal content tree. Topic folders and the manifest
    /// live directly under it. Trailing slashes are tolerated.
    pub root_url: String,
    /// Manifest filename under the root.
    pub manifest_file: String,
    /// Per-request HTTP timeout in seconds.
    pub timeout_secs: u64,
}

fn default_root_url() -> String {
    "http://localhost:8000/subjects".to_string()
}

fn default_manifest_file() -> String {
    "manifest.json".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            root_url: default_root_url(),
            manifest_file: default_manifest_file(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl JournalConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root_url.trim_end_matches('/').is_empty() {
            return Err(ConfigError::Validation("root_url must not be empty".into()));
        }
        if self.manifest_file.is_empty() {
            return Err(ConfigError::Validation(
                "manifest_file must not be empty".into(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeout_secs must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// URL of the manifest document.
    pub fn manifest_url(&self) -> String {
        format!("{}/{}", self.base(), self.manifest_file)
    }

    /// URL of a file inside a topic folder.
    ///
    /// Pure string composition: the root may be a bare path like
    /// `/subjects` when the output is consumed by a same-origin client.
    pub fn file_url(&self, topic: &str, file: &str) -> String {
        format!("{}/{topic}/{file}", self.base())
    }

    /// Request timeout for the HTTP backend.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn base(&self) -> &str {
        self.root_url.trim_end_matches('/')
    }
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Load config from an explicit path or the working-directory default.
///
/// - `Some(path)`: the file must exist and parse.
/// - `None`: `journal.toml` is used when present, stock defaults otherwise.
///
/// The result is always validated.
pub fn load_config(explicit: Option<&Path>) -> Result<JournalConfig, ConfigError> {
    let config = match explicit {
        Some(path) => parse_file(path)?,
        None => {
            let default_path = Path::new(CONFIG_FILE);
            if default_path.exists() {
                parse_file(default_path)?
            } else {
                JournalConfig::default()
            }
        }
    };
    config.validate()?;
    Ok(config)
}

fn parse_file(path: &Path) -> Result<JournalConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Returns a fully-commented stock `journal.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Subjournal Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# The viewer reads `journal.toml` from the working directory, or the file
# named by `--config`. The `--root-url` flag overrides `root_url`.
# Unknown keys will cause an error.

# Base URL of the journal content tree. The manifest and every topic folder
# live directly under it:
#
#   <root_url>/manifest.json
#   <root_url>/<Topic>/<entry>.txt
#   <root_url>/<Topic>/<photo>.jpg
root_url = "http://localhost:8000/subjects"

# Manifest filename under the root.
manifest_file = "manifest.json"

# Per-request HTTP timeout in seconds. Must be non-zero.
timeout_secs = 30
"##
}
