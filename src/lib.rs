//! # Subjournal
//!
//! A terminal viewer for plain-text journals published as static topic
//! folders. The journal is just files on a web server: a `manifest.json`
//! naming topics and their files, and one `.txt` file per entry. No API,
//! no database, no build step on the publishing side.
//!
//! # Architecture: One-Pass Load
//!
//! Every load walks the remote tree top to bottom and produces a sorted,
//! self-contained entry list:
//!
//! ```text
//! 1. Manifest   <root>/manifest.json     →  topic descriptors
//! 2. Fetch      <root>/<topic>/<file>    →  raw entry text (one at a time)
//! 3. Parse      title, date, body lines  →  Entry
//! 4. Sort       newest first             →  Vec<Entry>
//! ```
//!
//! The pass is deliberately simple:
//!
//! - **Testability**: fetching hides behind [`fetch::FetchBackend`], a
//!   one-method trait, so the whole pipeline runs against an in-memory
//!   backend in unit tests.
//! - **Observability**: every skip decision goes out as a
//!   [`load::LoadEvent`] on a channel, so the CLI can stream progress
//!   without the loader knowing about terminals.
//! - **Predictability**: no cache, no state between runs. What the
//!   manifest lists is what you get.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `journal.toml` loading, validation, and URL composition |
//! | [`fetch`] | Blocking HTTP behind the one-method [`fetch::FetchBackend`] trait |
//! | [`manifest`] | Topic descriptor resolution, including the `name`/`topic` and `files`/`entries` aliases |
//! | [`entry`] | Entry parsing: title line, date line, body, preview, id |
//! | [`load`] | The one-pass loader: manifest → topics → sorted entries, with progress events |
//! | [`dates`] | Lenient date parsing and the newest-first comparator |
//! | [`search`] | Pure query and category filtering over loaded entries |
//! | [`output`] | CLI output formatting: entry lists, detail view, check reports |
//!
//! # Design Decisions
//!
//! ## Soft Failures Below the Manifest
//!
//! A published journal accumulates cruft: renamed folders, files listed in
//! the manifest but deleted on disk, an entry saved without its date line.
//! One bad file must not take down the whole journal, so everything below
//! the manifest is skip-and-report. The manifest itself is the one
//! load-bearing fetch; its failures are the [`load::LoadError`] variants.
//!
//! ## Lowercase Folder Fallback
//!
//! Manifest topic names are display names ("Nature"), but static hosts are
//! case-sensitive and folders drift toward lowercase. A failed entry fetch
//! is retried once against the lowercased folder name before being
//! skipped. Entries keep the manifest casing as their subject either way.
//!
//! ## Error Pages Are Not Entries
//!
//! SPA hosts answer unknown paths with the app shell and HTTP 200. A
//! fetched body that opens as an HTML document is treated as a missing
//! file, not an entry.
//!
//! ## Blocking, Sequential HTTP
//!
//! The loader uses `reqwest`'s blocking client and fetches one file at a
//! time. A journal is tens of files, not thousands; sequential fetches
//! keep the progress stream readable and the failure attribution exact.
//! TLS is rustls, so the binary never links a system OpenSSL.
//!
//! ## Dates Stay Strings
//!
//! The date line is whatever the author wrote. Parsing happens only to
//! order entries; the raw string is what gets displayed and serialized.
//! Entries whose dates don't parse still load, sorting after every dated
//! entry. The accepted formats live in [`dates`].

pub mod config;
pub mod dates;
pub mod entry;
pub mod fetch;
pub mod load;
pub mod manifest;
pub mod output;
pub mod search;

#[cfg(test)]
pub(crate) mod test_helpers;
