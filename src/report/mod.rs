//! Report renderers for license search results.
//!
//! - [`html`] — table of files and highlighted license text, written to a file.
//! - [`terminal`] — `comfy-table` listing on stdout.
//! - [`summary`] — scanned/skipped counts printed to stderr after every run.
//!
//! JSON output is a plain `serde_json` dump of the groups and needs no module.

pub mod html;
pub mod summary;
pub mod terminal;
