//! License detection in comment text.
//!
//! - [`classifier`] — keyword patterns that flag a comment as license text,
//!   plus the sanitizer that cleans it for display.
//! - [`key`] — aggressive text folding used to group near-identical blurbs.

pub mod classifier;
pub mod key;
