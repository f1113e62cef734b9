//! Error types for the wxrto library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`WxrError`] — **Fatal**: the batch cannot proceed at all (export file
//!   missing, malformed XML, unknown generator). Returned as `Err(WxrError)`
//!   from the top-level `convert*` functions.
//!
//! * [`JobError`] — **Non-fatal**: a single document failed (bad post date,
//!   unwritable output file) but every other document is fine. Stored inside
//!   [`crate::output::JobOutcome::Failed`] so callers can inspect partial
//!   success rather than losing the whole export to one bad post.
//!
//! Unknown markup is never an error at all; the builder degrades it to a
//! paragraph.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the wxrto library.
///
/// Document-level failures use [`JobError`] and are stored in
/// [`crate::output::JobOutcome`] rather than propagated here.
#[derive(Debug, Error)]
pub enum WxrError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("WXR file not found: '{path}'\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// Reading the export (file or stdin) failed part-way.
    #[error("Failed to read WXR input '{source_name}': {source}")]
    ReadFailed {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    /// The input parsed, but is not a WordPress export.
    #[error("Malformed WXR export: {detail}")]
    MalformedExport { detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No front-matter template is registered under this name.
    #[error("generator '{name}' not installed (available: {available})")]
    UnknownGenerator { name: String, available: String },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single document.
///
/// Stored in [`crate::output::JobOutcome::Failed`]. The batch always
/// continues with the remaining documents.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum JobError {
    /// `wp:post_date` did not match `YYYY-MM-DD HH:MM:SS`.
    #[error("failed to parse post date '{value}': {detail}")]
    InvalidDate { value: String, detail: String },

    /// The destination directory could not be created.
    #[error("failed to make output directory '{path}': {detail}")]
    CreateDirFailed { path: PathBuf, detail: String },

    /// The output file could not be created or written.
    #[error("unable to write file '{path}': {detail}")]
    WriteFailed { path: PathBuf, detail: String },

    /// Neither a slug nor a title was available to name the file.
    #[error("item has neither a post name nor a title to derive a file name from")]
    EmptySlug,

    /// The conversion task panicked; its permit was still returned.
    #[error("conversion task panicked: {detail}")]
    Panicked { detail: String },
}
