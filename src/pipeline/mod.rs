//! Pipeline stages for WXR-to-Markdown conversion.
//!
//! Each submodule implements exactly one transformation step.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ markup ──▶ build ──▶ render
//! (WXR)     (HTML)     (model)   (Markdown)
//! ```
//!
//! 1. [`input`]  — read the export from a file or stdin and decode its items
//! 2. [`markup`] — parse one item's HTML body into an owned generic tree
//! 3. [`build`]  — classify the generic tree into the typed document model
//! 4. [`render`] — print the document model as Markdown

pub mod build;
pub mod input;
pub mod markup;
pub mod render;
