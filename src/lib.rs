//! # wxrto
//!
//! Convert a WordPress eXtended RSS (WXR) export into Markdown files for a
//! static site generator.
//!
//! ## Pipeline Overview
//!
//! ```text
//! WXR export
//!  │
//!  ├─ 1. Input    read file or stdin, decode <item> records (xml5ever)
//!  ├─ 2. Markup   parse each HTML body into a generic tree (html5ever)
//!  ├─ 3. Build    classify tags into the typed document model
//!  ├─ 4. Render   print the model as Markdown
//!  └─ 5. Output   front-matter + Markdown, one file per post or page
//! ```
//!
//! Steps 2–5 run once per item, with at most `concurrency` items in flight
//! (see [`scheduler`]).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wxrto::{convert_file, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder()
//!         .output_dir("site")
//!         .generator_name("hugo")
//!         .build()?;
//!     let report = convert_file("export.xml", &config).await?;
//!     eprintln!("{} of {} items written", report.stats.written, report.stats.total);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `wxrto` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod frontmatter;
pub mod item;
pub mod job;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod scheduler;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder, OutputLayout};
pub use convert::{convert, convert_file, convert_items, convert_sync};
pub use document::{Document, Node};
pub use error::{JobError, WxrError};
pub use frontmatter::{FrontMatter, Generator};
pub use item::{ContentKind, Item};
pub use job::convert_body;
pub use output::{BatchReport, BatchStats, JobOutcome, SkipReason};
pub use pipeline::build::build;
pub use pipeline::input::{parse_wxr, InputSource};
pub use pipeline::markup::{parse_html, GenericNode, NodeKind};
pub use pipeline::render::{render, render_document};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
