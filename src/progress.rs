//! Progress-callback trait for per-document conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the scheduler finishes each document.
//!
//! # Example
//!
//! ```rust
//! use wxrto::{ConversionProgressCallback, ConversionConfig};
//! use std::path::Path;
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     written: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for CountingCallback {
//!     fn on_item_written(&self, title: &str, path: &Path) {
//!         let done = self.written.fetch_add(1, Ordering::SeqCst) + 1;
//!         eprintln!("{done}: {title} -> {}", path.display());
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { written: AtomicUsize::new(0) });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use crate::output::SkipReason;
use std::path::Path;
use std::sync::Arc;

/// Called by the scheduler as documents reach a terminal state.
///
/// Implementations must be `Send + Sync`: item events fire from whichever
/// worker thread ran the job, in completion order. All methods default to
/// no-ops.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once, before the first job is admitted.
    fn on_batch_start(&self, total_items: usize) {
        let _ = total_items;
    }

    fn on_item_written(&self, title: &str, path: &Path) {
        let _ = (title, path);
    }

    fn on_item_skipped(&self, title: &str, reason: SkipReason) {
        let _ = (title, reason);
    }

    fn on_item_failed(&self, title: &str, error: &str) {
        let _ = (title, error);
    }

    /// Called once, after every job has joined.
    fn on_batch_complete(&self, total_items: usize, written: usize) {
        let _ = (total_items, written);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
