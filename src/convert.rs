//! Batch conversion entry points.
//!
//! [`convert`] reads and decodes an export, then hands every item to
//! [`convert_items`], which runs one [`crate::job::convert_item`] per item
//! through the bounded scheduler and returns once all of them have joined.

use crate::config::ConversionConfig;
use crate::error::{JobError, WxrError};
use crate::item::Item;
use crate::job;
use crate::output::{BatchReport, BatchStats, JobOutcome};
use crate::pipeline::input::{self, InputSource};
use crate::progress::ProgressCallback;
use crate::scheduler;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Convert a WXR export (file or stdin) into Markdown files.
///
/// # Errors
/// Returns `Err(WxrError)` only for fatal errors: the input is missing,
/// unreadable, or not a WXR document. Individual documents that fail are
/// reported in [`BatchReport::outcomes`].
pub async fn convert(
    source: &InputSource,
    config: &ConversionConfig,
) -> Result<BatchReport, WxrError> {
    info!("Starting conversion: {:?}", source);
    let items = input::load_items(source).await?;
    Ok(convert_items(items, config).await)
}

/// Convert the export at `path`.
pub async fn convert_file(
    path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<BatchReport, WxrError> {
    convert(&InputSource::File(path.as_ref().to_path_buf()), config).await
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary multi-threaded tokio runtime internally.
pub fn convert_sync(
    source: &InputSource,
    config: &ConversionConfig,
) -> Result<BatchReport, WxrError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| WxrError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert(source, config))
}

/// Convert already-decoded items with at most `config.concurrency` in flight.
pub async fn convert_items(items: Vec<Item>, config: &ConversionConfig) -> BatchReport {
    let start = Instant::now();
    let total = items.len();
    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_start(total);
    }

    // A panicked task loses its item, so keep the titles for reporting.
    let titles: Vec<String> = items.iter().map(|i| i.title.clone()).collect();
    let layout = Arc::new(config.layout());
    let generator = config.generator;
    let callback = config.progress_callback.clone();

    let results = scheduler::run_bounded(items, config.concurrency, move |item| {
        let layout = Arc::clone(&layout);
        let callback = callback.clone();
        async move {
            let outcome = job::convert_item(item, &layout, generator).await;
            notify(callback.as_ref(), &outcome);
            outcome
        }
    })
    .await;

    let outcomes: Vec<JobOutcome> = results
        .into_iter()
        .zip(titles)
        .map(|(result, title)| {
            result.unwrap_or_else(|aborted| {
                let outcome = JobOutcome::Failed {
                    title,
                    error: JobError::Panicked {
                        detail: aborted.to_string(),
                    },
                };
                notify(config.progress_callback.as_ref(), &outcome);
                outcome
            })
        })
        .collect();

    let stats = BatchStats::from_outcomes(&outcomes, start.elapsed().as_millis() as u64);
    info!(
        "Conversion complete: {} written, {} skipped, {} failed of {} items, {}ms",
        stats.written, stats.skipped, stats.failed, stats.total, stats.duration_ms
    );
    if let Some(ref cb) = config.progress_callback {
        cb.on_batch_complete(total, stats.written);
    }

    BatchReport { outcomes, stats }
}

fn notify(callback: Option<&ProgressCallback>, outcome: &JobOutcome) {
    let Some(cb) = callback else { return };
    match outcome {
        JobOutcome::Written { title, path, .. } => cb.on_item_written(title, path),
        JobOutcome::Skipped { title, reason } => cb.on_item_skipped(title, *reason),
        JobOutcome::Failed { title, error } => cb.on_item_failed(title, &error.to_string()),
    }
}
