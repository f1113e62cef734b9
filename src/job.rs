//! One document's end-to-end conversion: classify, name, convert, write.
//!
//! ```text
//! Pending ─▶ Admitted ─┬─▶ Skipped
//!                      └─▶ Converting ─┬─▶ Written
//!                                      └─▶ Failed
//! ```
//!
//! [`convert_item`] never returns an error: every exit is a [`JobOutcome`],
//! so the scheduler's permit is released the same way on all of them.

use crate::config::OutputLayout;
use crate::document::Document;
use crate::error::JobError;
use crate::frontmatter::{FrontMatter, Generator, POST_DATE_FORMAT};
use crate::item::{ContentKind, Item};
use crate::output::{JobOutcome, SkipReason};
use crate::pipeline::{build, markup, render};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Parse, build and render an HTML body.
///
/// Synchronous on purpose: the html5ever DOM is `!Send` and must be gone
/// before the calling task next yields.
pub fn convert_body(html: &str) -> String {
    render::render_document(&body_document(html))
}

/// The document model of an HTML body.
pub fn body_document(html: &str) -> Document {
    let root = markup::parse_html(html);
    build::build(Some(&root))
}

/// Parse a `wp:post_date` value.
pub fn parse_post_date(value: &str) -> Result<NaiveDateTime, JobError> {
    NaiveDateTime::parse_from_str(value.trim(), POST_DATE_FORMAT).map_err(|e| {
        JobError::InvalidDate {
            value: value.to_string(),
            detail: e.to_string(),
        }
    })
}

/// File name for an item: `YYYY-MM-DD-<slug>.md` for posts, `<slug>.md`
/// for pages.
pub fn file_name(kind: ContentKind, date: &NaiveDateTime, slug: &str) -> String {
    match kind {
        ContentKind::Post => format!("{}-{}.md", date.format("%Y-%m-%d"), slug),
        ContentKind::Page => format!("{slug}.md"),
    }
}

/// Destination directory for an item kind.
pub fn target_dir(layout: &OutputLayout, kind: ContentKind) -> PathBuf {
    match kind {
        ContentKind::Post => layout.posts_dir(),
        ContentKind::Page => layout.pages_dir(),
    }
}

/// Convert one record and write its file.
pub async fn convert_item(item: Item, layout: &OutputLayout, generator: Generator) -> JobOutcome {
    let Some(kind) = item.kind() else {
        debug!("{:?} is a {:?}, ignoring", item.title, item.post_type);
        return JobOutcome::Skipped {
            title: item.title,
            reason: SkipReason::NotPostOrPage,
        };
    };

    if item.is_trashed() {
        info!("{:?} marked as trash, ignoring", item.title);
        return JobOutcome::Skipped {
            title: item.title,
            reason: SkipReason::Trashed,
        };
    }

    match write_item(&item, kind, layout, generator).await {
        Ok((path, markdown_len)) => {
            info!("{:?} => {:?}", item.title, path);
            JobOutcome::Written {
                title: item.title,
                path,
                markdown_len,
            }
        }
        Err(error) => {
            warn!("{:?}: {}", item.title, error);
            JobOutcome::Failed {
                title: item.title,
                error,
            }
        }
    }
}

async fn write_item(
    item: &Item,
    kind: ContentKind,
    layout: &OutputLayout,
    generator: Generator,
) -> Result<(PathBuf, usize), JobError> {
    let dir = target_dir(layout, kind);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| JobError::CreateDirFailed {
            path: dir.clone(),
            detail: e.to_string(),
        })?;

    let date = parse_post_date(&item.post_date)?;
    let slug = item.slug().ok_or(JobError::EmptySlug)?;
    let path = dir.join(file_name(kind, &date, &slug));

    let front_matter = generator.front_matter(&FrontMatter {
        title: item.title.clone(),
        date,
        draft: !item.is_published(),
    });
    let markdown = convert_body(&item.content);

    let mut contents = String::with_capacity(front_matter.len() + markdown.len());
    contents.push_str(&front_matter);
    contents.push_str(&markdown);

    write_atomic(&path, contents.as_bytes()).await?;
    Ok((path, markdown.len()))
}

/// Write to a uniquely named `<path>.<n>.tmp`, then rename over `path`, so an
/// interrupted run never leaves a truncated Markdown file behind and two jobs
/// landing on the same name never share a temp file.
async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), JobError> {
    let write_failed = |e: std::io::Error| JobError::WriteFailed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    };

    let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
    let tmp_path = path.with_extension(format!("md.{seq}.tmp"));
    tokio::fs::write(&tmp_path, bytes).await.map_err(write_failed)?;
    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(write_failed(e));
    }
    Ok(())
}
