//! Result types for a batch conversion.

use crate::error::JobError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Why a record produced no file, without that being a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// `wp:post_type` is neither `post` nor `page`.
    NotPostOrPage,
    /// `wp:status` is `trash`.
    Trashed,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotPostOrPage => f.write_str("not a post or page"),
            SkipReason::Trashed => f.write_str("marked as trash"),
        }
    }
}

/// Terminal state of one conversion job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum JobOutcome {
    Written {
        title: String,
        path: PathBuf,
        /// Byte length of the rendered Markdown, front-matter excluded.
        markdown_len: usize,
    },
    Skipped {
        title: String,
        reason: SkipReason,
    },
    Failed {
        title: String,
        error: JobError,
    },
}

impl JobOutcome {
    pub fn title(&self) -> &str {
        match self {
            JobOutcome::Written { title, .. }
            | JobOutcome::Skipped { title, .. }
            | JobOutcome::Failed { title, .. } => title,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, JobOutcome::Written { .. })
    }
}

/// Aggregate counts for a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    pub total: usize,
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
    pub duration_ms: u64,
}

impl BatchStats {
    pub fn from_outcomes(outcomes: &[JobOutcome], duration_ms: u64) -> Self {
        let mut stats = BatchStats {
            total: outcomes.len(),
            duration_ms,
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome {
                JobOutcome::Written { .. } => stats.written += 1,
                JobOutcome::Skipped { .. } => stats.skipped += 1,
                JobOutcome::Failed { .. } => stats.failed += 1,
            }
        }
        stats
    }
}

/// Everything a batch produced. Outcomes are in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub outcomes: Vec<JobOutcome>,
    pub stats: BatchStats,
}
