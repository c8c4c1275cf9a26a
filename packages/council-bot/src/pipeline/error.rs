use std::fmt;

use thiserror::Error;

use crate::domains::catalog::CatalogRecord;
use crate::domains::summaries::SummarizeError;
use crate::domains::threads::{PublishError, SegmentationError};

/// Per-document failure. Contained to its document; the run carries on.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Summarization(SummarizeError),

    #[error(transparent)]
    Segmentation(#[from] SegmentationError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    /// The thread went out but the URL was catalogued meanwhile
    #[error("{url} already catalogued; thread {thread_url} was published anyway")]
    StorageConflict { url: String, thread_url: String },
}

impl From<SummarizeError> for PipelineError {
    fn from(err: SummarizeError) -> Self {
        match err {
            SummarizeError::Download { url, source } => PipelineError::Fetch { url, source },
            other => PipelineError::Summarization(other),
        }
    }
}

/// Last stage a document completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Discovered,
    Summarized,
    Segmented,
    Published,
    Recorded,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Discovered => "discovered",
            Stage::Summarized => "summarized",
            Stage::Segmented => "segmented",
            Stage::Published => "published",
            Stage::Recorded => "recorded",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub enum DocumentOutcome {
    Recorded(CatalogRecord),
    Failed { reached: Stage, error: PipelineError },
}
