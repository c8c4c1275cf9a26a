use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::prompt::summary_prompt;
use crate::kernel::{BaseHttpFetcher, BaseSummaryService};

/// Documents smaller than this are probably an error page, not an agenda.
pub const SUSPECT_DOCUMENT_BYTES: usize = 100;

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("failed to download {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("summarization failed: {0}")]
    Summarization(#[source] anyhow::Error),
}

/// Turns an agenda document into summary text.
pub struct Summarizer {
    fetcher: Arc<dyn BaseHttpFetcher>,
    service: Arc<dyn BaseSummaryService>,
}

impl Summarizer {
    pub fn new(fetcher: Arc<dyn BaseHttpFetcher>, service: Arc<dyn BaseSummaryService>) -> Self {
        Self { fetcher, service }
    }

    /// One download and one service call; no retry.
    pub async fn summarize(&self, label: &str, source_url: &str) -> Result<String, SummarizeError> {
        let document = self
            .fetcher
            .fetch_bytes(source_url)
            .await
            .map_err(|source| SummarizeError::Download {
                url: source_url.to_string(),
                source,
            })?;

        if document.len() < SUSPECT_DOCUMENT_BYTES {
            warn!(
                url = %source_url,
                bytes = document.len(),
                "Agenda document is suspiciously small, sending anyway"
            );
        } else {
            debug!(url = %source_url, bytes = document.len(), "Downloaded agenda document");
        }

        let summary = self
            .service
            .summarize_document(&document, &summary_prompt(label))
            .await
            .map_err(SummarizeError::Summarization)?;

        info!(url = %source_url, label = %label, chars = summary.chars().count(), "Summary generated");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::{MockHttpFetcher, MockSummaryService};

    const URL: &str = "https://council.example.govt.nz/Open/2025/03/CC_20250318_AGN_4070_AT.PDF";

    fn pdf() -> Vec<u8> {
        let mut bytes = b"%PDF-1.4\n".to_vec();
        bytes.resize(2048, b' ');
        bytes
    }

    #[tokio::test]
    async fn test_summarize_sends_document_and_prompt() {
        let fetcher = Arc::new(MockHttpFetcher::new().with_document(URL, &pdf()));
        let service = Arc::new(MockSummaryService::new().with_summary(
            "The Hutt City Council met to discuss the Long Term Plan.\n• Rates increase of 9.5%",
        ));
        let summarizer = Summarizer::new(fetcher.clone(), service.clone());

        let summary = summarizer.summarize("Hutt City Council", URL).await.unwrap();

        assert!(summary.starts_with("The Hutt City Council met to discuss"));
        assert!(fetcher.was_fetched(URL));
        let calls = service.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].document_len, 2048);
        assert!(calls[0].prompt.contains("The Hutt City Council met to discuss"));
    }

    #[tokio::test]
    async fn test_small_document_is_still_forwarded() {
        let fetcher = Arc::new(MockHttpFetcher::new().with_document(URL, b"<html>gone</html>"));
        let service = Arc::new(MockSummaryService::new());
        let summarizer = Summarizer::new(fetcher, service.clone());

        assert!(summarizer.summarize("Hutt City Council", URL).await.is_ok());
        assert_eq!(service.calls()[0].document_len, 17);
    }

    #[tokio::test]
    async fn test_download_failure() {
        let service = Arc::new(MockSummaryService::new());
        let summarizer = Summarizer::new(Arc::new(MockHttpFetcher::new()), service.clone());

        match summarizer.summarize("Hutt City Council", URL).await {
            Err(SummarizeError::Download { url, .. }) => assert_eq!(url, URL),
            other => panic!("expected Download error, got {:?}", other),
        }
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_service_failure() {
        let fetcher = Arc::new(MockHttpFetcher::new().with_document(URL, &pdf()));
        let service = Arc::new(MockSummaryService::new().with_failure("quota exceeded"));
        let summarizer = Summarizer::new(fetcher, service);

        let err = summarizer.summarize("Hutt City Council", URL).await.unwrap_err();
        assert!(matches!(err, SummarizeError::Summarization(_)));
        assert!(err.to_string().contains("quota exceeded"));
    }
}
