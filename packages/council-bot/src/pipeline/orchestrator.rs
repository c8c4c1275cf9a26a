use anyhow::{Context, Result};
use tracing::{error, info, warn};
use url::Url;

use super::error::{DocumentOutcome, PipelineError, Stage};
use crate::config::Config;
use crate::domains::catalog::{CatalogError, CatalogRecord, CatalogResult, LinkCatalog};
use crate::domains::discovery::{DiscoveredLink, DiscoveryScanner};
use crate::domains::summaries::Summarizer;
use crate::domains::threads::{try_segment, ThreadPublisher};
use crate::kernel::BotDeps;

/// Totals for one pass over the council page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub discovered: usize,
    pub recorded: usize,
    pub failed: usize,
}

pub struct Pipeline {
    scanner: DiscoveryScanner,
    summarizer: Summarizer,
    publisher: ThreadPublisher,
}

impl Pipeline {
    pub fn new(deps: &BotDeps, council_url: Url, scan_limit: Option<usize>) -> Self {
        Self {
            scanner: DiscoveryScanner::new(deps.fetcher.clone(), council_url, scan_limit),
            summarizer: Summarizer::new(deps.fetcher.clone(), deps.summaries.clone()),
            publisher: ThreadPublisher::new(deps.threads.clone()),
        }
    }

    /// Discover new agendas and take each one through to a catalog record.
    ///
    /// Documents are handled one at a time. A document failure is logged and
    /// counted; only catalog storage errors end the run early.
    pub async fn run(&self, catalog: &LinkCatalog) -> CatalogResult<RunReport> {
        let links = self.scanner.discover(catalog).await?;
        let mut report = RunReport {
            discovered: links.len(),
            ..RunReport::default()
        };

        for link in &links {
            match self.process(catalog, link).await? {
                DocumentOutcome::Recorded(record) => {
                    report.recorded += 1;
                    info!(url = %record.source_url, thread_url = %record.thread_url, "Agenda recorded");
                }
                DocumentOutcome::Failed { reached, error } => {
                    report.failed += 1;
                    error!(
                        url = %link.url,
                        label = %link.label,
                        reached = %reached,
                        error = %error,
                        "Agenda processing failed"
                    );
                }
            }
        }

        Ok(report)
    }

    /// Summarize, segment, publish and record one document.
    pub async fn process(
        &self,
        catalog: &LinkCatalog,
        link: &DiscoveredLink,
    ) -> CatalogResult<DocumentOutcome> {
        info!(url = %link.url, label = %link.label, "Processing agenda");

        let summary = match self.summarizer.summarize(&link.label, &link.url).await {
            Ok(summary) => summary,
            Err(e) => return Ok(failed(Stage::Discovered, e)),
        };

        let chunks = match try_segment(&summary) {
            Ok(chunks) => chunks,
            Err(e) => return Ok(failed(Stage::Summarized, e)),
        };

        let thread_url = match self.publisher.publish(&chunks).await {
            Ok(url) => url,
            Err(e) => return Ok(failed(Stage::Segmented, e)),
        };

        let record = CatalogRecord::new(&link.label, &link.url, thread_url, summary);
        match catalog.insert(&record).await {
            Ok(()) => Ok(DocumentOutcome::Recorded(record)),
            Err(CatalogError::Conflict { url }) => Ok(failed(
                Stage::Published,
                PipelineError::StorageConflict {
                    url,
                    thread_url: record.thread_url,
                },
            )),
            Err(e) => Err(e),
        }
    }
}

fn failed(reached: Stage, error: impl Into<PipelineError>) -> DocumentOutcome {
    DocumentOutcome::Failed {
        reached,
        error: error.into(),
    }
}

/// One full pass: open the catalog, run the pipeline, close the catalog.
///
/// Returns `None` if the run was interrupted. The catalog is closed either way.
pub async fn run_once(config: &Config, deps: &BotDeps) -> Result<Option<RunReport>> {
    let catalog = LinkCatalog::open(&config.database_url)
        .await
        .context("Failed to open link catalog")?;

    let pipeline = Pipeline::new(deps, config.council_url.clone(), config.scan_limit);

    let result = tokio::select! {
        result = pipeline.run(&catalog) => result.map(Some),
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, stopping after the current statement");
            Ok(None)
        }
    };

    catalog.close().await;
    result.context("Catalog failure aborted the run")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::{
        MockHttpFetcher, MockSummaryService, MockThreadClient, TestDependencies,
    };
    use std::time::Duration;

    const PAGE_URL: &str = "https://council.example.govt.nz/";
    const DOC_URL: &str = "https://council.example.govt.nz/CC_20250318_AGN_4070_AT.PDF";

    fn page() -> String {
        r#"<table><tr>
            <td class="bpsGridCommittee">Hutt City Council<br>Chambers</td>
            <td><a href="CC_20250318_AGN_4070_AT.PDF">Agenda</a></td>
        </tr></table>"#
            .to_string()
    }

    fn link() -> DiscoveredLink {
        DiscoveredLink {
            label: "Hutt City Council".to_string(),
            url: DOC_URL.to_string(),
        }
    }

    fn pipeline(test_deps: &TestDependencies) -> Pipeline {
        Pipeline::new(&test_deps.deps(), Url::parse(PAGE_URL).unwrap(), None)
    }

    fn test_deps() -> TestDependencies {
        TestDependencies::new().mock_fetcher(
            MockHttpFetcher::new()
                .with_page(PAGE_URL, &page())
                .with_document(DOC_URL, &[b'%'; 512]),
        )
    }

    #[tokio::test]
    async fn test_process_records_after_publish() {
        let deps = test_deps();
        let catalog = LinkCatalog::in_memory().await.unwrap();

        let outcome = pipeline(&deps).process(&catalog, &link()).await.unwrap();

        let record = match outcome {
            DocumentOutcome::Recorded(record) => record,
            other => panic!("expected Recorded, got {:?}", other),
        };
        assert_eq!(record.label, "Hutt City Council");
        assert_eq!(record.thread_url, "https://x.com/CouncilBot/status/1001");
        assert_eq!(
            record.summary_text,
            "The Council met to discuss the annual plan.\n• Rates rise 4%"
        );
        assert!(catalog.contains(DOC_URL).await.unwrap());
    }

    #[tokio::test]
    async fn test_blank_summary_fails_at_segmentation() {
        let deps = test_deps().mock_summaries(MockSummaryService::new().with_summary("  \n "));
        let catalog = LinkCatalog::in_memory().await.unwrap();

        let outcome = pipeline(&deps).process(&catalog, &link()).await.unwrap();

        assert!(matches!(
            outcome,
            DocumentOutcome::Failed {
                reached: Stage::Summarized,
                error: PipelineError::Segmentation(_),
            }
        ));
        assert!(deps.threads.posts().is_empty());
        assert_eq!(catalog.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_download_failure_maps_to_fetch() {
        let deps = TestDependencies::new();
        let catalog = LinkCatalog::in_memory().await.unwrap();

        let outcome = pipeline(&deps).process(&catalog, &link()).await.unwrap();

        match outcome {
            DocumentOutcome::Failed {
                reached: Stage::Discovered,
                error: PipelineError::Fetch { url, .. },
            } => assert_eq!(url, DOC_URL),
            other => panic!("expected Fetch failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_conflict_after_publish_keeps_existing_record() {
        let deps = test_deps();
        let catalog = LinkCatalog::in_memory().await.unwrap();
        catalog
            .insert(&CatalogRecord::new(
                "Hutt City Council",
                DOC_URL,
                "https://x.com/CouncilBot/status/7",
                "Earlier",
            ))
            .await
            .unwrap();

        let outcome = pipeline(&deps).process(&catalog, &link()).await.unwrap();

        match outcome {
            DocumentOutcome::Failed {
                reached: Stage::Published,
                error: PipelineError::StorageConflict { thread_url, .. },
            } => assert_eq!(thread_url, "https://x.com/CouncilBot/status/1001"),
            other => panic!("expected StorageConflict, got {:?}", other),
        }
        let kept = catalog.find(DOC_URL).await.unwrap().unwrap();
        assert_eq!(kept.thread_url, "https://x.com/CouncilBot/status/7");
    }

    #[tokio::test]
    async fn test_run_once_against_in_memory_store() {
        let deps = test_deps().mock_threads(MockThreadClient::new().with_handle("HuttAgendas"));
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            council_url: Url::parse(PAGE_URL).unwrap(),
            scan_limit: None,
            gemini_api_key: "test".to_string(),
            gemini_model: "gemini-2.0-flash".to_string(),
            x_consumer_key: "ck".to_string(),
            x_consumer_secret: "cs".to_string(),
            x_access_token: "at".to_string(),
            x_access_token_secret: "ats".to_string(),
            http_timeout: Duration::from_secs(5),
            log_file: None,
        };

        let report = run_once(&config, &deps.deps()).await.unwrap().unwrap();

        assert_eq!(
            report,
            RunReport {
                discovered: 1,
                recorded: 1,
                failed: 0,
            }
        );
        assert_eq!(deps.threads.posts().len(), 1);
    }
}
