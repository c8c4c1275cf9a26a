//! Test harness for pipeline integration tests.
//!
//! Each test gets its own in-memory SQLite catalog with migrations applied.

use anyhow::{Context, Result};
use council_bot_core::domains::catalog::{CatalogRecord, LinkCatalog};
use council_bot_core::kernel::TestDependencies;
use council_bot_core::pipeline::Pipeline;
use test_context::AsyncTestContext;
use url::Url;

use super::COUNCIL_URL;

/// # Example using test-context
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let report = ctx.pipeline(&deps).run(&ctx.catalog).await.unwrap();
/// }
/// ```
pub struct TestHarness {
    pub catalog: LinkCatalog,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        self.catalog.close().await;
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        // Run tests with: RUST_LOG=debug cargo test -- --nocapture
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let catalog = LinkCatalog::in_memory()
            .await
            .context("Failed to open in-memory catalog")?;

        Ok(Self { catalog })
    }

    /// Pipeline wired to the given mocks, pointed at the fixture council page.
    pub fn pipeline(&self, deps: &TestDependencies) -> Pipeline {
        Pipeline::new(
            &deps.deps(),
            Url::parse(COUNCIL_URL).expect("fixture URL parses"),
            None,
        )
    }

    /// Mark a URL as already handled.
    pub async fn catalogue(&self, url: &str) {
        self.catalog
            .insert(&CatalogRecord::new(
                "Earlier Committee",
                url,
                "https://x.com/CouncilBot/status/1",
                "Earlier summary",
            ))
            .await
            .expect("Failed to seed catalog");
    }
}
