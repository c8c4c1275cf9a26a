//! Bot dependencies (using traits for testability)
//!
//! The central dependency container handed to the pipeline, plus the adapters
//! that put the Gemini and X clients behind the kernel traits.

use anyhow::{Context, Result};
use async_trait::async_trait;
use gemini_client::GeminiClient;
use std::sync::Arc;
use x_client::{XClient, XCredentials};

use crate::config::Config;
use crate::kernel::{BaseHttpFetcher, BaseSummaryService, BaseThreadClient, HttpFetcher};

// =============================================================================
// Gemini Adapter (implements BaseSummaryService trait)
// =============================================================================

pub struct GeminiAdapter {
    client: GeminiClient,
    model: String,
}

impl GeminiAdapter {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl BaseSummaryService for GeminiAdapter {
    async fn summarize_document(&self, document: &[u8], prompt: &str) -> Result<String> {
        self.client
            .summarize_document(&self.model, "application/pdf", document, prompt)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// X Adapter (implements BaseThreadClient trait)
// =============================================================================

pub struct XAdapter(pub XClient);

#[async_trait]
impl BaseThreadClient for XAdapter {
    async fn create_post(&self, text: &str, in_reply_to: Option<&str>) -> Result<String> {
        self.0
            .create_post(text, in_reply_to)
            .await
            .map(|post| post.id)
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn account_handle(&self) -> Result<String> {
        self.0
            .me()
            .await
            .map(|user| user.username)
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    fn post_url(&self, handle: &str, post_id: &str) -> String {
        XClient::status_url(handle, post_id)
    }
}

// =============================================================================
// BotDeps
// =============================================================================

/// Dependencies shared by every pipeline stage
#[derive(Clone)]
pub struct BotDeps {
    pub fetcher: Arc<dyn BaseHttpFetcher>,
    pub summaries: Arc<dyn BaseSummaryService>,
    pub threads: Arc<dyn BaseThreadClient>,
}

impl BotDeps {
    pub fn new(
        fetcher: Arc<dyn BaseHttpFetcher>,
        summaries: Arc<dyn BaseSummaryService>,
        threads: Arc<dyn BaseThreadClient>,
    ) -> Self {
        Self {
            fetcher,
            summaries,
            threads,
        }
    }

    /// Build the production clients from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.http_timeout)?;

        let gemini = GeminiClient::new(&config.gemini_api_key)
            .with_timeout(config.http_timeout)
            .context("Failed to create Gemini client")?;

        let x = XClient::new(XCredentials {
            consumer_key: config.x_consumer_key.clone(),
            consumer_secret: config.x_consumer_secret.clone(),
            access_token: config.x_access_token.clone(),
            access_token_secret: config.x_access_token_secret.clone(),
        })
        .with_timeout(config.http_timeout)
        .context("Failed to create X client")?;

        Ok(Self::new(
            Arc::new(fetcher),
            Arc::new(GeminiAdapter::new(gemini, &config.gemini_model)),
            Arc::new(XAdapter(x)),
        ))
    }
}
