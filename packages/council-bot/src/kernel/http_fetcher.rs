//! reqwest-backed fetcher for the council page and agenda PDFs.
//!
//! No retries: a failed request surfaces as an error and the caller decides
//! whether that skips a document or the whole scan.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use super::BaseHttpFetcher;

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        // Some council CMS front-ends reject non-browser agents
        let user_agent = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("HTTP request failed for {}", url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("HTTP {} for {}", status, url);
        }

        Ok(response)
    }
}

#[async_trait]
impl BaseHttpFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        debug!(url = %url, "Fetching page");
        self.get(url)
            .await?
            .text()
            .await
            .context("Failed to read response body")
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url = %url, "Fetching document");
        let bytes = self
            .get(url)
            .await?
            .bytes()
            .await
            .context("Failed to read document body")?;
        Ok(bytes.to_vec())
    }
}
