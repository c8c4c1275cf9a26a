// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Pipeline decisions (what counts as an agenda, how a summary is split)
// live in `domains` and only talk to the outside world through these traits.
//
// Naming convention: Base* for trait names (e.g., BaseHttpFetcher, BaseThreadClient)

use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// HTTP Fetcher Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseHttpFetcher: Send + Sync {
    /// Fetch a page and return its body as text
    async fn fetch_text(&self, url: &str) -> Result<String>;

    /// Fetch a binary document (agenda PDF)
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

// =============================================================================
// Summary Service Trait (Infrastructure - document understanding LLM)
// =============================================================================

#[async_trait]
pub trait BaseSummaryService: Send + Sync {
    /// Send a PDF together with an instruction prompt; returns the raw generated text
    async fn summarize_document(&self, document: &[u8], prompt: &str) -> Result<String>;
}

// =============================================================================
// Thread Client Trait (Infrastructure - social posting)
// =============================================================================

#[async_trait]
pub trait BaseThreadClient: Send + Sync {
    /// Create a post, as a reply when `in_reply_to` is set. Returns the platform post id.
    async fn create_post(&self, text: &str, in_reply_to: Option<&str>) -> Result<String>;

    /// Handle of the account the client posts as
    async fn account_handle(&self) -> Result<String>;

    /// Shareable URL for a post by `handle`
    fn post_url(&self, handle: &str, post_id: &str) -> String;
}
