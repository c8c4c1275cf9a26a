// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into the pipeline for tests.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use super::{BaseHttpFetcher, BaseSummaryService, BaseThreadClient, BotDeps};

// =============================================================================
// Mock HTTP Fetcher
// =============================================================================

pub struct MockHttpFetcher {
    pages: Mutex<HashMap<String, String>>,
    documents: Mutex<HashMap<String, Vec<u8>>>,
    calls: Mutex<Vec<String>>,
}

impl MockHttpFetcher {
    pub fn new() -> Self {
        Self {
            pages: Mutex::new(HashMap::new()),
            documents: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Serve `html` for `url`
    pub fn with_page(self, url: &str, html: &str) -> Self {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), html.to_string());
        self
    }

    /// Serve `bytes` for `url`
    pub fn with_document(self, url: &str, bytes: &[u8]) -> Self {
        self.documents
            .lock()
            .unwrap()
            .insert(url.to_string(), bytes.to_vec());
        self
    }

    /// Get all URLs that were requested
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_fetched(&self, url: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|u| u == url)
    }
}

impl Default for MockHttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseHttpFetcher for MockHttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        self.calls.lock().unwrap().push(url.to_string());
        self.pages
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("HTTP 404 Not Found for {}", url))
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.calls.lock().unwrap().push(url.to_string());
        self.documents
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("HTTP 404 Not Found for {}", url))
    }
}

// =============================================================================
// Mock Summary Service
// =============================================================================

/// Arguments captured from a summarize call
#[derive(Debug, Clone)]
pub struct SummaryCall {
    pub document_len: usize,
    pub prompt: String,
}

pub struct MockSummaryService {
    responses: Mutex<VecDeque<Result<String, String>>>,
    calls: Mutex<Vec<SummaryCall>>,
}

impl MockSummaryService {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue a summary to be returned
    pub fn with_summary(self, text: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(text.to_string()));
        self
    }

    /// Queue a service failure
    pub fn with_failure(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<SummaryCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockSummaryService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseSummaryService for MockSummaryService {
    async fn summarize_document(&self, document: &[u8], prompt: &str) -> Result<String> {
        self.calls.lock().unwrap().push(SummaryCall {
            document_len: document.len(),
            prompt: prompt.to_string(),
        });

        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            None => Ok("The Council met to discuss the annual plan.\n• Rates rise 4%".to_string()),
        }
    }
}

// =============================================================================
// Mock Thread Client
// =============================================================================

/// A post captured by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockPost {
    pub id: String,
    pub text: String,
    pub in_reply_to: Option<String>,
}

pub struct MockThreadClient {
    handle: String,
    posts: Mutex<Vec<MockPost>>,
    attempts: Mutex<usize>,
    /// 1-based attempt number that fails
    fail_on_attempt: Option<usize>,
    fail_handle: bool,
}

impl MockThreadClient {
    pub fn new() -> Self {
        Self {
            handle: "CouncilBot".to_string(),
            posts: Mutex::new(Vec::new()),
            attempts: Mutex::new(0),
            fail_on_attempt: None,
            fail_handle: false,
        }
    }

    pub fn with_handle(mut self, handle: &str) -> Self {
        self.handle = handle.to_string();
        self
    }

    /// Reject the `attempt`-th create_post call (1-based, counted across threads)
    pub fn failing_on_attempt(mut self, attempt: usize) -> Self {
        self.fail_on_attempt = Some(attempt);
        self
    }

    pub fn failing_handle_lookup(mut self) -> Self {
        self.fail_handle = true;
        self
    }

    /// Get all posts that were created, in order
    pub fn posts(&self) -> Vec<MockPost> {
        self.posts.lock().unwrap().clone()
    }
}

impl Default for MockThreadClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseThreadClient for MockThreadClient {
    async fn create_post(&self, text: &str, in_reply_to: Option<&str>) -> Result<String> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            *attempts += 1;
            *attempts
        };

        if self.fail_on_attempt == Some(attempt) {
            return Err(anyhow::anyhow!("429 Too Many Requests"));
        }

        let id = format!("{}", 1000 + attempt);
        self.posts.lock().unwrap().push(MockPost {
            id: id.clone(),
            text: text.to_string(),
            in_reply_to: in_reply_to.map(str::to_string),
        });
        Ok(id)
    }

    async fn account_handle(&self) -> Result<String> {
        if self.fail_handle {
            return Err(anyhow::anyhow!("401 Unauthorized"));
        }
        Ok(self.handle.clone())
    }

    fn post_url(&self, handle: &str, post_id: &str) -> String {
        format!("https://x.com/{}/status/{}", handle, post_id)
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Builder for BotDeps wired to mocks. Keeps its own handles on each mock so
/// tests can inspect recorded calls afterwards.
#[derive(Clone)]
pub struct TestDependencies {
    pub fetcher: Arc<MockHttpFetcher>,
    pub summaries: Arc<MockSummaryService>,
    pub threads: Arc<MockThreadClient>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            fetcher: Arc::new(MockHttpFetcher::new()),
            summaries: Arc::new(MockSummaryService::new()),
            threads: Arc::new(MockThreadClient::new()),
        }
    }

    pub fn mock_fetcher(mut self, fetcher: MockHttpFetcher) -> Self {
        self.fetcher = Arc::new(fetcher);
        self
    }

    pub fn mock_summaries(mut self, summaries: MockSummaryService) -> Self {
        self.summaries = Arc::new(summaries);
        self
    }

    pub fn mock_threads(mut self, threads: MockThreadClient) -> Self {
        self.threads = Arc::new(threads);
        self
    }

    pub fn deps(&self) -> BotDeps {
        BotDeps::new(
            self.fetcher.clone(),
            self.summaries.clone(),
            self.threads.clone(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
