//! Pure Gemini REST API client
//!
//! A minimal client for the Gemini `generateContent` endpoint with no
//! domain-specific logic. Documents are sent inline (base64) next to the
//! prompt, so a single request covers upload and generation.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::GeminiClient;
//!
//! let client = GeminiClient::from_env()?;
//! let pdf = std::fs::read("agenda.pdf")?;
//!
//! let summary = client
//!     .summarize_document("gemini-2.0-flash", "application/pdf", &pdf, "Summarize this.")
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{GeminiError, Result};
pub use types::*;

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from environment variable `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::Config("GEMINI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies or a regional endpoint).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Bound every request by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeminiError::Config(e.to_string()))?;
        Ok(self)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Raw `generateContent` call.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Gemini request failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Gemini API error");
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        debug!(
            model = %model,
            duration_ms = start.elapsed().as_millis(),
            total_tokens = parsed.usage_metadata.as_ref().map(|u| u.total_token_count),
            "Gemini generateContent"
        );

        Ok(parsed)
    }

    /// Send a document with an instruction prompt and return the generated text.
    pub async fn summarize_document(
        &self,
        model: &str,
        mime_type: &str,
        document: &[u8],
        prompt: &str,
    ) -> Result<String> {
        let request = document_request(mime_type, document, prompt);
        let response = self.generate_content(model, &request).await?;
        extract_text(response)
    }
}

/// Build a single-turn request carrying `document` followed by `prompt`.
pub fn document_request(mime_type: &str, document: &[u8], prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest::user(vec![
        Part::inline(mime_type, STANDARD.encode(document)),
        Part::text(prompt),
    ])
}

fn extract_text(response: GenerateContentResponse) -> Result<String> {
    if let Some(reason) = response.block_reason() {
        return Err(GeminiError::Blocked(reason.to_string()));
    }
    response.text().ok_or(GeminiError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = GeminiClient::new("key-test").with_base_url("https://proxy.example.com");

        assert_eq!(client.api_key, "key-test");
        assert_eq!(client.base_url(), "https://proxy.example.com");
        assert_eq!(
            client.endpoint("gemini-2.0-flash"),
            "https://proxy.example.com/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_document_request_shape() {
        let request = document_request("application/pdf", b"%PDF-1.4", "Summarize");
        let json = serde_json::to_value(&request).unwrap();

        let parts = &json["contents"][0]["parts"];
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(parts[0]["inlineData"]["mimeType"], "application/pdf");
        assert_eq!(parts[0]["inlineData"]["data"], "JVBERi0xLjQ=");
        assert_eq!(parts[1]["text"], "Summarize");
        assert!(json.get("generationConfig").is_none());
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "The Council met"}, {"text": " today."}]},
                    "finishReason": "STOP"
                }],
                "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 4, "totalTokenCount": 14}
            }"#,
        )
        .unwrap();

        assert_eq!(extract_text(response).unwrap(), "The Council met today.");
    }

    #[test]
    fn test_extract_text_empty_and_blocked() {
        let empty: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(matches!(extract_text(empty), Err(GeminiError::EmptyResponse)));

        let blocked: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        match extract_text(blocked) {
            Err(GeminiError::Blocked(reason)) => assert_eq!(reason, "SAFETY"),
            other => panic!("expected Blocked, got {:?}", other),
        }
    }
}
