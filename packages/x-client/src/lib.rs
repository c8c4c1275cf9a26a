//! Pure X API v2 client.
//!
//! A minimal client for posting on behalf of a single account. Supports
//! creating posts (optionally as a reply) and resolving the acting account.
//!
//! # Example
//!
//! ```rust,ignore
//! use x_client::{XClient, XCredentials};
//!
//! let client = XClient::new(credentials);
//! let first = client.create_post("Hello (1/2)", None).await?;
//! client.create_post("World (2/2)", Some(&first.id)).await?;
//!
//! let me = client.me().await?;
//! println!("{}", XClient::status_url(&me.username, &first.id));
//! ```

pub mod error;
pub mod oauth;
pub mod types;

pub use error::{Result, XError};
pub use oauth::XCredentials;
pub use types::{CreatedPost, XUser};

use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use types::{ApiResponse, CreatePostRequest, ReplySettings};

const BASE_URL: &str = "https://api.twitter.com/2";

pub struct XClient {
    client: reqwest::Client,
    credentials: XCredentials,
    base_url: String,
}

impl XClient {
    pub fn new(credentials: XCredentials) -> Self {
        Self {
            client: reqwest::Client::new(),
            credentials,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Bound every request by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Public URL of a post.
    pub fn status_url(username: &str, post_id: &str) -> String {
        format!("https://x.com/{}/status/{}", username, post_id)
    }

    /// Create a post, replying to `in_reply_to` when given.
    pub async fn create_post(&self, text: &str, in_reply_to: Option<&str>) -> Result<CreatedPost> {
        let url = format!("{}/tweets", self.base_url);
        let body = CreatePostRequest {
            text: text.to_string(),
            reply: in_reply_to.map(|id| ReplySettings {
                in_reply_to_tweet_id: id.to_string(),
            }),
        };

        let auth = oauth::authorization_header(&self.credentials, "POST", &url, &[])?;
        let resp = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .json(&body)
            .send()
            .await?;

        let created: CreatedPost = Self::read_data(resp).await?;
        tracing::debug!(post_id = %created.id, reply_to = ?in_reply_to, "Created X post");
        Ok(created)
    }

    /// Resolve the account the credentials act for.
    pub async fn me(&self) -> Result<XUser> {
        let url = format!("{}/users/me", self.base_url);
        let auth = oauth::authorization_header(&self.credentials, "GET", &url, &[])?;
        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .send()
            .await?;

        Self::read_data(resp).await
    }

    async fn read_data<T: DeserializeOwned>(resp: Response) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            let reset = resp
                .headers()
                .get("x-rate-limit-reset")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<i64>().ok());
            let body = resp.text().await.unwrap_or_default();
            return Err(classify_failure(status, reset, body));
        }

        let body = resp.text().await?;
        let parsed: ApiResponse<T> =
            serde_json::from_str(&body).map_err(|e| XError::Parse(format!("{}: {}", e, body)))?;
        Ok(parsed.data)
    }
}

fn classify_failure(status: StatusCode, reset: Option<i64>, message: String) -> XError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => XError::RateLimited { reset },
        StatusCode::UNAUTHORIZED => XError::Unauthorized {
            status: status.as_u16(),
            message,
        },
        _ => XError::Api {
            status: status.as_u16(),
            message,
        },
    }
}
