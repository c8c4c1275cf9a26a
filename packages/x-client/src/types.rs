use serde::{Deserialize, Serialize};

/// Body for `POST /2/tweets`.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePostRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<ReplySettings>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplySettings {
    pub in_reply_to_tweet_id: String,
}

/// A freshly created post.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedPost {
    pub id: String,
    pub text: String,
}

/// The authenticated account.
#[derive(Debug, Clone, Deserialize)]
pub struct XUser {
    pub id: String,
    pub name: String,
    pub username: String,
}

/// Wrapper for X API v2 responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}
