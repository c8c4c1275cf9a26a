use thiserror::Error;

pub type Result<T> = std::result::Result<T, XError>;

#[derive(Debug, Error)]
pub enum XError {
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("rate limited by X (resets at {reset:?})")]
    RateLimited { reset: Option<i64> },

    #[error("X rejected the credentials ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("X API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected X response: {0}")]
    Parse(String),

    #[error("failed to sign request: {0}")]
    Signing(String),
}
