use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://council_meetings.db?mode=rwc";
pub const DEFAULT_COUNCIL_URL: &str = "https://huttcity.infocouncil.biz/";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 120;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub council_url: Url,
    /// How many agenda-extension links to inspect per run (page order)
    pub scan_limit: Option<usize>,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub x_consumer_key: String,
    pub x_consumer_secret: String,
    pub x_access_token: String,
    pub x_access_token_secret: String,
    pub http_timeout: Duration,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let council_url = env::var("COUNCIL_URL").unwrap_or_else(|_| DEFAULT_COUNCIL_URL.to_string());
        let scan_limit = match env::var("COUNCIL_SCAN_LIMIT") {
            Ok(raw) => Some(parse_scan_limit(&raw)?),
            Err(_) => None,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            council_url: Url::parse(&council_url).context("COUNCIL_URL must be a valid URL")?,
            scan_limit,
            gemini_api_key: env::var("GEMINI_API_KEY").context("GEMINI_API_KEY must be set")?,
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            x_consumer_key: env::var("X_API_CONSUMER_KEY")
                .context("X_API_CONSUMER_KEY must be set")?,
            x_consumer_secret: env::var("X_API_CONSUMER_KEY_SECRET")
                .context("X_API_CONSUMER_KEY_SECRET must be set")?,
            x_access_token: env::var("X_API_ACCESS_TOKEN")
                .context("X_API_ACCESS_TOKEN must be set")?,
            x_access_token_secret: env::var("X_API_ACCESS_TOKEN_SECRET")
                .context("X_API_ACCESS_TOKEN_SECRET must be set")?,
            http_timeout: Duration::from_secs(
                env::var("HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|_| DEFAULT_HTTP_TIMEOUT_SECS.to_string())
                    .parse()
                    .context("HTTP_TIMEOUT_SECS must be a valid number")?,
            ),
            log_file: env::var("COUNCIL_LOG_FILE").ok().map(PathBuf::from),
        })
    }
}

/// A scan limit of zero would skip every link, so it is rejected.
fn parse_scan_limit(raw: &str) -> Result<usize> {
    let limit: NonZeroUsize = raw
        .trim()
        .parse()
        .context("COUNCIL_SCAN_LIMIT must be a positive number")?;
    Ok(limit.get())
}
