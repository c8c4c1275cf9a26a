use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One processed agenda document. Created once, after its thread is live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CatalogRecord {
    #[sqlx(rename = "timestamp")]
    pub discovered_at: DateTime<Utc>,
    pub label: String,
    #[sqlx(rename = "url")]
    pub source_url: String,
    pub thread_url: String,
    #[sqlx(rename = "summary")]
    pub summary_text: String,
}

impl CatalogRecord {
    pub fn new(
        label: impl Into<String>,
        source_url: impl Into<String>,
        thread_url: impl Into<String>,
        summary_text: impl Into<String>,
    ) -> Self {
        Self {
            discovered_at: Utc::now(),
            label: label.into(),
            source_url: source_url.into(),
            thread_url: thread_url.into(),
            summary_text: summary_text.into(),
        }
    }
}
