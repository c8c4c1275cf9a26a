//! Summaries: agenda document in, plain-text summary out.

pub mod prompt;
pub mod summarizer;

pub use prompt::summary_prompt;
pub use summarizer::{SummarizeError, Summarizer, SUSPECT_DOCUMENT_BYTES};
