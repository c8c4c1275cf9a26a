//! Kernel module - infrastructure and dependencies.

pub mod deps;
pub mod http_fetcher;
pub mod test_dependencies;
pub mod traits;

pub use deps::{BotDeps, GeminiAdapter, XAdapter};
pub use http_fetcher::HttpFetcher;
pub use test_dependencies::TestDependencies;
pub use traits::*;
