pub mod catalog;
pub mod discovery;
pub mod summaries;
pub mod threads;
