//! Per-document state machine and the run loop that drives it.

pub mod error;
pub mod orchestrator;

pub use error::{DocumentOutcome, PipelineError, Stage};
pub use orchestrator::{run_once, Pipeline, RunReport};
