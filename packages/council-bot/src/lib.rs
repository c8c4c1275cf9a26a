// Council Agenda Bot - Core
//
// Watches the council's agenda page, summarizes newly published agenda
// documents and posts each summary as an X thread. Every external service
// sits behind a Base* trait in `kernel` so the pipeline can run against mocks.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod pipeline;

pub use config::*;
