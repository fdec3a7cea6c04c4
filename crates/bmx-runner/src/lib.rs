//! Suite runner for the Beta Max verification harness
//!
//! Interprets [`bmx_core::Scenario`] data against a [`bmx_browser::Session`]:
//! one fresh session per scenario, strict in-order steps, poll-based waits
//! instead of sleeps, a final screenshot on every exit path, and a structured
//! [`bmx_core::SuiteReport`] at the end.

pub mod artifacts;
pub mod report;
pub mod runner;
mod steps;

#[cfg(test)]
pub(crate) mod mock;

pub use artifacts::ArtifactStore;
pub use runner::SuiteRunner;
