//! # bmx-core
//!
//! Core types for the Beta Max verification harness.
//!
//! The harness consolidates a pile of one-off browser verification scripts
//! into a single data-driven runner. The key idea lives here: a [`Scenario`]
//! is data, not code. One interpreter (in `bmx-runner`) executes every
//! scenario uniformly, so no flow duplicates its own control logic.
//!
//! ## Core paradigm
//!
//! - Scenarios are ordered step lists, immutable once built
//! - Steps describe intent; execution belongs to the runner
//! - One [`ScenarioOutcome`] per scenario per run, always
//! - Credentials and URLs are configuration, never literals in scenarios

mod config;
mod error;
mod outcome;
mod scenario;

pub use config::{Credentials, HarnessConfig};
pub use error::{HarnessError, Result};
pub use outcome::{Outcome, ScenarioOutcome, SuiteReport};
pub use scenario::{load_suite, Scenario, Step, Target};
