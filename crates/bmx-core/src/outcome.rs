//! Scenario outcomes and suite-level reporting types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Terminal result of running one scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    /// Every step completed and every assertion held
    Passed,
    /// A step's condition was not met (wait timeout, assertion mismatch)
    Failed { reason: String },
    /// Something unexpected happened (session crash, budget overrun)
    Errored { cause: String },
}

impl Outcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Suffix used in artifact filenames for this outcome
    pub fn artifact_suffix(&self) -> Option<&'static str> {
        match self {
            Self::Passed => None,
            Self::Failed { .. } => Some("failed"),
            Self::Errored { .. } => Some("errored"),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => write!(f, "PASSED"),
            Self::Failed { reason } => write!(f, "FAILED: {}", reason),
            Self::Errored { cause } => write!(f, "ERRORED: {}", cause),
        }
    }
}

/// One scenario's result plus its captured evidence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub outcome: Outcome,
    /// Wall-clock time spent on the scenario
    pub elapsed_ms: u64,
    /// Screenshot paths, in capture order
    pub artifacts: Vec<PathBuf>,
}

impl ScenarioOutcome {
    pub fn errored(name: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: Outcome::Errored {
                cause: cause.into(),
            },
            elapsed_ms: 0,
            artifacts: Vec::new(),
        }
    }
}

/// Aggregated result of a full suite run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.outcome.is_passed())
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, Outcome::Failed { .. }))
            .count()
    }

    pub fn errored(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, Outcome::Errored { .. }))
            .count()
    }

    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.outcome.is_passed())
    }

    /// Process exit code: 0 only when every scenario passed
    pub fn exit_code(&self) -> i32 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} passed / {} failed / {} errored",
            self.passed(),
            self.failed(),
            self.errored()
        )
    }
}
