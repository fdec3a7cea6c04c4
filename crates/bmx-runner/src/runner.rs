//! Suite execution and per-scenario session lifecycle
//!
//! One fresh session per scenario, acquired from the provider and released on
//! every exit path. A scenario's failure or error never reaches its siblings;
//! only an unreachable target at suite start short-circuits the whole run.

use bmx_browser::{Session, SessionProvider};
use bmx_core::{
    HarnessConfig, HarnessError, Outcome, Result, Scenario, ScenarioOutcome, SuiteReport,
};
use chrono::Utc;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::artifacts::ArtifactStore;
use crate::steps::{execute_step, StepVerdict};

/// Runs scenarios in order against sessions from `P`
///
/// Generic over the provider so the lifecycle and classification logic is
/// testable against mock sessions.
pub struct SuiteRunner<P: SessionProvider> {
    provider: P,
    config: HarnessConfig,
    store: ArtifactStore,
}

impl<P: SessionProvider> SuiteRunner<P> {
    pub fn new(provider: P, config: HarnessConfig) -> Self {
        let store = ArtifactStore::new(config.artifacts_dir.clone());
        Self {
            provider,
            config,
            store,
        }
    }

    /// Run the full suite and aggregate a report
    ///
    /// If the target is unreachable at suite start, nothing runs: every
    /// scenario is recorded as errored with the connection cause.
    pub async fn run(&self, suite: &[Scenario]) -> SuiteReport {
        let started_at = Utc::now();
        let started = Instant::now();

        let outcomes = match self.check_reachable().await {
            Ok(()) => self.run_scenarios(suite).await,
            Err(e) => {
                warn!("Target unreachable, skipping all scenarios: {}", e);
                suite
                    .iter()
                    .map(|scenario| ScenarioOutcome::errored(&scenario.name, e.to_string()))
                    .collect()
            }
        };

        SuiteReport {
            started_at,
            elapsed_ms: started.elapsed().as_millis() as u64,
            outcomes,
        }
    }

    /// Probe the configured base URL; any HTTP response counts as reachable
    async fn check_reachable(&self) -> Result<()> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| HarnessError::Connection(format!("failed to build probe client: {}", e)))?;

        client.get(&self.config.base_url).send().await.map_err(|e| {
            HarnessError::Connection(format!(
                "target application unreachable at {}: {}",
                self.config.base_url, e
            ))
        })?;

        Ok(())
    }

    pub(crate) async fn run_scenarios(&self, suite: &[Scenario]) -> Vec<ScenarioOutcome> {
        let mut outcomes = Vec::with_capacity(suite.len());
        for scenario in suite {
            outcomes.push(self.run_scenario(scenario).await);
        }
        outcomes
    }

    async fn run_scenario(&self, scenario: &Scenario) -> ScenarioOutcome {
        info!("Running scenario '{}'", scenario.name);
        let started = Instant::now();

        let session = match self.provider.acquire().await {
            Ok(session) => session,
            Err(e) => {
                warn!("Scenario '{}' could not acquire a session: {}", scenario.name, e);
                return ScenarioOutcome::errored(
                    &scenario.name,
                    format!("failed to acquire session: {}", e),
                );
            }
        };

        let mut artifacts = Vec::new();
        let budget = Duration::from_millis(self.config.scenario_budget_ms);
        let steps = tokio::time::timeout(
            budget,
            self.run_steps(session.as_ref(), scenario, &mut artifacts),
        )
        .await;

        let outcome = match steps {
            Err(_) => Outcome::Errored {
                cause: format!(
                    "scenario exceeded its {}ms wall-clock budget",
                    budget.as_millis()
                ),
            },
            Ok(Err(e)) => Outcome::Errored {
                cause: e.to_string(),
            },
            Ok(Ok(Some(reason))) => Outcome::Failed { reason },
            Ok(Ok(None)) => Outcome::Passed,
        };

        // Final screenshot on every exit path; on failure it is the only
        // forensic evidence
        match session.screenshot().await {
            Ok(data) => match self.store.store_final(&scenario.name, &outcome, &data).await {
                Ok(path) => artifacts.push(path),
                Err(e) => warn!("Scenario '{}': could not store final screenshot: {}", scenario.name, e),
            },
            Err(e) => warn!("Scenario '{}': final screenshot failed: {}", scenario.name, e),
        }

        if let Err(e) = session.close().await {
            warn!("Scenario '{}': session close failed: {}", scenario.name, e);
        }

        let elapsed_ms = started.elapsed().as_millis() as u64;
        info!("Scenario '{}': {} ({} ms)", scenario.name, outcome, elapsed_ms);

        ScenarioOutcome {
            name: scenario.name.clone(),
            outcome,
            elapsed_ms,
            artifacts,
        }
    }

    /// Execute steps strictly in order; `Some(reason)` on the first failure
    async fn run_steps(
        &self,
        session: &dyn Session,
        scenario: &Scenario,
        artifacts: &mut Vec<PathBuf>,
    ) -> Result<Option<String>> {
        for (index, step) in scenario.steps.iter().enumerate() {
            let verdict = execute_step(
                session,
                &self.config,
                &self.store,
                &scenario.name,
                artifacts,
                index,
                step,
            )
            .await?;

            if let StepVerdict::Failed(reason) = verdict {
                return Ok(Some(reason));
            }
        }
        Ok(None)
    }
}
