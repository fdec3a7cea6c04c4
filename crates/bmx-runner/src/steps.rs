//! Step interpreter and wait primitives
//!
//! All waiting is poll-until-condition-or-timeout at a short fixed interval;
//! nothing here sleeps for a fixed duration hoping the UI has caught up.
//!
//! A wait that never succeeds returns `false` and becomes a `Failed` verdict
//! naming the step index and condition. `Err` values are reserved for session
//! trouble and surface as `Errored` in the runner.

use bmx_browser::Session;
use bmx_core::{HarnessConfig, Result, Step, Target};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::artifacts::ArtifactStore;

/// Result of interpreting one step
pub(crate) enum StepVerdict {
    Continue,
    /// The step's condition was not met; the reason is report-ready
    Failed(String),
}

/// Actions that poll for their element before acting
enum Action<'a> {
    Fill(&'a Target, &'a str),
    Click(&'a Target),
    Select(&'a Target, &'a str),
}

async fn attempt(session: &dyn Session, action: &Action<'_>) -> Result<bool> {
    match action {
        Action::Fill(target, value) => session.fill(target, value).await,
        Action::Click(target) => session.click(target).await,
        Action::Select(target, value) => session.select_option(target, value).await,
    }
}

/// Poll an action until its element appears or the timeout elapses
async fn wait_for_action(
    session: &dyn Session,
    action: &Action<'_>,
    timeout: Duration,
    interval: Duration,
) -> Result<bool> {
    let deadline = Instant::now() + timeout;
    loop {
        if attempt(session, action).await? {
            return Ok(true);
        }
        if Instant::now() >= deadline {
            return Ok(false);
        }
        tokio::time::sleep(interval).await;
    }
}

/// Poll until the target is visible; `false` on timeout, never an error
pub(crate) async fn wait_for_visible(
    session: &dyn Session,
    target: &Target,
    timeout: Duration,
    interval: Duration,
) -> Result<bool> {
    let deadline = Instant::now() + timeout;
    loop {
        if session.is_visible(target).await? {
            return Ok(true);
        }
        if Instant::now() >= deadline {
            return Ok(false);
        }
        tokio::time::sleep(interval).await;
    }
}

/// Poll until the target's value contains `expected`
///
/// Returns the last observed value alongside the verdict so failure messages
/// can name expected vs observed.
pub(crate) async fn wait_for_value_contains(
    session: &dyn Session,
    target: &Target,
    expected: &str,
    timeout: Duration,
    interval: Duration,
) -> Result<(bool, Option<String>)> {
    let deadline = Instant::now() + timeout;
    let mut last = None;
    loop {
        last = session.value_of(target).await?;
        if last.as_deref().is_some_and(|v| v.contains(expected)) {
            return Ok((true, last));
        }
        if Instant::now() >= deadline {
            return Ok((false, last));
        }
        tokio::time::sleep(interval).await;
    }
}

/// Execute one step against the session
///
/// `index` is zero-based; messages use one-based numbering to match the
/// report a human reads.
pub(crate) async fn execute_step(
    session: &dyn Session,
    config: &HarnessConfig,
    store: &ArtifactStore,
    scenario_name: &str,
    artifacts: &mut Vec<PathBuf>,
    index: usize,
    step: &Step,
) -> Result<StepVerdict> {
    let interval = Duration::from_millis(config.poll_interval_ms);
    let default_timeout = Duration::from_millis(config.default_timeout_ms);
    let number = index + 1;

    match step {
        Step::Navigate { url } => {
            session.navigate(&config.resolve_url(url)).await?;
            Ok(StepVerdict::Continue)
        }

        Step::Fill { target, value } => {
            action_verdict(
                wait_for_action(
                    session,
                    &Action::Fill(target, value),
                    default_timeout,
                    interval,
                )
                .await?,
                number,
                step,
                default_timeout,
            )
        }

        Step::Click { target } => action_verdict(
            wait_for_action(session, &Action::Click(target), default_timeout, interval).await?,
            number,
            step,
            default_timeout,
        ),

        Step::SelectOption { target, value } => action_verdict(
            wait_for_action(
                session,
                &Action::Select(target, value),
                default_timeout,
                interval,
            )
            .await?,
            number,
            step,
            default_timeout,
        ),

        Step::WaitFor { target, timeout_ms } => {
            let timeout = timeout_ms.map(Duration::from_millis).unwrap_or(default_timeout);
            if wait_for_visible(session, target, timeout, interval).await? {
                Ok(StepVerdict::Continue)
            } else {
                Ok(StepVerdict::Failed(format!(
                    "step {}: {} did not become visible within {}ms",
                    number,
                    target,
                    timeout.as_millis()
                )))
            }
        }

        Step::WaitForValue {
            target,
            expected,
            timeout_ms,
        } => {
            let timeout = timeout_ms.map(Duration::from_millis).unwrap_or(default_timeout);
            let (ok, last) =
                wait_for_value_contains(session, target, expected, timeout, interval).await?;
            if ok {
                Ok(StepVerdict::Continue)
            } else {
                Ok(StepVerdict::Failed(format!(
                    "step {}: {}: expected value containing '{}' within {}ms, last observed {}",
                    number,
                    target,
                    expected,
                    timeout.as_millis(),
                    describe_observed(last.as_deref())
                )))
            }
        }

        Step::AssertVisible { target } => {
            if session.is_visible(target).await? {
                Ok(StepVerdict::Continue)
            } else {
                Ok(StepVerdict::Failed(format!(
                    "step {}: expected {} to be visible",
                    number, target
                )))
            }
        }

        Step::AssertValue { target, expected } => {
            match session.value_of(target).await? {
                Some(observed) if observed == *expected => Ok(StepVerdict::Continue),
                observed => Ok(StepVerdict::Failed(format!(
                    "step {}: {}: expected value '{}', observed {}",
                    number,
                    target,
                    expected,
                    describe_observed(observed.as_deref())
                ))),
            }
        }

        Step::AssertAttribute {
            target,
            attribute,
            expected,
        } => match session.attribute_of(target, attribute).await? {
            Some(observed) if observed == *expected => Ok(StepVerdict::Continue),
            observed => Ok(StepVerdict::Failed(format!(
                "step {}: {}: expected attribute '{}' = '{}', observed {}",
                number,
                target,
                attribute,
                expected,
                describe_observed(observed.as_deref())
            ))),
        },

        Step::Screenshot { label } => {
            let data = session.screenshot().await?;
            let path = store.store_labeled(scenario_name, label, &data).await?;
            artifacts.push(path);
            Ok(StepVerdict::Continue)
        }
    }
}

fn action_verdict(
    acted: bool,
    number: usize,
    step: &Step,
    timeout: Duration,
) -> Result<StepVerdict> {
    if acted {
        Ok(StepVerdict::Continue)
    } else {
        Ok(StepVerdict::Failed(format!(
            "step {}: {}: element not found within {}ms",
            number,
            step.describe(),
            timeout.as_millis()
        )))
    }
}

fn describe_observed(observed: Option<&str>) -> String {
    match observed {
        Some(value) => format!("'{}'", value),
        None => "no element".to_string(),
    }
}
