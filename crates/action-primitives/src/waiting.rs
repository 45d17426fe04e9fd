//! Bounded waiting for targets and driver commands

use crate::abilities::WaitPolicy;
use crate::errors::Attempt;
use actor_core::ScreenplayError;
use browser_driver::{BrowserDriver, DriverError};
use screenplay_core_types::Locator;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::{sleep, timeout};
use tracing::debug;

/// State a target must reach before an interaction proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Present,
    Visible,
}

impl Readiness {
    async fn query(self, driver: &dyn BrowserDriver, locator: &Locator) -> Result<bool, DriverError> {
        match self {
            Readiness::Present => driver.is_present(locator).await,
            Readiness::Visible => driver.is_visible(locator).await,
        }
    }
}

/// Poll until `locator` reaches `readiness`.
///
/// Fails with `TargetNotFound` once `within` has elapsed, never earlier. A
/// readiness query still pending when the window closes counts as not ready.
pub(crate) async fn wait_for_target(
    attempt: &Attempt<'_>,
    driver: &dyn BrowserDriver,
    locator: &Locator,
    readiness: Readiness,
    policy: WaitPolicy,
    within: Duration,
) -> Result<(), ScreenplayError> {
    let started = Instant::now();
    let mut polls = 0u32;
    loop {
        polls += 1;
        let left = within.saturating_sub(started.elapsed());
        let ready = match timeout(left, readiness.query(driver, locator)).await {
            Ok(answer) => answer.map_err(|err| attempt.driver(err, policy.action_timeout))?,
            Err(_) => {
                debug!(locator = %locator, polls, "readiness query outlived the wait window");
                return Err(attempt.target_not_found(started.elapsed()));
            }
        };
        if ready {
            if polls > 1 {
                debug!(
                    locator = %locator,
                    polls,
                    waited_ms = started.elapsed().as_millis() as u64,
                    "target became ready"
                );
            }
            return Ok(());
        }

        let waited = started.elapsed();
        if waited >= within {
            return Err(attempt.target_not_found(waited));
        }
        let remaining = within - waited;
        sleep(policy.poll_interval.min(remaining)).await;
    }
}

/// Run one driver command under the action bound.
pub(crate) async fn bounded<T, F>(
    attempt: &Attempt<'_>,
    bound: Duration,
    command: F,
) -> Result<T, ScreenplayError>
where
    F: Future<Output = Result<T, DriverError>>,
{
    match timeout(bound, command).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(attempt.driver(err, bound)),
        Err(_) => Err(attempt.timed_out(bound)),
    }
}
