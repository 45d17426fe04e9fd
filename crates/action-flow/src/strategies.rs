//! Caller-level retry around `attempts_to`
//!
//! Nothing in the core retries on its own. A caller that wants another try
//! wraps the attempt in a [`RetryPolicy`] and says which failures qualify.

use actor_core::{Actor, FailureKind, Performable, ScreenplayError};
use tokio::time::{sleep, Duration};
use tracing::{info, warn};

/// Retry the whole step list with exponential backoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,

    /// Delay before the second attempt; doubles for each further attempt
    pub backoff_ms: u64,

    retry_on: Vec<FailureKind>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, 200)
    }
}

impl RetryPolicy {
    /// Retries target, timeout and I/O failures. Missing abilities, invalid
    /// parameters and assertion mismatches fail on the first attempt.
    pub fn new(max_attempts: u32, backoff_ms: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_ms,
            retry_on: vec![
                FailureKind::TargetNotFound,
                FailureKind::ActionTimeout,
                FailureKind::ActionFailed,
            ],
        }
    }

    /// Replace the set of failure kinds that earn another attempt.
    pub fn retrying_on(mut self, kinds: &[FailureKind]) -> Self {
        self.retry_on = kinds.to_vec();
        self
    }

    /// Whether a failure after `attempt` attempts should be retried.
    pub fn should_retry(&self, err: &ScreenplayError, attempt: u32) -> bool {
        attempt < self.max_attempts && self.retry_on.contains(&err.kind())
    }

    /// Backoff before attempt `attempt + 1`, capped at 60 seconds.
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let multiplier = 2u64.saturating_pow(attempt.saturating_sub(1));
        let total_ms = self.backoff_ms.saturating_mul(multiplier);
        Duration::from_millis(total_ms.min(60_000))
    }

    /// Run `steps` until they succeed or the policy gives up.
    ///
    /// Returns the number of attempts used. The last failure is returned
    /// unchanged when the policy gives up.
    pub async fn attempt(
        &self,
        actor: &Actor,
        steps: &[&dyn Performable],
    ) -> Result<u32, ScreenplayError> {
        let mut attempt = 1;
        loop {
            match actor.attempts_to(steps).await {
                Ok(()) => return Ok(attempt),
                Err(err) if self.should_retry(&err, attempt) => {
                    let backoff = self.calculate_backoff(attempt);
                    info!(
                        actor = %actor,
                        attempt,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %err,
                        "Attempt failed, retrying"
                    );
                    sleep(backoff).await;
                    attempt += 1;
                }
                Err(err) => {
                    warn!(actor = %actor, attempt, error = %err, "Giving up");
                    return Err(err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_core::AbilityKind;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails until it has been performed `succeed_on` times.
    struct Flaky {
        runs: AtomicU32,
        succeed_on: u32,
        kind: FailureKind,
    }

    impl Flaky {
        fn new(succeed_on: u32, kind: FailureKind) -> Self {
            Self {
                runs: AtomicU32::new(0),
                succeed_on,
                kind,
            }
        }
    }

    #[async_trait]
    impl Performable for Flaky {
        fn describe(&self) -> String {
            "presses the flaky button".to_string()
        }

        fn required_abilities(&self) -> Vec<AbilityKind> {
            Vec::new()
        }

        async fn perform_as(&self, actor: &Actor) -> Result<(), ScreenplayError> {
            let run = self.runs.fetch_add(1, Ordering::SeqCst) + 1;
            if run >= self.succeed_on {
                return Ok(());
            }
            Err(match self.kind {
                FailureKind::AssertionMismatch => ScreenplayError::AssertionMismatch {
                    actor: actor.name().to_string(),
                    question: "the button".to_string(),
                    expected: "to be pressed".to_string(),
                    actual: "false".to_string(),
                },
                _ => ScreenplayError::TargetNotFound {
                    actor: actor.name().to_string(),
                    interaction: "press the flaky button".to_string(),
                    target: "the flaky button".to_string(),
                    waited_ms: 0,
                },
            })
        }
    }

    #[test]
    fn backoff_doubles_and_is_capped() {
        let policy = RetryPolicy::new(5, 1000);
        assert_eq!(policy.calculate_backoff(1).as_millis(), 1000);
        assert_eq!(policy.calculate_backoff(2).as_millis(), 2000);
        assert_eq!(policy.calculate_backoff(3).as_millis(), 4000);
        assert_eq!(policy.calculate_backoff(10).as_millis(), 60_000);
    }

    #[tokio::test]
    async fn retries_until_success() {
        let actor = Actor::named("Anna");
        let flaky = Flaky::new(3, FailureKind::TargetNotFound);
        let attempts = RetryPolicy::new(3, 1)
            .attempt(&actor, &[&flaky])
            .await
            .unwrap();
        assert_eq!(attempts, 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let actor = Actor::named("Anna");
        let flaky = Flaky::new(10, FailureKind::TargetNotFound);
        let err = RetryPolicy::new(2, 1)
            .attempt(&actor, &[&flaky])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::TargetNotFound);
        assert_eq!(flaky.runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn assertion_mismatches_are_not_retried_by_default() {
        let actor = Actor::named("Anna");
        let flaky = Flaky::new(2, FailureKind::AssertionMismatch);
        let err = RetryPolicy::default()
            .attempt(&actor, &[&flaky])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::AssertionMismatch);
        assert_eq!(flaky.runs.load(Ordering::SeqCst), 1);

        let attempts = RetryPolicy::new(3, 1)
            .retrying_on(&[FailureKind::AssertionMismatch])
            .attempt(&actor, &[&flaky])
            .await
            .unwrap();
        assert_eq!(attempts, 1);
    }
}
