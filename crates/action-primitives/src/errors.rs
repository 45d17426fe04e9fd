//! Translation of driver and client failures into screenplay failures

use actor_core::{Actor, ScreenplayError};
use api_client::ApiError;
use browser_driver::{DriverError, DriverErrorKind};
use std::time::Duration;

/// What an interaction was doing when a failure happened.
pub(crate) struct Attempt<'a> {
    pub actor: &'a Actor,
    pub interaction: &'a str,
    pub target: &'a str,
}

impl<'a> Attempt<'a> {
    pub(crate) fn new(actor: &'a Actor, interaction: &'a str, target: &'a str) -> Self {
        Self {
            actor,
            interaction,
            target,
        }
    }

    pub(crate) fn target_not_found(&self, waited: Duration) -> ScreenplayError {
        ScreenplayError::TargetNotFound {
            actor: self.actor.name().to_string(),
            interaction: self.interaction.to_string(),
            target: self.target.to_string(),
            waited_ms: waited.as_millis() as u64,
        }
    }

    pub(crate) fn timed_out(&self, bound: Duration) -> ScreenplayError {
        ScreenplayError::ActionTimeout {
            actor: self.actor.name().to_string(),
            interaction: self.interaction.to_string(),
            target: self.target.to_string(),
            timeout_ms: bound.as_millis() as u64,
        }
    }

    pub(crate) fn failed(&self, reason: impl Into<String>) -> ScreenplayError {
        ScreenplayError::ActionFailed {
            actor: self.actor.name().to_string(),
            interaction: self.interaction.to_string(),
            reason: reason.into(),
        }
    }

    /// Map a driver failure.
    ///
    /// A target that vanished between the presence check and the command
    /// reports the zero-length wait that preceded it.
    pub(crate) fn driver(&self, err: DriverError, bound: Duration) -> ScreenplayError {
        match err.kind {
            DriverErrorKind::TargetNotFound => self.target_not_found(Duration::ZERO),
            DriverErrorKind::Timeout => self.timed_out(bound),
            DriverErrorKind::NotInteractable | DriverErrorKind::Io | DriverErrorKind::Internal => {
                self.failed(err.to_string())
            }
        }
    }

    pub(crate) fn api(&self, err: ApiError) -> ScreenplayError {
        match err {
            ApiError::Timeout(timeout_ms) => ScreenplayError::ActionTimeout {
                actor: self.actor.name().to_string(),
                interaction: self.interaction.to_string(),
                target: self.target.to_string(),
                timeout_ms,
            },
            other => self.failed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_core::FailureKind;

    #[test]
    fn driver_kinds_map_onto_failure_kinds() {
        let actor = Actor::named("Anna");
        let attempt = Attempt::new(&actor, "click on the login button", "the login button");
        let bound = Duration::from_millis(250);

        let err = attempt.driver(DriverError::target_not_found("#login"), bound);
        assert_eq!(err.kind(), FailureKind::TargetNotFound);

        let err = attempt.driver(DriverError::new(DriverErrorKind::Timeout), bound);
        assert!(matches!(
            err,
            ScreenplayError::ActionTimeout { timeout_ms: 250, .. }
        ));

        let err = attempt.driver(
            DriverError::new(DriverErrorKind::NotInteractable).with_hint("#login is disabled"),
            bound,
        );
        assert_eq!(err.kind(), FailureKind::ActionFailed);
        assert!(err.to_string().contains("#login is disabled"));
    }

    #[test]
    fn api_timeouts_keep_the_client_bound() {
        let actor = Actor::named("Anna");
        let attempt = Attempt::new(&actor, "get /posts/1", "/posts/1");
        let err = attempt.api(ApiError::Timeout(3000));
        assert!(matches!(
            err,
            ScreenplayError::ActionTimeout { timeout_ms: 3000, .. }
        ));
        let err = attempt.api(ApiError::Transport("connection refused".to_string()));
        assert_eq!(err.kind(), FailureKind::ActionFailed);
    }
}
