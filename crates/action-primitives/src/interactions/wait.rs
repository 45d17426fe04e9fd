//! Wait primitives - Explicit waits for targets and page loads

use crate::abilities::BrowseTheWeb;
use crate::errors::Attempt;
use crate::waiting::{bounded, wait_for_target, Readiness};
use actor_core::{Ability, AbilityKind, Actor, Performable, ScreenplayError};
use async_trait::async_trait;
use screenplay_core_types::Target;
use std::time::Duration;
use tracing::info;

/// First half of `WaitUntil::the(..).is_visible()`.
pub struct WaitUntilTarget {
    target: Target,
}

impl WaitUntilTarget {
    pub fn is_visible(self) -> WaitUntil {
        WaitUntil {
            target: self.target,
            readiness: Readiness::Visible,
            within: None,
        }
    }

    pub fn is_present(self) -> WaitUntil {
        WaitUntil {
            target: self.target,
            readiness: Readiness::Present,
            within: None,
        }
    }
}

/// Block until a target reaches a state, bounded by the target timeout.
#[derive(Debug, Clone)]
pub struct WaitUntil {
    target: Target,
    readiness: Readiness,
    within: Option<Duration>,
}

impl WaitUntil {
    pub fn the(target: Target) -> WaitUntilTarget {
        WaitUntilTarget { target }
    }

    /// Override the ability's target timeout for this wait only.
    pub fn for_up_to(mut self, within: Duration) -> Self {
        self.within = Some(within);
        self
    }

    fn state(&self) -> &'static str {
        match self.readiness {
            Readiness::Present => "present",
            Readiness::Visible => "visible",
        }
    }
}

#[async_trait]
impl Performable for WaitUntil {
    fn describe(&self) -> String {
        format!("waits until the {} is {}", self.target.name(), self.state())
    }

    fn required_abilities(&self) -> Vec<AbilityKind> {
        vec![BrowseTheWeb::kind()]
    }

    async fn perform_as(&self, actor: &Actor) -> Result<(), ScreenplayError> {
        let browser = actor.ability_to::<BrowseTheWeb>()?;
        let policy = browser.wait_policy();
        let within = self.within.unwrap_or(policy.target_timeout);
        let interaction = format!("wait until the {} is {}", self.target.name(), self.state());
        let target = self.target.to_string();
        let attempt = Attempt::new(actor, &interaction, &target);

        info!(
            actor = %actor,
            target = %target,
            within_ms = within.as_millis() as u64,
            "Executing wait interaction"
        );
        wait_for_target(
            &attempt,
            browser.driver().as_ref(),
            self.target.locator(),
            self.readiness,
            policy,
            within,
        )
        .await
    }
}

/// Wait for the current document to finish loading.
#[derive(Debug, Clone, Default)]
pub struct WaitForLoad {
    within: Option<Duration>,
}

impl WaitForLoad {
    pub fn page() -> Self {
        Self::default()
    }

    /// Override the ability's action timeout for this wait only.
    pub fn for_up_to(mut self, within: Duration) -> Self {
        self.within = Some(within);
        self
    }
}

#[async_trait]
impl Performable for WaitForLoad {
    fn describe(&self) -> String {
        "waits for the page to load".to_string()
    }

    fn required_abilities(&self) -> Vec<AbilityKind> {
        vec![BrowseTheWeb::kind()]
    }

    async fn perform_as(&self, actor: &Actor) -> Result<(), ScreenplayError> {
        let browser = actor.ability_to::<BrowseTheWeb>()?;
        let within = self.within.unwrap_or(browser.wait_policy().action_timeout);
        let attempt = Attempt::new(actor, "wait for the page to load", "the page");

        info!(actor = %actor, within_ms = within.as_millis() as u64, "Waiting for page load");
        // The outer bound has slack so the driver reports its own timeout first.
        bounded(
            &attempt,
            within + within / 10,
            browser.driver().wait_for_load(within),
        )
        .await
        .map_err(|err| match err {
            ScreenplayError::ActionTimeout {
                actor,
                interaction,
                target,
                ..
            } => ScreenplayError::ActionTimeout {
                actor,
                interaction,
                target,
                timeout_ms: within.as_millis() as u64,
            },
            other => other,
        })
    }
}
