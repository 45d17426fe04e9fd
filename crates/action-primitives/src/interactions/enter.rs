//! Enter primitive - Type a value into a field

use crate::abilities::BrowseTheWeb;
use crate::errors::Attempt;
use crate::waiting::{bounded, wait_for_target, Readiness};
use actor_core::{Ability, AbilityKind, Actor, Performable, ScreenplayError};
use async_trait::async_trait;
use screenplay_core_types::Target;
use tracing::{debug, info};

const MASK: &str = "****";

/// First half of `Enter::the_value(..).into(..)`.
pub struct EnterValue {
    value: String,
}

impl EnterValue {
    pub fn into(self, target: Target) -> Enter {
        Enter {
            value: self.value,
            target,
            sensitive: false,
            clear_first: false,
        }
    }
}

/// Type a value into a target once it is present.
#[derive(Debug, Clone)]
pub struct Enter {
    value: String,
    target: Target,
    sensitive: bool,
    clear_first: bool,
}

impl Enter {
    pub fn the_value(value: impl Into<String>) -> EnterValue {
        EnterValue {
            value: value.into(),
        }
    }

    /// Narrate the value as `****`. The driver still receives the real value.
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Clear the field before typing.
    pub fn after_clearing(mut self) -> Self {
        self.clear_first = true;
        self
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    fn shown_value(&self) -> &str {
        if self.sensitive {
            MASK
        } else {
            &self.value
        }
    }
}

#[async_trait]
impl Performable for Enter {
    fn describe(&self) -> String {
        format!("enters \"{}\" into the {}", self.shown_value(), self.target.name())
    }

    fn required_abilities(&self) -> Vec<AbilityKind> {
        vec![BrowseTheWeb::kind()]
    }

    async fn perform_as(&self, actor: &Actor) -> Result<(), ScreenplayError> {
        let browser = actor.ability_to::<BrowseTheWeb>()?;
        let policy = browser.wait_policy();
        let driver = browser.driver().as_ref();
        let locator = self.target.locator();
        let interaction = format!("enter \"{}\" into the {}", self.shown_value(), self.target.name());
        let target = self.target.to_string();
        let attempt = Attempt::new(actor, &interaction, &target);

        info!(actor = %actor, target = %target, "Executing enter interaction");
        wait_for_target(
            &attempt,
            driver,
            locator,
            Readiness::Present,
            policy,
            policy.target_timeout,
        )
        .await?;

        if self.clear_first {
            debug!(target = %target, "Clearing field before typing");
            bounded(&attempt, policy.action_timeout, driver.clear(locator)).await?;
        }
        bounded(
            &attempt,
            policy.action_timeout,
            driver.type_text(locator, &self.value),
        )
        .await
    }
}
