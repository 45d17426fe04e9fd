//! Click primitive - Click a target

use crate::abilities::BrowseTheWeb;
use crate::errors::Attempt;
use crate::waiting::{bounded, wait_for_target, Readiness};
use actor_core::{Ability, AbilityKind, Actor, Performable, ScreenplayError};
use async_trait::async_trait;
use screenplay_core_types::Target;
use std::time::Instant;
use tracing::info;

/// Click a target once it is present.
#[derive(Debug, Clone)]
pub struct Click {
    target: Target,
}

impl Click {
    pub fn on(target: Target) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }
}

#[async_trait]
impl Performable for Click {
    fn describe(&self) -> String {
        format!("clicks on the {}", self.target.name())
    }

    fn required_abilities(&self) -> Vec<AbilityKind> {
        vec![BrowseTheWeb::kind()]
    }

    async fn perform_as(&self, actor: &Actor) -> Result<(), ScreenplayError> {
        let start = Instant::now();
        let browser = actor.ability_to::<BrowseTheWeb>()?;
        let policy = browser.wait_policy();
        let driver = browser.driver().as_ref();
        let interaction = format!("click on the {}", self.target.name());
        let target = self.target.to_string();
        let attempt = Attempt::new(actor, &interaction, &target);

        info!(actor = %actor, target = %target, "Executing click interaction");
        wait_for_target(
            &attempt,
            driver,
            self.target.locator(),
            Readiness::Present,
            policy,
            policy.target_timeout,
        )
        .await?;
        bounded(&attempt, policy.action_timeout, driver.click(self.target.locator())).await?;

        info!(
            actor = %actor,
            latency_ms = start.elapsed().as_millis() as u64,
            "Click completed successfully"
        );
        Ok(())
    }
}
