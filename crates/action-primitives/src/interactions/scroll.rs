//! Scroll primitive - Scroll the page or bring a target into view

use crate::abilities::BrowseTheWeb;
use crate::errors::Attempt;
use crate::waiting::{bounded, wait_for_target, Readiness};
use actor_core::{Ability, AbilityKind, Actor, Performable, ScreenplayError};
use async_trait::async_trait;
use screenplay_core_types::{ScrollTarget, Target};
use tracing::info;

#[derive(Debug, Clone)]
enum Destination {
    Top,
    Bottom,
    Target(Target),
    Pixels(i32),
}

#[derive(Debug, Clone)]
pub struct Scroll {
    destination: Destination,
}

impl Scroll {
    pub fn to_top() -> Self {
        Self {
            destination: Destination::Top,
        }
    }

    pub fn to_bottom() -> Self {
        Self {
            destination: Destination::Bottom,
        }
    }

    /// Bring a target into view, waiting for it to be present first.
    pub fn to(target: Target) -> Self {
        Self {
            destination: Destination::Target(target),
        }
    }

    /// Positive values scroll down.
    pub fn by(pixels: i32) -> Self {
        Self {
            destination: Destination::Pixels(pixels),
        }
    }

    fn scroll_target(&self) -> ScrollTarget {
        match &self.destination {
            Destination::Top => ScrollTarget::Top,
            Destination::Bottom => ScrollTarget::Bottom,
            Destination::Target(target) => ScrollTarget::Element(target.locator().clone()),
            Destination::Pixels(px) => ScrollTarget::Pixels(*px),
        }
    }

    fn phrase(&self) -> String {
        match &self.destination {
            Destination::Top => "to the top of the page".to_string(),
            Destination::Bottom => "to the bottom of the page".to_string(),
            Destination::Target(target) => format!("to the {}", target.name()),
            Destination::Pixels(px) => format!("by {} pixels", px),
        }
    }
}

#[async_trait]
impl Performable for Scroll {
    fn describe(&self) -> String {
        format!("scrolls {}", self.phrase())
    }

    fn required_abilities(&self) -> Vec<AbilityKind> {
        vec![BrowseTheWeb::kind()]
    }

    async fn perform_as(&self, actor: &Actor) -> Result<(), ScreenplayError> {
        let browser = actor.ability_to::<BrowseTheWeb>()?;
        let policy = browser.wait_policy();
        let driver = browser.driver().as_ref();
        let interaction = format!("scroll {}", self.phrase());
        let target = match &self.destination {
            Destination::Target(target) => target.to_string(),
            _ => "the page".to_string(),
        };
        let attempt = Attempt::new(actor, &interaction, &target);

        info!(actor = %actor, destination = %self.phrase(), "Executing scroll interaction");
        if let Destination::Target(target) = &self.destination {
            wait_for_target(
                &attempt,
                driver,
                target.locator(),
                Readiness::Present,
                policy,
                policy.target_timeout,
            )
            .await?;
        }
        let scroll_target = self.scroll_target();
        bounded(&attempt, policy.action_timeout, driver.scroll(&scroll_target)).await
    }
}
