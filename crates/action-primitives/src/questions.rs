//! Questions over page and API state

use crate::abilities::{BrowseTheWeb, CallAnApi};
use crate::errors::Attempt;
use crate::interactions::LAST_RESPONSE;
use crate::waiting::{bounded, wait_for_target, Readiness};
use actor_core::{Ability, AbilityKind, Actor, Question, ScreenplayError};
use api_client::ApiResponse;
use async_trait::async_trait;
use screenplay_core_types::Target;
use serde_json::Value;
use std::sync::Arc;

/// Text content of a target, once it is present.
#[derive(Debug, Clone)]
pub struct Text {
    target: Target,
}

impl Text {
    pub fn of(target: Target) -> Self {
        Self { target }
    }
}

#[async_trait]
impl Question for Text {
    type Answer = String;

    fn describe(&self) -> String {
        format!("the text of the {}", self.target.name())
    }

    fn required_abilities(&self) -> Vec<AbilityKind> {
        vec![BrowseTheWeb::kind()]
    }

    async fn answered_by(&self, actor: &Actor) -> Result<String, ScreenplayError> {
        let browser = actor.ability_to::<BrowseTheWeb>()?;
        let policy = browser.wait_policy();
        let driver = browser.driver().as_ref();
        let interaction = format!("read the text of the {}", self.target.name());
        let target = self.target.to_string();
        let attempt = Attempt::new(actor, &interaction, &target);

        wait_for_target(
            &attempt,
            driver,
            self.target.locator(),
            Readiness::Present,
            policy,
            policy.target_timeout,
        )
        .await?;
        bounded(&attempt, policy.action_timeout, driver.text_of(self.target.locator())).await
    }
}

/// Whether a target is visible right now. Absent targets are not visible.
#[derive(Debug, Clone)]
pub struct Visibility {
    target: Target,
}

impl Visibility {
    pub fn of(target: Target) -> Self {
        Self { target }
    }
}

#[async_trait]
impl Question for Visibility {
    type Answer = bool;

    fn describe(&self) -> String {
        format!("whether the {} is visible", self.target.name())
    }

    fn required_abilities(&self) -> Vec<AbilityKind> {
        vec![BrowseTheWeb::kind()]
    }

    async fn answered_by(&self, actor: &Actor) -> Result<bool, ScreenplayError> {
        let browser = actor.ability_to::<BrowseTheWeb>()?;
        let interaction = format!("check whether the {} is visible", self.target.name());
        let target = self.target.to_string();
        let attempt = Attempt::new(actor, &interaction, &target);
        bounded(
            &attempt,
            browser.wait_policy().action_timeout,
            browser.driver().is_visible(self.target.locator()),
        )
        .await
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentUrl;

#[async_trait]
impl Question for CurrentUrl {
    type Answer = String;

    fn describe(&self) -> String {
        "the current url".to_string()
    }

    fn required_abilities(&self) -> Vec<AbilityKind> {
        vec![BrowseTheWeb::kind()]
    }

    async fn answered_by(&self, actor: &Actor) -> Result<String, ScreenplayError> {
        let browser = actor.ability_to::<BrowseTheWeb>()?;
        let attempt = Attempt::new(actor, "read the current url", "the page");
        bounded(
            &attempt,
            browser.wait_policy().action_timeout,
            browser.driver().current_url(),
        )
        .await
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PageTitle;

#[async_trait]
impl Question for PageTitle {
    type Answer = String;

    fn describe(&self) -> String {
        "the page title".to_string()
    }

    fn required_abilities(&self) -> Vec<AbilityKind> {
        vec![BrowseTheWeb::kind()]
    }

    async fn answered_by(&self, actor: &Actor) -> Result<String, ScreenplayError> {
        let browser = actor.ability_to::<BrowseTheWeb>()?;
        let attempt = Attempt::new(actor, "read the page title", "the page");
        bounded(
            &attempt,
            browser.wait_policy().action_timeout,
            browser.driver().title(),
        )
        .await
    }
}

/// Questions about the response to the actor's most recent request.
pub struct LastResponse;

impl LastResponse {
    pub fn status() -> ResponseStatus {
        ResponseStatus
    }

    /// Value at a dotted path (`data.items[0].id`); `Null` when absent.
    pub fn field(path: impl Into<String>) -> ResponseField {
        ResponseField { path: path.into() }
    }

    pub fn header(name: impl Into<String>) -> ResponseHeader {
        ResponseHeader { name: name.into() }
    }
}

fn last_response(actor: &Actor, reading: &str) -> Result<Arc<ApiResponse>, ScreenplayError> {
    actor.ability_to::<CallAnApi>()?;
    actor
        .recall::<ApiResponse>(LAST_RESPONSE)
        .ok_or_else(|| ScreenplayError::ActionFailed {
            actor: actor.name().to_string(),
            interaction: format!("read {}", reading),
            reason: "no API response has been received yet".to_string(),
        })
}

#[derive(Debug, Clone, Copy)]
pub struct ResponseStatus;

#[async_trait]
impl Question for ResponseStatus {
    type Answer = u16;

    fn describe(&self) -> String {
        "the last response status".to_string()
    }

    fn required_abilities(&self) -> Vec<AbilityKind> {
        vec![CallAnApi::kind()]
    }

    async fn answered_by(&self, actor: &Actor) -> Result<u16, ScreenplayError> {
        Ok(last_response(actor, &self.describe())?.status)
    }
}

#[derive(Debug, Clone)]
pub struct ResponseField {
    path: String,
}

#[async_trait]
impl Question for ResponseField {
    type Answer = Value;

    fn describe(&self) -> String {
        format!("the '{}' field of the last response", self.path)
    }

    fn required_abilities(&self) -> Vec<AbilityKind> {
        vec![CallAnApi::kind()]
    }

    async fn answered_by(&self, actor: &Actor) -> Result<Value, ScreenplayError> {
        let response = last_response(actor, &self.describe())?;
        Ok(response.field(&self.path).cloned().unwrap_or(Value::Null))
    }
}

#[derive(Debug, Clone)]
pub struct ResponseHeader {
    name: String,
}

#[async_trait]
impl Question for ResponseHeader {
    type Answer = Option<String>;

    fn describe(&self) -> String {
        format!("the '{}' header of the last response", self.name)
    }

    fn required_abilities(&self) -> Vec<AbilityKind> {
        vec![CallAnApi::kind()]
    }

    async fn answered_by(&self, actor: &Actor) -> Result<Option<String>, ScreenplayError> {
        let response = last_response(actor, &self.describe())?;
        Ok(response.header(&self.name).map(str::to_string))
    }
}
