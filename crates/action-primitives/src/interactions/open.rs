//! Open primitive - Navigate the browser

use crate::abilities::BrowseTheWeb;
use crate::errors::Attempt;
use crate::waiting::bounded;
use actor_core::{Ability, AbilityKind, Actor, Performable, ScreenplayError};
use async_trait::async_trait;
use tracing::info;

/// Navigate to a url. Relative urls resolve against the ability's base url.
#[derive(Debug, Clone)]
pub struct Open {
    url: String,
}

impl Open {
    pub fn url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// The root of the site under test.
    pub fn home() -> Self {
        Self::url("/")
    }
}

#[async_trait]
impl Performable for Open {
    fn describe(&self) -> String {
        format!("opens {}", self.url)
    }

    fn required_abilities(&self) -> Vec<AbilityKind> {
        vec![BrowseTheWeb::kind()]
    }

    async fn perform_as(&self, actor: &Actor) -> Result<(), ScreenplayError> {
        let browser = actor.ability_to::<BrowseTheWeb>()?;
        let url = browser.resolve(&self.url);
        let interaction = format!("open {}", url);
        let attempt = Attempt::new(actor, &interaction, &url);

        info!(actor = %actor, url = %url, "Executing open interaction");
        let bound = browser.wait_policy().action_timeout;
        bounded(&attempt, bound, browser.driver().navigate(&url)).await
    }
}
