//! Abilities binding an actor to a browser session or an API endpoint

use actor_core::Ability;
use api_client::{ApiClient, ApiError, ReqwestApiClient};
use browser_driver::BrowserDriver;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Bounds applied by the browser interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    /// How long an interaction waits for its target to become present
    pub target_timeout: Duration,

    /// Pause between presence checks
    pub poll_interval: Duration,

    /// Upper bound for a single driver command
    pub action_timeout: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            target_timeout: Duration::from_millis(5000),
            poll_interval: Duration::from_millis(100),
            action_timeout: Duration::from_millis(10000),
        }
    }
}

impl WaitPolicy {
    pub fn from_millis(target_timeout_ms: u64, poll_interval_ms: u64, action_timeout_ms: u64) -> Self {
        Self {
            target_timeout: Duration::from_millis(target_timeout_ms),
            poll_interval: Duration::from_millis(poll_interval_ms),
            action_timeout: Duration::from_millis(action_timeout_ms),
        }
    }
}

/// Drive a browser session.
pub struct BrowseTheWeb {
    driver: Arc<dyn BrowserDriver>,
    base_url: Option<Url>,
    wait: WaitPolicy,
}

impl BrowseTheWeb {
    pub fn with(driver: Arc<dyn BrowserDriver>) -> Self {
        Self {
            driver,
            base_url: None,
            wait: WaitPolicy::default(),
        }
    }

    /// Resolve relative `Open` targets against `base_url`.
    pub fn at(mut self, base_url: &str) -> Result<Self, url::ParseError> {
        self.base_url = Some(Url::parse(base_url)?);
        Ok(self)
    }

    pub fn with_wait_policy(mut self, wait: WaitPolicy) -> Self {
        self.wait = wait;
        self
    }

    pub fn driver(&self) -> &Arc<dyn BrowserDriver> {
        &self.driver
    }

    pub fn wait_policy(&self) -> WaitPolicy {
        self.wait
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Absolute urls pass through; anything else is joined onto the base
    /// url, or handed to the driver unchanged when there is none.
    pub fn resolve(&self, url: &str) -> String {
        if Url::parse(url).is_ok() {
            return url.to_string();
        }
        match &self.base_url {
            Some(base) => base
                .join(url)
                .map(|joined| joined.to_string())
                .unwrap_or_else(|_| url.to_string()),
            None => url.to_string(),
        }
    }
}

impl Ability for BrowseTheWeb {
    const NAME: &'static str = "browse the web";

    fn summary(&self) -> String {
        match &self.base_url {
            Some(base) => format!("browse the web at {}", base),
            None => Self::NAME.to_string(),
        }
    }
}

/// Call a REST endpoint.
pub struct CallAnApi {
    base_url: String,
    client: Arc<dyn ApiClient>,
}

impl CallAnApi {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Bind to `base_url` using the HTTP client.
    pub fn at(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::at_with_timeout(base_url, Self::DEFAULT_TIMEOUT)
    }

    pub fn at_with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        api_client::resolve_url(&base_url, "")?;
        let client = ReqwestApiClient::new(timeout)?;
        Ok(Self {
            base_url,
            client: Arc::new(client),
        })
    }

    /// Bind to `base_url` through a caller-supplied client.
    pub fn with_client(base_url: impl Into<String>, client: Arc<dyn ApiClient>) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn client(&self) -> &Arc<dyn ApiClient> {
        &self.client
    }
}

impl Ability for CallAnApi {
    const NAME: &'static str = "call an API";

    fn summary(&self) -> String {
        format!("call the API at {}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use browser_driver::{InMemoryDriver, PageFixture};

    fn browse() -> BrowseTheWeb {
        BrowseTheWeb::with(Arc::new(InMemoryDriver::new(PageFixture::new())))
    }

    #[test]
    fn relative_urls_stay_relative_without_a_base() {
        assert_eq!(browse().resolve("/"), "/");
    }

    #[test]
    fn relative_urls_join_the_base() {
        let ability = browse().at("http://127.0.0.1:5500/app/").unwrap();
        assert_eq!(ability.resolve("login"), "http://127.0.0.1:5500/app/login");
        assert_eq!(ability.resolve("/"), "http://127.0.0.1:5500/");
        assert_eq!(
            ability.resolve("https://example.com/"),
            "https://example.com/"
        );
    }

    #[test]
    fn api_ability_rejects_bad_base_urls() {
        assert!(matches!(
            CallAnApi::at("no scheme here"),
            Err(ApiError::InvalidUrl { .. })
        ));
    }
}
