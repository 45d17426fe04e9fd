//! Browser driver port.
//!
//! The screenplay layers never talk to a browser directly: they go through the
//! [`BrowserDriver`] trait defined here. A concrete automation backend lives
//! outside this workspace; [`InMemoryDriver`] is a scripted stand-in seeded
//! from a [`PageFixture`] and records every command it receives.

use async_trait::async_trait;
use screenplay_core_types::{Locator, ScrollTarget};
use std::time::Duration;

pub mod error;
pub mod fixture;
pub mod memory;

pub use error::{DriverError, DriverErrorKind};
pub use fixture::{ElementSpec, FixtureError, PageFixture, PageSpec};
pub use memory::{DriverCall, InMemoryDriver};

/// Commands a browser session accepts.
///
/// Every command returns once it has been issued to the session. Waiting for
/// side effects (page load, element appearance) is the caller's business.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<(), DriverError>;

    /// Whether at least one element matches the locator right now.
    async fn is_present(&self, locator: &Locator) -> Result<bool, DriverError>;

    async fn is_visible(&self, locator: &Locator) -> Result<bool, DriverError>;

    async fn type_text(&self, locator: &Locator, text: &str) -> Result<(), DriverError>;

    async fn clear(&self, locator: &Locator) -> Result<(), DriverError>;

    async fn click(&self, locator: &Locator) -> Result<(), DriverError>;

    async fn scroll(&self, target: &ScrollTarget) -> Result<(), DriverError>;

    async fn text_of(&self, locator: &Locator) -> Result<String, DriverError>;

    async fn current_url(&self) -> Result<String, DriverError>;

    async fn title(&self) -> Result<String, DriverError>;

    /// Block until the current document finished loading or `timeout` elapses.
    async fn wait_for_load(&self, timeout: Duration) -> Result<(), DriverError>;
}
