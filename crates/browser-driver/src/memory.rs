//! Scripted in-memory browser.
//!
//! Serves pages from a [`PageFixture`] and keeps an ordered log of every
//! command it was asked to issue. Queries (`is_present`, `text_of`, ...) are
//! not logged.

use crate::error::{DriverError, DriverErrorKind};
use crate::fixture::{ElementSpec, PageFixture, PageSpec};
use crate::BrowserDriver;
use async_trait::async_trait;
use parking_lot::Mutex;
use screenplay_core_types::{Locator, ScrollTarget, SessionId};
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::debug;
use url::Url;

/// A command recorded by [`InMemoryDriver`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DriverCall {
    Navigate(String),
    TypeText { locator: Locator, text: String },
    Clear(Locator),
    Click(Locator),
    Scroll(ScrollTarget),
}

impl fmt::Display for DriverCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverCall::Navigate(url) => write!(f, "open(\"{}\")", url),
            DriverCall::TypeText { locator, text } => {
                write!(f, "type(\"{}\") -> {}", text, locator)
            }
            DriverCall::Clear(locator) => write!(f, "clear -> {}", locator),
            DriverCall::Click(locator) => write!(f, "click -> {}", locator),
            DriverCall::Scroll(target) => write!(f, "scroll -> {}", target),
        }
    }
}

struct DriverState {
    url: Option<String>,
    page_path: Option<String>,
    navigated_at: Instant,
    values: HashMap<Locator, String>,
    calls: Vec<DriverCall>,
}

pub struct InMemoryDriver {
    session: SessionId,
    fixture: PageFixture,
    action_delay: Duration,
    state: Mutex<DriverState>,
}

impl InMemoryDriver {
    pub fn new(fixture: PageFixture) -> Self {
        Self {
            session: SessionId::new(),
            fixture,
            action_delay: Duration::ZERO,
            state: Mutex::new(DriverState {
                url: None,
                page_path: None,
                navigated_at: Instant::now(),
                values: HashMap::new(),
                calls: Vec::new(),
            }),
        }
    }

    /// Make every click/type/clear command take `delay` before it is applied.
    pub fn with_action_delay(mut self, delay: Duration) -> Self {
        self.action_delay = delay;
        self
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session
    }

    pub fn calls(&self) -> Vec<DriverCall> {
        self.state.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }

    pub fn current_path(&self) -> Option<String> {
        self.state.lock().page_path.clone()
    }

    /// Value typed into the element matched by `locator`, if any.
    pub fn typed_value(&self, locator: &Locator) -> Option<String> {
        let state = self.state.lock();
        let element = self.current_page(&state)?.find_element(locator)?;
        state.values.get(&canonical(element)).cloned()
    }

    fn current_page(&self, state: &DriverState) -> Option<&PageSpec> {
        state
            .page_path
            .as_deref()
            .and_then(|path| self.fixture.find_page(path))
    }

    /// Element matched by `locator` that is attached to the page right now.
    fn attached_element(&self, state: &DriverState, locator: &Locator) -> Option<&ElementSpec> {
        let element = self.current_page(state)?.find_element(locator)?;
        let attached_after = Duration::from_millis(element.appears_after_ms);
        if state.navigated_at.elapsed() >= attached_after {
            Some(element)
        } else {
            None
        }
    }

    fn require_element(
        &self,
        state: &DriverState,
        locator: &Locator,
    ) -> Result<ElementSpec, DriverError> {
        self.attached_element(state, locator)
            .cloned()
            .ok_or_else(|| DriverError::target_not_found(locator.to_string()))
    }

    fn enter_page(&self, state: &mut DriverState, url: String) {
        let path = path_of(&url);
        state.page_path = Some(path);
        state.url = Some(url);
        state.navigated_at = Instant::now();
        state.values.clear();
    }

    async fn apply_delay(&self) {
        if !self.action_delay.is_zero() {
            sleep(self.action_delay).await;
        }
    }
}

/// Key under which typed values for `element` are kept.
fn canonical(element: &ElementSpec) -> Locator {
    match element.locators.first() {
        Some(locator) => locator.clone(),
        None => Locator::text(element.text.clone()),
    }
}

fn path_of(url: &str) -> String {
    if let Ok(parsed) = Url::parse(url) {
        return parsed.path().to_string();
    }
    let path = url.split(&['?', '#'][..]).next().unwrap_or_default();
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

fn follow_link(current: Option<&str>, path: &str) -> String {
    match current.and_then(|url| Url::parse(url).ok()) {
        Some(base) => base
            .join(path)
            .map(|joined| joined.to_string())
            .unwrap_or_else(|_| path.to_string()),
        None => path.to_string(),
    }
}

#[async_trait]
impl BrowserDriver for InMemoryDriver {
    async fn navigate(&self, url: &str) -> Result<(), DriverError> {
        debug!(session = %self.session, url = %url, "in-memory driver navigating");
        let mut state = self.state.lock();
        state.calls.push(DriverCall::Navigate(url.to_string()));
        self.enter_page(&mut state, url.to_string());
        Ok(())
    }

    async fn is_present(&self, locator: &Locator) -> Result<bool, DriverError> {
        let state = self.state.lock();
        Ok(self.attached_element(&state, locator).is_some())
    }

    async fn is_visible(&self, locator: &Locator) -> Result<bool, DriverError> {
        let state = self.state.lock();
        Ok(self
            .attached_element(&state, locator)
            .map(|el| el.visible)
            .unwrap_or(false))
    }

    async fn type_text(&self, locator: &Locator, text: &str) -> Result<(), DriverError> {
        self.apply_delay().await;
        let mut state = self.state.lock();
        let element = self.require_element(&state, locator)?;
        if element.disabled {
            return Err(DriverError::new(DriverErrorKind::NotInteractable)
                .with_hint(format!("{} is disabled", locator)));
        }
        state.calls.push(DriverCall::TypeText {
            locator: locator.clone(),
            text: text.to_string(),
        });
        state
            .values
            .entry(canonical(&element))
            .or_default()
            .push_str(text);
        Ok(())
    }

    async fn clear(&self, locator: &Locator) -> Result<(), DriverError> {
        self.apply_delay().await;
        let mut state = self.state.lock();
        let element = self.require_element(&state, locator)?;
        state.calls.push(DriverCall::Clear(locator.clone()));
        state.values.insert(canonical(&element), String::new());
        Ok(())
    }

    async fn click(&self, locator: &Locator) -> Result<(), DriverError> {
        self.apply_delay().await;
        let mut state = self.state.lock();
        let element = self.require_element(&state, locator)?;
        if element.disabled || !element.visible {
            return Err(DriverError::new(DriverErrorKind::NotInteractable)
                .with_hint(format!("{} cannot receive clicks", locator)));
        }
        state.calls.push(DriverCall::Click(locator.clone()));
        if let Some(path) = &element.navigates_to {
            let next = follow_link(state.url.as_deref(), path);
            debug!(url = %next, "click followed link");
            self.enter_page(&mut state, next);
        }
        Ok(())
    }

    async fn scroll(&self, target: &ScrollTarget) -> Result<(), DriverError> {
        let mut state = self.state.lock();
        if let ScrollTarget::Element(locator) = target {
            self.require_element(&state, locator)?;
        }
        state.calls.push(DriverCall::Scroll(target.clone()));
        Ok(())
    }

    async fn text_of(&self, locator: &Locator) -> Result<String, DriverError> {
        let state = self.state.lock();
        let element = self.require_element(&state, locator)?;
        match state.values.get(&canonical(&element)) {
            Some(value) if !value.is_empty() => Ok(value.clone()),
            _ => Ok(element.text.clone()),
        }
    }

    async fn current_url(&self) -> Result<String, DriverError> {
        let state = self.state.lock();
        Ok(state
            .url
            .clone()
            .unwrap_or_else(|| "about:blank".to_string()))
    }

    async fn title(&self) -> Result<String, DriverError> {
        let state = self.state.lock();
        Ok(self
            .current_page(&state)
            .map(|page| page.title.clone())
            .unwrap_or_default())
    }

    async fn wait_for_load(&self, timeout: Duration) -> Result<(), DriverError> {
        let remaining = {
            let state = self.state.lock();
            let load = self
                .current_page(&state)
                .map(|page| Duration::from_millis(page.load_ms))
                .unwrap_or_default();
            load.saturating_sub(state.navigated_at.elapsed())
        };

        if remaining > timeout {
            sleep(timeout).await;
            return Err(DriverError::new(DriverErrorKind::Timeout)
                .with_hint(format!("page still loading after {}ms", timeout.as_millis())));
        }
        sleep(remaining).await;
        Ok(())
    }
}
