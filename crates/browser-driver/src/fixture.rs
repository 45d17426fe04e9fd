//! Page fixtures that seed the in-memory driver.
//!
//! A fixture is a list of pages keyed by URL path. Each page owns the elements
//! a test expects to find there. Fixtures are plain serde data so rehearsals
//! can load them from YAML:
//!
//! ```yaml
//! pages:
//!   - path: /
//!     title: Login
//!     elements:
//!       - locators: [{ id: username }]
//!       - locators: [{ css: "button[type='submit']" }]
//!         navigates_to: /dungeons
//!       - locators: [{ aria: { role: link, name: Help } }]
//! ```
//!
//! Each locator is a single-key map naming its strategy.

use screenplay_core_types::Locator;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fixture: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("fixture page {0} declared twice")]
    DuplicatePage(String),

    #[error("element {index} on fixture page {page} has no locators")]
    ElementWithoutLocator { page: String, index: usize },
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PageFixture {
    #[serde(default)]
    pub pages: Vec<PageSpec>,
}

impl PageFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: PageSpec) -> Self {
        self.pages.push(page);
        self
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, FixtureError> {
        let fixture: PageFixture = serde_yaml::from_str(raw)?;
        fixture.validate()?;
        Ok(fixture)
    }

    pub fn from_path(path: &Path) -> Result<Self, FixtureError> {
        let raw = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    pub fn find_page(&self, path: &str) -> Option<&PageSpec> {
        self.pages.iter().find(|page| page.path == path)
    }

    fn validate(&self) -> Result<(), FixtureError> {
        for (idx, page) in self.pages.iter().enumerate() {
            if self.pages[..idx].iter().any(|p| p.path == page.path) {
                return Err(FixtureError::DuplicatePage(page.path.clone()));
            }
            if let Some(index) = page.elements.iter().position(|el| el.locators.is_empty()) {
                return Err(FixtureError::ElementWithoutLocator {
                    page: page.path.clone(),
                    index,
                });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PageSpec {
    pub path: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub elements: Vec<ElementSpec>,

    /// Time the document takes to finish loading after navigation.
    #[serde(default)]
    pub load_ms: u64,
}

impl PageSpec {
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            elements: Vec::new(),
            load_ms: 0,
        }
    }

    pub fn element(mut self, element: ElementSpec) -> Self {
        self.elements.push(element);
        self
    }

    pub fn with_load_ms(mut self, load_ms: u64) -> Self {
        self.load_ms = load_ms;
        self
    }

    pub fn find_element(&self, locator: &Locator) -> Option<&ElementSpec> {
        self.elements.iter().find(|el| el.matches(locator))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ElementSpec {
    /// Every locator that resolves to this element.
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub locators: Vec<Locator>,

    #[serde(default)]
    pub text: String,

    #[serde(default = "default_visible")]
    pub visible: bool,

    #[serde(default)]
    pub disabled: bool,

    /// Delay after navigation before the element is attached to the page.
    #[serde(default)]
    pub appears_after_ms: u64,

    /// Path the browser moves to when the element is clicked.
    #[serde(default)]
    pub navigates_to: Option<String>,
}

fn default_visible() -> bool {
    true
}

impl ElementSpec {
    pub fn new(locator: Locator) -> Self {
        Self {
            locators: vec![locator],
            text: String::new(),
            visible: true,
            disabled: false,
            appears_after_ms: 0,
            navigates_to: None,
        }
    }

    pub fn also_located_by(mut self, locator: Locator) -> Self {
        self.locators.push(locator);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn appears_after_ms(mut self, delay_ms: u64) -> Self {
        self.appears_after_ms = delay_ms;
        self
    }

    pub fn navigates_to(mut self, path: impl Into<String>) -> Self {
        self.navigates_to = Some(path.into());
        self
    }

    pub fn matches(&self, locator: &Locator) -> bool {
        self.locators.iter().any(|own| own == locator) || self.matches_text(locator)
    }

    fn matches_text(&self, locator: &Locator) -> bool {
        match locator {
            Locator::Text { content, exact } if !self.text.is_empty() => {
                if *exact {
                    self.text.trim() == content
                } else {
                    self.text.contains(content.as_str())
                }
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN_YAML: &str = r#"
pages:
  - path: /
    title: Login
    elements:
      - locators: [{ id: username }]
      - locators: [{ id: password }]
      - locators: [{ css: "button[type='submit']" }]
        text: Sign in
        navigates_to: /dungeons
  - path: /dungeons
    title: Dungeon Directory
    elements:
      - locators: [{ xpath: "//h2[text()='Dungeon Directory']" }]
        text: Dungeon Directory
      - locators:
          - aria: { role: searchbox, name: Search dungeons }
          - text: { content: Search, exact: false }
        appears_after_ms: 50
"#;

    #[test]
    fn parses_yaml_fixture() {
        let fixture = PageFixture::from_yaml_str(LOGIN_YAML).unwrap();
        assert_eq!(fixture.pages.len(), 2);

        let login = fixture.find_page("/").unwrap();
        assert_eq!(login.title, "Login");
        let submit = login
            .find_element(&Locator::css("button[type='submit']"))
            .unwrap();
        assert_eq!(submit.navigates_to.as_deref(), Some("/dungeons"));
        assert!(submit.visible);

        let directory = fixture.find_page("/dungeons").unwrap();
        let search = directory
            .find_element(&Locator::aria("searchbox", "Search dungeons"))
            .unwrap();
        assert_eq!(search.locators[1], Locator::partial_text("Search"));
        assert_eq!(search.appears_after_ms, 50);
    }

    #[test]
    fn rejects_elements_without_locators() {
        let raw = "pages:\n  - path: /\n    elements:\n      - locators: []\n        text: Sign in\n";
        assert!(matches!(
            PageFixture::from_yaml_str(raw),
            Err(FixtureError::ElementWithoutLocator { page, index: 0 }) if page == "/"
        ));
    }

    #[test]
    fn text_locators_match_element_text() {
        let element = ElementSpec::new(Locator::id("title")).with_text("Dungeon Directory");
        assert!(element.matches(&Locator::text("Dungeon Directory")));
        assert!(element.matches(&Locator::partial_text("Dungeon")));
        assert!(!element.matches(&Locator::text("Dungeon")));
    }

    #[test]
    fn rejects_duplicate_pages() {
        let raw = "pages:\n  - path: /\n  - path: /\n";
        assert!(matches!(
            PageFixture::from_yaml_str(raw),
            Err(FixtureError::DuplicatePage(path)) if path == "/"
        ));
    }

    #[test]
    fn loads_fixture_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("login.yaml");
        std::fs::write(&path, LOGIN_YAML).unwrap();
        let fixture = PageFixture::from_path(&path).unwrap();
        assert!(fixture.find_page("/dungeons").is_some());
    }
}
