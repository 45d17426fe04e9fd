//! Shared primitives for the screenplay crates.
//!
//! Everything here is plain data: identifiers, ability kinds and the
//! descriptions of where an interaction acts (locators and targets).

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use uuid::Uuid;

/// Identifies one browser session.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies what capability an ability grants.
///
/// Two kinds are equal when they were derived from the same Rust type; the
/// name is carried along for error messages and traces.
#[derive(Clone, Copy, Debug)]
pub struct AbilityKind {
    name: &'static str,
    type_id: TypeId,
}

impl AbilityKind {
    pub fn of<T: 'static>(name: &'static str) -> Self {
        Self {
            name,
            type_id: TypeId::of::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
}

impl PartialEq for AbilityKind {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for AbilityKind {}

impl Hash for AbilityKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Display for AbilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Strategy for locating an element on a page.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-full", serde(rename_all = "snake_case"))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Locator {
    /// CSS selector
    Css(String),

    /// Element id attribute
    Id(String),

    /// XPath expression
    #[cfg_attr(feature = "serde-full", serde(rename = "xpath"))]
    XPath(String),

    /// ARIA role and accessible name
    Aria { role: String, name: String },

    /// Text content (exact or partial match)
    Text { content: String, exact: bool },
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn id(id: impl Into<String>) -> Self {
        Locator::Id(id.into())
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        Locator::XPath(expression.into())
    }

    pub fn aria(role: impl Into<String>, name: impl Into<String>) -> Self {
        Locator::Aria {
            role: role.into(),
            name: name.into(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Locator::Text {
            content: content.into(),
            exact: true,
        }
    }

    pub fn partial_text(content: impl Into<String>) -> Self {
        Locator::Text {
            content: content.into(),
            exact: false,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(s) => write!(f, "css:{}", s),
            Locator::Id(id) => write!(f, "#{}", id),
            Locator::XPath(x) => write!(f, "xpath:{}", x),
            Locator::Aria { role, name } => write!(f, "aria:{}[name='{}']", role, name),
            Locator::Text { content, exact } => {
                if *exact {
                    write!(f, "text:exact:'{}'", content)
                } else {
                    write!(f, "text:partial:'{}'", content)
                }
            }
        }
    }
}

/// A named place on a page where an interaction acts.
///
/// ```
/// use screenplay_core_types::{Locator, Target};
///
/// let field = Target::the("username field").located_by(Locator::id("username"));
/// assert_eq!(field.to_string(), "the username field (#username)");
/// ```
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Target {
    pub name: String,
    pub locator: Locator,
}

impl Target {
    pub fn the(name: impl Into<String>) -> TargetBuilder {
        TargetBuilder { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "the {} ({})", self.name, self.locator)
    }
}

pub struct TargetBuilder {
    name: String,
}

impl TargetBuilder {
    pub fn located_by(self, locator: Locator) -> Target {
        Target {
            name: self.name,
            locator,
        }
    }
}

/// Scroll target specification
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScrollTarget {
    /// Scroll to top of page
    Top,

    /// Scroll to bottom of page
    Bottom,

    /// Scroll an element into view
    Element(Locator),

    /// Scroll by pixel amount (positive=down, negative=up)
    Pixels(i32),
}

impl fmt::Display for ScrollTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrollTarget::Top => f.write_str("top"),
            ScrollTarget::Bottom => f.write_str("bottom"),
            ScrollTarget::Element(locator) => write!(f, "{}", locator),
            ScrollTarget::Pixels(px) => write!(f, "{}px", px),
        }
    }
}
