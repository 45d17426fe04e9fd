use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{RecErrorKind, RecResult};

/// A parameter a recipe accepts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default)]
    pub required: bool,
}

impl ParamSpec {
    pub fn required(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            default: None,
            required: true,
        }
    }

    pub fn optional(
        name: impl Into<String>,
        description: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            default: Some(default.into()),
            required: false,
        }
    }
}

/// Catalog entry describing a named task.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub summary: String,
    pub params: Vec<ParamSpec>,
}

impl Recipe {
    pub fn new(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Apply defaults and reject unknown or missing parameters.
    pub fn resolve(&self, given: &BTreeMap<String, String>) -> RecResult<RecipeParams> {
        if let Some(unknown) = given
            .keys()
            .find(|key| !self.params.iter().any(|spec| &spec.name == *key))
        {
            return Err(RecErrorKind::UnknownParameter(unknown.clone()).into());
        }

        let mut values = BTreeMap::new();
        for spec in &self.params {
            match (given.get(&spec.name), &spec.default) {
                (Some(value), _) => {
                    values.insert(spec.name.clone(), value.clone());
                }
                (None, Some(default)) => {
                    values.insert(spec.name.clone(), default.clone());
                }
                (None, None) if spec.required => {
                    return Err(RecErrorKind::MissingParameter(spec.name.clone()).into());
                }
                (None, None) => {}
            }
        }
        Ok(RecipeParams { values })
    }
}

/// Parameter values after defaults were applied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecipeParams {
    values: BTreeMap<String, String>,
}

impl RecipeParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn require(&self, name: &str) -> RecResult<&str> {
        self.get(name)
            .ok_or_else(|| RecErrorKind::MissingParameter(name.to_string()).into())
    }

    /// `true`, `yes`, `1` and `on` are true; `false`, `no`, `0`, `off` and absence are false.
    pub fn flag(&self, name: &str) -> RecResult<bool> {
        match self.get(name).map(str::to_ascii_lowercase).as_deref() {
            None => Ok(false),
            Some("true" | "yes" | "1" | "on") => Ok(true),
            Some("false" | "no" | "0" | "off") => Ok(false),
            Some(other) => Err(RecErrorKind::InvalidParameter {
                name: name.to_string(),
                reason: format!("'{}' is not a boolean", other),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login() -> Recipe {
        Recipe::new("login", "log in")
            .param(ParamSpec::required("username", "account name"))
            .param(ParamSpec::optional("password", "account password", "admin"))
    }

    fn given(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_fill_in_missing_values() {
        let params = login().resolve(&given(&[("username", "jose")])).unwrap();
        assert_eq!(params.get("username"), Some("jose"));
        assert_eq!(params.get("password"), Some("admin"));
    }

    #[test]
    fn missing_and_unknown_parameters_are_errors() {
        let err = login().resolve(&given(&[])).unwrap_err();
        assert!(matches!(err.kind(), RecErrorKind::MissingParameter(name) if name == "username"));

        let err = login()
            .resolve(&given(&[("username", "jose"), ("colour", "red")]))
            .unwrap_err();
        assert!(matches!(err.kind(), RecErrorKind::UnknownParameter(name) if name == "colour"));
    }

    #[test]
    fn flags_parse_common_spellings() {
        let recipe = Recipe::new("x", "x").param(ParamSpec::optional("remember", "", "no"));
        let params = recipe.resolve(&given(&[("remember", "Yes")])).unwrap();
        assert!(params.flag("remember").unwrap());
        let params = recipe.resolve(&given(&[])).unwrap();
        assert!(!params.flag("remember").unwrap());
        let params = recipe.resolve(&given(&[("remember", "maybe")])).unwrap();
        assert!(params.flag("remember").is_err());
    }
}
