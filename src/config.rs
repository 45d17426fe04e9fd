//! Runtime configuration for the `screenplay` binary
//!
//! The library crates never read configuration. The binary resolves these
//! scalars once and hands the core a [`WaitPolicy`] and base URLs.

use action_primitives::WaitPolicy;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const ENV_PREFIX: &str = "SCREENPLAY_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("poll interval ({poll_ms}ms) must not exceed the target timeout ({target_ms}ms)")]
    PollExceedsTimeout { poll_ms: u64, target_ms: u64 },

    #[error("{field} is not a valid URL: {value} ({source})")]
    InvalidUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{key} must be {expected}, got '{value}'")]
    InvalidOverride {
        key: String,
        expected: &'static str,
        value: String,
    },
}

/// Which browser driver backs `BrowseTheWeb`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DriverKind {
    /// Page fixtures replayed in memory
    #[default]
    InMemory,
}

impl DriverKind {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "in-memory" | "in_memory" | "memory" => Some(DriverKind::InMemory),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenplayConfig {
    /// Relative `Open` URLs resolve against this
    pub base_url: String,

    pub driver: DriverKind,

    /// How long interactions wait for a target to appear
    pub target_timeout_ms: u64,

    pub poll_interval_ms: u64,

    /// Upper bound for a single driver command
    pub action_timeout_ms: u64,

    pub api_base_url: String,

    pub api_timeout_ms: u64,
}

impl Default for ScreenplayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5500/".to_string(),
            driver: DriverKind::InMemory,
            target_timeout_ms: 5_000,
            poll_interval_ms: 100,
            action_timeout_ms: 10_000,
            api_base_url: "https://jsonplaceholder.typicode.com".to_string(),
            api_timeout_ms: 30_000,
        }
    }
}

impl ScreenplayConfig {
    pub fn from_yaml_str(raw: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file deserializes to unit, not to the defaults.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("target_timeout_ms", self.target_timeout_ms),
            ("poll_interval_ms", self.poll_interval_ms),
            ("action_timeout_ms", self.action_timeout_ms),
            ("api_timeout_ms", self.api_timeout_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroTimeout { field });
            }
        }
        if self.poll_interval_ms > self.target_timeout_ms {
            return Err(ConfigError::PollExceedsTimeout {
                poll_ms: self.poll_interval_ms,
                target_ms: self.target_timeout_ms,
            });
        }
        for (field, value) in [
            ("base_url", &self.base_url),
            ("api_base_url", &self.api_base_url),
        ] {
            Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
                field,
                value: value.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Apply `SCREENPLAY_*` variables from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from any lookup; keys carry the `SCREENPLAY_` prefix.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let key = |name: &str| format!("{}{}", ENV_PREFIX, name);

        if let Some(value) = lookup(&key("BASE_URL")) {
            self.base_url = value;
        }
        if let Some(value) = lookup(&key("API_BASE_URL")) {
            self.api_base_url = value;
        }
        if let Some(value) = lookup(&key("DRIVER")) {
            self.driver =
                DriverKind::parse(&value).ok_or_else(|| ConfigError::InvalidOverride {
                    key: key("DRIVER"),
                    expected: "a known driver kind",
                    value,
                })?;
        }

        for (name, slot) in [
            ("TARGET_TIMEOUT_MS", &mut self.target_timeout_ms),
            ("POLL_INTERVAL_MS", &mut self.poll_interval_ms),
            ("ACTION_TIMEOUT_MS", &mut self.action_timeout_ms),
            ("API_TIMEOUT_MS", &mut self.api_timeout_ms),
        ] {
            let full = key(name);
            if let Some(value) = lookup(&full) {
                *slot = value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidOverride {
                        key: full,
                        expected: "a number of milliseconds",
                        value,
                    })?;
            }
        }
        Ok(())
    }

    pub fn wait_policy(&self) -> WaitPolicy {
        WaitPolicy::from_millis(
            self.target_timeout_ms,
            self.poll_interval_ms,
            self.action_timeout_ms,
        )
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_millis(self.api_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let config = ScreenplayConfig::default();
        config.validate().unwrap();
        assert_eq!(config.wait_policy(), WaitPolicy::default());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = ScreenplayConfig::from_yaml_str("target_timeout_ms: 250\n").unwrap();
        assert_eq!(config.target_timeout_ms, 250);
        assert_eq!(config.poll_interval_ms, 100);
        assert_eq!(config.driver, DriverKind::InMemory);

        assert_eq!(
            ScreenplayConfig::from_yaml_str("").unwrap(),
            ScreenplayConfig::default()
        );
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = ScreenplayConfig::default();
        config.action_timeout_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroTimeout {
                field: "action_timeout_ms"
            })
        ));

        let mut config = ScreenplayConfig::default();
        config.poll_interval_ms = 10_000;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PollExceedsTimeout { .. })
        ));

        let mut config = ScreenplayConfig::default();
        config.api_base_url = "not a url".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidUrl {
                field: "api_base_url",
                ..
            })
        ));
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = ScreenplayConfig::default();
        config
            .apply_overrides(lookup(&[
                ("SCREENPLAY_BASE_URL", "http://localhost:8080/"),
                ("SCREENPLAY_TARGET_TIMEOUT_MS", "750"),
                ("SCREENPLAY_DRIVER", "memory"),
            ]))
            .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/");
        assert_eq!(config.target_timeout_ms, 750);
        assert_eq!(config.action_timeout_ms, 10_000);

        let err = config
            .apply_overrides(lookup(&[("SCREENPLAY_POLL_INTERVAL_MS", "soon")]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "SCREENPLAY_POLL_INTERVAL_MS must be a number of milliseconds, got 'soon'"
        );

        assert!(config
            .apply_overrides(lookup(&[("SCREENPLAY_DRIVER", "chromium")]))
            .is_err());
    }
}
