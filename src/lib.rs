//! Screenplay command line
//!
//! Exposes the configuration layer and CLI modules for integration testing

pub mod cli;
pub mod config;

pub use config::{ConfigError, DriverKind, ScreenplayConfig};
