pub mod app;
pub mod commands;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod env;
pub mod outline;
pub mod output;
pub mod recipes;
pub mod rehearse;
pub mod runtime;

pub use config::{cmd_config, ConfigAction, ConfigArgs};
pub use outline::{cmd_outline, OutlineArgs};
pub use recipes::cmd_recipes;
pub use rehearse::{cmd_rehearse, rehearse, RehearsalReport, RehearseArgs};
