use clap::Subcommand;

use super::config::ConfigArgs;
use super::outline::OutlineArgs;
use super::rehearse::RehearseArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Run a recipe against an in-memory page fixture
    Rehearse(RehearseArgs),

    /// Print the steps a recipe would perform, without running it
    Outline(OutlineArgs),

    /// List the available recipes
    Recipes,

    /// Inspect the resolved configuration
    Config(ConfigArgs),
}
