use super::config::cmd_config;
use super::env::CliArgs;
use super::outline::cmd_outline;
use super::recipes::cmd_recipes;
use super::rehearse::cmd_rehearse;
use crate::cli::commands::Commands;
use crate::cli::context::CliContext;
use anyhow::Result;

pub async fn dispatch(cli: &CliArgs, ctx: &CliContext) -> Result<()> {
    match cli.command.clone() {
        Commands::Rehearse(args) => cmd_rehearse(args, ctx).await,
        Commands::Outline(args) => cmd_outline(args, ctx),
        Commands::Recipes => cmd_recipes(ctx),
        Commands::Config(args) => cmd_config(args, ctx),
    }
}
