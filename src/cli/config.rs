use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::cli::context::CliContext;
use crate::cli::output::{print_structured, OutputFormat};
use crate::config::ScreenplayConfig;

#[derive(Args, Clone, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Clone, Debug)]
pub enum ConfigAction {
    /// Show the resolved configuration, overrides included
    Show,

    /// Print the configuration file path that was consulted
    Path,

    /// Validate the resolved configuration
    Validate,
}

#[derive(Serialize)]
struct ConfigView<'a> {
    path: String,
    from_file: bool,
    config: &'a ScreenplayConfig,
}

pub fn cmd_config(args: ConfigArgs, ctx: &CliContext) -> Result<()> {
    let path = ctx.config_path().display().to_string();
    match args.action {
        ConfigAction::Show => {
            let view = ConfigView {
                path: path.clone(),
                from_file: ctx.config_from_file(),
                config: ctx.config(),
            };
            match ctx.output() {
                OutputFormat::Human => {
                    let origin = if ctx.config_from_file() {
                        path
                    } else {
                        format!("defaults, {} not found", path)
                    };
                    println!("Current configuration ({}):", origin);
                    print!("{}", serde_yaml::to_string(ctx.config())?);
                }
                format => {
                    print_structured(format, &view)?;
                }
            }
        }
        ConfigAction::Path => println!("{}", path),
        ConfigAction::Validate => {
            ctx.config()
                .validate()
                .with_context(|| format!("Configuration from {} is invalid", path))?;
            println!("Configuration is valid");
        }
    }
    Ok(())
}
