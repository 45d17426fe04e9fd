use anyhow::{Context, Result};
use actor_core::Performable;
use clap::Args;
use serde::Serialize;

use crate::cli::context::CliContext;
use crate::cli::output::print_structured;
use crate::cli::recipes::{collect_params, parse_param};

#[derive(Args, Clone, Debug)]
pub struct OutlineArgs {
    /// Recipe name (see `screenplay recipes`)
    pub recipe: String,

    /// Recipe parameter as name=value; repeatable
    #[arg(short, long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
}

#[derive(Debug, Serialize)]
pub struct Outline {
    pub task: String,
    pub description: String,
    pub abilities: Vec<String>,
    pub steps: Vec<String>,
}

/// Build the recipe without running it.
pub fn outline(args: &OutlineArgs, ctx: &CliContext) -> Result<Outline> {
    let task = ctx
        .recipes()
        .build(&args.recipe, &collect_params(&args.params))
        .with_context(|| format!("Failed to build recipe '{}'", args.recipe))?;
    Ok(Outline {
        task: task.name().to_string(),
        description: task.describe(),
        abilities: task
            .required_abilities()
            .iter()
            .map(ToString::to_string)
            .collect(),
        steps: task.outline(),
    })
}

pub fn cmd_outline(args: OutlineArgs, ctx: &CliContext) -> Result<()> {
    let outline = outline(&args, ctx)?;
    if print_structured(ctx.output(), &outline)? {
        return Ok(());
    }
    println!("{} ({})", outline.description, outline.task);
    println!("  needs: {}", outline.abilities.join(", "));
    for (index, step) in outline.steps.iter().enumerate() {
        println!("  {}. {}", index + 1, step);
    }
    Ok(())
}
