use std::collections::BTreeMap;

use anyhow::Result;
use screenplay_recipes::Recipe;

use crate::cli::context::CliContext;
use crate::cli::output::print_structured;

/// clap value parser for `--param name=value`.
pub fn parse_param(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("parameter name missing in '{}'", raw));
    }
    Ok((name.to_string(), value.to_string()))
}

pub fn collect_params(pairs: &[(String, String)]) -> BTreeMap<String, String> {
    pairs.iter().cloned().collect()
}

pub fn cmd_recipes(ctx: &CliContext) -> Result<()> {
    let recipes = ctx.recipes().list();
    if print_structured(ctx.output(), &recipes)? {
        return Ok(());
    }
    for recipe in recipes {
        println!("{}", render_recipe(recipe));
    }
    Ok(())
}

fn render_recipe(recipe: &Recipe) -> String {
    let mut out = format!("{:<26} {}", recipe.name, recipe.summary);
    for param in &recipe.params {
        let note = match (&param.default, param.required) {
            (_, true) => "required".to_string(),
            (Some(default), false) if !default.is_empty() => format!("default: {}", default),
            _ => "optional".to_string(),
        };
        out.push_str(&format!(
            "\n    --param {}=...  {} ({})",
            param.name, param.description, note
        ));
    }
    out
}
