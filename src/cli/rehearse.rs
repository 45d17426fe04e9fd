//! `screenplay rehearse`: run a recipe against a page fixture
//!
//! The browser is an [`InMemoryDriver`] seeded from a YAML fixture, so a
//! rehearsal exercises the recipe's steps, waits and checks without a real
//! browser. `--with-api` additionally grants a live `CallAnApi` ability.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use action_flow::RetryPolicy;
use action_primitives::{BrowseTheWeb, CallAnApi};
use actor_core::{Actor, FailureKind, Trace};
use anyhow::{bail, Context, Result};
use browser_driver::{InMemoryDriver, PageFixture};
use clap::Args;
use screenplay_recipes::Recipes;
use serde::Serialize;
use tokio::fs;
use tracing::{info, warn};

use crate::cli::context::CliContext;
use crate::cli::output::print_structured;
use crate::cli::recipes::{collect_params, parse_param};
use crate::config::{DriverKind, ScreenplayConfig};

#[derive(Args, Clone, Debug)]
pub struct RehearseArgs {
    /// Recipe name (see `screenplay recipes`)
    #[arg(short, long)]
    pub recipe: String,

    /// YAML page fixture seeding the in-memory browser
    #[arg(short, long, value_name = "FILE")]
    pub fixture: PathBuf,

    /// Recipe parameter as name=value; repeatable
    #[arg(short, long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Name of the performing actor
    #[arg(long, default_value = "Tester")]
    pub actor: String,

    /// Also grant the actor the ability to call the configured API
    #[arg(long)]
    pub with_api: bool,

    /// Total attempts; failures that are not worth repeating stop after one
    #[arg(long, default_value_t = 1)]
    pub attempts: u32,

    /// Backoff before the second attempt, doubled for each later one
    #[arg(long, default_value_t = 200)]
    pub backoff_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct FailureReport {
    pub kind: FailureKind,
    pub message: String,
    /// "task > step" context, outermost first
    pub context: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RehearsalReport {
    pub recipe: String,
    pub actor: String,
    pub session: String,
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureReport>,
    pub trace: Trace,
    pub driver_calls: Vec<String>,
}

impl RehearsalReport {
    pub fn render(&self) -> String {
        let mut out = format!("Rehearsal of '{}' by {}\n\n", self.recipe, self.actor);
        out.push_str(&self.trace.render());
        out.push_str("\nDriver calls:\n");
        if self.driver_calls.is_empty() {
            out.push_str("  (none)\n");
        }
        for (index, call) in self.driver_calls.iter().enumerate() {
            out.push_str(&format!("  {:>2}. {}\n", index + 1, call));
        }
        out.push('\n');
        match (&self.failure, self.attempts) {
            (Some(failure), _) => {
                out.push_str(&format!("FAILED ({:?}): {}\n", failure.kind, failure.message));
                for frame in &failure.context {
                    out.push_str(&format!("  in {}\n", frame));
                }
            }
            (None, Some(attempts)) if attempts > 1 => {
                out.push_str(&format!("PASSED after {} attempts\n", attempts));
            }
            (None, _) => out.push_str("PASSED\n"),
        }
        out
    }
}

pub async fn load_fixture(path: &Path) -> Result<PageFixture> {
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read fixture {}", path.display()))?;
    PageFixture::from_yaml_str(&raw)
        .with_context(|| format!("Failed to parse fixture {}", path.display()))
}

/// Run the recipe and collect what happened. A failing recipe is a report,
/// not an error; errors are reserved for setup problems.
pub async fn rehearse(
    args: &RehearseArgs,
    config: &ScreenplayConfig,
    recipes: &Recipes,
) -> Result<RehearsalReport> {
    config.validate().context("Invalid configuration")?;

    let task = recipes
        .build(&args.recipe, &collect_params(&args.params))
        .with_context(|| format!("Failed to build recipe '{}'", args.recipe))?;

    let driver = match config.driver {
        DriverKind::InMemory => Arc::new(InMemoryDriver::new(load_fixture(&args.fixture).await?)),
    };

    let browse = BrowseTheWeb::with(driver.clone())
        .at(&config.base_url)
        .with_context(|| format!("Invalid base URL {}", config.base_url))?
        .with_wait_policy(config.wait_policy());
    let mut actor = Actor::named(args.actor.as_str()).who_can(browse);
    if args.with_api {
        let api = CallAnApi::at_with_timeout(config.api_base_url.clone(), config.api_timeout())
            .context("Failed to set up the API client")?;
        actor.can(api);
    }

    info!(
        recipe = %args.recipe,
        actor = %actor,
        session = %driver.session_id(),
        fixture = %args.fixture.display(),
        "Rehearsing"
    );
    let policy = RetryPolicy::new(args.attempts, args.backoff_ms);
    let outcome = policy.attempt(&actor, &[&task]).await;

    let (attempts, failure) = match outcome {
        Ok(attempts) => (Some(attempts), None),
        Err(err) => {
            warn!(recipe = %args.recipe, error = %err, "Rehearsal failed");
            let failure = FailureReport {
                kind: err.kind(),
                message: err.root_cause().to_string(),
                context: err
                    .frames()
                    .into_iter()
                    .map(|frame| format!("{} > step {}: {}", frame.task, frame.index + 1, frame.step))
                    .collect(),
            };
            (None, Some(failure))
        }
    };

    Ok(RehearsalReport {
        recipe: args.recipe.clone(),
        actor: actor.name().to_string(),
        session: driver.session_id().to_string(),
        succeeded: failure.is_none(),
        attempts,
        failure,
        trace: actor.trace(),
        driver_calls: driver.calls().iter().map(ToString::to_string).collect(),
    })
}

pub async fn cmd_rehearse(args: RehearseArgs, ctx: &CliContext) -> Result<()> {
    let report = rehearse(&args, ctx.config(), ctx.recipes()).await?;
    if !print_structured(ctx.output(), &report)? {
        print!("{}", report.render());
    }
    if let Some(failure) = &report.failure {
        bail!("Rehearsal of '{}' failed: {}", report.recipe, failure.message);
    }
    Ok(())
}
