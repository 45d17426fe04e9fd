use std::path::PathBuf;

use actor_core::FailureKind;
use screenplay_cli::cli::rehearse::{load_fixture, rehearse, RehearseArgs};
use screenplay_cli::ScreenplayConfig;
use screenplay_recipes::Recipes;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("dungeon-finder.yaml")
}

fn args(recipe: &str, params: &[(&str, &str)]) -> RehearseArgs {
    RehearseArgs {
        recipe: recipe.to_string(),
        fixture: fixture_path(),
        params: params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        actor: "Admin".to_string(),
        with_api: false,
        attempts: 1,
        backoff_ms: 1,
    }
}

fn fast_config() -> ScreenplayConfig {
    ScreenplayConfig {
        target_timeout_ms: 300,
        poll_interval_ms: 10,
        action_timeout_ms: 1_000,
        ..ScreenplayConfig::default()
    }
}

#[tokio::test]
async fn bundled_fixture_parses() {
    let fixture = load_fixture(&fixture_path()).await.unwrap();
    assert_eq!(fixture.pages.len(), 2);
    assert!(fixture.find_page("/dungeons").is_some());
}

#[tokio::test]
async fn admin_login_rehearsal_records_driver_calls() {
    let report = rehearse(&args("login-admin", &[]), &fast_config(), &Recipes::standard())
        .await
        .unwrap();

    assert!(report.succeeded);
    assert_eq!(report.attempts, Some(1));
    assert_eq!(
        report.driver_calls,
        vec![
            "open(\"http://127.0.0.1:5500/\")",
            "type(\"admin\") -> #username",
            "type(\"admin\") -> #password",
            "click -> css:button[type='submit']",
        ]
    );
    let rendered = report.render();
    assert!(rendered.contains("Admin logs in with username admin [ok"));
    assert!(rendered.contains("Admin enters \"****\" into the password field"));
    assert!(rendered.ends_with("PASSED\n"));
}

#[tokio::test]
async fn failing_recipe_is_reported_with_task_context() {
    let report = rehearse(
        &args("verify-dungeon-directory", &[]),
        &fast_config(),
        &Recipes::standard(),
    )
    .await
    .unwrap();

    assert!(!report.succeeded);
    assert!(report.driver_calls.is_empty());
    let failure = report.failure.as_ref().unwrap();
    assert_eq!(failure.kind, FailureKind::TargetNotFound);
    assert!(failure.context[0].starts_with("verify the dungeon directory > step 1"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["succeeded"], false);
    assert_eq!(json["failure"]["kind"], "TargetNotFound");
    assert!(json.get("attempts").is_none());
}

#[tokio::test]
async fn api_recipe_without_the_api_ability_fails_before_any_call() {
    let report = rehearse(&args("fetch-resource", &[]), &fast_config(), &Recipes::standard())
        .await
        .unwrap();

    let failure = report.failure.unwrap();
    assert_eq!(failure.kind, FailureKind::MissingAbility);
    assert_eq!(
        failure.message,
        "Admin does not have the ability to call an API, needed to perform 'sends GET /posts/1'"
    );
    assert_eq!(failure.context, vec!["fetch a resource > step 1: sends GET /posts/1"]);
    assert!(report.driver_calls.is_empty());
}

#[tokio::test]
async fn setup_problems_are_errors() {
    let err = rehearse(&args("login", &[]), &fast_config(), &Recipes::standard())
        .await
        .unwrap_err();
    assert!(format!("{:#}", err).contains("missing parameter 'username'"));

    let mut missing = args("login-admin", &[]);
    missing.fixture = PathBuf::from("does/not/exist.yaml");
    let err = rehearse(&missing, &fast_config(), &Recipes::standard())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Failed to read fixture"));

    let config = ScreenplayConfig {
        poll_interval_ms: 0,
        ..fast_config()
    };
    assert!(rehearse(&args("login-admin", &[]), &config, &Recipes::standard())
        .await
        .is_err());
}
