use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use action_flow::Task;
use tracing::debug;

use crate::api::FetchResource;
use crate::dungeons::VerifyDungeonDirectory;
use crate::errors::{RecErrorKind, RecResult};
use crate::login::{AdvancedLoginTask, LoginTask, ADMIN_PASSWORD, ADMIN_USERNAME};
use crate::model::{ParamSpec, Recipe, RecipeParams};

type Factory = Arc<dyn Fn(&RecipeParams) -> RecResult<Task> + Send + Sync>;

#[derive(Clone)]
struct Entry {
    recipe: Recipe,
    factory: Factory,
}

/// Named task factories.
#[derive(Clone)]
pub struct Recipes {
    entries: BTreeMap<String, Entry>,
}

impl Recipes {
    /// The built-in catalog.
    pub fn standard() -> Self {
        RecipesBuilder::new().with_standard_recipes().build()
    }

    /// Catalog entries sorted by name.
    pub fn list(&self) -> Vec<&Recipe> {
        self.entries.values().map(|entry| &entry.recipe).collect()
    }

    pub fn get(&self, name: &str) -> RecResult<&Recipe> {
        self.entry(name).map(|entry| &entry.recipe)
    }

    /// Build the named task from string parameters.
    pub fn build(&self, name: &str, given: &BTreeMap<String, String>) -> RecResult<Task> {
        let entry = self.entry(name)?;
        let params = entry.recipe.resolve(given)?;
        debug!(recipe = %name, params = ?params, "building recipe");
        (entry.factory)(&params)
    }

    fn entry(&self, name: &str) -> RecResult<&Entry> {
        self.entries
            .get(name)
            .ok_or_else(|| RecErrorKind::NotFound(name.to_string()).into())
    }
}

impl fmt::Debug for Recipes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.keys()).finish()
    }
}

#[derive(Clone, Default)]
pub struct RecipesBuilder {
    entries: BTreeMap<String, Entry>,
    conflicts: Vec<String>,
}

impl RecipesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        mut self,
        recipe: Recipe,
        factory: impl Fn(&RecipeParams) -> RecResult<Task> + Send + Sync + 'static,
    ) -> Self {
        if self.entries.contains_key(&recipe.name) {
            self.conflicts.push(recipe.name.clone());
        }
        self.entries.insert(
            recipe.name.clone(),
            Entry {
                recipe,
                factory: Arc::new(factory),
            },
        );
        self
    }

    pub fn with_standard_recipes(self) -> Self {
        self.register(
            Recipe::new("login", "Log in with the given credentials")
                .param(ParamSpec::required("username", "account name"))
                .param(ParamSpec::required("password", "account password")),
            |params| {
                Ok(LoginTask::with_credentials(
                    params.require("username")?,
                    params.require("password")?,
                )?)
            },
        )
        .register(
            Recipe::new("login-admin", "Log in with the admin account"),
            |_| Ok(LoginTask::as_admin()?),
        )
        .register(
            Recipe::new(
                "login-remember-me",
                "Log in, ticking the remember-me checkbox when asked to",
            )
            .param(ParamSpec::optional("username", "account name", ADMIN_USERNAME))
            .param(ParamSpec::optional("password", "account password", ADMIN_PASSWORD))
            .param(ParamSpec::optional("remember", "tick remember me", "true")),
            |params| {
                Ok(AdvancedLoginTask::build(
                    params.require("username")?,
                    params.require("password")?,
                    params.flag("remember")?,
                )?)
            },
        )
        .register(
            Recipe::new(
                "verify-dungeon-directory",
                "Wait for the dungeon directory and optionally search it",
            )
            .param(ParamSpec::optional("search", "term to search for", "")),
            |params| match params.get("search").filter(|term| !term.is_empty()) {
                Some(term) => Ok(VerifyDungeonDirectory::and_search_for(term)?),
                None => Ok(VerifyDungeonDirectory::is_loaded()?),
            },
        )
        .register(
            Recipe::new("fetch-resource", "GET a resource and expect a 2xx status")
                .param(ParamSpec::optional("path", "resource path", "/posts/1")),
            |params| Ok(FetchResource::at(params.require("path")?)?),
        )
    }

    /// Duplicate names keep the last registration.
    pub fn build(self) -> Recipes {
        for name in &self.conflicts {
            debug!(recipe = %name, "recipe registered twice, keeping the last");
        }
        Recipes {
            entries: self.entries,
        }
    }

    /// Like [`RecipesBuilder::build`] but rejects duplicate names.
    pub fn try_build(self) -> RecResult<Recipes> {
        if let Some(name) = self.conflicts.first() {
            return Err(RecErrorKind::Conflict(name.clone()).into());
        }
        Ok(self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RecError;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn standard_catalog_is_sorted() {
        let recipes = Recipes::standard();
        let names: Vec<&str> = recipes.list().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "fetch-resource",
                "login",
                "login-admin",
                "login-remember-me",
                "verify-dungeon-directory",
            ]
        );
    }

    #[test]
    fn builds_tasks_from_string_parameters() {
        let recipes = Recipes::standard();
        let task = recipes
            .build("login-remember-me", &params(&[("remember", "no")]))
            .unwrap();
        assert_eq!(task.len(), 4);

        let task = recipes
            .build("verify-dungeon-directory", &params(&[("search", "goblin")]))
            .unwrap();
        assert_eq!(task.len(), 2);
    }

    #[test]
    fn task_validation_surfaces_through_the_catalog() {
        let err = Recipes::standard()
            .build("login", &params(&[("username", " "), ("password", "x")]))
            .unwrap_err();
        assert!(matches!(err.kind(), RecErrorKind::Task(_)));

        let err: RecError = Recipes::standard()
            .build("nope", &BTreeMap::new())
            .unwrap_err();
        assert_eq!(err.to_string(), "recipe 'nope' not found");
    }

    #[test]
    fn duplicate_names_are_rejected_by_try_build() {
        let builder = RecipesBuilder::new()
            .register(Recipe::new("a", "first"), |_| Ok(LoginTask::as_admin()?))
            .register(Recipe::new("a", "second"), |_| Ok(LoginTask::as_admin()?));
        assert!(matches!(
            builder.clone().try_build().unwrap_err().kind(),
            RecErrorKind::Conflict(name) if name == "a"
        ));
        assert_eq!(builder.build().get("a").unwrap().summary, "second");
    }
}
