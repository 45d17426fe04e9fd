//! Ready-made tasks for the dungeon finder application and its API.
//!
//! Page targets live in [`pages`]; the tasks built on them in [`login`],
//! [`dungeons`] and [`api`]. [`Recipes`] names every task so it can be built
//! from string parameters, which is how the command line runs them.

pub mod api;
pub mod catalog;
pub mod dungeons;
pub mod errors;
pub mod login;
pub mod model;
pub mod pages;

pub use api::FetchResource;
pub use catalog::{Recipes, RecipesBuilder};
pub use dungeons::VerifyDungeonDirectory;
pub use errors::{RecError, RecErrorKind};
pub use login::{AdvancedLoginTask, LoginTask};
pub use model::{ParamSpec, Recipe, RecipeParams};
pub use pages::{DungeonDirectoryPage, LoginPage};
