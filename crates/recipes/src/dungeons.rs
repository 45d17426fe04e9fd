use action_flow::Task;
use action_primitives::{Enter, WaitUntil};
use actor_core::ScreenplayError;

use crate::pages::DungeonDirectoryPage;

/// Wait until the dungeon directory shows its heading and search box.
pub struct VerifyDungeonDirectory;

impl VerifyDungeonDirectory {
    pub const NAME: &'static str = "verify the dungeon directory";

    pub fn is_loaded() -> Result<Task, ScreenplayError> {
        Task::named(Self::NAME)
            .describe_as("checks that the dungeon directory is loaded")
            .then(WaitUntil::the(DungeonDirectoryPage::heading()).is_visible())
            .then(WaitUntil::the(DungeonDirectoryPage::search_box()).is_visible())
            .build()
    }

    /// Loaded check followed by a search.
    pub fn and_search_for(term: &str) -> Result<Task, ScreenplayError> {
        Task::named("search the dungeon directory")
            .describe_as(format!("searches the dungeon directory for {}", term))
            .require(!term.trim().is_empty(), "search term must not be empty")
            .then(Self::is_loaded()?)
            .then(Enter::the_value(term).into(DungeonDirectoryPage::search_box()))
            .build()
    }
}
