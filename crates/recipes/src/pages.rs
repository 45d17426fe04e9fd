//! Targets of the application under test

use screenplay_core_types::{Locator, Target};

pub struct LoginPage;

impl LoginPage {
    pub fn username_field() -> Target {
        Target::the("username field").located_by(Locator::id("username"))
    }

    pub fn password_field() -> Target {
        Target::the("password field").located_by(Locator::id("password"))
    }

    pub fn remember_me_checkbox() -> Target {
        Target::the("remember me checkbox").located_by(Locator::id("remember"))
    }

    pub fn login_button() -> Target {
        Target::the("login button").located_by(Locator::css("button[type='submit']"))
    }
}

pub struct DungeonDirectoryPage;

impl DungeonDirectoryPage {
    pub fn heading() -> Target {
        Target::the("dungeon directory heading")
            .located_by(Locator::xpath("//h2[text()='Dungeon Directory']"))
    }

    pub fn search_box() -> Target {
        Target::the("dungeon search box").located_by(Locator::id("dungeon-search"))
    }
}
