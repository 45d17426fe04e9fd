use std::path::{Path, PathBuf};

use screenplay_recipes::Recipes;

use super::output::OutputFormat;
use crate::config::ScreenplayConfig;

pub struct CliContext {
    config: ScreenplayConfig,
    config_path: PathBuf,
    from_file: bool,
    output: OutputFormat,
    recipes: Recipes,
}

impl CliContext {
    pub fn new(
        config: ScreenplayConfig,
        config_path: PathBuf,
        from_file: bool,
        output: OutputFormat,
    ) -> Self {
        Self {
            config,
            config_path,
            from_file,
            output,
            recipes: Recipes::standard(),
        }
    }

    pub fn config(&self) -> &ScreenplayConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// False when the defaults were used because no file existed.
    pub fn config_from_file(&self) -> bool {
        self.from_file
    }

    pub fn output(&self) -> OutputFormat {
        self.output
    }

    pub fn recipes(&self) -> &Recipes {
        &self.recipes
    }
}
