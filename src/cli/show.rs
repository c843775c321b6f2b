//! Show command — prints the configuration.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::Config;

/// Show command options.
#[derive(Parser)]
pub struct ShowCommand {}

impl ShowCommand {
    /// Executes the show command.
    pub fn execute(self, config_path: &Path) -> Result<()> {
        let config = Config::load(config_path)?;
        let yaml = serde_yaml::to_string(&config).context("Failed to serialize config")?;

        println!("# {}", config_path.display());
        print!("{yaml}");
        Ok(())
    }
}
