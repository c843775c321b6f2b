//! Add-dev command — registers a developer.

use std::path::Path;

use anyhow::Result;
use clap::Parser;

use crate::config::Config;

/// Add-dev command options.
#[derive(Parser)]
pub struct AddDevCommand {
    /// Short id used in first-line tags, e.g. `[alice,bob]`.
    #[arg(value_name = "ID")]
    pub id: String,

    /// Display name used in Co-authored-by trailers.
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Email address used in Co-authored-by trailers.
    #[arg(value_name = "EMAIL")]
    pub email: String,
}

impl AddDevCommand {
    /// Executes the add-dev command.
    pub fn execute(self, config_path: &Path) -> Result<()> {
        let mut config = Config::load(config_path)?;
        config.add_developer(&self.id, &self.name, &self.email);
        config.save(config_path)?;

        println!("✅ Added {}: {} <{}>", self.id, self.name, self.email);
        Ok(())
    }
}
