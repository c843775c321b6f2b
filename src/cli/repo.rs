//! Repository commands — register repositories and their default developers.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use super::repo_path;
use crate::config::Config;

/// Add-repo command options.
#[derive(Parser)]
pub struct AddRepoCommand {
    /// Repository working tree (defaults to the current directory).
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Developer ids credited when a message names nobody.
    #[arg(long, value_delimiter = ',', value_name = "IDS")]
    pub devs: Vec<String>,

    /// Issue the repository is associated with.
    #[arg(long, value_name = "ID")]
    pub issue_id: Option<String>,
}

impl AddRepoCommand {
    /// Executes the add-repo command.
    pub fn execute(self, config_path: &Path) -> Result<()> {
        let path = repo_path(self.path.as_deref())?;

        let mut config = Config::load(config_path)?;
        config
            .add_repo(&path, self.devs, self.issue_id)
            .with_context(|| format!("Failed to add repo {path}"))?;
        config.save(config_path)?;

        println!("✅ Added repo {path}");
        Ok(())
    }
}

/// Update-repo-devs command options.
#[derive(Parser)]
pub struct UpdateRepoDevsCommand {
    /// Developer ids now working in the repository.
    #[arg(required = true, value_delimiter = ',', value_name = "IDS")]
    pub devs: Vec<String>,

    /// Repository working tree (defaults to the current directory).
    #[arg(long, value_name = "PATH")]
    pub repo: Option<PathBuf>,
}

impl UpdateRepoDevsCommand {
    /// Executes the update-repo-devs command.
    pub fn execute(self, config_path: &Path) -> Result<()> {
        let path = repo_path(self.repo.as_deref())?;

        let mut config = Config::load(config_path)?;
        config
            .update_repo_developers(&path, self.devs)
            .context("Failed to update repo devs")?;
        config.save(config_path)?;

        println!("✅ Updated devs for {path}");
        Ok(())
    }
}
