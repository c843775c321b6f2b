//! CLI interface for xp.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::resolve_config_path;

pub mod add_info;
pub mod dev;
pub mod hooks;
pub mod repo;
pub mod show;

pub use add_info::AddInfoCommand;
pub use dev::AddDevCommand;
pub use hooks::InstallHooksCommand;
pub use repo::{AddRepoCommand, UpdateRepoDevsCommand};
pub use show::ShowCommand;

/// xp: credits pairing partners and issues on every commit.
#[derive(Parser)]
#[command(name = "xp")]
#[command(about = "Adds issue references and co-author trailers to commit messages", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to $XP_CONFIG, then ~/.xp.yaml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Registers a developer that can be credited.
    AddDev(AddDevCommand),
    /// Registers a repository and its default developers.
    AddRepo(AddRepoCommand),
    /// Replaces the default developers of the current repository.
    UpdateRepoDevs(UpdateRepoDevsCommand),
    /// Installs the commit message hooks into a repository.
    InstallHooks(InstallHooksCommand),
    /// Rewrites a commit message file; invoked by the installed hooks.
    AddInfo(AddInfoCommand),
    /// Prints the configuration.
    Show(ShowCommand),
}

impl Cli {
    /// Executes the CLI command.
    ///
    /// The configuration location is only resolved by commands that read or
    /// write the configuration.
    pub fn execute(self) -> Result<()> {
        let config_override = self.config;
        let config_path = || resolve_config_path(config_override.as_deref());

        match self.command {
            Commands::AddDev(cmd) => cmd.execute(&config_path()?),
            Commands::AddRepo(cmd) => cmd.execute(&config_path()?),
            Commands::UpdateRepoDevs(cmd) => cmd.execute(&config_path()?),
            Commands::InstallHooks(cmd) => cmd.execute(),
            Commands::AddInfo(cmd) => cmd.execute(&config_path()?),
            Commands::Show(cmd) => cmd.execute(&config_path()?),
        }
    }
}

/// Canonicalises `path`, or the current directory when none is given.
pub(crate) fn repo_path(path: Option<&Path>) -> Result<String> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => env::current_dir().context("Failed to determine current directory")?,
    };

    let canonical = fs::canonicalize(&path)
        .with_context(|| format!("Failed to resolve path: {}", path.display()))?;
    Ok(canonical.to_string_lossy().into_owned())
}
