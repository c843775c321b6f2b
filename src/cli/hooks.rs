//! Install-hooks command — wires the rewrite into a repository.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::repo_path;
use crate::git::HookInstaller;

/// Install-hooks command options.
#[derive(Parser)]
pub struct InstallHooksCommand {
    /// Repository working tree (defaults to the current directory).
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Replaces hooks that are already present.
    #[arg(long)]
    pub overwrite: bool,

    /// Program the hooks invoke (defaults to this executable).
    #[arg(long, value_name = "PATH")]
    pub program: Option<PathBuf>,
}

impl InstallHooksCommand {
    /// Executes the install-hooks command.
    pub fn execute(self) -> Result<()> {
        let path = repo_path(self.path.as_deref())?;
        let program = match self.program {
            Some(program) => program,
            None => env::current_exe().context("Failed to locate the xp executable")?,
        };

        let installer = HookInstaller::open(&path)?;
        let written = installer.install(&program.to_string_lossy(), self.overwrite)?;

        println!("✅ Installed hooks:");
        for hook in written {
            println!("   - {}", hook.display());
        }
        Ok(())
    }
}
