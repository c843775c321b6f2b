//! Add-info command — rewrites the commit message file handed over by git.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use super::repo_path;
use crate::config::Config;
use crate::git::author_ident;
use crate::message::Rewriter;

/// Add-info command options.
#[derive(Parser)]
pub struct AddInfoCommand {
    /// Commit message file, as passed to prepare-commit-msg or commit-msg.
    #[arg(value_name = "MSG_FILE")]
    pub msg_file: PathBuf,

    /// Repository working tree (defaults to the current directory).
    #[arg(long, value_name = "PATH")]
    pub repo: Option<PathBuf>,

    /// Prints the rewritten message instead of replacing the file.
    #[arg(long)]
    pub dry_run: bool,
}

impl AddInfoCommand {
    /// Executes the add-info command.
    pub fn execute(self, config_path: &Path) -> Result<()> {
        let config = Config::load(config_path)?;
        let path = repo_path(self.repo.as_deref())?;
        let author = author_ident(Path::new(&path))?;
        let rewriter = Rewriter::new(&config);

        if self.dry_run {
            let message = fs::read_to_string(&self.msg_file).with_context(|| {
                format!(
                    "Failed to read commit message from {}",
                    self.msg_file.display()
                )
            })?;
            print!("{}", rewriter.rewrite(&message, &path, &author)?);
            return Ok(());
        }

        rewriter.rewrite_file(&self.msg_file, &path, &author)
    }
}
