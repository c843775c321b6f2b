//! Author identity lookup through `git var`.

use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};

/// Git variable holding the author identity of the commit being made.
pub const AUTHOR_IDENT_VAR: &str = "GIT_AUTHOR_IDENT";

/// Runs `git var <name>` in `dir` and returns its raw output.
pub fn git_var(dir: &Path, name: &str) -> Result<String> {
    let output = Command::new("git")
        .args(["var", name])
        .current_dir(dir)
        .output()
        .context("Failed to execute git var")?;

    if !output.status.success() {
        let error_msg = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("git var {} failed: {}", name, error_msg.trim());
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Returns the author identity, e.g. `Alice A <a@x.com> 1700000000 +0000`.
pub fn author_ident(dir: &Path) -> Result<String> {
    git_var(dir, AUTHOR_IDENT_VAR).context("get author info failed")
}
