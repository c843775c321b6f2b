//! Installation of the commit message hooks into a repository.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use git2::Repository;
use tracing::debug;

/// Hooks that run the rewrite, relative to the hooks directory.
pub const HOOK_FILES: [&str; 2] = ["prepare-commit-msg", "commit-msg"];

/// Returns the shell script installed for every hook.
pub fn hook_script(program: &str) -> String {
    format!("#!/bin/sh\n{} add-info \"$1\"\n", shell_quote(program))
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

/// Writes the rewrite hooks into a repository's git directory.
pub struct HookInstaller {
    repo: Repository,
}

impl HookInstaller {
    /// Opens the repository whose working tree (or git directory) is `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::open(path)
            .with_context(|| format!(".git not found in {}", path.display()))?;
        Ok(Self { repo })
    }

    /// Directory git runs hooks from.
    ///
    /// `core.hooksPath` wins when set; a relative value is taken from the top
    /// of the working tree. Otherwise the hooks live in the common git
    /// directory, which linked worktrees share with the main one.
    pub fn hooks_dir(&self) -> Result<PathBuf> {
        let config = self
            .repo
            .config()
            .context("Failed to read repository config")?;

        if let Ok(hooks_path) = config.get_path("core.hooksPath") {
            if hooks_path.is_absolute() {
                return Ok(hooks_path);
            }
            let base = self.repo.workdir().unwrap_or_else(|| self.repo.path());
            return Ok(base.join(hooks_path));
        }

        Ok(self.repo.commondir().join("hooks"))
    }

    /// Installs the hooks so that they invoke `program`.
    ///
    /// Unless `overwrite` is set, an existing hook of the same name aborts the
    /// installation before any file is written. Returns the written paths.
    pub fn install(&self, program: &str, overwrite: bool) -> Result<Vec<PathBuf>> {
        let hooks_dir = self.hooks_dir()?;

        if !overwrite {
            for name in HOOK_FILES {
                let hook_path = hooks_dir.join(name);
                if hook_path.exists() {
                    anyhow::bail!("{} is already defined", hook_path.display());
                }
            }
        }

        fs::create_dir_all(&hooks_dir).with_context(|| {
            format!("Failed to create hooks directory: {}", hooks_dir.display())
        })?;

        let script = hook_script(program);
        let mut written = Vec::with_capacity(HOOK_FILES.len());
        for name in HOOK_FILES {
            let hook_path = hooks_dir.join(name);
            fs::write(&hook_path, &script)
                .with_context(|| format!("create hook file {} failed", hook_path.display()))?;
            make_executable(&hook_path)?;
            debug!(hook = %hook_path.display(), "installed hook");
            written.push(hook_path);
        }

        Ok(written)
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("Failed to make {} executable", path.display()))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
