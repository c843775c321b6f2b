//! Commit message rewriting.
//!
//! A rewrite is a straight pipeline: [`scan`] the raw text for tags and
//! trailers, [`Resolver::resolve`] the issue and developers against the
//! registry, then [`render`] the cleaned body with fresh trailers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::utils::write_atomic;

pub mod error;
pub mod identity;
pub mod renderer;
pub mod resolver;
pub mod scanner;

pub use error::{DeveloperOrigin, RewriteError};
pub use identity::{parse_identity, Developer};
pub use renderer::render;
pub use resolver::{Attribution, DeveloperRegistry, RepoDefaults, Resolver};
pub use scanner::{is_issue_id, scan, ScannedMessage};

/// Rewrites commit messages against a loaded configuration snapshot.
pub struct Rewriter<'c> {
    config: &'c Config,
}

impl<'c> Rewriter<'c> {
    /// Creates a rewriter reading from `config`.
    pub fn new(config: &'c Config) -> Self {
        Self { config }
    }

    /// Produces the replacement text for `message`.
    ///
    /// `repo_path` is the working directory of the commit and `author_ident`
    /// the author identity as printed by `git var GIT_AUTHOR_IDENT`.
    pub fn rewrite(
        &self,
        message: &str,
        repo_path: &str,
        author_ident: &str,
    ) -> Result<String, RewriteError> {
        let repo = self
            .config
            .lookup_repo(repo_path)
            .ok_or_else(|| RewriteError::UnresolvableRepository(repo_path.to_string()))?;
        let author = parse_identity(author_ident)?;

        let scanned = scan(message)?;
        let attribution = Resolver::new(self.config).resolve(
            &scanned,
            RepoDefaults {
                path: repo.key,
                developer_ids: &repo.repo.devs,
            },
        )?;

        Ok(render(scanned.body(), &attribution, &author))
    }

    /// Rewrites the message stored at `path` in place.
    ///
    /// The file is left untouched when the rewrite fails.
    pub fn rewrite_file<P: AsRef<Path>>(
        &self,
        path: P,
        repo_path: &str,
        author_ident: &str,
    ) -> Result<()> {
        let path = path.as_ref();
        let message = fs::read_to_string(path)
            .with_context(|| format!("Failed to read commit message from {}", path.display()))?;

        let rewritten = self
            .rewrite(&message, repo_path, author_ident)
            .with_context(|| format!("Failed to rewrite commit message {}", path.display()))?;

        write_atomic(path, rewritten.as_bytes())
            .with_context(|| format!("Failed to write commit message {}", path.display()))
    }
}
