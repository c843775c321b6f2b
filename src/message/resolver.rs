//! Decides which issue and which developers a commit is attributed to.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use tracing::debug;

use super::error::{DeveloperOrigin, RewriteError};
use super::identity::Developer;
use super::scanner::{is_issue_id, ScannedMessage};

/// Read-only view of the developer registry.
pub trait DeveloperRegistry {
    /// Returns the developer registered under `id`.
    fn lookup_developer(&self, id: &str) -> Option<&Developer>;
}

impl<S: BuildHasher> DeveloperRegistry for HashMap<String, Developer, S> {
    fn lookup_developer(&self, id: &str) -> Option<&Developer> {
        self.get(id)
    }
}

impl DeveloperRegistry for BTreeMap<String, Developer> {
    fn lookup_developer(&self, id: &str) -> Option<&Developer> {
        self.get(id)
    }
}

/// The repository a commit is being made in, as matched in the configuration.
#[derive(Debug, Clone, Copy)]
pub struct RepoDefaults<'a> {
    /// Configured path that matched the working directory.
    pub path: &'a str,
    /// Developers credited when the message names none.
    pub developer_ids: &'a [String],
}

/// Outcome of resolution: the issue and developers to stamp on the commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attribution {
    /// Issue identifier, as typed or as found in the message.
    pub issue_id: Option<String>,
    /// Credited developers keyed, and therefore ordered, by email.
    pub developers: BTreeMap<String, Developer>,
}

impl Attribution {
    fn credit(&mut self, developer: &Developer) {
        self.developers
            .insert(developer.email.clone(), developer.clone());
    }
}

/// Applies the attribution precedence rules against a developer registry.
///
/// Existing trailers seed the result. A first-line tag group replaces the
/// seeded developers outright; its first token may instead name the issue
/// when it is not a known developer but looks like an issue id. The
/// repository's default developers are used only when no developer was
/// found anywhere else.
pub struct Resolver<'r, R: ?Sized> {
    registry: &'r R,
}

impl<'r, R: DeveloperRegistry + ?Sized> Resolver<'r, R> {
    /// Creates a resolver over `registry`.
    pub fn new(registry: &'r R) -> Self {
        Self { registry }
    }

    /// Resolves the attribution for a scanned message.
    pub fn resolve(
        &self,
        scanned: &ScannedMessage<'_>,
        repo: RepoDefaults<'_>,
    ) -> Result<Attribution, RewriteError> {
        let mut attribution = Attribution {
            issue_id: scanned.existing_issue_id().map(str::to_string),
            developers: BTreeMap::new(),
        };
        for developer in scanned.existing_co_authors() {
            attribution.credit(developer);
        }

        let tags = scanned.first_line_tags();
        if !tags.is_empty() {
            attribution.developers.clear();

            for (index, tag) in tags.iter().enumerate() {
                if let Some(developer) = self.registry.lookup_developer(tag) {
                    attribution.credit(developer);
                    continue;
                }

                if index == 0 && is_issue_id(tag) {
                    debug!(issue_id = %tag, "first tag taken as issue id");
                    attribution.issue_id = Some(tag.clone());
                    continue;
                }

                return Err(RewriteError::UnknownDeveloper {
                    id: tag.clone(),
                    origin: DeveloperOrigin::FirstLine,
                });
            }
        }

        if attribution.developers.is_empty() {
            for id in repo.developer_ids {
                let developer = self.registry.lookup_developer(id).ok_or_else(|| {
                    RewriteError::UnknownDeveloper {
                        id: id.clone(),
                        origin: DeveloperOrigin::Repository(repo.path.to_string()),
                    }
                })?;
                attribution.credit(developer);
            }
        }

        debug!(
            issue_id = ?attribution.issue_id,
            developers = ?attribution.developers.keys().collect::<Vec<_>>(),
            "resolved attribution"
        );

        Ok(attribution)
    }
}
