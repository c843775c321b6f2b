//! Developer registry and repository defaults, persisted as YAML.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobMatcher};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::message::{Developer, DeveloperRegistry};
use crate::utils::write_atomic;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "XP_CONFIG";

/// File name of the configuration in the home directory.
pub const DEFAULT_CONFIG_FILE: &str = ".xp.yaml";

/// The persisted configuration: who can be credited, and who works where.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Developers by id.
    #[serde(default, deserialize_with = "null_as_default")]
    pub devs: BTreeMap<String, Developer>,

    /// Repositories by path.
    #[serde(default, deserialize_with = "null_as_default")]
    pub repos: BTreeMap<String, RepoEntry>,
}

/// Defaults for one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoEntry {
    /// Developer ids credited when a message names nobody.
    #[serde(default, deserialize_with = "null_as_default")]
    pub devs: Vec<String>,

    /// Issue the repository is associated with.
    #[serde(default, rename = "issueId", skip_serializing_if = "Option::is_none")]
    pub issue_id: Option<String>,
}

/// A repository entry together with the configured path it matched under.
#[derive(Debug, Clone, Copy)]
pub struct RepoMatch<'a> {
    /// The configured path.
    pub key: &'a str,
    /// The entry stored under it.
    pub repo: &'a RepoEntry,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Config {
    /// Loads the configuration, treating a missing or empty file as empty.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Writes the whole configuration back to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        write_atomic(path, content.as_bytes())
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Registers a developer, replacing any previous record under `id`.
    pub fn add_developer(&mut self, id: &str, name: &str, email: &str) {
        self.devs.insert(id.to_string(), Developer::new(name, email));
    }

    /// Returns the developer registered under `id`.
    pub fn developer(&self, id: &str) -> Option<&Developer> {
        self.devs.get(id)
    }

    /// Registers a repository, replacing any previous entry under `path`.
    pub fn add_repo(
        &mut self,
        path: &str,
        dev_ids: Vec<String>,
        issue_id: Option<String>,
    ) -> Result<()> {
        self.validate_developers(&dev_ids)
            .context("dev ids validation failed")?;

        self.repos.insert(
            path.to_string(),
            RepoEntry {
                devs: dev_ids,
                issue_id,
            },
        );

        Ok(())
    }

    /// Finds the repository a working directory belongs to.
    ///
    /// An exact key wins. Otherwise `path` must be a direct child of a key,
    /// i.e. match the glob `key/*`; keys are tried in sorted order.
    pub fn lookup_repo(&self, path: &str) -> Option<RepoMatch<'_>> {
        if let Some((key, repo)) = self.repos.get_key_value(path) {
            return Some(RepoMatch { key, repo });
        }

        self.repos.iter().find_map(|(key, repo)| match child_glob(key) {
            Ok(matcher) => matcher
                .is_match(path)
                .then_some(RepoMatch { key, repo }),
            Err(err) => {
                warn!(key = %key, error = %err, "match failed for repository path");
                None
            }
        })
    }

    /// Replaces the default developers of the repository `path` belongs to.
    pub fn update_repo_developers(&mut self, path: &str, dev_ids: Vec<String>) -> Result<()> {
        let key = self
            .lookup_repo(path)
            .map(|found| found.key.to_string())
            .ok_or_else(|| anyhow::anyhow!("no repo with path {} found", path))?;

        self.validate_developers(&dev_ids)
            .context("dev ids validation failed")?;

        if let Some(repo) = self.repos.get_mut(&key) {
            repo.devs = dev_ids;
        }

        Ok(())
    }

    fn validate_developers(&self, dev_ids: &[String]) -> Result<()> {
        for id in dev_ids {
            if !self.devs.contains_key(id) {
                anyhow::bail!("no dev with id {} found", id);
            }
        }
        Ok(())
    }
}

impl DeveloperRegistry for Config {
    fn lookup_developer(&self, id: &str) -> Option<&Developer> {
        self.developer(id)
    }
}

fn child_glob(key: &str) -> Result<GlobMatcher, globset::Error> {
    Ok(GlobBuilder::new(&format!("{key}/*"))
        .literal_separator(true)
        .build()?
        .compile_matcher())
}

/// Resolves where the configuration lives.
///
/// Priority:
/// 1. `override_path` (from `--config`)
/// 2. `XP_CONFIG` environment variable
/// 3. `$HOME/.xp.yaml`
pub fn resolve_config_path(override_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(path.to_path_buf());
    }

    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }

    let home_dir = dirs::home_dir().context("Failed to determine home directory")?;
    Ok(home_dir.join(DEFAULT_CONFIG_FILE))
}
