//! Repository registry
//!
//! Static mapping from a short alias to an `owner/name` repository, parsed
//! once from the `REPO_CONFIG` string at startup and read-only afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// A GitHub repository in `owner/name` form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RepositoryId {
    owner: String,
    name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("repository must be in owner/name form: {0:?}")]
    InvalidRepository(String),
}

impl RepositoryId {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for RepositoryId {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(RegistryError::InvalidRepository(s.to_string())),
        }
    }
}

impl TryFrom<String> for RepositoryId {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RepositoryId> for String {
    fn from(id: RepositoryId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Alias → repository mapping
///
/// Entries keep the order in which aliases first appeared in the configuration
/// string; a repeated alias overwrites the earlier repository in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryRegistry {
    entries: Vec<(String, RepositoryId)>,
}

impl RepositoryRegistry {
    /// Parses `alias:owner/repo,alias2:owner/repo2`
    ///
    /// Blank entries and entries without `:` are skipped silently. Entries
    /// with an empty alias or a malformed repository are skipped with a
    /// warning so a single typo does not take the whole bot down.
    pub fn parse(config: &str) -> Self {
        let mut registry = Self::default();

        for entry in config.split(',') {
            let entry = entry.trim();
            let Some((alias, repo)) = entry.split_once(':') else {
                continue;
            };

            let alias = alias.trim();
            if alias.is_empty() {
                warn!("Skipping repository entry without alias: {:?}", entry);
                continue;
            }

            match repo.parse::<RepositoryId>() {
                Ok(id) => registry.insert(alias, id),
                Err(e) => warn!("Skipping repository entry {:?}: {}", alias, e),
            }
        }

        registry
    }

    /// Adds or replaces an alias
    pub fn insert(&mut self, alias: impl Into<String>, id: RepositoryId) {
        let alias = alias.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == alias) {
            Some((_, slot)) => *slot = id,
            None => self.entries.push((alias, id)),
        }
    }

    pub fn resolve(&self, alias: &str) -> Option<&RepositoryId> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == alias)
            .map(|(_, id)| id)
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(alias, _)| alias.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repository_id() {
        let id: RepositoryId = "acme/site-repo".parse().unwrap();
        assert_eq!(id.owner(), "acme");
        assert_eq!(id.name(), "site-repo");
        assert_eq!(id.to_string(), "acme/site-repo");
    }

    #[test]
    fn test_reject_malformed_repository_id() {
        assert!("acme".parse::<RepositoryId>().is_err());
        assert!("/repo".parse::<RepositoryId>().is_err());
        assert!("acme/".parse::<RepositoryId>().is_err());
        assert!("a/b/c".parse::<RepositoryId>().is_err());
    }

    #[test]
    fn test_parse_registry() {
        let registry = RepositoryRegistry::parse("myrepo: owner/repo1 , blog:owner/blog");
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.resolve("myrepo").map(ToString::to_string).as_deref(),
            Some("owner/repo1")
        );
        assert_eq!(
            registry.resolve("blog").map(ToString::to_string).as_deref(),
            Some("owner/blog")
        );
        assert!(registry.resolve("missing").is_none());
    }

    #[test]
    fn test_parse_skips_invalid_entries() {
        let registry = RepositoryRegistry::parse(",noseparator, :owner/x,bad:nope,ok:a/b");
        assert_eq!(registry.aliases().collect::<Vec<_>>(), vec!["ok"]);
    }

    #[test]
    fn test_last_duplicate_wins_and_keeps_position() {
        let registry = RepositoryRegistry::parse("a:o/one,b:o/two,a:o/three");
        assert_eq!(registry.aliases().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(registry.resolve("a").unwrap().to_string(), "o/three");
    }

    #[test]
    fn test_empty_config() {
        let registry = RepositoryRegistry::parse("");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_repository_id_serde() {
        let id: RepositoryId = serde_json::from_str("\"acme/site\"").unwrap();
        assert_eq!(id.name(), "site");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"acme/site\"");
        assert!(serde_json::from_str::<RepositoryId>("\"acme\"").is_err());
    }
}
