//! Commit message rewrite errors.

use std::fmt;

use thiserror::Error;

/// Where an unresolvable developer id was referenced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeveloperOrigin {
    /// The bracketed tag group on the first line of the message.
    FirstLine,
    /// The default developer list of the matched repository.
    Repository(String),
}

impl fmt::Display for DeveloperOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstLine => write!(f, "provided in the first line"),
            Self::Repository(path) => write!(f, "marked as working for repo {path}"),
        }
    }
}

/// Failures that abort a rewrite before anything is written back.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RewriteError {
    /// An identity string has no parseable `Name <email>` segment.
    #[error("malformed identity {0:?}: expected \"Name <email>\"")]
    MalformedIdentity(String),

    /// A developer id that is missing from the registry.
    #[error("non-existing dev {id} {origin}")]
    UnknownDeveloper {
        /// The id as it was referenced.
        id: String,
        /// Where the reference came from.
        origin: DeveloperOrigin,
    },

    /// The working directory matches no configured repository.
    #[error("no repo with path {0} found")]
    UnresolvableRepository(String),
}
