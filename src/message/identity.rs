//! Parsing of `Name <email>` identity lines.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::RewriteError;

/// A developer that can be credited on a commit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Developer {
    /// Display name.
    pub name: String,
    /// Email address, the key used for de-duplication.
    pub email: String,
}

impl Developer {
    /// Creates a new developer record.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Returns true when both name and email match exactly.
    pub fn is_same_identity(&self, other: &Self) -> bool {
        self.name == other.name && self.email == other.email
    }
}

impl fmt::Display for Developer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// Parses an identity of the form `[label: ]Name <email>`.
///
/// Accepts both `git var GIT_AUTHOR_IDENT` output (which carries a trailing
/// timestamp) and trailer lines such as `Co-authored-by: Name <email>`. A label
/// is only recognised when its colon comes before the `<`; the name then
/// starts after the colon and its following space.
///
/// An empty name is returned as-is. A missing `<email>` segment is a
/// [`RewriteError::MalformedIdentity`].
pub fn parse_identity(ident: &str) -> Result<Developer, RewriteError> {
    let malformed = || RewriteError::MalformedIdentity(ident.trim_end().to_string());

    let open = ident.find('<').ok_or_else(malformed)?;
    let close = ident[open..]
        .find('>')
        .map(|offset| open + offset)
        .ok_or_else(malformed)?;

    let name_start = match ident.find(':') {
        Some(colon) if colon < open => colon + 2,
        _ => 0,
    };

    let name = ident.get(name_start..open).ok_or_else(malformed)?;
    let name = name.strip_suffix(' ').unwrap_or(name);
    let email = &ident[open + 1..close];

    Ok(Developer::new(name, email))
}
