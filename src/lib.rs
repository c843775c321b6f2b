//! # xp-coauthors
//!
//! Rewrites commit messages just before they are recorded, appending a
//! normalized `Issue-id:` line and a sorted list of `Co-authored-by:`
//! trailers.
//!
//! Developers are credited from, in order of precedence:
//!
//! - a tag group opening the message, e.g. `[42,alice,bob] Fix bug`
//! - `Co-authored-by:` lines already present in the message
//! - the default developers configured for the repository
//!
//! ## Quick Start
//!
//! ```rust
//! use xp_coauthors::config::Config;
//! use xp_coauthors::message::Rewriter;
//!
//! let mut config = Config::default();
//! config.add_developer("bob", "Bob B", "b@x.com");
//! config.add_repo("/src/app", vec![], None).unwrap();
//!
//! let rewritten = Rewriter::new(&config)
//!     .rewrite("[42,bob] Fix bug", "/src/app", "Alice A <a@x.com>")
//!     .unwrap();
//! assert_eq!(
//!     rewritten,
//!     "Fix bug\n\nIssue-id: #42\n\nCo-authored-by: Bob B <b@x.com>\n"
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod git;
pub mod message;
pub mod utils;

pub use crate::cli::Cli;

/// The current version of xp-coauthors.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
