//! Re-emits a cleaned commit message with its attribution trailers.

use tracing::debug;

use super::identity::Developer;
use super::resolver::Attribution;
use super::scanner::{CO_AUTHOR_TRAILER, ISSUE_ID_LABEL};

/// Renders the replacement message text.
///
/// The body is followed by one blank line, the issue line (numeric ids gain a
/// `#`) and one co-author line per developer in email order. A developer whose
/// name and email both equal the author's is not credited.
pub fn render(body: &str, attribution: &Attribution, author: &Developer) -> String {
    let mut out = String::new();
    out.push_str(body.trim());
    out.push_str("\n\n");

    if let Some(issue_id) = attribution.issue_id.as_deref().filter(|id| !id.is_empty()) {
        if issue_id.parse::<i64>().is_ok() {
            out.push_str(&format!("{ISSUE_ID_LABEL}#{issue_id}\n\n"));
        } else {
            out.push_str(&format!("{ISSUE_ID_LABEL}{issue_id}\n\n"));
        }
    }

    for developer in attribution.developers.values() {
        if developer.is_same_identity(author) {
            debug!(%developer, "skipping co-author (same as author)");
            continue;
        }

        out.push_str(&format!("{CO_AUTHOR_TRAILER} {developer}\n"));
        debug!(%developer, "added co-author");
    }

    out
}
