//! Extraction of attribution metadata from raw commit message text.
//!
//! Scanning is the first of two passes: it records every recognised piece of
//! metadata together with its position, without modifying the text. The
//! cleaned body is then sliced out of the original in [`ScannedMessage::body`].

use std::sync::LazyLock;

use regex::Regex;

use super::error::RewriteError;
use super::identity::{parse_identity, Developer};

/// Label that starts an issue reference line.
pub const ISSUE_ID_LABEL: &str = "Issue-id: ";

/// Label that starts a co-author line when collecting existing credits.
pub const CO_AUTHOR_LABEL: &str = "Co-authored-by";

/// Trailer marker that ends the body when no issue line is present.
pub const CO_AUTHOR_TRAILER: &str = "Co-authored-by:";

/// Highest byte offset at which the closing `]` of a tag group is accepted.
pub const MAX_TAG_GROUP_END: usize = 50;

static ISSUE_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#?.*[0-9]+").unwrap());

/// Returns true when `candidate` is shaped like an issue identifier.
///
/// The rule is purely syntactic: an optional leading `#` followed by anything
/// that contains at least one decimal digit.
pub fn is_issue_id(candidate: &str) -> bool {
    ISSUE_ID_PATTERN.is_match(candidate)
}

/// A bracketed tag group at the very start of the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagGroup {
    /// Raw tokens between the brackets, split on `,` or `|`.
    pub ids: Vec<String>,
    /// Byte offset just past the closing `]`.
    pub end: usize,
}

/// Kind of a trailer line that ends the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataKind {
    /// A line opening with `Issue-id: `, well-formed or not.
    Issue,
    /// A line opening with `Co-authored-by:`.
    CoAuthor,
}

/// Position of a trailer line in the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataSpan {
    /// What the line carries.
    pub kind: MetadataKind,
    /// Byte offset of the start of the line.
    pub start: usize,
    /// Byte offset just past the line ending.
    pub end: usize,
}

/// Metadata recognised in a commit message, with positions into the original.
#[derive(Debug, Clone)]
pub struct ScannedMessage<'a> {
    text: &'a str,
    /// First-line tag group, if the message opens with one.
    pub tags: Option<TagGroup>,
    /// Identifier of the first well-formed issue line.
    pub issue: Option<String>,
    /// Every co-author line, in file order.
    pub co_authors: Vec<Developer>,
    /// Every trailer line, in file order.
    pub spans: Vec<MetadataSpan>,
}

impl<'a> ScannedMessage<'a> {
    /// Issue identifier carried over from an earlier rewrite.
    pub fn existing_issue_id(&self) -> Option<&str> {
        self.issue.as_deref()
    }

    /// Co-authors carried over from an earlier rewrite, in file order.
    pub fn existing_co_authors(&self) -> impl Iterator<Item = &Developer> {
        self.co_authors.iter()
    }

    /// Tokens of the first-line tag group, empty when there is none.
    pub fn first_line_tags(&self) -> &[String] {
        self.tags
            .as_ref()
            .map(|group| group.ids.as_slice())
            .unwrap_or_default()
    }

    /// Offset where the trailer block starts: the first issue line, or the
    /// first co-author line when the message has no issue line.
    pub fn trailer_start(&self) -> Option<usize> {
        let body_start = self.body_start();
        let first = |kind: MetadataKind| {
            self.spans
                .iter()
                .find(|span| span.kind == kind && span.start >= body_start)
                .map(|span| span.start)
        };
        first(MetadataKind::Issue).or_else(|| first(MetadataKind::CoAuthor))
    }

    /// The message with the tag group and trailer block cut away, trimmed.
    pub fn body(&self) -> &'a str {
        let end = self.trailer_start().unwrap_or(self.text.len());
        self.text[self.body_start()..end].trim()
    }

    fn body_start(&self) -> usize {
        self.tags.as_ref().map_or(0, |group| group.end)
    }
}

/// Scans a raw commit message for tags, an issue line and co-author lines.
pub fn scan(text: &str) -> Result<ScannedMessage<'_>, RewriteError> {
    let tags = scan_tag_group(text);

    let mut issue = None;
    let mut co_authors = Vec::new();
    let mut spans = Vec::new();

    for (start, end, line) in lines_with_offsets(text) {
        if let Some(id) = line.strip_prefix(ISSUE_ID_LABEL) {
            spans.push(MetadataSpan {
                kind: MetadataKind::Issue,
                start,
                end,
            });
            if issue.is_none() && is_issue_id(id) {
                issue = Some(id.to_string());
            }
        }

        if line.starts_with(CO_AUTHOR_LABEL) {
            co_authors.push(parse_identity(line)?);
            if line.starts_with(CO_AUTHOR_TRAILER) {
                spans.push(MetadataSpan {
                    kind: MetadataKind::CoAuthor,
                    start,
                    end,
                });
            }
        }
    }

    Ok(ScannedMessage {
        text,
        tags,
        issue,
        co_authors,
        spans,
    })
}

/// Reads the `[id1,id2]`, `[id1|id2]` or `[id]` group opening the message.
fn scan_tag_group(text: &str) -> Option<TagGroup> {
    if !text.starts_with('[') {
        return None;
    }

    for (i, ch) in text.char_indices() {
        if i > MAX_TAG_GROUP_END || ch == '\n' {
            return None;
        }

        if ch == ']' {
            let inner = &text[1..i];
            let ids: Vec<String> = if inner.contains(',') {
                inner.split(',').map(str::to_string).collect()
            } else if inner.contains('|') {
                inner.split('|').map(str::to_string).collect()
            } else {
                vec![inner.to_string()]
            };

            return Some(TagGroup { ids, end: i + 1 });
        }
    }

    None
}

/// Yields each line with its byte span, line endings removed from the text.
fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, usize, &str)> {
    let mut offset = 0;
    text.split_inclusive('\n').map(move |raw| {
        let start = offset;
        offset += raw.len();
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);
        (start, offset, line)
    })
}
