//! Span-based block scanner for the resource-definition format.
//!
//! A block starts at an opener line (`Resource NAME` / `String 1 // desc`
//! followed by `{` on the next line) and ends at the first closer (`};`)
//! at the same indentation. Each level is scanned inside its parent's body
//! only, so sibling resources never see each other's markers.

use regex::Regex;
use std::ops::Range;

/// Indentation for one nesting level: a tab or four spaces.
pub const INDENT_1: &str = r"(?:\t|    )";

/// Indentation for two nesting levels: two tabs or eight spaces.
pub const INDENT_2: &str = r"(?:\t\t|        )";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Resource,
    String,
}

/// A located block with a terminated body.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)]
pub struct Block<'a> {
    pub kind: BlockKind,
    pub identifier: &'a str,
    /// Inline `// ...` comment on the opener line, when the grammar captures one.
    pub description: Option<&'a str>,
    /// Byte range of the body within the scanned text.
    pub span: Range<usize>,
    pub body: &'a str,
}

/// Opener/closer pair for one block level.
///
/// The opener must capture the identifier as `id` and may capture an
/// inline description as `desc`.
#[derive(Debug)]
pub struct BlockGrammar {
    kind: BlockKind,
    opener: Regex,
    closer: Regex,
}

impl BlockGrammar {
    pub fn new(kind: BlockKind, opener: &str, closer: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            kind,
            opener: Regex::new(opener)?,
            closer: Regex::new(closer)?,
        })
    }

    /// Find every terminated block in `text`, in source order.
    ///
    /// Openers without a closer after them are dropped.
    pub fn scan<'a>(&self, text: &'a str) -> Vec<Block<'a>> {
        let mut blocks = Vec::new();

        for caps in self.opener.captures_iter(text) {
            let Some(opener) = caps.get(0) else {
                continue;
            };
            let identifier = caps.name("id").map_or("", |m| m.as_str());

            let Some(closer) = self.closer.find_at(text, opener.end()) else {
                tracing::debug!(kind = ?self.kind, identifier, "skipping unterminated block");
                continue;
            };

            let span = opener.end()..closer.start();
            blocks.push(Block {
                kind: self.kind,
                identifier,
                description: caps.name("desc").map(|m| m.as_str()),
                body: &text[span.clone()],
                span,
            });
        }

        blocks
    }
}
