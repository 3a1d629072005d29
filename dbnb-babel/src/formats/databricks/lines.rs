//! Line classification for the paired-source encoding
//!
//! Every raw line is classified once into a [`LineKind`]; the parser never matches prefixes
//! itself. Comparisons are made against the whitespace-trimmed line, and the header and
//! separator only match as whole lines, so `x = "// COMMAND ----------"` stays code.

use super::dialect::SourceTokens;

/// What a single raw line is, as far as the encoding is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// The document header line
    Header,
    /// A cell separator line
    Separator,
    /// A magic line; carries the text after the prefix and one following space
    MagicLine(&'a str),
    /// Anything else, untouched
    PlainLine(&'a str),
}

impl LineKind<'_> {
    /// Short label used by diagnostics
    pub fn label(&self) -> &'static str {
        match self {
            LineKind::Header => "header",
            LineKind::Separator => "separator",
            LineKind::MagicLine(_) => "magic",
            LineKind::PlainLine(_) => "plain",
        }
    }
}

pub fn classify_line<'a>(line: &'a str, tokens: &SourceTokens) -> LineKind<'a> {
    let trimmed = line.trim();
    if trimmed == tokens.header {
        LineKind::Header
    } else if trimmed == tokens.separator {
        LineKind::Separator
    } else if let Some(rest) = line.trim_start().strip_prefix(tokens.magic_prefix) {
        LineKind::MagicLine(rest.strip_prefix(' ').unwrap_or(rest))
    } else {
        LineKind::PlainLine(line)
    }
}

/// Whether `line` is exactly the markdown cell header, ignoring surrounding whitespace.
pub fn is_markdown_header(line: &str, tokens: &SourceTokens) -> bool {
    line.trim() == tokens.markdown_header
}

/// Group lines into raw cell blocks, closing a block at every separator line.
///
/// Separator lines are consumed. The result always holds at least one (possibly empty) block,
/// and consecutive separators produce empty blocks that the parser later drops.
pub fn split_blocks<'a, I>(lines: I, tokens: &SourceTokens) -> Vec<Vec<&'a str>>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .fold(vec![Vec::new()], |mut blocks, line| {
            match classify_line(line, tokens) {
                LineKind::Separator => blocks.push(Vec::new()),
                _ => {
                    if let Some(current) = blocks.last_mut() {
                        current.push(line);
                    }
                }
            }
            blocks
        })
}
