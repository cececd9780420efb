//! Document positions and the in-memory document view.
//!
//! Columns are counted in UTF-16 code units so that ranges can be handed to
//! an LSP client without conversion.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A zero-based position in a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-indexed).
    pub line: u32,
    /// Column in UTF-16 code units (0-indexed).
    pub character: u32,
}

impl Position {
    /// Creates a new position.
    #[inline]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A half-open range between two positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Range {
    /// First position covered by the range.
    pub start: Position,
    /// Position just past the end of the range.
    pub end: Position,
}

impl Range {
    /// Creates a new range.
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Creates a zero-width range at the given position.
    #[inline]
    pub const fn point(line: u32, character: u32) -> Self {
        let position = Position::new(line, character);
        Self::new(position, position)
    }
}

/// Read access to the text of a document.
///
/// Implemented by [`TextDocument`]; editors with their own buffer model can
/// implement it directly.
pub trait DocumentView {
    /// Returns the text of a zero-based line, without its line terminator.
    fn line_text(&self, line: u32) -> Option<&str>;

    /// Returns the range of the match of `pattern` on `position.line` that
    /// contains `position`, or `None` when nothing matches there.
    fn find_token_range(&self, position: Position, pattern: &str) -> Option<Range>;

    /// Number of lines in the document. Always at least one.
    fn line_count(&self) -> u32;
}

/// A document held fully in memory.
#[derive(Debug, Clone)]
pub struct TextDocument {
    lines: Vec<String>,
}

impl TextDocument {
    /// Creates a document from its full text.
    pub fn new(text: impl AsRef<str>) -> Self {
        let lines = text
            .as_ref()
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self { lines }
    }
}

impl DocumentView for TextDocument {
    fn line_text(&self, line: u32) -> Option<&str> {
        self.lines.get(line as usize).map(String::as_str)
    }

    fn find_token_range(&self, position: Position, pattern: &str) -> Option<Range> {
        let text = self.line_text(position.line)?;
        let offset = byte_offset(text, position.character)?;
        let regex = Regex::new(pattern).ok()?;

        // a match starting at the position wins over one that ends there
        regex
            .find_at(text, offset)
            .filter(|m| m.start() == offset && !m.is_empty())
            .or_else(|| {
                regex
                    .find_iter(text)
                    .filter(|m| !m.is_empty())
                    .find(|m| m.start() < offset && offset <= m.end())
            })
            .map(|m| {
                Range::new(
                    Position::new(position.line, utf16_len(&text[..m.start()])),
                    Position::new(position.line, utf16_len(&text[..m.end()])),
                )
            })
    }

    fn line_count(&self) -> u32 {
        u32::try_from(self.lines.len()).unwrap_or(u32::MAX)
    }
}

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> u32 {
    let units: usize = text.chars().map(char::len_utf16).sum();
    u32::try_from(units).unwrap_or(u32::MAX)
}

/// Converts a UTF-16 column into a byte offset within `text`.
///
/// Returns `None` when the column is past the end of the line or falls in the
/// middle of a surrogate pair.
fn byte_offset(text: &str, character: u32) -> Option<usize> {
    let mut units = 0u32;
    for (offset, ch) in text.char_indices() {
        if units == character {
            return Some(offset);
        }
        if units > character {
            return None;
        }
        units += ch.len_utf16() as u32;
    }
    (units == character).then_some(text.len())
}
