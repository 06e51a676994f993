//! Source positions for diagnostics.
//!
//! Every token carries a [`Span`], and parse errors report the span of the
//! offending token (or a zero-width span at the end of input).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in the input: 1-indexed line and column plus byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Line number, from 1
    pub line: usize,
    /// Column in characters, from 1
    pub column: usize,
    /// Byte offset from the start of the input
    pub offset: usize,
}

impl SourceLocation {
    /// A location from its parts.
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }

    /// The first character of the input.
    pub fn start() -> Self {
        Self::new(1, 1, 0)
    }

    fn key(&self) -> (usize, usize) {
        (self.line, self.column)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open range of the input, `end` pointing just past the last
/// character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// First character
    pub start: SourceLocation,
    /// Just past the last character
    pub end: SourceLocation,
}

impl Span {
    /// The span from `start` up to `end`.
    pub fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }

    /// A span within one line, without byte offsets.
    pub fn on_line(line: usize, start_column: usize, end_column: usize) -> Self {
        Self::new(
            SourceLocation::new(line, start_column, 0),
            SourceLocation::new(line, end_column, 0),
        )
    }

    /// A zero-width span at `loc`, used for end-of-input diagnostics.
    pub fn point(loc: SourceLocation) -> Self {
        Self::new(loc, loc)
    }

    /// The smallest span covering both.
    pub fn merge(&self, other: &Span) -> Span {
        let start = if self.start.key() <= other.start.key() { self.start } else { other.start };
        let end = if self.end.key() >= other.end.key() { self.end } else { other.end };
        Span::new(start, end)
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    /// Zero width.
    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(f, "{}-{}", self.start, self.end.column)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Line index over the input, for rendering diagnostics.
#[derive(Debug, Clone)]
pub struct SourceMap {
    source: String,
    line_starts: Vec<usize>,
}

impl SourceMap {
    /// Index the lines of `source`.
    pub fn new(source: String) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { source, line_starts }
    }

    /// The indexed input.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Text of a 1-indexed line, without its line break.
    pub fn line(&self, number: usize) -> Option<&str> {
        let start = *self.line_starts.get(number.checked_sub(1)?)?;
        let end = self.line_starts.get(number).copied().unwrap_or(self.source.len());
        Some(self.source[start..end].trim_end_matches(['\n', '\r']))
    }

    /// The line `span` starts on with a caret marker under the span.
    pub fn snippet(&self, span: &Span) -> Option<String> {
        let line = self.line(span.start.line)?;
        let width = if span.end.line == span.start.line {
            span.end.column.saturating_sub(span.start.column).max(1)
        } else {
            1
        };
        let pad = " ".repeat(span.start.column.saturating_sub(1));
        Some(format!("{}\n{}{}", line, pad, "^".repeat(width)))
    }

    /// Number of lines, counting a last line without a line break.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
