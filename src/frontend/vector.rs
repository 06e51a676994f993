//! Reader for PolyLib vectors.
//!
//! ```text
//! size
//! v_1 v_2 .. v_size
//! ```
//!
//! The format is line based: blank lines and lines starting with `#` are
//! skipped, the size is the first number on the first remaining line and
//! all values must sit on the line after it. Anything after the size, or
//! after the last value, is ignored.

use crate::polyhedral::vec::IntVec;
use crate::utils::errors::{ParseError, ParseErrorKind, PolyResult};
use crate::utils::location::{SourceLocation, Span};
use log::debug;
use num_bigint::BigInt;

/// A line of input with its 1-indexed line number and byte offset.
struct Line<'a> {
    number: usize,
    offset: usize,
    text: &'a str,
}

impl<'a> Line<'a> {
    /// Whitespace separated words with their spans.
    fn words(&self) -> impl Iterator<Item = (&'a str, Span)> + '_ {
        let text = self.text;
        let mut start = None;
        let mut words = Vec::new();
        for (i, c) in text.char_indices().chain(std::iter::once((text.len(), ' '))) {
            match (start, c.is_whitespace()) {
                (None, false) => start = Some(i),
                (Some(s), true) => {
                    words.push((&text[s..i], self.span(s, i)));
                    start = None;
                }
                _ => {}
            }
        }
        words.into_iter()
    }

    fn span(&self, start: usize, end: usize) -> Span {
        Span::new(
            SourceLocation::new(self.number, start + 1, self.offset + start),
            SourceLocation::new(self.number, end + 1, self.offset + end),
        )
    }

    fn end(&self) -> Span {
        self.span(self.text.len(), self.text.len())
    }
}

/// Iterator over the lines that carry content.
struct Lines<'a> {
    source: &'a str,
    offset: usize,
    number: usize,
}

impl<'a> Lines<'a> {
    fn new(source: &'a str) -> Self {
        Self { source, offset: 0, number: 0 }
    }

    /// A point just past the last line read, for end-of-input errors.
    fn end_of_input(&self) -> Span {
        Span::point(SourceLocation::new(self.number + 1, 1, self.source.len()))
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Line<'a>> {
        while self.offset < self.source.len() {
            let rest = &self.source[self.offset..];
            let len = rest.find('\n').map_or(rest.len(), |i| i + 1);
            let line = Line {
                number: self.number + 1,
                offset: self.offset,
                text: rest[..len].trim_end_matches(['\n', '\r']),
            };
            self.offset += len;
            self.number += 1;
            let content = line.text.trim_start();
            if !content.is_empty() && !content.starts_with('#') {
                return Some(line);
            }
        }
        None
    }
}

fn error(kind: ParseErrorKind, message: impl Into<String>, span: Span) -> ParseError {
    ParseError::new(kind, message, span)
}

/// Read a size-prefixed integer vector.
pub fn read_polylib_vector(source: &str) -> PolyResult<IntVec> {
    let mut lines = Lines::new(source);

    let header = lines
        .next()
        .ok_or_else(|| error(ParseErrorKind::UnexpectedEof, "unexpected EOF", lines.end_of_input()))?;
    let (word, span) = header
        .words()
        .next()
        .ok_or_else(|| error(ParseErrorKind::InvalidCount, "expecting vector size", header.end()))?;
    let size: usize = word
        .parse()
        .map_err(|_| error(ParseErrorKind::InvalidCount, "expecting vector size", span).with_found(word))?;

    if size == 0 {
        return Ok(IntVec::zeros(0));
    }
    let line = lines
        .next()
        .ok_or_else(|| error(ParseErrorKind::UnexpectedEof, "unexpected EOF", lines.end_of_input()))?;

    let words: Vec<_> = line.words().collect();
    if words.len() < size {
        return Err(error(
            ParseErrorKind::InvalidCount,
            format!("expecting {} values, found {}", size, words.len()),
            line.end(),
        )
        .into());
    }
    let elements = words
        .into_iter()
        .take(size)
        .map(|(word, span)| {
            word.parse::<BigInt>()
                .map_err(|_| error(ParseErrorKind::UnexpectedToken, "expecting integer", span).with_found(word))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let vec = IntVec::from_elements(elements);
    debug!("read vector of size {}", size);
    Ok(vec)
}
