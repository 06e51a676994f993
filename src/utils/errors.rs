//! Error types for the constraint-system readers.
//!
//! Errors are organized by the phase that produces them. Every error is
//! fatal to the current read: nothing partially built is ever returned.

use thiserror::Error;
use crate::utils::location::Span;
use std::fmt;

/// Top-level error type for the readers.
#[derive(Error, Debug)]
pub enum PolyReadError {
    /// Error during lexing/tokenization
    #[error("Lexer error: {0}")]
    Lexer(#[from] LexerError),

    /// Error during parsing
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Internal consistency failure
    #[error("Internal error: {0}")]
    Internal(String),

    /// I/O error while reading the input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PolyReadError {
    /// The parse error kind, if this is a parse error.
    pub fn parse_kind(&self) -> Option<ParseErrorKind> {
        match self {
            PolyReadError::Parse(e) => Some(e.kind),
            _ => None,
        }
    }

    /// The span the error points at, when there is one.
    pub fn span(&self) -> Option<Span> {
        match self {
            PolyReadError::Lexer(e) => Some(e.span),
            PolyReadError::Parse(e) => Some(e.span),
            _ => None,
        }
    }
}

/// Error during lexical analysis.
#[derive(Error, Debug, Clone)]
pub struct LexerError {
    /// The error message
    pub message: String,
    /// Location in source
    pub span: Span,
    /// The kind of lexer error
    pub kind: LexerErrorKind,
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.span)
    }
}

/// What went wrong while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerErrorKind {
    /// Unexpected character
    UnexpectedChar,
    /// Malformed integer literal
    InvalidNumber,
}

/// Error during parsing.
#[derive(Error, Debug, Clone)]
pub struct ParseError {
    /// The error message
    pub message: String,
    /// Span of the offending token, or a point at end of input
    pub span: Span,
    /// The kind of parse error
    pub kind: ParseErrorKind,
    /// Lexeme of the offending token (`None` at end of input)
    pub found: Option<String>,
}

impl ParseError {
    /// Create a parse error.
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
            found: None,
        }
    }

    /// Record the offending lexeme.
    pub fn with_found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.span)?;
        if let Some(ref found) = self.found {
            write!(f, " (found: {})", found)?;
        }
        Ok(())
    }
}

/// What went wrong while reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Unexpected token
    UnexpectedToken,
    /// Expected a specific token
    ExpectedToken,
    /// Unexpected end of input
    UnexpectedEof,
    /// A name was declared twice
    DuplicateIdentifier,
    /// A name was referenced before being declared
    UnknownIdentifier,
    /// More than one relational operator in a constraint
    TooManyOperators,
    /// No relational operator in a constraint
    MissingOperator,
    /// Parsed parameter count differs from the requested one
    ParameterMismatch,
    /// More than one disjunct where exactly one is required
    MultipleDisjuncts,
    /// A set was requested but the input has input dimensions
    NotASet,
    /// PolyLib row type flag other than 0 or 1
    InvalidTypeFlag,
    /// PolyLib row does not start on a new line
    MisalignedCoefficient,
    /// Malformed row, column, matrix or vector count
    InvalidCount,
    /// Disjuncts of a union live in different spaces
    IncompatibleSpaces,
    /// Input format not supported for this object
    UnsupportedFormat,
}

/// Result type using PolyReadError.
pub type PolyResult<T> = Result<T, PolyReadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseError::new(
            ParseErrorKind::UnknownIdentifier,
            "unknown identifier",
            Span::on_line(1, 14, 15),
        )
        .with_found("k");
        let s = format!("{}", err);
        assert!(s.contains("unknown identifier"));
        assert!(s.contains("found: k"));
    }

    #[test]
    fn test_display_without_token() {
        let err = ParseError::new(ParseErrorKind::UnexpectedEof, "unexpected EOF", Span::on_line(3, 1, 1));
        assert_eq!(err.to_string(), "unexpected EOF at 3:1-1");
    }

    #[test]
    fn test_parse_kind() {
        let err: PolyReadError =
            ParseError::new(ParseErrorKind::MissingOperator, "missing operator", Span::default()).into();
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::MissingOperator));
        assert!(err.span().is_some());
    }
}
