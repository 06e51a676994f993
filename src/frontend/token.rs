//! Token types for the set/map notation and PolyLib matrices.
//!
//! This module defines all token types produced by the lexer.

use crate::utils::location::Span;
use num_bigint::BigInt;
use std::fmt;

/// A token in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The source span
    pub span: Span,
    /// The lexeme (raw text)
    pub lexeme: String,
    /// Whether a line break separates this token from the previous one
    pub on_new_line: bool,
    /// Value of an integer literal
    pub value: Option<BigInt>,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span, lexeme: String, on_new_line: bool) -> Self {
        Self { kind, span, lexeme, on_new_line, value: None }
    }

    /// Attach the value of an integer literal.
    pub fn with_value(mut self, value: BigInt) -> Self {
        self.value = Some(value);
        self
    }

    /// Check if this is an EOF token.
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Check if this token is of the given kind.
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Check if this token is a relational operator.
    pub fn is_relation(&self) -> bool {
        self.kind.is_relation()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind, self.lexeme)
    }
}

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    /// Integer literal, possibly negative
    Integer,

    // Identifiers
    /// Identifier (tuple variable, parameter, existential)
    Identifier,

    // Keywords
    /// `and` keyword
    And,
    /// `exists` keyword
    Exists,

    // Arithmetic operators
    /// `+`
    Plus,
    /// `-` not followed by a digit or `>`
    Minus,

    // Relational operators
    /// `=`
    Equal,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `<`
    Less,
    /// `>`
    Greater,

    // Delimiters
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// `->`
    Arrow,

    // Special
    /// End of input
    Eof,
}

impl TokenKind {
    /// Check if this is a keyword.
    pub fn is_keyword(&self) -> bool {
        matches!(self, TokenKind::And | TokenKind::Exists)
    }

    /// Check if this is one of the relational operators accepted in constraints.
    pub fn is_relation(&self) -> bool {
        use TokenKind::*;
        matches!(self, Equal | LessEqual | GreaterEqual)
    }

    /// Get the keyword for a string, if it is a keyword.
    pub fn keyword(s: &str) -> Option<TokenKind> {
        match s {
            "and" => Some(TokenKind::And),
            "exists" => Some(TokenKind::Exists),
            _ => None,
        }
    }

    /// Get a human-readable name for this token kind.
    pub fn name(&self) -> &'static str {
        use TokenKind::*;
        match self {
            Integer => "integer",
            Identifier => "identifier",
            And => "and",
            Exists => "exists",
            Plus => "+",
            Minus => "-",
            Equal => "=",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Less => "<",
            Greater => ">",
            LeftParen => "(",
            RightParen => ")",
            LeftBracket => "[",
            RightBracket => "]",
            LeftBrace => "{",
            RightBrace => "}",
            Comma => ",",
            Colon => ":",
            Semicolon => ";",
            Arrow => "->",
            Eof => "end of file",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
