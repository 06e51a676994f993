//! Lexer for the set/map notation and PolyLib matrices.
//!
//! The lexer converts input text into a stream of tokens. Whitespace is
//! insignificant except that every token records whether a line break
//! preceded it, which the PolyLib reader relies on.

use crate::frontend::token::{Token, TokenKind};
use crate::utils::location::{Span, SourceLocation};
use crate::utils::errors::{LexerError, LexerErrorKind};
use num_bigint::BigInt;
use unicode_xid::UnicodeXID;
use std::iter::Peekable;
use std::str::Chars;

/// A lexer for tokenizing input text.
pub struct Lexer<'a> {
    /// The source text
    source: &'a str,
    /// Character iterator
    chars: Peekable<Chars<'a>>,
    /// Current byte offset
    offset: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
    /// Start of current token
    token_start: SourceLocation,
    /// A line break was skipped since the last token
    saw_newline: bool,
    /// Whether we've hit EOF
    at_eof: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().peekable(),
            offset: 0,
            line: 1,
            column: 1,
            token_start: SourceLocation::start(),
            saw_newline: true,
            at_eof: false,
        }
    }

    /// Get the current location.
    pub fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column, self.offset)
    }

    fn mark_token_start(&mut self) {
        self.token_start = self.current_location();
    }

    fn make_span(&self) -> Span {
        Span::new(self.token_start, self.current_location())
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skip whitespace and `#` comments, noting line breaks.
    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                Some('\n') => {
                    self.saw_newline = true;
                    self.advance();
                }
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('#') => {
                    while self.peek().is_some() && self.peek() != Some('\n') {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn make_token(&mut self, kind: TokenKind) -> Token {
        let span = self.make_span();
        let lexeme = self.source[span.start.offset..span.end.offset].to_string();
        let on_new_line = std::mem::replace(&mut self.saw_newline, false);
        Token::new(kind, span, lexeme, on_new_line)
    }

    fn make_error(&self, message: &str, kind: LexerErrorKind) -> LexerError {
        LexerError {
            message: message.to_string(),
            span: self.make_span(),
            kind,
        }
    }

    /// Scan the rest of an integer literal; the first digit or sign is consumed.
    fn scan_integer(&mut self) -> Result<Token, LexerError> {
        while self.peek().map(|c| c.is_ascii_digit()).unwrap_or(false) {
            self.advance();
        }
        let token = self.make_token(TokenKind::Integer);
        let value: BigInt = token.lexeme.parse().map_err(|_| {
            self.make_error(
                &format!("Invalid integer literal: '{}'", token.lexeme),
                LexerErrorKind::InvalidNumber,
            )
        })?;
        Ok(token.with_value(value))
    }

    /// Scan an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        while self.peek().map(|c| c.is_xid_continue() || c == '_').unwrap_or(false) {
            self.advance();
        }

        let span = self.make_span();
        let kind = TokenKind::keyword(&self.source[span.start.offset..span.end.offset])
            .unwrap_or(TokenKind::Identifier);
        self.make_token(kind)
    }

    /// Scan the next token.
    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        self.skip_whitespace();
        self.mark_token_start();

        let c = match self.advance() {
            Some(c) => c,
            None => {
                self.at_eof = true;
                return Ok(self.make_token(TokenKind::Eof));
            }
        };

        match c {
            '(' => Ok(self.make_token(TokenKind::LeftParen)),
            ')' => Ok(self.make_token(TokenKind::RightParen)),
            '[' => Ok(self.make_token(TokenKind::LeftBracket)),
            ']' => Ok(self.make_token(TokenKind::RightBracket)),
            '{' => Ok(self.make_token(TokenKind::LeftBrace)),
            '}' => Ok(self.make_token(TokenKind::RightBrace)),
            ',' => Ok(self.make_token(TokenKind::Comma)),
            ':' => Ok(self.make_token(TokenKind::Colon)),
            ';' => Ok(self.make_token(TokenKind::Semicolon)),
            '+' => Ok(self.make_token(TokenKind::Plus)),
            '=' => Ok(self.make_token(TokenKind::Equal)),

            '-' => {
                if self.match_char('>') {
                    Ok(self.make_token(TokenKind::Arrow))
                } else if self.peek().map(|c| c.is_ascii_digit()).unwrap_or(false) {
                    self.scan_integer()
                } else {
                    Ok(self.make_token(TokenKind::Minus))
                }
            }
            '<' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenKind::LessEqual))
                } else {
                    Ok(self.make_token(TokenKind::Less))
                }
            }
            '>' => {
                if self.match_char('=') {
                    Ok(self.make_token(TokenKind::GreaterEqual))
                } else {
                    Ok(self.make_token(TokenKind::Greater))
                }
            }

            c if c.is_ascii_digit() => self.scan_integer(),

            c if c.is_xid_start() || c == '_' => Ok(self.scan_identifier()),

            _ => Err(self.make_error(
                &format!("Unexpected character: '{}'", c),
                LexerErrorKind::UnexpectedChar,
            )),
        }
    }

    /// Collect all tokens into a vector.
    ///
    /// The last token is always [`TokenKind::Eof`].
    pub fn tokenize(self) -> Result<Vec<Token>, LexerError> {
        self.collect()
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, LexerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.at_eof {
            None
        } else {
            Some(self.next_token())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        Lexer::new(source).tokenize().unwrap()
    }

    fn token_kinds(source: &str) -> Vec<TokenKind> {
        lex(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty() {
        let tokens = lex("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn test_set_notation() {
        let kinds = token_kinds("[n] -> { [i] : exists k : i >= 0 and i <= n }");
        assert_eq!(kinds, vec![
            TokenKind::LeftBracket,
            TokenKind::Identifier,
            TokenKind::RightBracket,
            TokenKind::Arrow,
            TokenKind::LeftBrace,
            TokenKind::LeftBracket,
            TokenKind::Identifier,
            TokenKind::RightBracket,
            TokenKind::Colon,
            TokenKind::Exists,
            TokenKind::Identifier,
            TokenKind::Colon,
            TokenKind::Identifier,
            TokenKind::GreaterEqual,
            TokenKind::Integer,
            TokenKind::And,
            TokenKind::Identifier,
            TokenKind::LessEqual,
            TokenKind::Identifier,
            TokenKind::RightBrace,
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn test_coefficient_splits_from_name() {
        let tokens = lex("2k");
        assert_eq!(tokens[0].kind, TokenKind::Integer);
        assert_eq!(tokens[0].value, Some(BigInt::from(2)));
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].lexeme, "k");
    }

    #[test]
    fn test_negative_literal() {
        let tokens = lex("-12 - ->");
        assert_eq!(tokens[0].kind, TokenKind::Integer);
        assert_eq!(tokens[0].value, Some(BigInt::from(-12)));
        assert_eq!(tokens[1].kind, TokenKind::Minus);
        assert_eq!(tokens[2].kind, TokenKind::Arrow);
    }

    #[test]
    fn test_big_literal() {
        let tokens = lex("123456789012345678901234567890");
        let expected: BigInt = "123456789012345678901234567890".parse().unwrap();
        assert_eq!(tokens[0].value, Some(expected));
    }

    #[test]
    fn test_new_line_flag() {
        let tokens = lex("1 4\n# comment\n0 1 2");
        assert!(tokens[0].on_new_line);
        assert!(!tokens[1].on_new_line);
        assert!(tokens[2].on_new_line);
        assert_eq!(tokens[2].lexeme, "0");
        assert!(!tokens[3].on_new_line);
    }

    #[test]
    fn test_location_tracking() {
        let tokens = lex("foo\nbar");
        assert_eq!(tokens[0].span.start.line, 1);
        assert_eq!(tokens[1].span.start.line, 2);
    }

    #[test]
    fn test_unexpected_char() {
        let err = Lexer::new("{ [i] : i * 2 }").tokenize().unwrap_err();
        assert_eq!(err.kind, LexerErrorKind::UnexpectedChar);
    }
}
