//! Token stream with a single slot of pushback.
//!
//! Both readers pull tokens one at a time and may return at most one token
//! to the stream. End of input is reported as `None` rather than as an EOF
//! token, so callers treat it like any other missing token.

use crate::frontend::lexer::Lexer;
use crate::frontend::token::{Token, TokenKind};
use crate::utils::errors::{ParseError, ParseErrorKind, PolyReadError, PolyResult};
use crate::utils::location::Span;
use log::trace;

/// A cursor over the tokens of one input.
pub struct TokenStream<'a> {
    lexer: Lexer<'a>,
    pending: Option<Token>,
}

impl<'a> TokenStream<'a> {
    /// Create a stream over `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: Lexer::new(source),
            pending: None,
        }
    }

    /// Take the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> PolyResult<Option<Token>> {
        if let Some(tok) = self.pending.take() {
            return Ok(Some(tok));
        }
        let tok = self.lexer.next_token()?;
        if tok.is_eof() {
            Ok(None)
        } else {
            Ok(Some(tok))
        }
    }

    /// Return a token to the stream.
    ///
    /// Only one token may be pending at a time; pushing a second one is an
    /// internal error in the caller.
    pub fn push_back(&mut self, tok: Token) -> PolyResult<()> {
        if let Some(ref pending) = self.pending {
            return Err(PolyReadError::Internal(format!(
                "token pushback overflow: {} already pending when returning {}",
                pending, tok
            )));
        }
        trace!("push back {}", tok);
        self.pending = Some(tok);
        Ok(())
    }

    /// Look at the next token without consuming it.
    pub fn peek(&mut self) -> PolyResult<Option<&Token>> {
        if self.pending.is_none() {
            let tok = self.lexer.next_token()?;
            if !tok.is_eof() {
                self.pending = Some(tok);
            }
        }
        Ok(self.pending.as_ref())
    }

    /// Consume the next token if it has the given kind.
    pub fn eat_if(&mut self, kind: TokenKind) -> PolyResult<bool> {
        match self.next_token()? {
            Some(tok) if tok.is(kind) => Ok(true),
            Some(tok) => {
                self.push_back(tok)?;
                Ok(false)
            }
            None => Ok(false),
        }
    }

    /// Consume a token of the given kind or fail with "expecting '<kind>'".
    pub fn eat(&mut self, kind: TokenKind) -> PolyResult<Token> {
        match self.next_token()? {
            Some(tok) if tok.is(kind) => Ok(tok),
            other => Err(self.error(
                other.as_ref(),
                ParseErrorKind::ExpectedToken,
                format!("expecting '{}'", kind),
            )),
        }
    }

    /// Build an error pointing at `tok`, or at the end of input when `None`.
    pub fn error(&self, tok: Option<&Token>, kind: ParseErrorKind, message: impl Into<String>) -> PolyReadError {
        let err = match tok {
            Some(tok) => ParseError::new(kind, message, tok.span).with_found(tok.lexeme.clone()),
            None => ParseError::new(kind, message, Span::point(self.lexer.current_location())),
        };
        err.into()
    }

    /// Fail with "unexpected EOF".
    pub fn eof_error(&self) -> PolyReadError {
        self.error(None, ParseErrorKind::UnexpectedEof, "unexpected EOF")
    }

    /// Fail unless only whitespace and comments remain.
    pub fn expect_end(&mut self) -> PolyResult<()> {
        match self.next_token()? {
            None => Ok(()),
            Some(tok) => Err(self.error(Some(&tok), ParseErrorKind::UnexpectedToken, "trailing input")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_back_returns_same_token() {
        let mut s = TokenStream::new("a b");
        let a = s.next_token().unwrap().unwrap();
        s.push_back(a).unwrap();
        assert_eq!(s.next_token().unwrap().unwrap().lexeme, "a");
        assert_eq!(s.next_token().unwrap().unwrap().lexeme, "b");
        assert!(s.next_token().unwrap().is_none());
    }

    #[test]
    fn test_single_slot() {
        let mut s = TokenStream::new("a b");
        let a = s.next_token().unwrap().unwrap();
        let b = s.next_token().unwrap().unwrap();
        s.push_back(b).unwrap();
        assert!(matches!(s.push_back(a), Err(PolyReadError::Internal(_))));
    }

    #[test]
    fn test_eat() {
        let mut s = TokenStream::new("[ ]");
        assert!(s.eat(TokenKind::LeftBracket).is_ok());
        assert!(!s.eat_if(TokenKind::Comma).unwrap());
        let err = s.eat(TokenKind::Colon).unwrap_err();
        assert_eq!(err.parse_kind(), Some(ParseErrorKind::ExpectedToken));
    }

    #[test]
    fn test_eof_error_points_at_end() {
        let mut s = TokenStream::new("x\n");
        s.next_token().unwrap();
        assert!(s.next_token().unwrap().is_none());
        let err = s.eof_error();
        assert_eq!(err.span().unwrap().start.line, 2);
    }
}
