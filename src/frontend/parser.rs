//! Recursive descent reader for the set/map notation.
//!
//! ```text
//! input       := polylib | [ tuple "->" ] "{" tuple [ "->" tuple ] [ ":" constraints ] "}"
//! tuple       := "[" [ ident { "," ident } ] "]"
//! constraints := constraint { "and" constraint }
//! constraint  := "exists" ( "(" vars ":" constraints ")" | vars ":" constraints )
//!              | { term | "+" } relation { term | "+" }
//! term        := ident | integer [ ident ]
//! relation    := "<=" | ">=" | "="
//! ```
//!
//! An input starting with an integer is a PolyLib matrix and is handed to
//! the matrix reader. Names are resolved through a [`Vars`] table whose
//! positions double as row columns, so the reader writes coefficients
//! straight into the rows of the [`BasicMap`] it is building.

use crate::frontend::stream::TokenStream;
use crate::frontend::token::{Token, TokenKind};
use crate::frontend::vars::Vars;
use crate::polyhedral::basic_map::BasicMap;
use crate::polyhedral::constraint::negate_row;
use crate::polyhedral::map::Map;
use crate::utils::errors::{ParseError, ParseErrorKind, PolyReadError, PolyResult};
use crate::utils::location::Span;
use crate::ReadConfig;
use log::{debug, trace};
use num_bigint::BigInt;

/// A reader over one input text.
pub struct Parser<'a> {
    pub(crate) stream: TokenStream<'a>,
    pub(crate) config: ReadConfig,
}

impl<'a> Parser<'a> {
    /// Create a reader for `source`.
    pub fn new(source: &'a str, config: ReadConfig) -> Self {
        Self {
            stream: TokenStream::new(source),
            config,
        }
    }

    /// Read a map in either notation.
    ///
    /// `nparam` is the number of parameters the caller expects; `None`
    /// accepts whatever the input declares.
    pub fn read_map(&mut self, nparam: Option<usize>) -> PolyResult<Map> {
        let tok = self.next_or_eof()?;
        if tok.is(TokenKind::Integer) {
            self.stream.push_back(tok)?;
            return self.read_polylib_map(nparam);
        }

        let mut vars = Vars::new();
        let mut nparam = nparam;
        let mut tok = Some(tok);
        if tok.as_ref().is_some_and(|t| t.is(TokenKind::LeftBracket)) {
            if let Some(lbracket) = tok.take() {
                self.stream.push_back(lbracket)?;
            }
            let span = self.read_tuple(&mut vars)?;
            if let Some(expected) = nparam {
                if expected != vars.len() {
                    return Err(ParseError::new(
                        ParseErrorKind::ParameterMismatch,
                        format!("expected {} parameters, found {}", expected, vars.len()),
                        span,
                    )
                    .into());
                }
            }
            nparam = Some(vars.len());
            match self.stream.next_token()? {
                Some(arrow) if arrow.is(TokenKind::Arrow) => {}
                other => {
                    return Err(self.stream.error(other.as_ref(), ParseErrorKind::ExpectedToken, "expecting '->'"));
                }
            }
            tok = self.stream.next_token()?;
        }
        let nparam = nparam.unwrap_or(0);

        match tok {
            Some(ref t) if t.is(TokenKind::LeftBrace) => {}
            other => {
                return Err(self.stream.error(other.as_ref(), ParseErrorKind::ExpectedToken, "expecting '{'"));
            }
        }
        let span = self.read_tuple(&mut vars)?;
        if vars.len() < nparam {
            return Err(ParseError::new(
                ParseErrorKind::ParameterMismatch,
                format!("expected {} parameters, found {} names", nparam, vars.len()),
                span,
            )
            .into());
        }
        let mut n_in = vars.len() - nparam;
        let n_out = match self.stream.next_token()? {
            Some(t) if t.is(TokenKind::Arrow) => {
                self.read_tuple(&mut vars)?;
                vars.len() - n_in - nparam
            }
            other => {
                if let Some(t) = other {
                    self.stream.push_back(t)?;
                }
                std::mem::replace(&mut n_in, 0)
            }
        };

        let mut bmap = BasicMap::alloc(vars.to_space(nparam, n_in, n_out), 0, 0, 0);
        let mut tok = self.stream.next_token()?;
        if tok.as_ref().is_some_and(|t| t.is(TokenKind::Colon)) {
            self.add_constraints(&mut vars, &mut bmap)?;
            tok = self.stream.next_token()?;
        }
        match tok {
            Some(ref t) if t.is(TokenKind::RightBrace) => {}
            Some(ref t) => {
                return Err(self.stream.error(Some(t), ParseErrorKind::UnexpectedToken, "unexpected token"));
            }
            None => return Err(self.stream.eof_error()),
        }

        self.finish_basic_map(&mut bmap);
        debug!(
            "read basic map {} with {} equalities, {} inequalities, {} existentials",
            bmap.space(),
            bmap.n_eq(),
            bmap.n_ineq(),
            bmap.n_div()
        );
        Ok(Map::from_basic_map(bmap))
    }

    /// Read a map that must consist of at most one disjunct.
    pub fn read_basic_map(&mut self, nparam: Option<usize>) -> PolyResult<BasicMap> {
        let map = self.read_map(nparam)?;
        if map.n() > 1 {
            return Err(self.stream.error(
                None,
                ParseErrorKind::MultipleDisjuncts,
                format!("expected a single basic map, found {} disjuncts", map.n()),
            ));
        }
        let space = map.space().clone();
        match map.into_basic_maps().pop() {
            Some(bmap) => Ok(bmap),
            None => {
                let mut bmap = BasicMap::empty(space);
                bmap.finalize();
                Ok(bmap)
            }
        }
    }

    /// Check what is left of the input once an object has been read.
    pub fn finish(&mut self) -> PolyResult<()> {
        if self.config.reject_trailing_input {
            self.stream.expect_end()?;
        }
        Ok(())
    }

    pub(crate) fn next_or_eof(&mut self) -> PolyResult<Token> {
        match self.stream.next_token()? {
            Some(tok) => Ok(tok),
            None => Err(self.stream.eof_error()),
        }
    }

    /// Run the simplification pass (if enabled) and mark the map final.
    pub(crate) fn finish_basic_map(&self, bmap: &mut BasicMap) {
        if self.config.simplify {
            bmap.simplify();
        }
        bmap.finalize();
    }

    /// Declare a comma-separated list of fresh names.
    ///
    /// The list ends at the first token that is not an identifier, or after
    /// an identifier not followed by a comma; that token is pushed back.
    fn read_var_list(&mut self, vars: &mut Vars) -> PolyResult<()> {
        while let Some(tok) = self.stream.next_token()? {
            if !tok.is(TokenKind::Identifier) {
                self.stream.push_back(tok)?;
                return Ok(());
            }
            let n = vars.len();
            if vars.resolve_or_insert(&tok.lexeme) < n {
                return Err(self.stream.error(
                    Some(&tok),
                    ParseErrorKind::DuplicateIdentifier,
                    "expecting unique identifier",
                ));
            }
            match self.stream.next_token()? {
                Some(sep) if sep.is(TokenKind::Comma) => {}
                Some(other) => {
                    self.stream.push_back(other)?;
                    return Ok(());
                }
                None => return Ok(()),
            }
        }
        Ok(())
    }

    /// Read `[ names ]`, returning the span of the whole tuple.
    fn read_tuple(&mut self, vars: &mut Vars) -> PolyResult<Span> {
        let open = self.stream.eat(TokenKind::LeftBracket)?;
        let before = vars.len();
        self.read_var_list(vars)?;
        let close = self.stream.eat(TokenKind::RightBracket)?;
        trace!("tuple of {} names at {}", vars.len() - before, open.span);
        Ok(open.span.merge(&close.span))
    }

    /// Parse a conjunction of constraints into `bmap`.
    fn add_constraints(&mut self, vars: &mut Vars, bmap: &mut BasicMap) -> PolyResult<()> {
        loop {
            self.add_constraint(vars, bmap)?;
            let tok = self.next_or_eof()?;
            if !tok.is(TokenKind::And) {
                self.stream.push_back(tok)?;
                return Ok(());
            }
        }
    }

    /// Introduce the names of an `exists` block as new existential
    /// dimensions, then parse its constraints.
    fn add_exists(&mut self, vars: &mut Vars, bmap: &mut BasicMap) -> PolyResult<()> {
        let n = vars.len();
        let seen_paren = self.stream.eat_if(TokenKind::LeftParen)?;
        self.read_var_list(vars)?;
        let extra = vars.len() - n;
        bmap.extend_dimensions(extra);
        debug_assert_eq!(bmap.total_dim(), vars.len());
        trace!("{} existentials, {} columns per row", extra, bmap.row_len());

        self.stream.eat(TokenKind::Colon)?;
        self.add_constraints(vars, bmap)?;
        if seen_paren {
            self.stream.eat(TokenKind::RightParen)?;
        }
        Ok(())
    }

    /// Parse one (in)equality into a new row of `bmap`, or an `exists` block.
    ///
    /// Terms are summed into a single inequality row. `<=` negates what has
    /// been collected so far, `>=` and `=` flip the sign of the terms still
    /// to come, so either way the row ends up as `expr >= 0` (or `= 0`).
    fn add_constraint(&mut self, vars: &mut Vars, bmap: &mut BasicMap) -> PolyResult<()> {
        let tok = self.next_or_eof()?;
        if tok.is(TokenKind::Exists) {
            return self.add_exists(vars, bmap);
        }
        self.stream.push_back(tok)?;

        bmap.extend_constraints(0, 1);
        let k = bmap.alloc_inequality();
        let mut sign = BigInt::from(1);
        let mut seen_op = false;
        let mut equality = false;

        loop {
            let tok = self.next_or_eof()?;
            match tok.kind {
                TokenKind::Identifier => {
                    let pos = self.known_position(vars, &tok)?;
                    bmap.ineq_row_mut(k)[1 + pos] += &sign;
                }
                TokenKind::Integer => {
                    let value = tok.value.clone().ok_or_else(|| {
                        PolyReadError::Internal(format!("integer token without value: {}", tok))
                    })?;
                    let col = match self.stream.next_token()? {
                        Some(name) if name.is(TokenKind::Identifier) => 1 + self.known_position(vars, &name)?,
                        Some(other) => {
                            self.stream.push_back(other)?;
                            0
                        }
                        None => 0,
                    };
                    bmap.ineq_row_mut(k)[col] += value * &sign;
                }
                TokenKind::Plus => {}
                TokenKind::LessEqual | TokenKind::GreaterEqual | TokenKind::Equal => {
                    if seen_op {
                        return Err(self.stream.error(Some(&tok), ParseErrorKind::TooManyOperators, "too many operators"));
                    }
                    seen_op = true;
                    match tok.kind {
                        TokenKind::LessEqual => negate_row(bmap.ineq_row_mut(k)),
                        TokenKind::Equal => {
                            equality = true;
                            sign = BigInt::from(-1);
                        }
                        _ => sign = BigInt::from(-1),
                    }
                }
                _ => {
                    if !seen_op {
                        return Err(self.stream.error(Some(&tok), ParseErrorKind::MissingOperator, "missing operator"));
                    }
                    self.stream.push_back(tok)?;
                    break;
                }
            }
        }

        if equality {
            bmap.inequality_to_equality(k);
        }
        Ok(())
    }

    /// Position of a name that must already be declared.
    fn known_position(&self, vars: &mut Vars, tok: &Token) -> PolyResult<usize> {
        let n = vars.len();
        let pos = vars.resolve_or_insert(&tok.lexeme);
        if pos >= n {
            return Err(self.stream.error(Some(tok), ParseErrorKind::UnknownIdentifier, "unknown identifier"));
        }
        Ok(pos)
    }
}
