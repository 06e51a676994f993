//! Reader for PolyLib constraint matrices.
//!
//! ```text
//! [ count ]                      one or more matrices, unioned
//! n_row n_col
//! type c_1 .. c_dim p_1 .. p_nparam constant     (n_row times)
//! ```
//!
//! A leading count is recognised by layout: when the second number of the
//! input starts a new line, the first one is the number of matrices that
//! follow. Each row starts on its own line with a type flag, `0` for an
//! equality and `1` for an inequality.

use crate::frontend::parser::Parser;
use crate::frontend::token::{Token, TokenKind};
use crate::polyhedral::basic_map::BasicMap;
use crate::polyhedral::constraint::ConstraintKind;
use crate::polyhedral::map::Map;
use crate::polyhedral::space::Space;
use crate::utils::errors::{ParseError, ParseErrorKind, PolyReadError, PolyResult};
use log::{debug, trace};
use num_bigint::BigInt;
use num_traits::ToPrimitive;

impl<'a> Parser<'a> {
    /// Read one matrix, or a count followed by that many matrices.
    pub(crate) fn read_polylib_map(&mut self, nparam: Option<usize>) -> PolyResult<Map> {
        let nparam = nparam.unwrap_or(0);
        let first = self.next_or_eof()?;
        let second_on_new_line = match self.stream.peek()?.map(|tok| tok.on_new_line) {
            Some(on_new_line) => on_new_line,
            None => return Err(self.stream.eof_error()),
        };
        if !second_on_new_line {
            let bmap = self.read_polylib_matrix(Some(first), nparam)?;
            return Ok(Map::from_basic_map(bmap));
        }

        let n = self.count(&first, "number of matrices")?;
        if n < 1 {
            return Err(self.invalid_count(&first, "expecting at least one matrix"));
        }
        debug!("reading {} polylib matrices", n);

        let mut map = Map::from_basic_map(self.read_polylib_matrix(None, nparam)?);
        for _ in 1..n {
            let header = self.stream.peek()?.map(|tok| tok.span);
            let next = Map::from_basic_map(self.read_polylib_matrix(None, nparam)?);
            if !map.space().is_compatible(next.space()) {
                let message = format!("matrix in space {} cannot join union in space {}", next.space(), map.space());
                return Err(match header {
                    Some(span) => ParseError::new(ParseErrorKind::IncompatibleSpaces, message, span).into(),
                    None => self.stream.error(None, ParseErrorKind::IncompatibleSpaces, message),
                });
            }
            map = map.union(next)?;
        }
        Ok(map)
    }

    /// Read a `n_row n_col` header and the rows below it.
    ///
    /// `first` is the row count when the caller already took it from the
    /// stream.
    fn read_polylib_matrix(&mut self, first: Option<Token>, nparam: usize) -> PolyResult<BasicMap> {
        let rows_tok = match first {
            Some(tok) => tok,
            None => self.next_or_eof()?,
        };
        let cols_tok = self.next_or_eof()?;
        if cols_tok.on_new_line {
            return Err(self.invalid_count(&cols_tok, "column count should follow row count on the same line"));
        }
        let n_row = self.count(&rows_tok, "row count")?;
        let n_col = self.count(&cols_tok, "column count")?;
        let Some(dim) = n_col.checked_sub(2).and_then(|n| n.checked_sub(nparam)) else {
            return Err(self.invalid_count(
                &cols_tok,
                format!("expecting at least {} columns for {} parameters", nparam.saturating_add(2), nparam),
            ));
        };
        trace!("polylib matrix {}x{}: {} dims, {} params", n_row, n_col, dim, nparam);

        // rows are read before anything is sized from the header, so a
        // count larger than the input runs out of tokens instead of memory
        let mut rows = Vec::new();
        for _ in 0..n_row {
            rows.push(self.read_polylib_constraint(dim, nparam)?);
        }

        let mut bmap = BasicMap::alloc(Space::set_with_params(dim, nparam), 0, 0, 0);
        for (kind, row) in rows {
            let target = match kind {
                ConstraintKind::Equality => {
                    let k = bmap.alloc_equality();
                    bmap.eq_row_mut(k)
                }
                ConstraintKind::Inequality => {
                    let k = bmap.alloc_inequality();
                    bmap.ineq_row_mut(k)
                }
            };
            target.clone_from_slice(&row);
        }
        self.finish_basic_map(&mut bmap);
        Ok(bmap)
    }

    /// Read one row as a constraint over `dim` dimensions and `nparam`
    /// parameters.
    ///
    /// Columns are stored dimensions first, then parameters, then the
    /// constant, while the returned row starts with the constant and puts
    /// parameters before dimensions.
    fn read_polylib_constraint(&mut self, dim: usize, nparam: usize) -> PolyResult<(ConstraintKind, Vec<BigInt>)> {
        let flag = self.coefficient()?;
        if !flag.on_new_line {
            return Err(self.stream.error(
                Some(&flag),
                ParseErrorKind::MisalignedCoefficient,
                "coefficient should appear on new line",
            ));
        }
        let kind = match flag.value.as_ref().and_then(|v| v.to_u8()) {
            Some(0) => ConstraintKind::Equality,
            Some(1) => ConstraintKind::Inequality,
            _ => {
                return Err(self.stream.error(
                    Some(&flag),
                    ParseErrorKind::InvalidTypeFlag,
                    "row type should be 0 (equality) or 1 (inequality)",
                ))
            }
        };

        let mut dims = Vec::new();
        for _ in 0..dim {
            dims.push(self.coefficient_value()?);
        }
        let mut params = Vec::new();
        for _ in 0..nparam {
            params.push(self.coefficient_value()?);
        }
        let constant = self.coefficient_value()?;
        let row = std::iter::once(constant).chain(params).chain(dims).collect();
        Ok((kind, row))
    }

    /// Next token, which must be an integer.
    fn coefficient(&mut self) -> PolyResult<Token> {
        match self.stream.next_token()? {
            Some(tok) if tok.is(TokenKind::Integer) => Ok(tok),
            other => {
                let err = self.stream.error(other.as_ref(), ParseErrorKind::ExpectedToken, "expecting coefficient");
                if let Some(tok) = other {
                    self.stream.push_back(tok)?;
                }
                Err(err)
            }
        }
    }

    fn coefficient_value(&mut self) -> PolyResult<BigInt> {
        let tok = self.coefficient()?;
        tok.value
            .ok_or_else(|| PolyReadError::Internal(format!("integer token without value at {}", tok.span)))
    }

    /// Value of a count token as a `usize`.
    fn count(&self, tok: &Token, what: &str) -> PolyResult<usize> {
        if !tok.is(TokenKind::Integer) {
            return Err(self.stream.error(Some(tok), ParseErrorKind::ExpectedToken, format!("expecting {}", what)));
        }
        tok.value
            .as_ref()
            .and_then(|v| v.to_usize())
            .ok_or_else(|| self.invalid_count(tok, format!("invalid {}", what)))
    }

    fn invalid_count(&self, tok: &Token, message: impl Into<String>) -> PolyReadError {
        self.stream.error(Some(tok), ParseErrorKind::InvalidCount, message)
    }
}
