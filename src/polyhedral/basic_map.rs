//! Basic maps: a single conjunction of equality and inequality rows.
//!
//! Every row holds `1 + total_dim` integers where
//! `total_dim = n_param + n_in + n_out + n_div`; column 0 is the constant,
//! then parameters, inputs, outputs and existentials, in that order.
//! Each existential carries a div row of `2 + total_dim` entries. The
//! readers only ever produce all-zero div rows, i.e. existentials that are
//! plain unconstrained integers rather than integer divisions.

use crate::polyhedral::constraint::{format_row, normalize_row, Constraint, ConstraintKind, RowStatus};
use crate::polyhedral::space::{DimType, Space};
use num_bigint::BigInt;
use num_traits::{One, Zero};
use serde::{Serialize, Deserialize};
use std::collections::HashSet;
use std::fmt;

/// Status flags of a basic map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicMapFlags {
    /// Known to contain no integer point
    pub empty: bool,
    /// Simplification has run and the map is ready for use
    pub finalized: bool,
}

/// A conjunction of affine constraints over a space plus existentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicMap {
    space: Space,
    n_div: usize,
    eq: Vec<Vec<BigInt>>,
    ineq: Vec<Vec<BigInt>>,
    div: Vec<Vec<BigInt>>,
    flags: BasicMapFlags,
}

impl BasicMap {
    /// Allocate a constraint system with `extra` existentials and room for
    /// `n_eq` equalities and `n_ineq` inequalities. No rows exist yet.
    pub fn alloc(space: Space, extra: usize, n_eq: usize, n_ineq: usize) -> Self {
        let mut bmap = Self {
            space,
            n_div: 0,
            eq: Vec::with_capacity(n_eq),
            ineq: Vec::with_capacity(n_ineq),
            div: Vec::with_capacity(extra),
            flags: BasicMapFlags::default(),
        };
        bmap.extend_dimensions(extra);
        bmap
    }

    /// A system without any constraints.
    pub fn universe(space: Space) -> Self {
        Self::alloc(space, 0, 0, 0)
    }

    /// The canonical empty system of `space`.
    pub fn empty(space: Space) -> Self {
        let mut bmap = Self::alloc(space, 0, 1, 0);
        bmap.set_to_empty();
        bmap
    }

    /// The dimension descriptor.
    pub fn space(&self) -> &Space {
        &self.space
    }

    /// Number of dimensions of the given type.
    pub fn dim(&self, ty: DimType) -> usize {
        match ty {
            DimType::Div => self.n_div,
            _ => self.space.dim(ty),
        }
    }

    /// Number of parameters.
    pub fn n_param(&self) -> usize {
        self.space.n_param
    }

    /// Number of input dimensions.
    pub fn n_in(&self) -> usize {
        self.space.n_in
    }

    /// Number of output dimensions.
    pub fn n_out(&self) -> usize {
        self.space.n_out
    }

    /// Number of existentials.
    pub fn n_div(&self) -> usize {
        self.n_div
    }

    /// All variable columns, existentials included.
    pub fn total_dim(&self) -> usize {
        self.space.total_dim() + self.n_div
    }

    /// Length of every constraint row.
    pub fn row_len(&self) -> usize {
        1 + self.total_dim()
    }

    /// Status flags.
    pub fn flags(&self) -> BasicMapFlags {
        self.flags
    }

    /// Known to be empty.
    pub fn is_empty(&self) -> bool {
        self.flags.empty
    }

    /// Reading finished and the system was closed off.
    pub fn is_finalized(&self) -> bool {
        self.flags.finalized
    }

    /// Equality rows, each `row_len()` long.
    pub fn equalities(&self) -> &[Vec<BigInt>] {
        &self.eq
    }

    /// Inequality rows, each `row_len()` long.
    pub fn inequalities(&self) -> &[Vec<BigInt>] {
        &self.ineq
    }

    /// Div rows, one per existential: denominator, constant, coefficients.
    pub fn divs(&self) -> &[Vec<BigInt>] {
        &self.div
    }

    /// Number of equalities.
    pub fn n_eq(&self) -> usize {
        self.eq.len()
    }

    /// Number of inequalities.
    pub fn n_ineq(&self) -> usize {
        self.ineq.len()
    }

    /// Mutable access to equality row `k`.
    pub fn eq_row_mut(&mut self, k: usize) -> &mut [BigInt] {
        &mut self.eq[k]
    }

    /// Mutable access to inequality row `k`.
    pub fn ineq_row_mut(&mut self, k: usize) -> &mut [BigInt] {
        &mut self.ineq[k]
    }

    /// Reserve room for more rows.
    pub fn extend_constraints(&mut self, n_eq: usize, n_ineq: usize) {
        self.eq.reserve(n_eq);
        self.ineq.reserve(n_ineq);
    }

    /// Append a zero equality row and return its index.
    pub fn alloc_equality(&mut self) -> usize {
        self.eq.push(vec![BigInt::zero(); self.row_len()]);
        self.flags.finalized = false;
        self.eq.len() - 1
    }

    /// Append a zero inequality row and return its index.
    pub fn alloc_inequality(&mut self) -> usize {
        self.ineq.push(vec![BigInt::zero(); self.row_len()]);
        self.flags.finalized = false;
        self.ineq.len() - 1
    }

    /// Append `extra` existential dimensions.
    ///
    /// Every existing equality, inequality and div row gains `extra` zero
    /// columns, and each new existential gets an all-zero div row, so row
    /// lengths stay uniform.
    pub fn extend_dimensions(&mut self, extra: usize) {
        if extra == 0 {
            return;
        }
        self.n_div += extra;
        let row_len = self.row_len();
        for row in self.eq.iter_mut().chain(self.ineq.iter_mut()) {
            row.resize(row_len, BigInt::zero());
        }
        for row in self.div.iter_mut() {
            row.resize(1 + row_len, BigInt::zero());
        }
        for _ in 0..extra {
            self.div.push(vec![BigInt::zero(); 1 + row_len]);
        }
        self.flags.finalized = false;
    }

    /// Move inequality row `k` into the equalities. The row itself is moved,
    /// not copied; the order of the remaining inequalities is preserved.
    pub fn inequality_to_equality(&mut self, k: usize) -> usize {
        let row = self.ineq.remove(k);
        self.eq.push(row);
        self.eq.len() - 1
    }

    /// Replace all constraints by the single equality `1 = 0`.
    pub fn set_to_empty(&mut self) {
        self.eq.clear();
        self.ineq.clear();
        let k = self.alloc_equality();
        self.eq[k][0] = BigInt::one();
        self.flags.empty = true;
    }

    /// Normalize rows and drop the ones that carry no information.
    ///
    /// Rows are divided by the gcd of their variable coefficients, rows that
    /// always hold and exact duplicates are removed, and a row that never
    /// holds collapses the whole system to the canonical empty one.
    /// Existentials are kept even when nothing constrains them.
    pub fn simplify(&mut self) {
        if self.flags.empty {
            return;
        }
        let mut infeasible = false;
        for (rows, kind) in [
            (&mut self.eq, ConstraintKind::Equality),
            (&mut self.ineq, ConstraintKind::Inequality),
        ] {
            let mut seen = HashSet::new();
            rows.retain_mut(|row| match normalize_row(row, kind) {
                RowStatus::Active => seen.insert(row.clone()),
                RowStatus::Trivial => false,
                RowStatus::Infeasible => {
                    infeasible = true;
                    false
                }
            });
        }
        if infeasible {
            self.set_to_empty();
        }
    }

    /// Mark the system as ready for use.
    pub fn finalize(&mut self) {
        self.flags.finalized = true;
    }

    /// All rows as detached constraints, equalities first.
    pub fn constraints(&self) -> Vec<Constraint> {
        self.eq
            .iter()
            .map(|r| Constraint::new(ConstraintKind::Equality, r.clone()))
            .chain(
                self.ineq
                    .iter()
                    .map(|r| Constraint::new(ConstraintKind::Inequality, r.clone())),
            )
            .collect()
    }

    /// Names for every variable column, with fresh `e<k>` names for the
    /// existentials that clash with no dimension name.
    fn column_names(&self) -> Vec<String> {
        let mut names = self.space.all_names();
        let taken: HashSet<String> = names.iter().cloned().collect();
        let mut next = 0;
        for _ in 0..self.n_div {
            let name = loop {
                let candidate = format!("e{}", next);
                next += 1;
                if !taken.contains(&candidate) {
                    break candidate;
                }
            };
            names.push(name);
        }
        names
    }

    /// Write the `[params] -> ` prefix, if there are parameters.
    pub(crate) fn fmt_params(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.space.n_param == 0 {
            return Ok(());
        }
        let names = self.space.all_names();
        write!(f, "[{}] -> ", names[..self.space.n_param].join(", "))
    }

    /// Write the tuples and constraints, without braces.
    pub(crate) fn fmt_body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.column_names();
        let in_start = self.space.offset(DimType::In);
        let out_start = self.space.offset(DimType::Out);
        let div_start = self.space.offset(DimType::Div);
        if !self.space.is_set() {
            write!(f, "[{}] -> ", names[in_start..out_start].join(", "))?;
        }
        write!(f, "[{}]", names[out_start..div_start].join(", "))?;

        let rows: Vec<String> = self
            .constraints()
            .iter()
            .map(|c| format_row(&c.coeffs, c.kind, &names))
            .collect();
        if self.n_div > 0 {
            let clause = if rows.is_empty() { "0 = 0".to_string() } else { rows.join(" and ") };
            write!(f, " : exists ({} : {})", names[div_start..].join(", "), clause)?;
        } else if !rows.is_empty() {
            write!(f, " : {}", rows.join(" and "))?;
        }
        Ok(())
    }
}

impl fmt::Display for BasicMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_params(f)?;
        write!(f, "{{ ")?;
        self.fmt_body(f)?;
        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[i64]) -> Vec<BigInt> {
        values.iter().map(|&v| BigInt::from(v)).collect()
    }

    #[test]
    fn test_alloc_rows_are_zero() {
        let mut bmap = BasicMap::alloc(Space::set(2), 0, 1, 1);
        let k = bmap.alloc_inequality();
        assert_eq!(bmap.inequalities()[k], row(&[0, 0, 0]));
        assert_eq!(bmap.row_len(), 3);
    }

    #[test]
    fn test_extend_dimensions_resizes_every_row() {
        let mut bmap = BasicMap::universe(Space::map_with_params(1, 1, 1));
        let k = bmap.alloc_inequality();
        bmap.ineq_row_mut(k)[1] = BigInt::from(1);
        let e = bmap.alloc_equality();
        bmap.eq_row_mut(e)[0] = BigInt::from(-3);

        bmap.extend_dimensions(2);
        assert_eq!(bmap.n_div(), 2);
        assert_eq!(bmap.total_dim(), 5);
        assert_eq!(bmap.inequalities()[0], row(&[0, 1, 0, 0, 0, 0]));
        assert_eq!(bmap.equalities()[0], row(&[-3, 0, 0, 0, 0, 0]));
        assert_eq!(bmap.divs().len(), 2);
        assert!(bmap.divs().iter().all(|d| d.len() == 7 && d.iter().all(Zero::is_zero)));

        bmap.extend_dimensions(1);
        assert!(bmap.divs().iter().all(|d| d.len() == 8));
        let k = bmap.alloc_inequality();
        assert_eq!(bmap.inequalities()[k].len(), 7);
    }

    #[test]
    fn test_inequality_to_equality_moves_row() {
        let mut bmap = BasicMap::universe(Space::set(1));
        let a = bmap.alloc_inequality();
        bmap.ineq_row_mut(a)[1] = BigInt::from(1);
        let b = bmap.alloc_inequality();
        bmap.ineq_row_mut(b)[1] = BigInt::from(2);
        bmap.inequality_to_equality(a);
        assert_eq!(bmap.n_eq(), 1);
        assert_eq!(bmap.n_ineq(), 1);
        assert_eq!(bmap.equalities()[0], row(&[0, 1]));
        assert_eq!(bmap.inequalities()[0], row(&[0, 2]));
    }

    #[test]
    fn test_simplify_drops_trivial_and_duplicates() {
        let mut bmap = BasicMap::universe(Space::set(1));
        for values in [[0, 2], [0, 1], [3, 0]] {
            let k = bmap.alloc_inequality();
            bmap.ineq_row_mut(k).clone_from_slice(&row(&values));
        }
        bmap.simplify();
        assert_eq!(bmap.inequalities(), &[row(&[0, 1])]);
        assert!(!bmap.is_empty());
    }

    #[test]
    fn test_simplify_detects_empty() {
        let mut bmap = BasicMap::universe(Space::set(1));
        let k = bmap.alloc_equality();
        bmap.eq_row_mut(k).clone_from_slice(&row(&[1, 2]));
        bmap.simplify();
        assert!(bmap.is_empty());
        assert_eq!(bmap.equalities(), &[row(&[1, 0])]);
        assert_eq!(bmap.n_ineq(), 0);
    }

    #[test]
    fn test_simplify_keeps_existentials() {
        let mut bmap = BasicMap::universe(Space::set(1));
        bmap.extend_dimensions(1);
        bmap.simplify();
        assert_eq!(bmap.n_div(), 1);
    }

    #[test]
    fn test_display() {
        let space = Space::map_with_params(1, 1, 1).with_param_names(vec![Some("n".into())]);
        let mut bmap = BasicMap::universe(space);
        bmap.extend_dimensions(1);
        let k = bmap.alloc_equality();
        bmap.eq_row_mut(k).clone_from_slice(&row(&[0, 0, 0, 1, -2]));
        assert_eq!(
            bmap.to_string(),
            "[n] -> { [i0] -> [o0] : exists (e0 : o0 = 2e0) }"
        );
    }

    #[test]
    fn test_display_empty() {
        assert_eq!(BasicMap::empty(Space::set(1)).to_string(), "{ [o0] : 1 = 0 }");
    }
}
