//! Linear constraint rows.
//!
//! A row is `1 + total_dim` integers: the constant term followed by one
//! coefficient per variable column. It reads as an inequality
//! `c0 + c1*x1 + ... >= 0` or an equality `c0 + c1*x1 + ... = 0`.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero, One};
use serde::{Serialize, Deserialize};
use std::fmt::{self, Write};

/// Kind of constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConstraintKind {
    /// Equal: expr = 0
    Equality,
    /// Greater than or equal: expr >= 0
    Inequality,
}

/// A constraint row detached from its system.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Constraint {
    /// Kind of constraint
    pub kind: ConstraintKind,
    /// Constant term followed by variable coefficients
    pub coeffs: Vec<BigInt>,
}

impl Constraint {
    /// Create a new constraint.
    pub fn new(kind: ConstraintKind, coeffs: Vec<BigInt>) -> Self {
        Self { kind, coeffs }
    }

    /// Create from machine integers.
    pub fn from_i64(kind: ConstraintKind, coeffs: &[i64]) -> Self {
        Self::new(kind, coeffs.iter().map(|&c| BigInt::from(c)).collect())
    }

    /// Check if this is an equality constraint.
    pub fn is_equality(&self) -> bool {
        matches!(self.kind, ConstraintKind::Equality)
    }

    /// The constant term.
    pub fn constant(&self) -> &BigInt {
        &self.coeffs[0]
    }
}

/// Outcome of normalizing one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    /// The row still constrains some variable
    Active,
    /// The row holds for every point
    Trivial,
    /// The row holds for no point
    Infeasible,
}

/// Negate every entry of a row in place.
pub fn negate_row(row: &mut [BigInt]) {
    for c in row.iter_mut() {
        *c = -std::mem::take(c);
    }
}

/// Divide a row by the gcd of its variable coefficients and classify it.
///
/// Inequality constants are rounded down, which tightens the row to the
/// integer points it admits. An equality whose constant is not a multiple
/// of the gcd has no integer solution.
pub fn normalize_row(row: &mut [BigInt], kind: ConstraintKind) -> RowStatus {
    let g = row[1..].iter().fold(BigInt::zero(), |g, c| g.gcd(c));
    if g.is_zero() {
        let c = &row[0];
        let holds = match kind {
            ConstraintKind::Equality => c.is_zero(),
            ConstraintKind::Inequality => !c.is_negative(),
        };
        return if holds { RowStatus::Trivial } else { RowStatus::Infeasible };
    }
    if g.is_one() {
        return RowStatus::Active;
    }
    if kind == ConstraintKind::Equality && !row[0].is_multiple_of(&g) {
        return RowStatus::Infeasible;
    }
    row[0] = row[0].div_floor(&g);
    for c in row[1..].iter_mut() {
        *c = &*c / &g;
    }
    RowStatus::Active
}

/// Render a row as `lhs >= rhs` (or `lhs = rhs`) with only non-negative
/// coefficients on either side. `names` holds one name per variable column.
pub fn format_row(row: &[BigInt], kind: ConstraintKind, names: &[String]) -> String {
    let mut lhs = String::new();
    let mut rhs = String::new();
    for (c, name) in row[1..].iter().zip(names) {
        if c.is_zero() {
            continue;
        }
        let side = if c.is_positive() { &mut lhs } else { &mut rhs };
        push_term(side, &c.abs(), Some(name));
    }
    let c0 = &row[0];
    if !c0.is_zero() {
        let side = if c0.is_positive() { &mut lhs } else { &mut rhs };
        push_term(side, &c0.abs(), None);
    }
    if lhs.is_empty() {
        lhs.push('0');
    }
    if rhs.is_empty() {
        rhs.push('0');
    }
    let op = match kind {
        ConstraintKind::Equality => "=",
        ConstraintKind::Inequality => ">=",
    };
    format!("{} {} {}", lhs, op, rhs)
}

fn push_term(side: &mut String, magnitude: &BigInt, name: Option<&str>) {
    if !side.is_empty() {
        side.push_str(" + ");
    }
    match name {
        Some(name) if magnitude.is_one() => side.push_str(name),
        Some(name) => {
            let _ = write!(side, "{}{}", magnitude, name);
        }
        None => {
            let _ = write!(side, "{}", magnitude);
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = (1..self.coeffs.len()).map(|i| format!("x{}", i - 1)).collect();
        write!(f, "{}", format_row(&self.coeffs, self.kind, &names))
    }
}
