//! Dense integer vectors.

use num_bigint::BigInt;
use serde::{Serialize, Deserialize};
use std::fmt;

/// A fixed-length vector of arbitrary-precision integers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IntVec {
    el: Vec<BigInt>,
}

impl IntVec {
    /// A zero vector of the given size.
    pub fn zeros(size: usize) -> Self {
        Self { el: vec![BigInt::default(); size] }
    }

    /// A vector holding `el`.
    pub fn from_elements(el: Vec<BigInt>) -> Self {
        Self { el }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.el.len()
    }

    /// True for the size 0 vector.
    pub fn is_empty(&self) -> bool {
        self.el.is_empty()
    }

    /// The elements in order.
    pub fn elements(&self) -> &[BigInt] {
        &self.el
    }

    /// Take the elements out of the vector.
    pub fn into_elements(self) -> Vec<BigInt> {
        self.el
    }
}

impl fmt::Display for IntVec {
    /// PolyLib layout: the size on one line, the elements on the next.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.el.len())?;
        let values: Vec<String> = self.el.iter().map(|v| v.to_string()).collect();
        write!(f, "{}", values.join(" "))
    }
}
