//! Symbol table for the names seen while reading the set/map notation.
//!
//! Names get dense positions `0..n` in first-seen order, and a position is
//! also the column (minus the constant) the name occupies in every
//! constraint row: parameters are declared first, then input names, then
//! output names, then existentials.

use crate::polyhedral::space::Space;
use string_interner::{backend::StringBackend, DefaultSymbol, StringInterner, Symbol};

type Backend = StringBackend<DefaultSymbol>;

/// Insertion-ordered name to position table.
#[derive(Debug)]
pub struct Vars {
    names: StringInterner<Backend>,
}

impl Default for Vars {
    fn default() -> Self {
        Self::new()
    }
}

impl Vars {
    /// Create an empty table.
    pub fn new() -> Self {
        Self { names: StringInterner::new() }
    }

    /// Number of distinct names seen.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// No name seen yet.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Position of `name`, appending it at position `len()` if it is new.
    ///
    /// Callers distinguish declaration from reference by comparing the
    /// result against `len()` taken before the call.
    pub fn resolve_or_insert(&mut self, name: &str) -> usize {
        self.names.get_or_intern(name).to_usize()
    }

    /// Position of an already known name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.get(name).map(|sym| sym.to_usize())
    }

    /// Name at `pos`.
    pub fn name(&self, pos: usize) -> Option<&str> {
        let sym = DefaultSymbol::try_from_usize(pos)?;
        self.names.resolve(sym)
    }

    /// Names in position order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        (0..self.len()).filter_map(move |pos| self.name(pos))
    }

    /// Build the dimension descriptor for `nparam` parameters, `n_in` input
    /// and `n_out` output dimensions, naming each dimension after the table
    /// entry occupying its column.
    ///
    /// Parameters own the first `nparam` positions, inputs the next `n_in`
    /// and outputs the `n_out` after those; anything beyond is existential
    /// and not part of the descriptor.
    pub fn to_space(&self, nparam: usize, n_in: usize, n_out: usize) -> Space {
        let names = |offset: usize, n: usize| -> Vec<Option<String>> {
            (offset..offset + n)
                .map(|pos| self.name(pos).map(str::to_string))
                .collect()
        };
        Space::map_with_params(n_in, n_out, nparam)
            .with_param_names(names(0, nparam))
            .with_in_names(names(nparam, n_in))
            .with_out_names(names(nparam + n_in, n_out))
    }
}
