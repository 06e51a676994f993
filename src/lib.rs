//! # polyread - readers for integer constraint systems
//!
//! Builds integer linear constraint systems from text:
//! - the set/map notation with named tuples, parameters and existentials
//! - PolyLib constraint matrices, optionally several unioned together
//! - PolyLib integer vectors
//!
//! ## Architecture
//!
//! ```text
//! Input → Lexer → TokenStream → Parser (set/map | PolyLib) → BasicMap / Map
//! ```
//!
//! ## Example
//!
//! ```rust
//! use polyread::prelude::*;
//!
//! let bmap = polyread::read_basic_map("[n] -> { [i] -> [j] : exists k : j = 2k and i <= n }", None)?;
//! assert_eq!(bmap.n_param(), 1);
//! assert_eq!(bmap.n_div(), 1);
//! assert_eq!(bmap.row_len(), 5);
//!
//! let set = polyread::read_set("{ [i, j] : i >= 0 and j >= 0 }", None)?;
//! assert_eq!(set.dim(), 2);
//! # Ok::<(), PolyReadError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod frontend;
pub mod polyhedral;
pub mod utils;

pub use context::Context;
pub use frontend::InputFormat;

// Re-export commonly used types
pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    pub use crate::context::Context;
    pub use crate::frontend::InputFormat;
    pub use crate::polyhedral::{
        BasicMap, BasicSet, Constraint, ConstraintKind, DimType, IntVec, Map, Set, Space,
    };
    pub use crate::utils::errors::*;
    pub use crate::ReadConfig;
}

use polyhedral::{BasicMap, BasicSet, IntVec, Map, Set};
use utils::errors::PolyResult;

/// Configuration for the readers.
#[derive(Debug, Clone)]
pub struct ReadConfig {
    /// Normalize each parsed system and drop redundant rows
    pub simplify: bool,
    /// Fail when tokens remain after a complete object
    pub reject_trailing_input: bool,
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self {
            simplify: true,
            reject_trailing_input: false,
        }
    }
}

impl ReadConfig {
    /// Enable or disable simplification of parsed systems.
    pub fn with_simplify(mut self, simplify: bool) -> Self {
        self.simplify = simplify;
        self
    }

    /// Enable or disable rejection of trailing input.
    pub fn with_reject_trailing_input(mut self, reject: bool) -> Self {
        self.reject_trailing_input = reject;
        self
    }
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Read a basic map with the default configuration.
pub fn read_basic_map(source: &str, nparam: Option<usize>) -> PolyResult<BasicMap> {
    Context::default().read_basic_map_from_str(source, nparam)
}

/// Read a basic set with the default configuration.
pub fn read_basic_set(source: &str, nparam: Option<usize>) -> PolyResult<BasicSet> {
    Context::default().read_basic_set_from_str(source, nparam)
}

/// Read a map with the default configuration.
pub fn read_map(source: &str, nparam: Option<usize>) -> PolyResult<Map> {
    Context::default().read_map_from_str(source, nparam)
}

/// Read a set with the default configuration.
pub fn read_set(source: &str, nparam: Option<usize>) -> PolyResult<Set> {
    Context::default().read_set_from_str(source, nparam)
}

/// Read a vector with the default configuration.
pub fn read_vector(source: &str, format: InputFormat) -> PolyResult<IntVec> {
    Context::default().read_vector_from_str(source, format)
}
