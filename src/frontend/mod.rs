//! Frontend: lexer, token stream and readers for the input notations.
//!
//! Two notations describe constraint systems:
//!
//! ```text
//! [n] -> { [i] -> [j] : exists k : j = 2k and 0 <= i and i <= n }
//! ```
//!
//! and PolyLib matrices, where each row lists a type flag followed by the
//! coefficients of the dimensions, the parameters and the constant:
//!
//! ```text
//! 2 4
//! 1  1  0  0
//! 0  1 -1  0
//! ```
//!
//! The set/map reader detects a matrix by its leading integer and hands it
//! to the matrix reader. Vectors have a line-based format of their own.

pub mod token;
pub mod lexer;
pub mod stream;
pub mod vars;
pub mod parser;
pub mod polylib;
pub mod vector;

// Re-exports
pub use lexer::Lexer;
pub use parser::Parser;
pub use stream::TokenStream;
pub use token::{Token, TokenKind};
pub use vars::Vars;
pub use crate::utils::errors::ParseError;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Input notation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InputFormat {
    /// The set/map notation (which also accepts PolyLib matrices)
    #[default]
    Isl,
    /// PolyLib matrices and vectors
    PolyLib,
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Isl => write!(f, "isl"),
            InputFormat::PolyLib => write!(f, "polylib"),
        }
    }
}
