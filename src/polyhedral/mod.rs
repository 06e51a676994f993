//! The constraint-system data model the readers build.
//!
//! - Spaces (parameter / input / output dimension counts and names)
//! - Constraint rows (equalities and inequalities)
//! - Basic maps and sets (one conjunction of rows, plus existentials)
//! - Maps and sets (unions of basic maps)
//! - Dense integer vectors

pub mod space;
pub mod constraint;
pub mod basic_map;
pub mod map;
pub mod set;
pub mod vec;

pub use space::{DimType, Space};
pub use constraint::{Constraint, ConstraintKind};
pub use basic_map::{BasicMap, BasicMapFlags};
pub use map::Map;
pub use set::{BasicSet, Set};
pub use vec::IntVec;
