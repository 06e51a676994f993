//! Utility modules shared by the readers:
//! - Error types
//! - Source location tracking

pub mod errors;
pub mod location;

// Re-exports
pub use errors::*;
pub use location::{SourceLocation, SourceMap, Span};
