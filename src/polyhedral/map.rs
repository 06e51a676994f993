//! Unions of basic maps.
//!
//! A [`Map`] is the disjunction of its basic maps. All of them live in the
//! same space; the order they are stored in carries no meaning.

use crate::polyhedral::basic_map::BasicMap;
use crate::polyhedral::space::Space;
use crate::utils::errors::{PolyReadError, PolyResult};
use serde::{Serialize, Deserialize};
use std::fmt;

/// A finite union of basic maps over one space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    space: Space,
    basic_maps: Vec<BasicMap>,
}

impl Map {
    /// The union of no basic maps.
    pub fn empty(space: Space) -> Self {
        Self { space, basic_maps: Vec::new() }
    }

    /// A one-element union. A basic map known to be empty is dropped.
    pub fn from_basic_map(bmap: BasicMap) -> Self {
        let mut map = Self::empty(bmap.space().clone());
        if !bmap.is_empty() {
            map.basic_maps.push(bmap);
        }
        map
    }

    /// The dimension descriptor shared by all disjuncts.
    pub fn space(&self) -> &Space {
        &self.space
    }

    /// Number of disjuncts.
    pub fn n(&self) -> usize {
        self.basic_maps.len()
    }

    /// No disjuncts left, i.e. the map is known to be empty.
    pub fn is_empty(&self) -> bool {
        self.basic_maps.is_empty()
    }

    /// No input dimensions.
    pub fn is_set(&self) -> bool {
        self.space.is_set()
    }

    /// The disjuncts, in the order they were added.
    pub fn basic_maps(&self) -> &[BasicMap] {
        &self.basic_maps
    }

    /// Take the disjuncts out of the union.
    pub fn into_basic_maps(self) -> Vec<BasicMap> {
        self.basic_maps
    }

    /// Union of two maps over compatible spaces.
    pub fn union(mut self, other: Map) -> PolyResult<Map> {
        if !self.space.is_compatible(&other.space) {
            return Err(PolyReadError::Internal(format!(
                "union of maps in different spaces: {} and {}",
                self.space, other.space
            )));
        }
        self.basic_maps.extend(other.basic_maps);
        Ok(self)
    }
}

impl fmt::Display for Map {
    /// An empty map prints as the empty system of its space and a single
    /// disjunct as that basic map, both readable again. Larger unions
    /// separate their disjuncts with `;`, which the reader does not accept.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.basic_maps.first() {
            None => fmt::Display::fmt(&BasicMap::empty(self.space.clone()), f),
            Some(first) => {
                first.fmt_params(f)?;
                write!(f, "{{ ")?;
                for (i, bmap) in self.basic_maps.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    bmap.fmt_body(f)?;
                }
                write!(f, " }}")
            }
        }
    }
}
