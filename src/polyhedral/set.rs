//! Sets: maps without input dimensions.

use crate::polyhedral::basic_map::BasicMap;
use crate::polyhedral::map::Map;
use serde::{Serialize, Deserialize};
use std::fmt;
use std::ops::Deref;

/// A basic map with zero input dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicSet(BasicMap);

impl BasicSet {
    /// Number of set dimensions.
    pub fn dim(&self) -> usize {
        self.0.n_out()
    }

    /// The underlying basic map.
    pub fn as_basic_map(&self) -> &BasicMap {
        &self.0
    }

    /// Unwrap into the underlying basic map.
    pub fn into_basic_map(self) -> BasicMap {
        self.0
    }
}

impl TryFrom<BasicMap> for BasicSet {
    type Error = BasicMap;

    /// Fails, handing the map back, when it has input dimensions.
    fn try_from(bmap: BasicMap) -> Result<Self, Self::Error> {
        if bmap.space().is_set() {
            Ok(BasicSet(bmap))
        } else {
            Err(bmap)
        }
    }
}

impl Deref for BasicSet {
    type Target = BasicMap;

    fn deref(&self) -> &BasicMap {
        &self.0
    }
}

impl fmt::Display for BasicSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A union of basic sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Set(Map);

impl Set {
    /// Number of set dimensions.
    pub fn dim(&self) -> usize {
        self.0.space().n_out
    }

    /// The disjuncts as basic sets.
    pub fn basic_sets(&self) -> impl Iterator<Item = &BasicMap> + '_ {
        self.0.basic_maps().iter()
    }

    /// The underlying map.
    pub fn as_map(&self) -> &Map {
        &self.0
    }

    /// Unwrap into the underlying map.
    pub fn into_map(self) -> Map {
        self.0
    }
}

impl TryFrom<Map> for Set {
    type Error = Map;

    fn try_from(map: Map) -> Result<Self, Self::Error> {
        if map.is_set() {
            Ok(Set(map))
        } else {
            Err(map)
        }
    }
}

impl Deref for Set {
    type Target = Map;

    fn deref(&self) -> &Map {
        &self.0
    }
}

impl fmt::Display for Set {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
