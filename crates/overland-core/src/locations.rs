//! Named world locations for home bindings.

use std::collections::HashMap;

use overland_logic::coords::Coord;
use serde::{Deserialize, Serialize};

/// Name-to-coordinate registry. Home bindings refer to locations by name;
/// a name missing from the registry makes the binding dormant rather than
/// an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationRegistry {
    map: HashMap<String, Coord>,
}

impl LocationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or move a named location.
    pub fn register(&mut self, name: impl Into<String>, coord: Coord) {
        self.map.insert(name.into(), coord);
    }

    /// Coordinate of a named location, if registered.
    pub fn coordinate(&self, name: &str) -> Option<Coord> {
        self.map.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Coord)> {
        self.map.iter().map(|(name, coord)| (name.as_str(), *coord))
    }
}
