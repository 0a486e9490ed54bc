//! Original-to-surrogate identifier maps.
//!
//! Maps are produced only by the dimension builders and are read-only
//! afterwards: the registry has no public constructor and no mutating
//! methods, so fact builders can only ever see the maps of a finished
//! dimension phase.

use std::collections::BTreeMap;

use f1_model::Dimension;

/// One dimension's mapping from original identifier to warehouse key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierMap {
    dimension: Dimension,
    keys: BTreeMap<i64, i64>,
}

impl IdentifierMap {
    /// Build from `(original, surrogate)` pairs. Originals are unique by
    /// construction in the dimension builders.
    pub(crate) fn from_pairs(
        dimension: Dimension,
        pairs: impl IntoIterator<Item = (i64, i64)>,
    ) -> Self {
        Self {
            dimension,
            keys: pairs.into_iter().collect(),
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Warehouse key for an original identifier, if it survived cleaning.
    pub fn resolve(&self, original: i64) -> Option<i64> {
        self.keys.get(&original).copied()
    }

    pub fn contains(&self, original: i64) -> bool {
        self.keys.contains_key(&original)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// `(original, surrogate)` pairs ordered by original identifier.
    pub fn iter(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.keys.iter().map(|(original, surrogate)| (*original, *surrogate))
    }
}

/// Every identifier map of one run.
#[derive(Debug, Clone)]
pub struct IdentifierRegistry {
    drivers: IdentifierMap,
    constructors: IdentifierMap,
    circuits: IdentifierMap,
    races: IdentifierMap,
    status: IdentifierMap,
}

impl IdentifierRegistry {
    pub(crate) fn new(
        drivers: IdentifierMap,
        constructors: IdentifierMap,
        circuits: IdentifierMap,
        races: IdentifierMap,
        status: IdentifierMap,
    ) -> Self {
        Self {
            drivers,
            constructors,
            circuits,
            races,
            status,
        }
    }

    pub fn get(&self, dimension: Dimension) -> &IdentifierMap {
        match dimension {
            Dimension::Drivers => &self.drivers,
            Dimension::Constructors => &self.constructors,
            Dimension::Circuits => &self.circuits,
            Dimension::Races => &self.races,
            Dimension::Status => &self.status,
        }
    }

    /// Resolve an optional original identifier through one dimension's map.
    pub fn resolve(&self, dimension: Dimension, original: Option<i64>) -> Option<i64> {
        original.and_then(|id| self.get(dimension).resolve(id))
    }
}
