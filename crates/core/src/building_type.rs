//! Building-type metadata consumed by the searches.

use crate::config::PlacementConfig;
use crate::geometry::Footprint;
use crate::{Error, Result};
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Static description of a building type.
///
/// A negative `width` or `length` marks a variable dimension; the searches
/// substitute the configured default for it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BuildingType {
    pub name: String,
    pub width: f64,
    pub length: f64,
    /// Spans and joins two existing buildings.
    #[cfg_attr(feature = "serde", serde(default))]
    pub connector: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requires_life_support: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_level: i32,
}

impl BuildingType {
    /// Creates a ground-level, non-connector building type.
    pub fn new(name: impl Into<String>, width: f64, length: f64) -> Self {
        Self {
            name: name.into(),
            width,
            length,
            connector: false,
            requires_life_support: false,
            base_level: 0,
        }
    }

    /// Creates a connector type with a fixed width and variable length.
    pub fn connector(name: impl Into<String>, width: f64) -> Self {
        Self {
            connector: true,
            ..Self::new(name, width, -1.0)
        }
    }

    /// Marks the type as needing life support.
    pub fn with_life_support(mut self, required: bool) -> Self {
        self.requires_life_support = required;
        self
    }

    /// Sets the structural tier.
    pub fn with_base_level(mut self, level: i32) -> Self {
        self.base_level = level;
        self
    }

    /// True when the width is chosen by the placement.
    pub fn has_variable_width(&self) -> bool {
        self.width < 0.0
    }

    /// True when the length is chosen by the placement.
    pub fn has_variable_length(&self) -> bool {
        self.length < 0.0
    }

    /// Resolves variable dimensions and validates the result.
    pub fn resolve_footprint(&self, config: &PlacementConfig) -> Result<Footprint> {
        let width = if self.has_variable_width() {
            config.default_variable_width
        } else {
            self.width
        };
        let length = if self.has_variable_length() {
            config.default_variable_length
        } else {
            self.length
        };

        if self.has_variable_width() || self.has_variable_length() {
            log::debug!(
                "Building type '{}' resolved to {} x {}",
                self.name,
                width,
                length
            );
        }

        let footprint = Footprint::new(width, length);
        footprint.validate().map_err(|e| match e {
            Error::InvalidFootprint(msg) => {
                Error::InvalidFootprint(format!("building type '{}': {}", self.name, msg))
            }
            other => other,
        })?;
        Ok(footprint)
    }
}

/// Lookup of building types by name.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "Vec<BuildingType>", into = "Vec<BuildingType>")
)]
pub struct BuildingCatalog {
    types: BTreeMap<String, BuildingType>,
}

impl BuildingCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a building type.
    pub fn with_type(mut self, building_type: BuildingType) -> Self {
        self.insert(building_type);
        self
    }

    /// Adds (or replaces) a building type.
    pub fn insert(&mut self, building_type: BuildingType) {
        self.types.insert(building_type.name.clone(), building_type);
    }

    /// Looks up a type by name.
    pub fn get(&self, name: &str) -> Result<&BuildingType> {
        self.types
            .get(name)
            .ok_or_else(|| Error::UnknownBuildingType(name.to_string()))
    }

    /// Number of types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True if no type is registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterates the types in name order.
    pub fn iter(&self) -> impl Iterator<Item = &BuildingType> {
        self.types.values()
    }
}

impl FromIterator<BuildingType> for BuildingCatalog {
    fn from_iter<I: IntoIterator<Item = BuildingType>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for t in iter {
            catalog.insert(t);
        }
        catalog
    }
}

impl From<Vec<BuildingType>> for BuildingCatalog {
    fn from(types: Vec<BuildingType>) -> Self {
        types.into_iter().collect()
    }
}

impl From<BuildingCatalog> for Vec<BuildingType> {
    fn from(catalog: BuildingCatalog) -> Self {
        catalog.types.into_values().collect()
    }
}
