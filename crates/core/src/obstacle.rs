//! Obstacles, buildings, and the read-only query surface over a settlement.

use crate::geometry::BoundedObject;
use crate::Result;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identity of an obstacle or building within one settlement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ObstacleId(String);

impl ObstacleId {
    /// Creates an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObstacleId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ObstacleId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Whether a collision with an obstacle can be resolved by moving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ObstacleKind {
    /// Vehicles, which may be relocated.
    Movable,
    /// Buildings and construction sites.
    Immovable,
}

/// A footprint on the site plan that new structures must not overlap.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Obstacle {
    pub id: ObstacleId,
    pub kind: ObstacleKind,
    pub bounds: BoundedObject,
}

impl Obstacle {
    /// A building or construction site.
    pub fn immovable(id: impl Into<ObstacleId>, bounds: BoundedObject) -> Self {
        Self {
            id: id.into(),
            kind: ObstacleKind::Immovable,
            bounds,
        }
    }

    /// A vehicle.
    pub fn movable(id: impl Into<ObstacleId>, bounds: BoundedObject) -> Self {
        Self {
            id: id.into(),
            kind: ObstacleKind::Movable,
            bounds,
        }
    }

    /// True for vehicles.
    pub fn is_movable(&self) -> bool {
        self.kind == ObstacleKind::Movable
    }
}

/// An existing building of the settlement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Building {
    pub id: ObstacleId,
    pub building_type: String,
    pub bounds: BoundedObject,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_level: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub life_support: bool,
}

impl Building {
    /// Creates a ground-level building without life support.
    pub fn new(
        id: impl Into<ObstacleId>,
        building_type: impl Into<String>,
        bounds: BoundedObject,
    ) -> Self {
        Self {
            id: id.into(),
            building_type: building_type.into(),
            bounds,
            base_level: 0,
            life_support: false,
        }
    }

    /// Marks the building as able to sustain occupants.
    pub fn with_life_support(mut self, life_support: bool) -> Self {
        self.life_support = life_support;
        self
    }

    /// Sets the structural tier.
    pub fn with_base_level(mut self, level: i32) -> Self {
        self.base_level = level;
        self
    }

    /// The building seen as an immovable obstacle.
    pub fn to_obstacle(&self) -> Obstacle {
        Obstacle::immovable(self.id.clone(), self.bounds)
    }
}

/// Read-only view of one settlement's structures and walkways.
///
/// The searches take a snapshot through this trait at the start of each call
/// and never mutate the settlement.
pub trait ObstacleIndex {
    /// Every obstacle: buildings, construction sites and vehicles.
    fn obstacles(&self) -> Result<Vec<Obstacle>>;

    /// Every existing building.
    fn buildings(&self) -> Result<Vec<Building>>;

    /// True if occupants of `building` can walk to an airlock.
    fn is_airlock_reachable(&self, building: &ObstacleId) -> bool;

    /// True if occupants can walk from `a` to `b` through connectors.
    fn has_walkable_path(&self, a: &ObstacleId, b: &ObstacleId) -> bool;

    /// True if a single connector joins `a` and `b`.
    fn is_directly_connected(&self, a: &ObstacleId, b: &ObstacleId) -> bool;

    /// Buildings able to sustain occupants.
    fn life_support_buildings(&self) -> Result<Vec<Building>> {
        Ok(self
            .buildings()?
            .into_iter()
            .filter(|b| b.life_support)
            .collect())
    }

    /// Buildings of the named type.
    fn buildings_of_type(&self, building_type: &str) -> Result<Vec<Building>> {
        Ok(self
            .buildings()?
            .into_iter()
            .filter(|b| b.building_type == building_type)
            .collect())
    }
}
