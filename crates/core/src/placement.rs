//! Placement outcomes.

use crate::geometry::BoundedObject;
use crate::obstacle::ObstacleId;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which pass of the connector search produced a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConnectorPass {
    /// Joins a building without airlock access to one with access.
    AirlockAccess,
    /// Joins two buildings with no walking path between them.
    NoWalkingPath,
    /// Joins two buildings with no direct connector between them.
    NotDirectlyConnected,
    /// Attached to a single building, facing away from it.
    Fallback,
}

impl fmt::Display for ConnectorPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectorPass::AirlockAccess => "airlock access",
            ConnectorPass::NoWalkingPath => "no walking path",
            ConnectorPass::NotDirectlyConnected => "not directly connected",
            ConnectorPass::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

/// The search step that found a placement.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlacementStrategy {
    /// Next to a life-support building.
    LifeSupportNeighbor,
    /// Next to a building of the same type.
    SameTypeNeighbor,
    /// Next to any building at a widened separation.
    Expanding { separation: f64 },
    /// At the settlement origin of an empty settlement.
    Origin,
    /// Connector routing.
    Connector(ConnectorPass),
}

/// A validated position for a new structure.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    pub building_type: String,
    pub bounds: BoundedObject,
    pub strategy: PlacementStrategy,
    /// Buildings a connector joins; its trimmed ends may meet their walls.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub joins: Vec<ObstacleId>,
}

impl Placement {
    /// Creates a placement.
    pub fn new(
        building_type: impl Into<String>,
        bounds: BoundedObject,
        strategy: PlacementStrategy,
    ) -> Self {
        Self {
            building_type: building_type.into(),
            bounds,
            strategy,
            joins: Vec::new(),
        }
    }

    /// Records the two buildings a connector joins.
    pub fn with_joins(mut self, a: ObstacleId, b: ObstacleId) -> Self {
        self.joins = vec![a, b];
        self
    }
}

/// Outcome of a placement search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", rename_all = "snake_case"))]
pub enum PlacementResult {
    Placed(Placement),
    NoPlacementFound,
}

impl PlacementResult {
    /// True if a position was found.
    pub fn is_placed(&self) -> bool {
        matches!(self, PlacementResult::Placed(_))
    }

    /// The placement, if any.
    pub fn placement(&self) -> Option<&Placement> {
        match self {
            PlacementResult::Placed(p) => Some(p),
            PlacementResult::NoPlacementFound => None,
        }
    }

    /// Consumes the result, returning the placement if any.
    pub fn into_placement(self) -> Option<Placement> {
        match self {
            PlacementResult::Placed(p) => Some(p),
            PlacementResult::NoPlacementFound => None,
        }
    }

    /// Bounds of the placement, if any.
    pub fn bounds(&self) -> Option<&BoundedObject> {
        self.placement().map(|p| &p.bounds)
    }
}

impl From<Placement> for PlacementResult {
    fn from(p: Placement) -> Self {
        PlacementResult::Placed(p)
    }
}

impl From<Option<Placement>> for PlacementResult {
    fn from(p: Option<Placement>) -> Self {
        match p {
            Some(p) => PlacementResult::Placed(p),
            None => PlacementResult::NoPlacementFound,
        }
    }
}
