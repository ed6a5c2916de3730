//! Error types for the site-plan engine.
//!
//! Not finding a position is an expected outcome and is reported through
//! [`PlacementResult::NoPlacementFound`](crate::placement::PlacementResult);
//! the variants here cover malformed input and unavailable collaborators.

use thiserror::Error;

/// Errors raised by site-plan operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Width or length is not a positive finite number after resolving defaults.
    #[error("Invalid footprint: {0}")]
    InvalidFootprint(String),

    /// The settlement's obstacle query failed.
    #[error("Obstacle index unavailable: {0}")]
    ObstacleIndexUnavailable(String),

    /// The requested building type is not in the catalog.
    #[error("Unknown building type: {0}")]
    UnknownBuildingType(String),

    /// A building id did not resolve to a building of the settlement.
    #[error("Unknown building: {0}")]
    UnknownBuilding(String),

    /// Configuration values are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Internal invariant violated.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result alias used throughout the site-plan crates.
pub type Result<T> = std::result::Result<T, Error>;
