//! # Site-Plan Core
//!
//! Core types for placing structures on a settlement's 2D site plan.
//!
//! This crate holds the value types and contracts shared by the placement
//! searches; it performs no search itself.
//!
//! ## Core Components
//!
//! - **Geometry**: [`Point2D`], [`BoundedObject`], [`Segment`], [`Footprint`]
//!   and the rotated-rectangle overlap test [`intersects`]
//! - **Obstacles**: [`Obstacle`], [`Building`] and the [`ObstacleIndex`] query trait
//! - **Building types**: [`BuildingType`], [`BuildingCatalog`]
//! - **Results**: [`Placement`], [`PlacementResult`]
//! - **Configuration**: [`PlacementConfig`]
//!
//! ## Coordinates
//!
//! `+y` is the settlement's north and `+x` its east. Facings are degrees
//! clockwise from north in `[0, 360)`.
//!
//! ```rust
//! use siteplan_core::{BoundedObject, intersects};
//!
//! let hab = BoundedObject::new(0.0, 0.0, 10.0, 10.0, 0.0);
//! let shed = BoundedObject::new(0.0, 8.0, 6.0, 6.0, 0.0);
//! assert!(!intersects(&hab, &shed));
//! assert!(intersects(&hab, &shed.translated(0.0, -1.0)));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod building_type;
pub mod config;
pub mod error;
pub mod geometry;
pub mod obstacle;
pub mod placement;

// Re-exports
pub use building_type::{BuildingCatalog, BuildingType};
pub use config::PlacementConfig;
pub use error::{Error, Result};
pub use geometry::{
    direction_degrees, intersects, normalize_degrees, point_at, rectangle_corners,
    BoundedObject, Footprint, Point2D, Segment, GEOMETRY_EPSILON,
};
pub use obstacle::{Building, Obstacle, ObstacleId, ObstacleIndex, ObstacleKind};
pub use placement::{ConnectorPass, Placement, PlacementResult, PlacementStrategy};
