//! # Site-Plan Placement
//!
//! Collision-free placement of new buildings, construction sites and
//! connectors on a settlement's site plan.
//!
//! ## Features
//!
//! - Rotated-rectangle collision checks with an R*-tree broad phase
//! - Adjacency search around a reference building, sides tried in random order
//! - Settlement-wide search with preferred neighbors and a widening fallback
//! - Connector routing along the shortest clear segment between buildings
//! - A propose-and-confirm session loop with re-validation before commit
//! - An in-memory [`SiteSnapshot`] implementing [`ObstacleIndex`]
//!
//! ## Quick Start
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use siteplan_placement::{BoundedObject, Building, BuildingType, SitePlanner, SiteSnapshot};
//!
//! let site = SiteSnapshot::new().with_building(
//!     Building::new("hab-1", "Lander Hab", BoundedObject::new(0.0, 0.0, 10.0, 10.0, 0.0))
//!         .with_life_support(true),
//! );
//!
//! let planner = SitePlanner::default_config();
//! let greenhouse = BuildingType::new("Greenhouse", 8.0, 12.0).with_life_support(true);
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let result = planner.place(&greenhouse, &site, &mut rng).unwrap();
//! assert!(result.is_placed());
//! ```
//!
//! ## Connectors
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use siteplan_placement::{
//!     BoundedObject, Building, BuildingType, ConnectorPass, PlacementStrategy, SitePlanner,
//!     SiteSnapshot,
//! };
//!
//! let hab = |id: &str, x: f64| {
//!     Building::new(id, "Lander Hab", BoundedObject::new(x, 0.0, 10.0, 10.0, 0.0))
//!         .with_life_support(true)
//! };
//! let site = SiteSnapshot::new().with_building(hab("a", 0.0)).with_building(hab("b", 20.0));
//!
//! let hallway = BuildingType::connector("Hallway", 2.0);
//! let mut rng = StdRng::seed_from_u64(1);
//! let placement = SitePlanner::default_config()
//!     .place(&hallway, &site, &mut rng)
//!     .unwrap()
//!     .into_placement()
//!     .unwrap();
//!
//! assert_eq!(
//!     placement.strategy,
//!     PlacementStrategy::Connector(ConnectorPass::NoWalkingPath)
//! );
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization of [`SiteSnapshot`] and [`SessionOutcome`]

pub mod adjacency;
pub mod collision;
pub mod connector;
pub mod planner;
pub mod session;
pub mod site;
pub mod spatial_index;

// Re-exports
pub use adjacency::{try_around_building, AdjacencySide};
pub use collision::CollisionEvaluator;
pub use connector::{
    best_candidate, perimeter_points, ConnectorCandidate, ConnectorRoute, PerimeterPoint,
};
pub use planner::SitePlanner;
pub use session::{ConfirmationHandler, Decision, PlacementSession, SessionOutcome};
pub use site::{Connection, SiteObject, SiteSnapshot};
pub use spatial_index::{SpatialEntry, SpatialIndex};

// Re-export core types
pub use siteplan_core::{
    BoundedObject, Building, BuildingCatalog, BuildingType, ConnectorPass, Error, Footprint,
    Obstacle, ObstacleId, ObstacleIndex, ObstacleKind, Placement, PlacementConfig,
    PlacementResult, PlacementStrategy, Point2D, Result, Segment,
};
