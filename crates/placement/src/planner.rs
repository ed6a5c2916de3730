//! Settlement-wide placement search.

use crate::adjacency::try_around_building;
use crate::collision::CollisionEvaluator;
use crate::connector::best_over_pairs;
use rand::seq::SliceRandom;
use rand::Rng;
use siteplan_core::{
    BoundedObject, Building, BuildingType, ConnectorPass, Footprint, ObstacleIndex, Placement,
    PlacementConfig, PlacementResult, PlacementStrategy, Point2D, Result,
};

/// Finds positions for new buildings and connectors on a settlement.
///
/// The planner holds only configuration. Every search takes a fresh
/// snapshot of the settlement through [`ObstacleIndex`] and draws all of
/// its randomness from the caller's generator.
#[derive(Debug, Clone, Default)]
pub struct SitePlanner {
    config: PlacementConfig,
}

impl SitePlanner {
    /// Creates a new planner with the given configuration.
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    /// Creates a planner with default configuration.
    pub fn default_config() -> Self {
        Self::new(PlacementConfig::default())
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Places one building of `building_type`.
    ///
    /// Resolves variable dimensions, rejects invalid footprints, then
    /// routes connector types through [`Self::find_connector_placement`] and
    /// everything else through [`Self::find_placement`].
    pub fn place<I, R>(
        &self,
        building_type: &BuildingType,
        index: &I,
        rng: &mut R,
    ) -> Result<PlacementResult>
    where
        I: ObstacleIndex + ?Sized,
        R: Rng + ?Sized,
    {
        self.config.validate()?;
        let footprint = building_type.resolve_footprint(&self.config)?;

        if building_type.connector {
            self.find_connector_placement(building_type, footprint, index, rng)
        } else {
            self.find_placement(building_type, footprint, index, rng)
        }
    }

    /// Places a building next to existing ones.
    ///
    /// Tries preferred neighbors first (life-support buildings for types
    /// that need life support, buildings of the same type otherwise), then
    /// every building at a separation that widens after each failed pass.
    /// An empty settlement gets the building at its origin.
    pub fn find_placement<I, R>(
        &self,
        building_type: &BuildingType,
        footprint: Footprint,
        index: &I,
        rng: &mut R,
    ) -> Result<PlacementResult>
    where
        I: ObstacleIndex + ?Sized,
        R: Rng + ?Sized,
    {
        footprint.validate()?;
        let evaluator = CollisionEvaluator::from_index(index)?;
        let buildings = index.buildings()?;

        let (mut neighbors, separation, strategy) = if building_type.requires_life_support {
            (
                index.life_support_buildings()?,
                self.config.inhabited_separation,
                PlacementStrategy::LifeSupportNeighbor,
            )
        } else {
            (
                index.buildings_of_type(&building_type.name)?,
                self.config.non_inhabited_separation,
                PlacementStrategy::SameTypeNeighbor,
            )
        };
        neighbors.shuffle(rng);

        log::debug!(
            "Trying {} preferred neighbors for {} at separation {}",
            neighbors.len(),
            building_type.name,
            separation
        );
        for neighbor in &neighbors {
            if let Some(bounds) = try_around_building(
                &evaluator,
                &footprint,
                &neighbor.bounds,
                separation,
                false,
                rng,
            ) {
                return Ok(self.placed(building_type, bounds, strategy).into());
            }
        }

        if buildings.is_empty() {
            let facing = rng.gen_range(0.0..360.0);
            let bounds = footprint.at(Point2D::ORIGIN, facing);
            if !evaluator.is_open(&bounds) {
                log::warn!(
                    "Settlement has no buildings but the origin is occupied; placing {} there anyway",
                    building_type.name
                );
            }
            return Ok(self.placed(building_type, bounds, PlacementStrategy::Origin).into());
        }

        let mut everyone = buildings;
        everyone.shuffle(rng);

        let mut separation = self.config.fallback_start_separation;
        for pass in 0..self.config.max_fallback_passes {
            log::debug!(
                "Fallback pass {} for {} at separation {}",
                pass + 1,
                building_type.name,
                separation
            );
            for building in &everyone {
                if let Some(bounds) = try_around_building(
                    &evaluator,
                    &footprint,
                    &building.bounds,
                    separation,
                    false,
                    rng,
                ) {
                    return Ok(self
                        .placed(
                            building_type,
                            bounds,
                            PlacementStrategy::Expanding { separation },
                        )
                        .into());
                }
            }
            separation += self.config.fallback_separation_step;
        }

        log::warn!(
            "No position for {} after {} fallback passes",
            building_type.name,
            self.config.max_fallback_passes
        );
        Ok(PlacementResult::NoPlacementFound)
    }

    /// Places a connector joining two life-support buildings.
    ///
    /// Pairs are considered pass by pass: a building cut off from any airlock
    /// with one that reaches an airlock, then buildings with no walking path
    /// between them, then buildings with no direct connector. Only pairs
    /// where either building shares the connector's base level qualify. The
    /// first pass with a valid segment wins, and within a pass the shortest
    /// segment wins. Failing all three, the connector is attached to a single
    /// life-support building, facing away from it.
    pub fn find_connector_placement<I, R>(
        &self,
        building_type: &BuildingType,
        footprint: Footprint,
        index: &I,
        rng: &mut R,
    ) -> Result<PlacementResult>
    where
        I: ObstacleIndex + ?Sized,
        R: Rng + ?Sized,
    {
        footprint.validate()?;
        let evaluator = CollisionEvaluator::from_index(index)?;
        let mut habs = index.life_support_buildings()?;

        let level = building_type.base_level;
        let level_matches =
            |a: &Building, b: &Building| a.base_level == level || b.base_level == level;

        let passes = [
            ConnectorPass::AirlockAccess,
            ConnectorPass::NoWalkingPath,
            ConnectorPass::NotDirectlyConnected,
        ];
        for pass in passes {
            log::debug!("Connector pass '{}' over {} buildings", pass, habs.len());
            let pairs: Vec<(&Building, &Building)> = match pass {
                ConnectorPass::AirlockAccess => {
                    let (cut_off, reachable): (Vec<&Building>, Vec<&Building>) = habs
                        .iter()
                        .partition(|b| !index.is_airlock_reachable(&b.id));
                    cut_off
                        .iter()
                        .flat_map(|a| reachable.iter().map(move |b| (*a, *b)))
                        .filter(|(a, b)| a.id != b.id && level_matches(*a, *b))
                        .collect()
                }
                ConnectorPass::NoWalkingPath => unordered_pairs(&habs)
                    .filter(|(a, b)| level_matches(*a, *b))
                    .filter(|(a, b)| !index.has_walkable_path(&a.id, &b.id))
                    .collect(),
                ConnectorPass::NotDirectlyConnected => unordered_pairs(&habs)
                    .filter(|(a, b)| level_matches(*a, *b))
                    .filter(|(a, b)| !index.is_directly_connected(&a.id, &b.id))
                    .collect(),
                ConnectorPass::Fallback => Vec::new(),
            };

            if let Some(route) = best_over_pairs(&evaluator, pairs, footprint.width, &self.config)
            {
                let (a, b) = route.joins();
                let placement = self.placed(
                    building_type,
                    route.bounds,
                    PlacementStrategy::Connector(pass),
                );
                return Ok(placement.with_joins(a, b).into());
            }
        }

        habs.shuffle(rng);
        for hab in &habs {
            if let Some(bounds) =
                try_around_building(&evaluator, &footprint, &hab.bounds, 0.0, true, rng)
            {
                return Ok(self
                    .placed(
                        building_type,
                        bounds,
                        PlacementStrategy::Connector(ConnectorPass::Fallback),
                    )
                    .into());
            }
        }

        log::warn!(
            "No connector position for {} among {} life-support buildings",
            building_type.name,
            habs.len()
        );
        Ok(PlacementResult::NoPlacementFound)
    }

    fn placed(
        &self,
        building_type: &BuildingType,
        bounds: BoundedObject,
        strategy: PlacementStrategy,
    ) -> Placement {
        log::info!(
            "Placed {} at ({:.2}, {:.2}) facing {:.1} via {:?}",
            building_type.name,
            bounds.x(),
            bounds.y(),
            bounds.facing(),
            strategy
        );
        Placement::new(&building_type.name, bounds, strategy)
    }
}

fn unordered_pairs(buildings: &[Building]) -> impl Iterator<Item = (&Building, &Building)> {
    buildings
        .iter()
        .enumerate()
        .flat_map(move |(i, a)| buildings[i + 1..].iter().map(move |b| (a, b)))
}
