//! In-memory settlement snapshot.

use siteplan_core::{
    BoundedObject, Building, Error, Obstacle, ObstacleId, ObstacleIndex, Result,
};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A structure that only occupies ground: a construction site or a vehicle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SiteObject {
    pub id: ObstacleId,
    pub bounds: BoundedObject,
}

impl SiteObject {
    pub fn new(id: impl Into<ObstacleId>, bounds: BoundedObject) -> Self {
        Self {
            id: id.into(),
            bounds,
        }
    }
}

/// A walkway joining two buildings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Connection {
    pub a: ObstacleId,
    pub b: ObstacleId,
}

impl Connection {
    pub fn new(a: impl Into<ObstacleId>, b: impl Into<ObstacleId>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    /// True if this connection joins `x` and `y`, in either direction.
    pub fn joins(&self, x: &ObstacleId, y: &ObstacleId) -> bool {
        (&self.a == x && &self.b == y) || (&self.a == y && &self.b == x)
    }
}

/// Everything on a settlement's site plan at one instant.
///
/// Buildings and construction sites are immovable obstacles, parked
/// vehicles are movable ones. Connections form the walkway graph used for
/// path and airlock queries.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SiteSnapshot {
    pub buildings: Vec<Building>,
    pub construction_sites: Vec<SiteObject>,
    pub vehicles: Vec<SiteObject>,
    pub connections: Vec<Connection>,
    /// Buildings that contain an airlock.
    pub airlocks: BTreeSet<ObstacleId>,
}

impl SiteSnapshot {
    /// Creates an empty settlement.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_building(mut self, building: Building) -> Self {
        self.buildings.push(building);
        self
    }

    pub fn with_construction_site(
        mut self,
        id: impl Into<ObstacleId>,
        bounds: BoundedObject,
    ) -> Self {
        self.construction_sites.push(SiteObject::new(id, bounds));
        self
    }

    pub fn with_vehicle(mut self, id: impl Into<ObstacleId>, bounds: BoundedObject) -> Self {
        self.vehicles.push(SiteObject::new(id, bounds));
        self
    }

    pub fn with_connection(mut self, a: impl Into<ObstacleId>, b: impl Into<ObstacleId>) -> Self {
        self.connections.push(Connection::new(a, b));
        self
    }

    pub fn with_airlock(mut self, building: impl Into<ObstacleId>) -> Self {
        self.airlocks.insert(building.into());
        self
    }

    /// Looks up a building by id.
    pub fn building(&self, id: &ObstacleId) -> Option<&Building> {
        self.buildings.iter().find(|b| &b.id == id)
    }

    /// Checks that ids are unique and every reference names a building.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let ids = self
            .buildings
            .iter()
            .map(|b| &b.id)
            .chain(self.construction_sites.iter().map(|s| &s.id))
            .chain(self.vehicles.iter().map(|v| &v.id));
        for id in ids {
            if !seen.insert(id) {
                return Err(Error::ObstacleIndexUnavailable(format!(
                    "duplicate obstacle id '{}'",
                    id
                )));
            }
        }

        for building in &self.buildings {
            building.bounds.validate()?;
        }

        let referenced = self
            .connections
            .iter()
            .flat_map(|c| [&c.a, &c.b])
            .chain(self.airlocks.iter());
        for id in referenced {
            if self.building(id).is_none() {
                return Err(Error::UnknownBuilding(id.to_string()));
            }
        }
        Ok(())
    }

    fn neighbors(&self) -> HashMap<&ObstacleId, Vec<&ObstacleId>> {
        let mut graph: HashMap<&ObstacleId, Vec<&ObstacleId>> = HashMap::new();
        for c in &self.connections {
            graph.entry(&c.a).or_default().push(&c.b);
            graph.entry(&c.b).or_default().push(&c.a);
        }
        graph
    }

    /// Every building reachable on foot from `start`, `start` included.
    fn reachable_from<'a>(&'a self, start: &'a ObstacleId) -> HashSet<&'a ObstacleId> {
        let graph = self.neighbors();
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            if let Some(next) = graph.get(current) {
                for &id in next {
                    if visited.insert(id) {
                        queue.push_back(id);
                    }
                }
            }
        }
        visited
    }
}

impl ObstacleIndex for SiteSnapshot {
    fn obstacles(&self) -> Result<Vec<Obstacle>> {
        let buildings = self.buildings.iter().map(Building::to_obstacle);
        let sites = self
            .construction_sites
            .iter()
            .map(|s| Obstacle::immovable(s.id.clone(), s.bounds));
        let vehicles = self
            .vehicles
            .iter()
            .map(|v| Obstacle::movable(v.id.clone(), v.bounds));
        Ok(buildings.chain(sites).chain(vehicles).collect())
    }

    fn buildings(&self) -> Result<Vec<Building>> {
        Ok(self.buildings.clone())
    }

    fn is_airlock_reachable(&self, building: &ObstacleId) -> bool {
        if self.airlocks.contains(building) {
            return true;
        }
        self.reachable_from(building)
            .iter()
            .any(|id| self.airlocks.contains(*id))
    }

    fn has_walkable_path(&self, a: &ObstacleId, b: &ObstacleId) -> bool {
        a == b || self.reachable_from(a).contains(b)
    }

    fn is_directly_connected(&self, a: &ObstacleId, b: &ObstacleId) -> bool {
        self.connections.iter().any(|c| c.joins(a, b))
    }
}
