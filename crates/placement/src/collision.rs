//! Collision evaluation against a snapshot of the settlement's obstacles.
//!
//! Every query here is pure. The evaluator is built once per search from
//! [`ObstacleIndex::obstacles`] and answers all candidate checks of that
//! search from the same snapshot.

use crate::spatial_index::SpatialIndex;
use siteplan_core::{
    intersects, BoundedObject, Obstacle, ObstacleId, ObstacleIndex, Point2D, Result, Segment,
};

/// Answers overlap queries for candidate positions.
#[derive(Debug)]
pub struct CollisionEvaluator {
    obstacles: Vec<Obstacle>,
    index: SpatialIndex,
}

impl CollisionEvaluator {
    /// Builds an evaluator over the given obstacles.
    pub fn new(obstacles: Vec<Obstacle>) -> Self {
        let index = SpatialIndex::from_obstacles(&obstacles);
        Self { obstacles, index }
    }

    /// Takes a snapshot of the settlement's obstacles.
    pub fn from_index<I: ObstacleIndex + ?Sized>(index: &I) -> Result<Self> {
        Ok(Self::new(index.obstacles()?))
    }

    /// The obstacles of the snapshot.
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Number of obstacles in the snapshot.
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    /// True if the snapshot holds no obstacle.
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    fn overlapping<'s: 'a, 'a, F>(
        &'s self,
        candidate: &'a BoundedObject,
        skip: F,
    ) -> impl Iterator<Item = &'s Obstacle> + 'a
    where
        F: Fn(&ObstacleId) -> bool + 'a,
    {
        self.index
            .query_bounds(candidate)
            .into_iter()
            .map(move |i| &self.obstacles[i])
            .filter(move |o| !skip(&o.id))
            .filter(move |o| intersects(candidate, &o.bounds))
    }

    /// Every obstacle overlapping `candidate`, other than `excluding`.
    pub fn collisions(
        &self,
        candidate: &BoundedObject,
        excluding: Option<&ObstacleId>,
    ) -> Vec<&Obstacle> {
        let mut hits: Vec<&Obstacle> = self
            .overlapping(candidate, move |id| excluding.map_or(false, |e| e == id))
            .collect();
        hits.sort_by(|a, b| a.id.cmp(&b.id));
        hits
    }

    /// True if `candidate` overlaps no obstacle.
    pub fn is_open(&self, candidate: &BoundedObject) -> bool {
        self.overlapping(candidate, |_| false).next().is_none()
    }

    /// True if `candidate` overlaps no obstacle other than `excluding`.
    ///
    /// Pass the id of the structure being re-validated so it does not collide
    /// with its own current position.
    pub fn is_open_excluding(
        &self,
        candidate: &BoundedObject,
        excluding: Option<&ObstacleId>,
    ) -> bool {
        match excluding {
            Some(id) => self.is_open_ignoring(candidate, std::slice::from_ref(id)),
            None => self.is_open(candidate),
        }
    }

    /// True if `candidate` overlaps no obstacle outside `ignored`.
    ///
    /// Connectors pass the two buildings they join.
    pub fn is_open_ignoring(&self, candidate: &BoundedObject, ignored: &[ObstacleId]) -> bool {
        self.overlapping(candidate, move |id| ignored.contains(id))
            .next()
            .is_none()
    }

    /// True if `candidate` is blocked, and only by vehicles.
    ///
    /// Signals that relocating the vehicles would free the position.
    pub fn blocked_by_movable_only(&self, candidate: &BoundedObject) -> bool {
        let mut blocked = false;
        for obstacle in self.overlapping(candidate, |_| false) {
            if !obstacle.is_movable() {
                return false;
            }
            blocked = true;
        }
        blocked
    }

    /// True if any building or construction site overlaps `candidate`.
    pub fn blocked_by_immovable(&self, candidate: &BoundedObject) -> bool {
        self.overlapping(candidate, |_| false).any(|o| !o.is_movable())
    }

    /// Checks a manually adjusted candidate.
    ///
    /// Meant to be called on every proposed move or rotation; `own_id` is the
    /// structure's previous position when it already exists on the site plan.
    pub fn validate(&self, candidate: &BoundedObject, own_id: Option<&ObstacleId>) -> bool {
        candidate.validate().is_ok() && self.is_open_excluding(candidate, own_id)
    }

    /// True if the segment from `a` to `b` crosses no building or site.
    ///
    /// Vehicles are ignored. Degenerate segments are trivially clear, so
    /// callers enforce their own minimum length.
    pub fn segment_clear(&self, a: Point2D, b: Point2D) -> bool {
        let segment = Segment::new(a, b);
        self.index
            .query_segment(a, b)
            .into_iter()
            .map(|i| &self.obstacles[i])
            .filter(|o| !o.is_movable())
            .all(|o| !segment.crosses(&o.bounds))
    }
}
