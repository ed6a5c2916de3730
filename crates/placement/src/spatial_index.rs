//! R*-tree broad phase over a settlement snapshot.
//!
//! Entries carry the axis-aligned envelope of a rotated footprint and the
//! position of its obstacle in the snapshot. Queries return those positions;
//! the exact rotated-rectangle test is left to the caller.

use rstar::{RTree, RTreeObject, AABB};
use siteplan_core::{BoundedObject, Obstacle, Point2D};

/// One obstacle's envelope in the tree.
#[derive(Debug, Clone)]
pub struct SpatialEntry {
    /// Position of the obstacle in the snapshot
    pub slot: usize,
    envelope: AABB<[f64; 2]>,
}

impl SpatialEntry {
    pub fn new(slot: usize, bounds: &BoundedObject) -> Self {
        let (min, max) = bounds.aabb();
        Self {
            slot,
            envelope: AABB::from_corners(min, max),
        }
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Broad-phase lookup of the obstacles near a footprint or segment.
#[derive(Debug, Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
}

impl SpatialIndex {
    /// Bulk-loads the obstacles; entry slots match their positions in `obstacles`.
    pub fn from_obstacles(obstacles: &[Obstacle]) -> Self {
        let entries = obstacles
            .iter()
            .enumerate()
            .map(|(slot, o)| SpatialEntry::new(slot, &o.bounds))
            .collect();
        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slots_in(&self, envelope: &AABB<[f64; 2]>) -> Vec<usize> {
        self.tree
            .locate_in_envelope_intersecting(envelope)
            .map(|entry| entry.slot)
            .collect()
    }

    /// Slots of obstacles whose envelopes touch the envelope of `bounds`.
    pub fn query_bounds(&self, bounds: &BoundedObject) -> Vec<usize> {
        let (min, max) = bounds.aabb();
        self.slots_in(&AABB::from_corners(min, max))
    }

    /// Slots of obstacles whose envelopes touch the segment's envelope.
    pub fn query_segment(&self, start: Point2D, end: Point2D) -> Vec<usize> {
        self.slots_in(&AABB::from_corners([start.x, start.y], [end.x, end.y]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle(id: &str, x: f64, y: f64, size: f64) -> Obstacle {
        Obstacle::immovable(id, BoundedObject::new(x, y, size, size, 0.0))
    }

    #[test]
    fn test_empty_index() {
        let index = SpatialIndex::from_obstacles(&[]);
        assert!(index.is_empty());
        assert!(index
            .query_bounds(&BoundedObject::new(0.0, 0.0, 5.0, 5.0, 0.0))
            .is_empty());
    }

    #[test]
    fn test_query_bounds() {
        let obstacles = vec![
            obstacle("a", 0.0, 0.0, 10.0),
            obstacle("b", 50.0, 0.0, 10.0),
            obstacle("c", 0.0, 50.0, 10.0),
        ];
        let index = SpatialIndex::from_obstacles(&obstacles);
        assert_eq!(index.len(), 3);

        // Envelope spans x 4..8, reaching into a
        let hits = index.query_bounds(&BoundedObject::new(6.0, 0.0, 4.0, 4.0, 0.0));
        assert_eq!(hits, vec![0]);

        let none = index.query_bounds(&BoundedObject::new(25.0, 25.0, 4.0, 4.0, 0.0));
        assert!(none.is_empty());
    }

    #[test]
    fn test_rotated_footprint_widens_envelope() {
        let obstacles = vec![obstacle("a", 0.0, 0.0, 2.0)];
        let index = SpatialIndex::from_obstacles(&obstacles);
        // Axis-aligned, a 2x2 square centered 2.3 away stays clear; turned
        // 45 degrees its corner reaches out to about 1.41
        let upright = BoundedObject::new(2.3, 0.0, 2.0, 2.0, 0.0);
        let turned = BoundedObject::new(2.3, 0.0, 2.0, 2.0, 45.0);
        assert!(index.query_bounds(&upright).is_empty());
        assert_eq!(index.query_bounds(&turned), vec![0]);
    }

    #[test]
    fn test_query_segment() {
        let obstacles = vec![obstacle("a", 0.0, 0.0, 10.0), obstacle("b", 50.0, 0.0, 10.0)];
        let index = SpatialIndex::from_obstacles(&obstacles);

        // Reversed endpoints still form a valid envelope
        let mut hits = index.query_segment(Point2D::new(60.0, 0.0), Point2D::new(-20.0, 0.0));
        hits.sort_unstable();
        assert_eq!(hits, vec![0, 1]);

        let hits = index.query_segment(Point2D::new(20.0, -5.0), Point2D::new(30.0, 5.0));
        assert!(hits.is_empty());
    }
}
