//! Connector routing between two existing buildings.
//!
//! Each building offers four perimeter points, one per side, pushed a small
//! clearance outside its wall. The sixteen point pairs between two buildings
//! are candidate segments; the shortest clear one becomes the connector.

use crate::adjacency::AdjacencySide;
use crate::collision::CollisionEvaluator;
use siteplan_core::{
    intersects, normalize_degrees, point_at, BoundedObject, Building, ObstacleId,
    PlacementConfig, Point2D, Segment, GEOMETRY_EPSILON,
};

/// A point just outside one wall of a building.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerimeterPoint {
    pub point: Point2D,
    pub side: AdjacencySide,
    /// Bearing of the wall's outward normal.
    pub normal: f64,
}

/// The four perimeter points of `bounds`, `clearance` outside its walls.
pub fn perimeter_points(bounds: &BoundedObject, clearance: f64) -> [PerimeterPoint; 4] {
    AdjacencySide::ALL.map(|side| {
        let half = match side {
            AdjacencySide::Front | AdjacencySide::Back => bounds.length() / 2.0,
            AdjacencySide::Left | AdjacencySide::Right => bounds.width() / 2.0,
        };
        let normal = side.bearing(bounds.facing());
        PerimeterPoint {
            point: point_at(bounds.center(), normal, half + clearance),
            side,
            normal,
        }
    })
}

/// A straight connector between two perimeter points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorCandidate {
    pub from: PerimeterPoint,
    pub to: PerimeterPoint,
}

impl ConnectorCandidate {
    pub fn new(from: PerimeterPoint, to: PerimeterPoint) -> Self {
        Self { from, to }
    }

    pub fn segment(&self) -> Segment {
        Segment::new(self.from.point, self.to.point)
    }

    /// Untrimmed length between the two perimeter points.
    pub fn length(&self) -> f64 {
        self.segment().length()
    }

    /// Rectangle of a connector of the given width along this segment.
    ///
    /// Each end is pulled in by `width / 2 * |sin(a)|`, where `a` is the
    /// angle between the segment and that wall's outward normal. Returns
    /// `None` when the trims consume the whole segment.
    pub fn connector_bounds(&self, width: f64) -> Option<BoundedObject> {
        let segment = self.segment();
        let facing = segment.bearing();

        let trim_from = wall_trim(width, self.from.normal, facing);
        let trim_to = wall_trim(width, self.to.normal, facing);
        let length = segment.length() - trim_from - trim_to;
        if length <= GEOMETRY_EPSILON {
            return None;
        }

        let start = point_at(self.from.point, facing, trim_from);
        let end = point_at(self.to.point, normalize_degrees(facing + 180.0), trim_to);
        let center = start.midpoint(&end);
        Some(BoundedObject::new(center.x, center.y, width, length, facing))
    }

    /// Part of the connector that must stay clear of the buildings it joins.
    ///
    /// A rectangle meeting a wall at angle `a` off its normal needs
    /// `width / 2 * |tan(a)|` of run before its end corners are outside the
    /// wall, so each end is pulled in by that much. `None` when nothing is
    /// left, which includes every segment running along a wall.
    pub fn core_bounds(&self, width: f64) -> Option<BoundedObject> {
        let segment = self.segment();
        let facing = segment.bearing();

        let cut_from = corner_run(width, self.from.normal, facing)?;
        let cut_to = corner_run(width, self.to.normal, facing)?;
        let length = segment.length() - cut_from - cut_to;
        if length <= GEOMETRY_EPSILON {
            return None;
        }

        let start = point_at(self.from.point, facing, cut_from);
        let end = point_at(self.to.point, normalize_degrees(facing + 180.0), cut_to);
        let center = start.midpoint(&end);
        Some(BoundedObject::new(center.x, center.y, width, length, facing))
    }
}

fn wall_trim(width: f64, normal: f64, facing: f64) -> f64 {
    let angle = (facing - normal).to_radians();
    width / 2.0 * angle.sin().abs()
}

fn corner_run(width: f64, normal: f64, facing: f64) -> Option<f64> {
    let angle = (facing - normal).to_radians();
    let cos = angle.cos().abs();
    if cos <= GEOMETRY_EPSILON {
        return None;
    }
    Some(width / 2.0 * angle.sin().abs() / cos)
}

/// The connector chosen for one pass, with the buildings it joins.
#[derive(Debug, Clone, Copy)]
pub struct ConnectorRoute<'a> {
    pub from: &'a Building,
    pub to: &'a Building,
    pub candidate: ConnectorCandidate,
    pub bounds: BoundedObject,
}

impl ConnectorRoute<'_> {
    /// Ids of the two joined buildings.
    pub fn joins(&self) -> (ObstacleId, ObstacleId) {
        (self.from.id.clone(), self.to.id.clone())
    }
}

/// Shortest valid connector between two buildings.
///
/// A pair qualifies when its segment is at least `min_connector_length`
/// long and crosses no building or construction site. Its connector
/// rectangle must overlap no obstacle besides `a` and `b`, and must keep
/// clear of those two outside the wall-corner runs at its ends (see
/// [`ConnectorCandidate::core_bounds`]). Ties keep the first pair found.
pub fn best_candidate(
    evaluator: &CollisionEvaluator,
    a: &Building,
    b: &Building,
    width: f64,
    config: &PlacementConfig,
) -> Option<(ConnectorCandidate, BoundedObject)> {
    let joined = [a.id.clone(), b.id.clone()];
    let mut best: Option<(ConnectorCandidate, BoundedObject)> = None;

    for from in perimeter_points(&a.bounds, config.building_edge_offset) {
        for to in perimeter_points(&b.bounds, config.building_edge_offset) {
            let candidate = ConnectorCandidate::new(from, to);
            let length = candidate.length();
            if length < config.min_connector_length {
                continue;
            }
            if let Some((current, _)) = &best {
                if length >= current.length() {
                    continue;
                }
            }
            if !evaluator.segment_clear(from.point, to.point) {
                continue;
            }
            let Some(bounds) = candidate.connector_bounds(width) else {
                continue;
            };
            if !evaluator.is_open_ignoring(&bounds, &joined) {
                continue;
            }
            let Some(core) = candidate.core_bounds(width) else {
                continue;
            };
            if intersects(&core, &a.bounds) || intersects(&core, &b.bounds) {
                continue;
            }
            best = Some((candidate, bounds));
        }
    }

    best
}

/// Shortest valid connector over a set of building pairs.
///
/// The pair iterator is consumed lazily and in order; on equal lengths the
/// earlier pair wins.
pub fn best_over_pairs<'a, P>(
    evaluator: &CollisionEvaluator,
    pairs: P,
    width: f64,
    config: &PlacementConfig,
) -> Option<ConnectorRoute<'a>>
where
    P: IntoIterator<Item = (&'a Building, &'a Building)>,
{
    let mut best: Option<ConnectorRoute<'a>> = None;
    let mut considered = 0usize;

    for (a, b) in pairs {
        considered += 1;
        let Some((candidate, bounds)) = best_candidate(evaluator, a, b, width, config) else {
            log::debug!("No clear connector between {} and {}", a.id, b.id);
            continue;
        };
        let shorter = best
            .as_ref()
            .map_or(true, |current| candidate.length() < current.candidate.length());
        if shorter {
            best = Some(ConnectorRoute {
                from: a,
                to: b,
                candidate,
                bounds,
            });
        }
    }

    log::debug!("Connector pass considered {} building pairs", considered);
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use siteplan_core::Obstacle;

    fn hab(id: &str, x: f64, y: f64) -> Building {
        Building::new(id, "Lander Hab", BoundedObject::new(x, y, 10.0, 10.0, 0.0))
            .with_life_support(true)
    }

    fn evaluator_for(buildings: &[&Building]) -> CollisionEvaluator {
        CollisionEvaluator::new(buildings.iter().map(|b| b.to_obstacle()).collect())
    }

    #[test]
    fn test_perimeter_points_facing_north() {
        let pts = perimeter_points(&BoundedObject::new(0.0, 0.0, 4.0, 10.0, 0.0), 0.1);
        let by_side = |side| pts.iter().find(|p| p.side == side).unwrap();

        let front = by_side(AdjacencySide::Front);
        assert_abs_diff_eq!(front.point.y, 5.1, epsilon = 1e-9);
        assert_abs_diff_eq!(front.normal, 0.0, epsilon = 1e-9);

        let right = by_side(AdjacencySide::Right);
        assert_abs_diff_eq!(right.point.x, 2.1, epsilon = 1e-9);
        assert_abs_diff_eq!(right.normal, 90.0, epsilon = 1e-9);

        let left = by_side(AdjacencySide::Left);
        assert_abs_diff_eq!(left.point.x, -2.1, epsilon = 1e-9);
    }

    #[test]
    fn test_perpendicular_connector_is_untrimmed() {
        let a = hab("a", 0.0, 0.0);
        let b = hab("b", 20.0, 0.0);
        let eval = evaluator_for(&[&a, &b]);

        let (candidate, bounds) =
            best_candidate(&eval, &a, &b, 2.0, &PlacementConfig::default())
                .unwrap();
        assert_eq!(candidate.from.side, AdjacencySide::Right);
        assert_eq!(candidate.to.side, AdjacencySide::Left);
        assert_abs_diff_eq!(candidate.length(), 9.8, epsilon = 1e-9);

        assert_abs_diff_eq!(bounds.x(), 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bounds.y(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bounds.facing(), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bounds.length(), 9.8, epsilon = 1e-9);
        assert_abs_diff_eq!(bounds.width(), 2.0, epsilon = 1e-9);
        assert!(eval.is_open(&bounds));
    }

    #[test]
    fn test_oblique_connector_is_trimmed() {
        let from = PerimeterPoint {
            point: Point2D::new(0.0, 0.0),
            side: AdjacencySide::Front,
            normal: 0.0,
        };
        let to = PerimeterPoint {
            point: Point2D::new(6.0, 8.0),
            side: AdjacencySide::Back,
            normal: 180.0,
        };
        let candidate = ConnectorCandidate::new(from, to);
        assert_abs_diff_eq!(candidate.length(), 10.0, epsilon = 1e-9);

        // sin of the angle off the normal is 6/10 at both ends
        let bounds = candidate.connector_bounds(2.0).unwrap();
        assert_abs_diff_eq!(bounds.length(), 10.0 - 2.0 * 0.6, epsilon = 1e-9);
        assert_abs_diff_eq!(bounds.x(), 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bounds.y(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_diagonal_pair_is_joined() {
        let a = hab("a", 0.0, 0.0);
        let b = hab("b", 20.0, 12.0);
        let eval = evaluator_for(&[&a, &b]);

        let (candidate, bounds) =
            best_candidate(&eval, &a, &b, 2.0, &PlacementConfig::default()).unwrap();
        assert_eq!(candidate.from.side, AdjacencySide::Right);
        assert_eq!(candidate.to.side, AdjacencySide::Left);
        let run = (9.8f64 * 9.8 + 12.0 * 12.0).sqrt();
        assert_abs_diff_eq!(candidate.length(), run, epsilon = 1e-9);

        // sin off the wall normal is 12 / run at both ends
        assert_abs_diff_eq!(bounds.length(), run - 2.0 * 12.0 / run, epsilon = 1e-9);
        assert_abs_diff_eq!(bounds.x(), 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bounds.y(), 6.0, epsilon = 1e-9);

        // The trimmed ends clip the walls; the core stays clear of both
        let core = candidate.core_bounds(2.0).unwrap();
        assert!(!core.intersects(&a.bounds));
        assert!(!core.intersects(&b.bounds));
        assert!(core.length() < bounds.length());
    }

    #[test]
    fn test_connector_along_wall_is_rejected() {
        let from = PerimeterPoint {
            point: Point2D::new(0.0, 5.1),
            side: AdjacencySide::Front,
            normal: 0.0,
        };
        let to = PerimeterPoint {
            point: Point2D::new(10.5, 5.1),
            side: AdjacencySide::Front,
            normal: 0.0,
        };
        let candidate = ConnectorCandidate::new(from, to);
        assert!(candidate.connector_bounds(2.0).is_some());
        assert!(candidate.core_bounds(2.0).is_none());
    }

    #[test]
    fn test_other_obstacles_still_block_connector() {
        let a = hab("a", 0.0, 0.0);
        let b = hab("b", 20.0, 0.0);
        // Vehicles are left out of the segment test, so only the rectangle
        // check sees the rover parked across the straight run
        let eval = CollisionEvaluator::new(vec![
            a.to_obstacle(),
            b.to_obstacle(),
            Obstacle::movable("rover", BoundedObject::new(10.0, 0.5, 3.0, 3.0, 0.0)),
        ]);
        assert!(eval.segment_clear(Point2D::new(5.1, 0.0), Point2D::new(14.9, 0.0)));
        assert!(best_candidate(&eval, &a, &b, 2.0, &PlacementConfig::default()).is_none());
    }

    #[test]
    fn test_trim_can_consume_short_segment() {
        let from = PerimeterPoint {
            point: Point2D::new(0.0, 0.0),
            side: AdjacencySide::Front,
            normal: 0.0,
        };
        let to = PerimeterPoint {
            point: Point2D::new(1.0, 0.0),
            side: AdjacencySide::Back,
            normal: 180.0,
        };
        // Runs parallel to both walls, so each end loses the full half width
        assert!(ConnectorCandidate::new(from, to).connector_bounds(2.0).is_none());
    }

    #[test]
    fn test_minimum_length_excludes_close_pairs() {
        // Walls 0.5 apart, so the facing pair spans only 0.3
        let a = hab("a", 0.0, 0.0);
        let b = hab("b", 10.5, 0.0);
        let eval = evaluator_for(&[&a, &b]);

        let config = PlacementConfig::default();
        let result = best_candidate(&eval, &a, &b, 2.0, &config);
        if let Some((candidate, _)) = result {
            assert!(candidate.length() >= config.min_connector_length);
        }

        let permissive = PlacementConfig::default().with_min_connector_length(0.1);
        let (close, _) = best_candidate(&eval, &a, &b, 2.0, &permissive).unwrap();
        assert_abs_diff_eq!(close.length(), 0.3, epsilon = 1e-9);
    }

    #[test]
    fn test_blocked_segment_is_skipped() {
        let a = hab("a", 0.0, 0.0);
        let b = hab("b", 30.0, 0.0);
        let eval = CollisionEvaluator::new(vec![
            a.to_obstacle(),
            b.to_obstacle(),
            Obstacle::immovable("site", BoundedObject::new(15.0, 0.0, 4.0, 40.0, 0.0)),
        ]);
        assert!(best_candidate(&eval, &a, &b, 2.0, &PlacementConfig::default())
            .is_none());
    }

    #[test]
    fn test_best_over_pairs_picks_shortest() {
        let a = hab("a", 0.0, 0.0);
        let b = hab("b", 40.0, 0.0);
        let c = hab("c", 0.0, 25.0);
        let eval = evaluator_for(&[&a, &b, &c]);

        let pairs = vec![(&a, &b), (&a, &c), (&b, &c)];
        let route = best_over_pairs(&eval, pairs, 2.0, &PlacementConfig::default()).unwrap();
        // a front to c back: 25 - 10 - 0.2
        assert_abs_diff_eq!(route.candidate.length(), 14.8, epsilon = 1e-9);
        assert_abs_diff_eq!(route.bounds.x(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(route.bounds.y(), 12.5, epsilon = 1e-9);
        assert_abs_diff_eq!(route.bounds.facing(), 0.0, epsilon = 1e-9);
        assert_eq!(route.joins(), (a.id.clone(), c.id.clone()));
    }
}
