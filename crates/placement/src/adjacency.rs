//! Placement next to a reference building.
//!
//! A candidate is tried on each of the four sides of the reference building,
//! in random order, at a fixed gap from its wall. The first side that the
//! collision evaluator reports open wins.

use crate::collision::CollisionEvaluator;
use rand::seq::SliceRandom;
use rand::Rng;
use siteplan_core::{normalize_degrees, point_at, BoundedObject, Footprint};

/// Side of a reference building, relative to its facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdjacencySide {
    Front,
    Back,
    Left,
    Right,
}

impl AdjacencySide {
    /// All four sides in canonical order.
    pub const ALL: [AdjacencySide; 4] = [
        AdjacencySide::Front,
        AdjacencySide::Back,
        AdjacencySide::Left,
        AdjacencySide::Right,
    ];

    /// The four sides in a random order.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> [AdjacencySide; 4] {
        let mut sides = Self::ALL;
        sides.shuffle(rng);
        sides
    }

    /// Angle added to the reference facing to point out of this side.
    pub fn relative_bearing(self) -> f64 {
        match self {
            AdjacencySide::Front => 0.0,
            AdjacencySide::Right => 90.0,
            AdjacencySide::Back => 180.0,
            AdjacencySide::Left => 270.0,
        }
    }

    /// Bearing from the reference center out through this side.
    pub fn bearing(self, reference_facing: f64) -> f64 {
        normalize_degrees(reference_facing + self.relative_bearing())
    }

    /// Center-to-center distance at which the candidate touches the reference.
    ///
    /// Front and back stack the two lengths. Left and right stack the two
    /// widths, unless the candidate faces away, in which case its length
    /// points out of the side instead.
    pub fn offset(self, reference: &BoundedObject, footprint: &Footprint, face_away: bool) -> f64 {
        match self {
            AdjacencySide::Front | AdjacencySide::Back => {
                reference.length() / 2.0 + footprint.length / 2.0
            }
            AdjacencySide::Left | AdjacencySide::Right => {
                if face_away {
                    reference.width() / 2.0 + footprint.length / 2.0
                } else {
                    reference.width() / 2.0 + footprint.width / 2.0
                }
            }
        }
    }

    /// Facing of a candidate placed on this side.
    pub fn facing(self, reference_facing: f64, face_away: bool) -> f64 {
        if face_away {
            self.bearing(reference_facing)
        } else {
            normalize_degrees(reference_facing)
        }
    }

    /// The candidate rectangle on this side, `separation` away from the wall.
    pub fn candidate(
        self,
        reference: &BoundedObject,
        footprint: &Footprint,
        separation: f64,
        face_away: bool,
    ) -> BoundedObject {
        let distance = self.offset(reference, footprint, face_away) + separation;
        let center = point_at(reference.center(), self.bearing(reference.facing()), distance);
        footprint.at(center, self.facing(reference.facing(), face_away))
    }
}

/// Tries the four sides of `reference` in random order.
///
/// Returns the first candidate that overlaps nothing, or `None` when every
/// side is blocked.
pub fn try_around_building<R: Rng + ?Sized>(
    evaluator: &CollisionEvaluator,
    footprint: &Footprint,
    reference: &BoundedObject,
    separation: f64,
    face_away: bool,
    rng: &mut R,
) -> Option<BoundedObject> {
    for side in AdjacencySide::shuffled(rng) {
        let candidate = side.candidate(reference, footprint, separation, face_away);
        if evaluator.is_open(&candidate) {
            return Some(candidate);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use siteplan_core::Obstacle;

    fn reference() -> BoundedObject {
        BoundedObject::new(0.0, 0.0, 10.0, 10.0, 0.0)
    }

    #[test]
    fn test_side_candidates_facing_north() {
        let fp = Footprint::new(6.0, 6.0);
        let r = reference();

        let front = AdjacencySide::Front.candidate(&r, &fp, 2.0, false);
        assert_abs_diff_eq!(front.x(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(front.y(), 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(front.facing(), 0.0, epsilon = 1e-9);

        let back = AdjacencySide::Back.candidate(&r, &fp, 2.0, false);
        assert_abs_diff_eq!(back.y(), -10.0, epsilon = 1e-9);

        let right = AdjacencySide::Right.candidate(&r, &fp, 2.0, false);
        assert_abs_diff_eq!(right.x(), 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(right.y(), 0.0, epsilon = 1e-9);

        let left = AdjacencySide::Left.candidate(&r, &fp, 2.0, false);
        assert_abs_diff_eq!(left.x(), -10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_face_away_swaps_offsets_and_turns() {
        // Long, narrow connector against a wide building
        let fp = Footprint::new(2.0, 8.0);
        let r = BoundedObject::new(0.0, 0.0, 12.0, 6.0, 90.0);

        let right = AdjacencySide::Right.candidate(&r, &fp, 0.0, true);
        assert_abs_diff_eq!(right.facing(), 180.0, epsilon = 1e-9);
        // width / 2 + connector length / 2
        assert_abs_diff_eq!(right.x(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(right.y(), -10.0, epsilon = 1e-9);

        let back = AdjacencySide::Back.candidate(&r, &fp, 0.0, true);
        assert_abs_diff_eq!(back.facing(), 270.0, epsilon = 1e-9);
        assert_abs_diff_eq!(back.x(), -7.0, epsilon = 1e-9);

        let not_away = AdjacencySide::Right.candidate(&r, &fp, 0.0, false);
        assert_abs_diff_eq!(not_away.facing(), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(not_away.y(), -7.0, epsilon = 1e-9);
    }

    #[test]
    fn test_candidates_touch_but_do_not_overlap_reference() {
        let r = BoundedObject::new(3.0, -4.0, 8.0, 14.0, 37.0);
        let fp = Footprint::new(5.0, 9.0);
        for side in AdjacencySide::ALL {
            for face_away in [false, true] {
                let c = side.candidate(&r, &fp, 0.0, face_away);
                assert!(!c.intersects(&r), "{:?} face_away={}", side, face_away);
                let pushed_in = side.candidate(&r, &fp, -0.5, face_away);
                assert!(pushed_in.intersects(&r), "{:?} face_away={}", side, face_away);
            }
        }
    }

    #[test]
    fn test_try_around_building_returns_expected_side() {
        let evaluator =
            CollisionEvaluator::new(vec![Obstacle::immovable("b1", reference())]);
        let fp = Footprint::new(6.0, 6.0);
        let mut rng = StdRng::seed_from_u64(7);

        let placed = try_around_building(&evaluator, &fp, &reference(), 2.0, false, &mut rng)
            .expect("open space on every side");
        let expected = [(0.0, 10.0), (0.0, -10.0), (10.0, 0.0), (-10.0, 0.0)];
        assert!(expected
            .iter()
            .any(|&(x, y)| (placed.x() - x).abs() < 1e-9 && (placed.y() - y).abs() < 1e-9));
        assert!(evaluator.is_open(&placed));
    }

    #[test]
    fn test_try_around_building_skips_blocked_sides() {
        let blocked = |x: f64, y: f64, id: &str| {
            Obstacle::immovable(id, BoundedObject::new(x, y, 6.0, 6.0, 0.0))
        };
        let evaluator = CollisionEvaluator::new(vec![
            Obstacle::immovable("b1", reference()),
            blocked(0.0, 10.0, "n"),
            blocked(10.0, 0.0, "e"),
            blocked(0.0, -10.0, "s"),
        ]);
        let fp = Footprint::new(6.0, 6.0);

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let placed =
                try_around_building(&evaluator, &fp, &reference(), 2.0, false, &mut rng).unwrap();
            assert_abs_diff_eq!(placed.x(), -10.0, epsilon = 1e-9);
            assert_abs_diff_eq!(placed.y(), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_try_around_building_all_blocked() {
        let evaluator = CollisionEvaluator::new(vec![
            Obstacle::immovable("b1", reference()),
            Obstacle::movable("crowd", BoundedObject::new(0.0, 0.0, 40.0, 40.0, 0.0)),
        ]);
        let mut rng = StdRng::seed_from_u64(1);
        let fp = Footprint::new(6.0, 6.0);
        assert!(try_around_building(&evaluator, &fp, &reference(), 2.0, false, &mut rng).is_none());
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let a = AdjacencySide::shuffled(&mut StdRng::seed_from_u64(99));
        let b = AdjacencySide::shuffled(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);

        let mut seen = std::collections::HashSet::new();
        for seed in 0..64 {
            seen.insert(AdjacencySide::shuffled(&mut StdRng::seed_from_u64(seed))[0]);
        }
        assert_eq!(seen.len(), 4);
    }
}
