//! Site-plan geometry: points, rotated rectangles and line segments.
//!
//! Coordinates are settlement-local meters with `+y` pointing to the
//! settlement's north and `+x` to the east. Facings and bearings are degrees
//! clockwise from north, so a bearing `θ` points along `(sin θ, cos θ)`.
//! A rectangle's `length` runs along its facing and its `width` across it.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Absolute tolerance for overlap and crossing tests.
///
/// Overlaps thinner than this are treated as touching, which never counts
/// as a collision.
pub const GEOMETRY_EPSILON: f64 = 1e-9;

/// A point on the site plan.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    /// The settlement origin.
    pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(&self, other: &Point2D) -> Point2D {
        Point2D::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Maps any angle in degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let d = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if d >= 360.0 {
        0.0
    } else {
        d
    }
}

/// Bearing from `from` to `to` in degrees, `0` = north, clockwise, in `[0, 360)`.
///
/// Coincident points yield `0`.
pub fn direction_degrees(from: Point2D, to: Point2D) -> f64 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    normalize_degrees(dx.atan2(dy).to_degrees())
}

/// Projects `origin` along `bearing` (degrees) by `distance`.
pub fn point_at(origin: Point2D, bearing: f64, distance: f64) -> Point2D {
    let rad = bearing.to_radians();
    Point2D::new(origin.x + distance * rad.sin(), origin.y + distance * rad.cos())
}

/// Width and length of a structure before it has a position.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Footprint {
    pub width: f64,
    pub length: f64,
}

impl Footprint {
    /// Creates a footprint. Call [`Footprint::validate`] before searching with it.
    pub fn new(width: f64, length: f64) -> Self {
        Self { width, length }
    }

    /// Rejects non-positive or non-finite dimensions.
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(Error::InvalidFootprint(format!(
                "width must be positive, got {}",
                self.width
            )));
        }
        if !(self.length.is_finite() && self.length > 0.0) {
            return Err(Error::InvalidFootprint(format!(
                "length must be positive, got {}",
                self.length
            )));
        }
        Ok(())
    }

    /// Places this footprint at `center` with the given facing.
    pub fn at(&self, center: Point2D, facing: f64) -> BoundedObject {
        BoundedObject::new(center.x, center.y, self.width, self.length, facing)
    }
}

/// A rotated rectangle: center, width, length and facing.
///
/// Immutable value; the adjustment helpers return new copies.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawBounds"))]
pub struct BoundedObject {
    x: f64,
    y: f64,
    width: f64,
    length: f64,
    facing: f64,
}

/// Bounded object as written in input files, before normalization.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawBounds {
    x: f64,
    y: f64,
    width: f64,
    length: f64,
    facing: f64,
}

#[cfg(feature = "serde")]
impl From<RawBounds> for BoundedObject {
    fn from(raw: RawBounds) -> Self {
        Self::new(raw.x, raw.y, raw.width, raw.length, raw.facing)
    }
}

impl BoundedObject {
    /// Creates a bounded object; the facing is normalized into `[0, 360)`.
    pub fn new(x: f64, y: f64, width: f64, length: f64, facing: f64) -> Self {
        Self {
            x,
            y,
            width,
            length,
            facing: normalize_degrees(facing),
        }
    }

    /// Center x coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Center y coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Extent across the facing.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Extent along the facing.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Facing in degrees clockwise from north.
    pub fn facing(&self) -> f64 {
        self.facing
    }

    /// Center point.
    pub fn center(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Width and length without the position.
    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.width, self.length)
    }

    /// Rejects non-finite coordinates and non-positive dimensions.
    pub fn validate(&self) -> Result<()> {
        if !(self.x.is_finite() && self.y.is_finite() && self.facing.is_finite()) {
            return Err(Error::InvalidFootprint(format!(
                "position ({}, {}) facing {} is not finite",
                self.x, self.y, self.facing
            )));
        }
        self.footprint().validate()
    }

    /// Unit vector along the facing.
    pub fn forward(&self) -> (f64, f64) {
        let rad = self.facing.to_radians();
        (rad.sin(), rad.cos())
    }

    /// Unit vector pointing to the object's right (facing + 90°).
    pub fn right(&self) -> (f64, f64) {
        let rad = self.facing.to_radians();
        (rad.cos(), -rad.sin())
    }

    /// The four corners: front-left, front-right, back-right, back-left.
    pub fn corners(&self) -> [Point2D; 4] {
        rectangle_corners(self)
    }

    /// Axis-aligned bounds as `([min_x, min_y], [max_x, max_y])`.
    pub fn aabb(&self) -> ([f64; 2], [f64; 2]) {
        let mut min = [f64::INFINITY; 2];
        let mut max = [f64::NEG_INFINITY; 2];
        for c in self.corners() {
            min[0] = min[0].min(c.x);
            min[1] = min[1].min(c.y);
            max[0] = max[0].max(c.x);
            max[1] = max[1].max(c.y);
        }
        (min, max)
    }

    /// Distance from the center to any corner.
    pub fn bounding_radius(&self) -> f64 {
        (self.width / 2.0).hypot(self.length / 2.0)
    }

    /// Expresses `p` in this object's frame as `(across, along)`.
    pub fn to_local(&self, p: Point2D) -> (f64, f64) {
        let dx = p.x - self.x;
        let dy = p.y - self.y;
        let (rx, ry) = self.right();
        let (fx, fy) = self.forward();
        (dx * rx + dy * ry, dx * fx + dy * fy)
    }

    /// Copy moved by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.length, self.facing)
    }

    /// Copy rotated in place by `delta` degrees clockwise.
    pub fn rotated(&self, delta: f64) -> Self {
        self.with_facing(self.facing + delta)
    }

    /// Copy with a different facing.
    pub fn with_facing(&self, facing: f64) -> Self {
        Self::new(self.x, self.y, self.width, self.length, facing)
    }

    /// True if the two rectangles overlap by a positive area.
    pub fn intersects(&self, other: &BoundedObject) -> bool {
        intersects(self, other)
    }
}

/// Corners of a rotated rectangle: front-left, front-right, back-right, back-left.
pub fn rectangle_corners(obj: &BoundedObject) -> [Point2D; 4] {
    let (fx, fy) = obj.forward();
    let (rx, ry) = obj.right();
    let hl = obj.length / 2.0;
    let hw = obj.width / 2.0;
    let c = obj.center();
    let corner = |sf: f64, sr: f64| {
        Point2D::new(
            c.x + sf * hl * fx + sr * hw * rx,
            c.y + sf * hl * fy + sr * hw * ry,
        )
    };
    [
        corner(1.0, -1.0),
        corner(1.0, 1.0),
        corner(-1.0, 1.0),
        corner(-1.0, -1.0),
    ]
}

fn project(corners: &[Point2D; 4], axis: (f64, f64)) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for p in corners {
        let dot = p.x * axis.0 + p.y * axis.1;
        lo = lo.min(dot);
        hi = hi.max(dot);
    }
    (lo, hi)
}

/// Separating-axis overlap test for two rotated rectangles.
///
/// Touching edges or corners do not count as overlap.
pub fn intersects(a: &BoundedObject, b: &BoundedObject) -> bool {
    if a.center().distance_to(&b.center()) >= a.bounding_radius() + b.bounding_radius() {
        return false;
    }

    let ca = a.corners();
    let cb = b.corners();
    // Opposite edges are parallel, so two normals per rectangle suffice.
    for axis in [a.forward(), a.right(), b.forward(), b.right()] {
        let (min_a, max_a) = project(&ca, axis);
        let (min_b, max_b) = project(&cb, axis);
        if max_a - min_b <= GEOMETRY_EPSILON || max_b - min_a <= GEOMETRY_EPSILON {
            return false;
        }
    }
    true
}

/// A straight line segment between two site-plan points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment {
    pub start: Point2D,
    pub end: Point2D,
}

impl Segment {
    /// Creates a segment from `start` to `end`.
    pub fn new(start: Point2D, end: Point2D) -> Self {
        Self { start, end }
    }

    /// Length of the segment.
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Bearing from start to end.
    pub fn bearing(&self) -> f64 {
        direction_degrees(self.start, self.end)
    }

    /// Midpoint of the segment.
    pub fn midpoint(&self) -> Point2D {
        self.start.midpoint(&self.end)
    }

    /// True if the segment passes through the interior of `rect`.
    ///
    /// Runs along an edge or grazing a corner is not a crossing. The segment
    /// is clipped against the rectangle in the rectangle's own frame
    /// (Liang-Barsky) and must keep more than [`GEOMETRY_EPSILON`] of length.
    pub fn crosses(&self, rect: &BoundedObject) -> bool {
        let (u0, v0) = rect.to_local(self.start);
        let (u1, v1) = rect.to_local(self.end);
        let hw = rect.width / 2.0;
        let hl = rect.length / 2.0;
        let du = u1 - u0;
        let dv = v1 - v0;

        let mut t_enter = 0.0_f64;
        let mut t_exit = 1.0_f64;
        for (p, q) in [(-du, u0 + hw), (du, hw - u0), (-dv, v0 + hl), (dv, hl - v0)] {
            if p.abs() < 1e-12 {
                // Parallel to this slab boundary
                if q <= GEOMETRY_EPSILON {
                    return false;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t_exit {
                    return false;
                }
                t_enter = t_enter.max(r);
            } else {
                if r < t_enter {
                    return false;
                }
                t_exit = t_exit.min(r);
            }
        }

        (t_exit - t_enter) * self.length() > GEOMETRY_EPSILON
    }
}
