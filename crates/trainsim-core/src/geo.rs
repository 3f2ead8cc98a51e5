//! Planar coordinate type and vector helpers.
//!
//! Unlike the geographic `GeoPoint`/haversine model used by city-scale
//! digital twins, train positions in this simulation live on a flat `(x, y)`
//! plane (spec: vertices carry a planar position, not a lat/lon pair), so
//! distance is plain Euclidean distance and motion is plain vector algebra.

use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A planar coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Unit vector pointing from `self` toward `other`.
    ///
    /// Returns `(0, 0)` if the two points coincide (no well-defined
    /// direction, and no motion is needed anyway).
    pub fn direction_to(self, other: Point) -> Point {
        let d = self.distance(other);
        if d == 0.0 {
            Point::ZERO
        } else {
            Point::new((other.x - self.x) / d, (other.y - self.y) / d)
        }
    }

    /// `true` if `self == other` exactly (positions are compared for exact
    /// equality in the motion integrator: arrival is a clamp, not a
    /// tolerance check).
    #[inline]
    pub fn same_as(self, other: Point) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;
    #[inline]
    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}
