//! Plane math: `Vector2d` displacements and `Point2d` positions.
//!
//! Hand-rolled `f64` types rather than a linear-algebra dependency: the
//! framework needs exactly two concepts (a displacement and a position) and
//! a handful of operations on them.  Keeping them distinct types makes the
//! motion code read like the physics it implements — points move by vectors,
//! vectors scale by time.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

// ── Vector2d ──────────────────────────────────────────────────────────────────

/// A displacement or rate in the plane.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector2d {
    pub x: f64,
    pub y: f64,
}

impl Vector2d {
    pub const ZERO: Vector2d = Vector2d { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` radians (counter-clockwise from +x).
    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    #[inline]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn dot(self, other: Vector2d) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Orientation angle in radians (`atan2(y, x)`); 0 for the zero vector.
    #[inline]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// `true` when both components are exactly zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    #[inline]
    pub fn has_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    /// Rescale to exactly `len`, keeping direction.  The zero vector is
    /// returned unchanged (there is no direction to keep).
    pub fn with_length(self, len: f64) -> Self {
        let current = self.length();
        if current == 0.0 {
            return self;
        }
        self * (len / current)
    }

    /// Cap the length at `max`, keeping direction.
    pub fn limit_length(self, max: f64) -> Self {
        if self.length() > max {
            self.with_length(max)
        } else {
            self
        }
    }
}

impl Add for Vector2d {
    type Output = Vector2d;
    #[inline]
    fn add(self, rhs: Vector2d) -> Vector2d {
        Vector2d::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2d {
    #[inline]
    fn add_assign(&mut self, rhs: Vector2d) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2d {
    type Output = Vector2d;
    #[inline]
    fn sub(self, rhs: Vector2d) -> Vector2d {
        Vector2d::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2d {
    type Output = Vector2d;
    #[inline]
    fn mul(self, rhs: f64) -> Vector2d {
        Vector2d::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vector2d {
    type Output = Vector2d;
    #[inline]
    fn neg(self) -> Vector2d {
        Vector2d::new(-self.x, -self.y)
    }
}

// ── Point2d ───────────────────────────────────────────────────────────────────

/// An absolute position in the plane.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

impl Point2d {
    pub const ORIGIN: Point2d = Point2d { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn has_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    #[inline]
    pub fn distance_squared(self, other: Point2d) -> f64 {
        (other - self).length_squared()
    }

    #[inline]
    pub fn distance(self, other: Point2d) -> f64 {
        (other - self).length()
    }
}

impl Add<Vector2d> for Point2d {
    type Output = Point2d;
    #[inline]
    fn add(self, rhs: Vector2d) -> Point2d {
        Point2d::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign<Vector2d> for Point2d {
    #[inline]
    fn add_assign(&mut self, rhs: Vector2d) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point2d {
    type Output = Vector2d;
    #[inline]
    fn sub(self, rhs: Point2d) -> Vector2d {
        Vector2d::new(self.x - rhs.x, self.y - rhs.y)
    }
}
