//! Object footprints and axis-aligned bounds.
//!
//! A `Shape2d` describes an object's footprint *relative to its position*
//! (centered on it).  World-frame geometry is always derived on demand via
//! [`Shape2d::bounds_at`], so the shape description never drifts as the
//! object moves.

use crate::vector::{Point2d, Vector2d};

// ── Bounds2d ──────────────────────────────────────────────────────────────────

/// An axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds2d {
    pub min: Point2d,
    pub max: Point2d,
}

impl Bounds2d {
    #[inline]
    pub fn new(min: Point2d, max: Point2d) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Point2d {
        Point2d::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    #[inline]
    pub fn translated(&self, delta: Vector2d) -> Bounds2d {
        Bounds2d::new(self.min + delta, self.max + delta)
    }

    #[inline]
    pub fn contains(&self, p: Point2d) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

// ── Shape2d ───────────────────────────────────────────────────────────────────

/// The footprint of a situated object, centered on the object's position.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape2d {
    /// A disc of the given radius.  Radius 0 is a dimensionless point.
    Circle { radius: f64 },
    /// An axis-aligned rectangle given by half extents.
    Rectangle { half_width: f64, half_height: f64 },
}

impl Shape2d {
    /// A dimensionless point footprint (zero-radius circle).
    #[inline]
    pub const fn point() -> Self {
        Shape2d::Circle { radius: 0.0 }
    }

    #[inline]
    pub fn circle(radius: f64) -> Self {
        Shape2d::Circle { radius: radius.abs() }
    }

    #[inline]
    pub fn rectangle(width: f64, height: f64) -> Self {
        Shape2d::Rectangle {
            half_width: width.abs() * 0.5,
            half_height: height.abs() * 0.5,
        }
    }

    /// Bounding box in the shape's own frame (centered on the origin).
    pub fn bounds(&self) -> Bounds2d {
        let (hw, hh) = match *self {
            Shape2d::Circle { radius } => (radius, radius),
            Shape2d::Rectangle { half_width, half_height } => (half_width, half_height),
        };
        Bounds2d::new(Point2d::new(-hw, -hh), Point2d::new(hw, hh))
    }

    /// World-frame bounding box for an instance positioned at `position`.
    #[inline]
    pub fn bounds_at(&self, position: Point2d) -> Bounds2d {
        self.bounds().translated(position - Point2d::ORIGIN)
    }

    /// Radius of the smallest origin-centered disc containing the shape.
    pub fn outer_radius(&self) -> f64 {
        match *self {
            Shape2d::Circle { radius } => radius,
            Shape2d::Rectangle { half_width, half_height } => {
                (half_width * half_width + half_height * half_height).sqrt()
            }
        }
    }
}

impl Default for Shape2d {
    /// A dimensionless point.
    fn default() -> Self {
        Shape2d::point()
    }
}
