//! Perception fields of view.

use mas_core::Point2d;

/// Body-relative field of view used by world models when computing percepts.
///
/// The frustum travels with the body: containment is evaluated against the
/// body's current position and heading.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Frustum {
    /// Omnidirectional perception up to `radius`.
    Circle { radius: f64 },
    /// A cone of `2 * half_angle` radians around the heading, up to `radius`.
    Cone { radius: f64, half_angle: f64 },
}

impl Frustum {
    pub fn circle(radius: f64) -> Self {
        Frustum::Circle { radius: radius.abs() }
    }

    pub fn cone(radius: f64, half_angle: f64) -> Self {
        Frustum::Cone {
            radius: radius.abs(),
            half_angle: half_angle.abs(),
        }
    }

    /// Maximum perception distance, independent of direction.
    #[inline]
    pub fn range(&self) -> f64 {
        match *self {
            Frustum::Circle { radius } | Frustum::Cone { radius, .. } => radius,
        }
    }

    /// Is `target` visible from `origin` when looking along `heading`?
    ///
    /// A target exactly at the origin is always visible (the bearing is
    /// undefined there, and a body never occludes its own position).
    pub fn contains(&self, origin: Point2d, heading: f64, target: Point2d) -> bool {
        let offset = target - origin;
        let distance_sq = offset.length_squared();
        let radius = self.range();
        if distance_sq > radius * radius {
            return false;
        }
        match *self {
            Frustum::Circle { .. } => true,
            Frustum::Cone { half_angle, .. } => {
                if distance_sq == 0.0 {
                    return true;
                }
                wrap_signed(offset.angle() - heading).abs() <= half_angle
            }
        }
    }
}

/// Wrap an angle to `(-π, π]`.
fn wrap_signed(mut angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    angle %= TAU;
    if angle > PI {
        angle -= TAU;
    } else if angle <= -PI {
        angle += TAU;
    }
    angle
}
