//! Mobile entities: orientation, motion limits, and motion integration.
//!
//! # Design
//!
//! The four `compute_*` functions are pure: given the entity's limits and
//! current motion state plus a requested move and a step duration, they
//! return the displacement (or rotation) the entity is allowed to realize
//! this tick.  State changes happen only in [`MobileObject::translate_within`]
//! and [`MobileObject::rotate`], which the environment invokes while applying
//! influences.  Keeping computation and mutation separate lets a world model
//! inspect a candidate move (e.g. for collision handling) before committing
//! to it.
//!
//! Two motion models are supported per request:
//!
//! - **Kinematic**: the request is a velocity; its magnitude is clamped to
//!   the speed limit and scaled by dt.
//! - **Steering**: the request is an acceleration; it is clamped to the
//!   acceleration limit (sign-aware against the current motion), integrated
//!   a half-step onto the current velocity, and the resulting candidate
//!   speed is clamped before scaling by dt.
//!
//! Every division below is dominated by an exact nonzero guard.

use mas_core::{ObjectId, Point2d, Shape2d, Vector2d};

use crate::situated::{ObjectKind, SituatedObject};

// ── MotionLimits ──────────────────────────────────────────────────────────────

/// Per-entity motion bounds.  All four values are taken as absolute values
/// at construction, so limits are always ≥ 0.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionLimits {
    pub max_linear_speed: f64,
    pub max_linear_acceleration: f64,
    pub max_angular_speed: f64,
    pub max_angular_acceleration: f64,
}

impl MotionLimits {
    /// All limits zero: the entity cannot move.
    pub const ZERO: MotionLimits = MotionLimits {
        max_linear_speed: 0.0,
        max_linear_acceleration: 0.0,
        max_angular_speed: 0.0,
        max_angular_acceleration: 0.0,
    };

    pub fn new(
        max_linear_speed: f64,
        max_linear_acceleration: f64,
        max_angular_speed: f64,
        max_angular_acceleration: f64,
    ) -> Self {
        Self {
            max_linear_speed: max_linear_speed.abs(),
            max_linear_acceleration: max_linear_acceleration.abs(),
            max_angular_speed: max_angular_speed.abs(),
            max_angular_acceleration: max_angular_acceleration.abs(),
        }
    }
}

// ── MobileObject ──────────────────────────────────────────────────────────────

/// A situated object that can move: adds orientation, motion limits, and the
/// realized motion state of the last tick.
///
/// Invariant: after a tick, `linear_motion().length() ≤ max_linear_speed`
/// and `|angular_speed()| ≤ max_angular_speed` — the compute functions clamp
/// before any displacement is realized.
#[derive(Clone, Debug)]
pub struct MobileObject {
    object: SituatedObject,
    angle: f64,
    limits: MotionLimits,
    /// Realized linear motion of the last tick, in units per second.
    linear_motion: Vector2d,
    /// Realized angular speed of the last tick, in radians per second.
    angular_speed: f64,
}

impl MobileObject {
    pub fn new(id: ObjectId, kind: ObjectKind, shape: Shape2d, limits: MotionLimits) -> Self {
        Self {
            object: SituatedObject::new(id, kind, shape),
            angle: 0.0,
            limits,
            linear_motion: Vector2d::ZERO,
            angular_speed: 0.0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn situated(&self) -> &SituatedObject {
        &self.object
    }

    #[inline]
    pub fn id(&self) -> ObjectId {
        self.object.id()
    }

    #[inline]
    pub fn kind(&self) -> ObjectKind {
        self.object.kind()
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.object.name()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.object.set_name(name);
    }

    #[inline]
    pub fn position(&self) -> Point2d {
        self.object.position()
    }

    #[inline]
    pub fn shape(&self) -> Shape2d {
        self.object.shape()
    }

    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Unit heading vector derived from the orientation angle.
    #[inline]
    pub fn direction(&self) -> Vector2d {
        Vector2d::from_angle(self.angle)
    }

    #[inline]
    pub fn limits(&self) -> MotionLimits {
        self.limits
    }

    #[inline]
    pub fn linear_motion(&self) -> Vector2d {
        self.linear_motion
    }

    #[inline]
    pub fn angular_speed(&self) -> f64 {
        self.angular_speed
    }

    // ── Direct state writes ───────────────────────────────────────────────

    /// Place the entity at an absolute position, resetting the realized
    /// linear motion.  NaN components drop the position write; the motion
    /// reset still applies.
    pub fn set_position(&mut self, position: Point2d) {
        self.object.set_position(position);
        self.linear_motion = Vector2d::ZERO;
    }

    /// Set the orientation angle, resetting the realized angular speed.
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
        self.angular_speed = 0.0;
    }

    /// Orient the entity along `direction`, resetting the realized angular
    /// speed.  The zero vector orients along +x.
    pub fn set_direction(&mut self, direction: Vector2d) {
        self.set_angle(direction.angle());
    }

    // ── Pure motion computation ───────────────────────────────────────────

    /// Kinematic translation: `request` is a desired velocity.  Returns the
    /// displacement for one step of `dt` seconds, with the speed clamped to
    /// the linear limit and the direction preserved.
    pub fn compute_kinematic_translation(&self, request: Vector2d, dt: f64) -> Vector2d {
        let speed = request.length();
        if speed == 0.0 {
            return Vector2d::ZERO;
        }
        let factor = dt * speed.clamp(0.0, self.limits.max_linear_speed) / speed;
        request * factor
    }

    /// Kinematic rotation: `request` is a desired angular rate.  Returns the
    /// rotation for one step, magnitude clamped, sign preserved.
    pub fn compute_kinematic_rotation(&self, request: f64, dt: f64) -> f64 {
        let speed = request.abs();
        if speed == 0.0 {
            return 0.0;
        }
        let factor = dt * speed.clamp(0.0, self.limits.max_angular_speed) / speed;
        request * factor
    }

    /// Steering translation: `request` is a desired acceleration.
    ///
    /// The requested magnitude becomes a signed acceleration (negative when
    /// the request opposes the current motion), is clamped to the
    /// acceleration limit, and is integrated a half-step onto the current
    /// velocity.  The candidate velocity's speed is then clamped to
    /// `[0, max_linear_speed]`, again signed against the current motion, and
    /// scaled by dt.  A candidate that would reverse the entity clamps to a
    /// standstill.
    pub fn compute_steering_translation(&self, request: Vector2d, dt: f64) -> Vector2d {
        let length = request.length();
        let candidate = if length != 0.0 {
            let signed = if request.dot(self.linear_motion) < 0.0 {
                -length
            } else {
                length
            };
            let acceleration = signed.clamp(
                -self.limits.max_linear_acceleration,
                self.limits.max_linear_acceleration,
            );
            // length is nonzero here, so the ratio is finite.
            let scale = acceleration.abs() / length;
            request * scale * (0.5 * dt) + self.linear_motion
        } else {
            self.linear_motion
        };

        let speed = candidate.length();
        if speed == 0.0 {
            return Vector2d::ZERO;
        }
        let signed = if candidate.dot(self.linear_motion) < 0.0 {
            -speed
        } else {
            speed
        };
        let clamped = signed.clamp(0.0, self.limits.max_linear_speed);
        candidate * (dt * clamped / speed)
    }

    /// Steering rotation: `request` is a desired angular acceleration.
    /// Mirrors [`compute_steering_translation`][Self::compute_steering_translation]
    /// in one dimension, except the candidate rate clamps symmetrically to
    /// `±max_angular_speed`.
    pub fn compute_steering_rotation(&self, request: f64, dt: f64) -> f64 {
        let candidate = if request != 0.0 {
            let acceleration = request.clamp(
                -self.limits.max_angular_acceleration,
                self.limits.max_angular_acceleration,
            );
            // The clamp preserves the sign of `request`, so the ratio is a
            // finite value in (0, 1].
            let scale = acceleration.abs() / request.abs();
            request * scale * (0.5 * dt) + self.angular_speed
        } else {
            self.angular_speed
        };

        if candidate == 0.0 {
            return 0.0;
        }
        let clamped = candidate.clamp(
            -self.limits.max_angular_speed,
            self.limits.max_angular_speed,
        );
        candidate * (dt * clamped.abs() / candidate.abs())
    }

    // ── State-changing motion ─────────────────────────────────────────────

    /// Translate by `delta`, clamping the resulting world-frame bounding box
    /// back inside `[0, width] × [0, height]` by shrinking the applied delta.
    /// World boundaries are a hard position clamp, never a bounce or a wrap.
    ///
    /// Updates the position (NaN-guarded) and caches the realized linear
    /// motion rate (`realized / dt`, or zero when `dt ≤ 0`).  Returns the
    /// realized delta.
    pub fn translate_within(
        &mut self,
        delta: Vector2d,
        dt: f64,
        width: f64,
        height: f64,
    ) -> Vector2d {
        let mut realized = delta;

        let target = self.object.shape().bounds_at(self.object.position() + delta);
        if target.min.x < 0.0 {
            realized.x += -target.min.x;
        } else if target.max.x > width {
            realized.x -= target.max.x - width;
        }
        if target.min.y < 0.0 {
            realized.y += -target.min.y;
        } else if target.max.y > height {
            realized.y -= target.max.y - height;
        }

        self.object.add_position(realized);
        self.linear_motion = if dt > 0.0 {
            realized * (1.0 / dt)
        } else {
            Vector2d::ZERO
        };
        realized
    }

    /// Rotate by `delta` radians and cache the realized angular rate
    /// (`delta / dt`, or zero when `dt ≤ 0`).
    pub fn rotate(&mut self, delta: f64, dt: f64) {
        self.angle += delta;
        self.angular_speed = if dt > 0.0 { delta / dt } else { 0.0 };
    }
}
