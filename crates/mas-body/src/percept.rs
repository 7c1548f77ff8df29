//! Percepts: read-only snapshots of situated objects.

use mas_core::{ObjectId, Point2d, Shape2d, Vector2d};
use mas_object::{MobileObject, MotionLimits, ObjectKind, SituatedObject};

use crate::body::AgentBody;

/// A snapshot of one situated object as perceived at a given tick.
///
/// Percepts are plain values: cloning the world state into them at
/// perception time means an agent can hold them across ticks without
/// observing later mutations.  Non-mobile objects snapshot with zero angle,
/// zero limits, and zero motion.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Percept {
    /// Identity of the perceived object.
    pub id: ObjectId,
    /// `Some(id)` when the perceived object is an agent body.
    pub body: Option<ObjectId>,
    pub kind: ObjectKind,
    pub name: Option<String>,
    pub position: Point2d,
    pub shape: Shape2d,
    pub angle: f64,
    pub limits: MotionLimits,
    pub linear_motion: Vector2d,
    pub angular_speed: f64,
}

impl Percept {
    /// Snapshot a non-mobile object.
    pub fn of_situated(object: &SituatedObject) -> Self {
        Self {
            id: object.id(),
            body: None,
            kind: object.kind(),
            name: object.name().map(str::to_owned),
            position: object.position(),
            shape: object.shape(),
            angle: 0.0,
            limits: MotionLimits::ZERO,
            linear_motion: Vector2d::ZERO,
            angular_speed: 0.0,
        }
    }

    /// Snapshot a mobile object that is not an agent body.
    pub fn of_mobile(object: &MobileObject) -> Self {
        Self {
            id: object.id(),
            body: None,
            kind: object.kind(),
            name: object.name().map(str::to_owned),
            position: object.position(),
            shape: object.shape(),
            angle: object.angle(),
            limits: object.limits(),
            linear_motion: object.linear_motion(),
            angular_speed: object.angular_speed(),
        }
    }

    /// Snapshot an agent body; sets [`body`][Self::body] to the body's id.
    pub fn of_body(body: &AgentBody) -> Self {
        let mut percept = Self::of_mobile(body.mobile());
        percept.body = Some(body.id());
        percept
    }

    /// `true` when the perceived object is an agent body.
    #[inline]
    pub fn is_body(&self) -> bool {
        self.body.is_some()
    }
}
