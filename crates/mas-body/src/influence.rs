//! Influences: requests to alter body state, consumed once per tick.

use mas_core::{ObjectId, Vector2d};

// ── MotionKind ────────────────────────────────────────────────────────────────

/// Which motion model a motion request uses.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MotionKind {
    /// The request is a velocity / angular rate, clamped to speed limits.
    Kinematic,
    /// The request is an acceleration, integrated then clamped.
    Steering,
}

// ── Influence ─────────────────────────────────────────────────────────────────

/// What an influence asks for.
///
/// The set is open-ended by design: world models interpret `Custom`
/// influences by tag, so applications extend the protocol without touching
/// the core.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InfluenceKind {
    /// A motion request for the acting body.
    Motion {
        mode: MotionKind,
        linear: Vector2d,
        angular: f64,
    },
    /// Remove the acting body from the environment.
    Kill,
    /// An application-defined influence, interpreted by the world model.
    Custom { tag: String, payload: Vec<u8> },
}

/// A request from an agent (or the environment itself) to alter body state.
///
/// The emitter is [`ObjectId::NIL`] until the owning body consumes the
/// influence and stamps its own id — senders cannot forge an origin.  The
/// optional target names the object the influence acts on; when absent it
/// acts on the emitter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Influence {
    pub emitter: ObjectId,
    pub target: Option<ObjectId>,
    pub kind: InfluenceKind,
}

impl Influence {
    fn untargeted(kind: InfluenceKind) -> Self {
        Self {
            emitter: ObjectId::NIL,
            target: None,
            kind,
        }
    }

    /// An untargeted kinematic motion request.
    pub fn kinematic(linear: Vector2d, angular: f64) -> Self {
        Self::untargeted(InfluenceKind::Motion {
            mode: MotionKind::Kinematic,
            linear,
            angular,
        })
    }

    /// An untargeted steering motion request.
    pub fn steering(linear: Vector2d, angular: f64) -> Self {
        Self::untargeted(InfluenceKind::Motion {
            mode: MotionKind::Steering,
            linear,
            angular,
        })
    }

    /// A kill request for the acting body.
    pub fn kill() -> Self {
        Self::untargeted(InfluenceKind::Kill)
    }

    /// An application-defined influence.
    pub fn custom(tag: impl Into<String>, payload: Vec<u8>) -> Self {
        Self::untargeted(InfluenceKind::Custom {
            tag: tag.into(),
            payload,
        })
    }

    /// Aim this influence at a specific object.
    pub fn with_target(mut self, target: ObjectId) -> Self {
        self.target = Some(target);
        self
    }

    /// The object this influence acts on: the explicit target, or the
    /// emitter when untargeted.
    #[inline]
    pub fn acting_object(&self) -> ObjectId {
        self.target.unwrap_or(self.emitter)
    }
}

impl Default for Influence {
    /// A zero kinematic motion request: "stop".
    fn default() -> Self {
        Self::kinematic(Vector2d::ZERO, 0.0)
    }
}

// ── MotionInfluence ────────────────────────────────────────────────────────────

/// A consumed motion request, ready for the world model's motion batch.
///
/// Unlike a buffered [`Influence`], both ids are resolved: the emitter was
/// stamped at consumption and the target names the object to move (the
/// emitting body itself for agent motion; set explicitly by endogenous
/// generators).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionInfluence {
    pub emitter: ObjectId,
    pub target: ObjectId,
    pub mode: MotionKind,
    pub linear: Vector2d,
    pub angular: f64,
}
