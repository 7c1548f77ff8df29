//! `AgentBody` — a mobile entity plus its influence inbox and percept slot.
//!
//! # Concurrency
//!
//! Influences arrive from arbitrarily many sender threads between ticks,
//! while the environment drains the inbox exactly once per tick.  The inbox
//! therefore lives behind a `parking_lot::Mutex` with swap-and-drain
//! consumption: the drain takes the buffer out under the lock and stamps
//! emitters outside it, so senders are never blocked on per-item work.
//!
//! The percept slot is the mirror image: written once per tick by the
//! environment, read at will by the owning agent.  It stores an
//! `Arc<[Percept]>`, so a read is one atomic clone of a shared snapshot.

use std::sync::Arc;

use parking_lot::Mutex;

use mas_core::{ObjectId, Point2d, Shape2d, Vector2d};
use mas_object::{MobileObject, MotionLimits, ObjectKind};

use crate::frustum::Frustum;
use crate::influence::{Influence, InfluenceKind, MotionInfluence, MotionKind};
use crate::percept::Percept;

/// The single pending motion request, pre-clamped to the body's limits.
struct PendingMotion {
    mode: MotionKind,
    linear: Vector2d,
    angular: f64,
}

struct Inbox {
    motion: Option<PendingMotion>,
    others: Vec<Influence>,
}

/// A mobile entity owned by one agent.
///
/// The body is the only surface an agent has on the world: influences go in
/// through [`influence`][Self::influence], percepts come out through
/// [`perceived_objects`][Self::perceived_objects].  Everything else is the
/// environment's business.
pub struct AgentBody {
    mobile: MobileObject,
    frustum: Frustum,
    inbox: Mutex<Inbox>,
    percepts: Mutex<Arc<[Percept]>>,
}

impl AgentBody {
    pub fn new(id: ObjectId, shape: Shape2d, limits: MotionLimits, frustum: Frustum) -> Self {
        Self {
            mobile: MobileObject::new(id, ObjectKind::Body, shape, limits),
            frustum,
            inbox: Mutex::new(Inbox {
                motion: None,
                others: Vec::new(),
            }),
            percepts: Mutex::new(Vec::new().into()),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> ObjectId {
        self.mobile.id()
    }

    #[inline]
    pub fn mobile(&self) -> &MobileObject {
        &self.mobile
    }

    /// Mutable access to the underlying mobile entity.  Used by the
    /// environment while placing bodies and applying influences.
    #[inline]
    pub fn mobile_mut(&mut self) -> &mut MobileObject {
        &mut self.mobile
    }

    #[inline]
    pub fn frustum(&self) -> Frustum {
        self.frustum
    }

    #[inline]
    pub fn position(&self) -> Point2d {
        self.mobile.position()
    }

    #[inline]
    pub fn angle(&self) -> f64 {
        self.mobile.angle()
    }

    #[inline]
    pub fn limits(&self) -> MotionLimits {
        self.mobile.limits()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.mobile.set_name(name);
    }

    // ── Influence intake ──────────────────────────────────────────────────

    /// Submit an influence to this body.
    ///
    /// An untargeted or self-targeted motion influence is consumed locally:
    /// its inputs are clamped against this body's own limits and it
    /// overwrites the single pending motion slot.  Everything else — kills,
    /// custom influences, and motion influences aimed at another object —
    /// is appended to the other-influence queue untouched.
    ///
    /// Returns whether the influence was queued (`false` for the
    /// self-consumed motion path).
    pub fn influence(&self, influence: Influence) -> bool {
        match influence.kind {
            InfluenceKind::Motion { mode, linear, angular }
                if influence.target.is_none() || influence.target == Some(self.id()) =>
            {
                match mode {
                    MotionKind::Kinematic => self.influence_kinematic(linear, angular),
                    MotionKind::Steering => self.influence_steering(linear, angular),
                }
                false
            }
            _ => {
                self.inbox.lock().others.push(influence);
                true
            }
        }
    }

    /// Request kinematic motion, clamping the request against this body's
    /// speed limits before buffering.  Overwrites any pending motion.
    pub fn influence_kinematic(&self, linear: Vector2d, angular: f64) {
        let limits = self.mobile.limits();
        self.store_motion(PendingMotion {
            mode: MotionKind::Kinematic,
            linear: linear.limit_length(limits.max_linear_speed),
            angular: angular.clamp(-limits.max_angular_speed, limits.max_angular_speed),
        });
    }

    /// Request steering motion, clamping the request against this body's
    /// acceleration limits before buffering.  Overwrites any pending motion.
    pub fn influence_steering(&self, linear: Vector2d, angular: f64) {
        let limits = self.mobile.limits();
        self.store_motion(PendingMotion {
            mode: MotionKind::Steering,
            linear: linear.limit_length(limits.max_linear_acceleration),
            angular: angular.clamp(
                -limits.max_angular_acceleration,
                limits.max_angular_acceleration,
            ),
        });
    }

    fn store_motion(&self, pending: PendingMotion) {
        self.inbox.lock().motion = Some(pending);
    }

    // ── Influence consumption (environment side) ──────────────────────────

    /// Take the pending motion influence, stamped with this body's id as
    /// both emitter and target.  At most one per tick: a second call in the
    /// same tick returns `None`.
    pub fn consume_motion_influence(&self) -> Option<MotionInfluence> {
        let pending = self.inbox.lock().motion.take()?;
        Some(MotionInfluence {
            emitter: self.id(),
            target: self.id(),
            mode: pending.mode,
            linear: pending.linear,
            angular: pending.angular,
        })
    }

    /// Drain the other-influence queue, stamping this body's id as the
    /// emitter of each entry.  A second call in the same tick returns empty.
    pub fn consume_other_influences(&self) -> Vec<Influence> {
        let mut drained = {
            let mut inbox = self.inbox.lock();
            std::mem::take(&mut inbox.others)
        };
        for influence in &mut drained {
            influence.emitter = self.id();
        }
        drained
    }

    // ── Percepts ──────────────────────────────────────────────────────────

    /// The most recent percept snapshot.  Cheap: clones an `Arc`.
    pub fn perceived_objects(&self) -> Arc<[Percept]> {
        self.percepts.lock().clone()
    }

    /// Replace the percept snapshot.  Called once per tick by the
    /// environment's perceive phase.
    pub fn set_perceptions(&self, percepts: Vec<Percept>) {
        *self.percepts.lock() = percepts.into();
    }
}

impl std::fmt::Debug for AgentBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentBody")
            .field("id", &self.id())
            .field("position", &self.position())
            .field("frustum", &self.frustum)
            .finish()
    }
}
