//! The model seam: influence resolution and perception live behind a trait.
//!
//! [`Environment`](crate::Environment) owns the tick pipeline but delegates
//! every world-specific decision to an [`EnvironmentModel`]: how influences
//! resolve into actual motion, what each body perceives, and which passive
//! objects populate the world.  The pipeline hands models a [`WorldView`]
//! (read-only) or a [`WorldAccess`] (mutating) rather than the registry
//! itself, so models cannot bypass the bounded-move helpers.

use std::sync::atomic::{AtomicBool, Ordering};

use mas_body::{AgentBody, Influence, MotionInfluence, MotionKind, Percept};
use mas_core::{ObjectId, TimeSnapshot, Vector2d};
use rustc_hash::FxHashMap;

// ── WorldView ─────────────────────────────────────────────────────────────────

/// Read-only view of the registry handed to model hooks.
///
/// The embedded time snapshot is pre-advance during influence resolution
/// and post-advance during perception.
pub struct WorldView<'a> {
    bodies: &'a FxHashMap<ObjectId, AgentBody>,
    width:  f64,
    height: f64,
    time:   TimeSnapshot,
}

impl<'a> WorldView<'a> {
    pub(crate) fn new(
        bodies: &'a FxHashMap<ObjectId, AgentBody>,
        width: f64,
        height: f64,
        time: TimeSnapshot,
    ) -> Self {
        Self { bodies, width, height, time }
    }

    /// World width in world units.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// World height in world units.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Clock reading paired with this view.
    #[inline]
    pub fn time(&self) -> TimeSnapshot {
        self.time
    }

    /// Number of live bodies.
    #[inline]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Look up a live body by id.
    #[inline]
    pub fn body(&self, id: ObjectId) -> Option<&'a AgentBody> {
        self.bodies.get(&id)
    }

    /// Iterate all live bodies in unspecified order.
    pub fn bodies(&self) -> impl Iterator<Item = &'a AgentBody> {
        self.bodies.values()
    }
}

// ── WorldAccess ───────────────────────────────────────────────────────────────

/// Mutating world handle passed to [`EnvironmentModel::apply_influences`].
///
/// All motion goes through [`apply_motion`](WorldAccess::apply_motion) or
/// [`displace_body`](WorldAccess::displace_body), which clamp against the
/// world bounds, refresh the body's realized motion rates, and flag the
/// tick as changed so listeners get notified.
pub struct WorldAccess<'a> {
    bodies:  &'a mut FxHashMap<ObjectId, AgentBody>,
    width:   f64,
    height:  f64,
    time:    TimeSnapshot,
    changed: &'a AtomicBool,
}

impl<'a> WorldAccess<'a> {
    pub(crate) fn new(
        bodies: &'a mut FxHashMap<ObjectId, AgentBody>,
        width: f64,
        height: f64,
        time: TimeSnapshot,
        changed: &'a AtomicBool,
    ) -> Self {
        Self { bodies, width, height, time, changed }
    }

    /// World width in world units.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// World height in world units.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Pre-advance clock reading for the tick being resolved.  `time().step`
    /// is the integration window for every motion applied this tick.
    #[inline]
    pub fn time(&self) -> TimeSnapshot {
        self.time
    }

    /// Look up a live body by id.
    #[inline]
    pub fn body(&self, id: ObjectId) -> Option<&AgentBody> {
        self.bodies.get(&id)
    }

    /// Iterate all live bodies in unspecified order.
    pub fn bodies(&self) -> impl Iterator<Item = &AgentBody> {
        self.bodies.values()
    }

    /// Flag the tick as changed without moving anything.  Models that mutate
    /// their own passive objects call this so listeners still get notified.
    pub fn mark_changed(&self) {
        self.changed.store(true, Ordering::SeqCst);
    }

    /// Resolve one motion influence against its target's limits and apply
    /// the result, clamped to the world bounds.
    ///
    /// Returns `false` (and applies nothing) when the target is not a live
    /// body, which happens when it was destroyed earlier in the same tick.
    pub fn apply_motion(&mut self, motion: &MotionInfluence) -> bool {
        let dt = self.time.step;
        let (width, height) = (self.width, self.height);
        let Some(body) = self.bodies.get_mut(&motion.target) else {
            return false;
        };

        let mobile = body.mobile_mut();
        let (translation, rotation) = match motion.mode {
            MotionKind::Kinematic => (
                mobile.compute_kinematic_translation(motion.linear, dt),
                mobile.compute_kinematic_rotation(motion.angular, dt),
            ),
            MotionKind::Steering => (
                mobile.compute_steering_translation(motion.linear, dt),
                mobile.compute_steering_rotation(motion.angular, dt),
            ),
        };
        mobile.translate_within(translation, dt, width, height);
        mobile.rotate(rotation, dt);

        self.changed.store(true, Ordering::SeqCst);
        true
    }

    /// Displace a body by an already-resolved delta, clamped to the world
    /// bounds.  For models doing their own resolution (collision response,
    /// conveyor-style environments).
    ///
    /// Returns `false` when the id is not a live body.
    pub fn displace_body(&mut self, id: ObjectId, translation: Vector2d, rotation: f64) -> bool {
        let dt = self.time.step;
        let (width, height) = (self.width, self.height);
        let Some(body) = self.bodies.get_mut(&id) else {
            return false;
        };

        let mobile = body.mobile_mut();
        mobile.translate_within(translation, dt, width, height);
        mobile.rotate(rotation, dt);

        self.changed.store(true, Ordering::SeqCst);
        true
    }
}

// ── EnvironmentModel ──────────────────────────────────────────────────────────

/// World-specific behavior plugged into the environment pipeline.
///
/// Hooks fire in pipeline order each tick:
///
/// 1. [`endogenous_influences`](Self::endogenous_influences) — contribute
///    environment-generated influences after agent influences were
///    collected and kills resolved.
/// 2. [`apply_influences`](Self::apply_influences) — resolve the merged
///    batch into actual motion.  Skipped entirely on quiet ticks.
/// 3. [`begin_perception`](Self::begin_perception) — rebuild any per-tick
///    perception state (spatial indexes) after the clock advanced.
/// 4. [`perceptions_for`](Self::perceptions_for) — compute one body's
///    percepts.  May run on Rayon's pool with the `parallel` feature, so
///    it takes `&self`.
///
/// [`on_body_created`](Self::on_body_created) and
/// [`on_body_destroyed`](Self::on_body_destroyed) bracket a body's
/// registration and kill-removal.
pub trait EnvironmentModel: Send + Sync + 'static {
    /// Called when a body is registered, before the simulation starts.
    fn on_body_created(&mut self, _body: &AgentBody) {}

    /// Called when a kill influence removes a body.
    fn on_body_destroyed(&mut self, _body: &AgentBody) {}

    /// Environment-generated influences for this tick.
    ///
    /// `others` is the batch of non-motion agent influences collected this
    /// tick, for models that react to them.  Returned motion influences
    /// must carry a target; untargeted ones are dropped by the pipeline.
    fn endogenous_influences(
        &mut self,
        _world: &WorldView<'_>,
        _others: &[Influence],
    ) -> Vec<Influence> {
        Vec::new()
    }

    /// Resolve this tick's influence batch into world mutations.
    ///
    /// `motions` holds per-body motion requests (at most one per body plus
    /// any endogenous ones); `others` holds everything else that survived
    /// kill classification.
    fn apply_influences(
        &mut self,
        world: &mut WorldAccess<'_>,
        motions: &[MotionInfluence],
        others: &[Influence],
    );

    /// Rebuild per-tick perception state.  Runs once per tick, after
    /// mutation ended and the clock advanced, before any
    /// [`perceptions_for`](Self::perceptions_for) call.
    fn begin_perception(&mut self, _world: &WorldView<'_>) {}

    /// Compute the percepts one body receives this tick.
    fn perceptions_for(&self, world: &WorldView<'_>, body: &AgentBody) -> Vec<Percept>;

    /// Passive objects (obstacles, markers) this model contributes to world
    /// snapshots.
    fn passive_objects(&self) -> Vec<Percept> {
        Vec::new()
    }
}

// ── NoopModel ─────────────────────────────────────────────────────────────────

/// A model that resolves nothing and perceives nothing.
///
/// Stand-in for wiring an environment whose model is not decided yet, and
/// for tests that exercise only the pipeline itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopModel;

impl EnvironmentModel for NoopModel {
    fn apply_influences(
        &mut self,
        _world: &mut WorldAccess<'_>,
        _motions: &[MotionInfluence],
        _others: &[Influence],
    ) {
    }

    fn perceptions_for(&self, _world: &WorldView<'_>, _body: &AgentBody) -> Vec<Percept> {
        Vec::new()
    }
}
