//! The `Environment` struct and its tick pipeline.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;
use mas_body::{AgentBody, Influence, InfluenceKind, MotionInfluence, Percept};
use mas_core::{ObjectId, Point2d, StepClock};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::{
    EnvError, EnvResult, EnvironmentEvent, EnvironmentListener, EnvironmentModel, WorldAccess,
    WorldState, WorldView,
};

// ── Environment ───────────────────────────────────────────────────────────────

/// The shared world: body registry, clock, and the tick pipeline.
///
/// `Environment<M>` owns every registered [`AgentBody`] and drives the
/// six-phase tick via [`step`](Environment::step):
///
/// 1. **Collect**: drain each body's influence inbox (one merged motion
///    request plus the queued rest).
/// 2. **Classify**: resolve kill influences (removing their bodies), merge
///    in the model's endogenous influences, then drop whatever a removed
///    body emitted or was targeted by.
/// 3. **Resolve** ([`EnvironmentModel::apply_influences`]): turn the batch
///    into bounds-clamped motion.  Skipped when both batches are empty.
/// 4. **Advance**: increment the shared clock by one step.
/// 5. **Perceive**: recompute every surviving body's percepts at the new
///    time (optionally parallel with the `parallel` feature).
/// 6. **Notify**: fire listeners if the tick changed the world — and
///    unconditionally at the end of the first tick.
///
/// Exactly one thread may call `step` (it takes `&mut self`); influence
/// submission and percept reads are `&self` and may come from any thread.
pub struct Environment<M: EnvironmentModel> {
    /// The world-specific resolution and perception logic.
    model: M,

    /// Live bodies keyed by id.  Never mutated outside `register_body` and
    /// the tick pipeline.
    bodies: FxHashMap<ObjectId, AgentBody>,

    /// World extent along x, in world units.  Position clamps keep every
    /// body's footprint inside `[0, width] × [0, height]`.
    width: f64,

    /// World extent along y, in world units.
    height: f64,

    /// Shared fixed-step clock.  Advanced only by the tick pipeline;
    /// handed out to observers via [`clock_handle`](Environment::clock_handle).
    clock: Arc<StepClock>,

    /// Change listeners, snapshotted before each notification round.
    listeners: Mutex<Vec<Arc<dyn EnvironmentListener>>>,

    /// Set by kill removal and the bounded-move helpers; reset at the top
    /// of each tick.
    state_changed: AtomicBool,

    /// True until the first `step` call.  Gates registration and forces the
    /// first notification.
    init: AtomicBool,
}

impl<M: EnvironmentModel> Environment<M> {
    // ── Construction and registration ─────────────────────────────────────

    /// Create an empty world of `width × height` world units with a fixed
    /// step of `step_ms` milliseconds.
    pub fn new(width: f64, height: f64, step_ms: f64, model: M) -> Self {
        Self {
            model,
            bodies: FxHashMap::default(),
            width,
            height,
            clock: Arc::new(StepClock::new(step_ms)),
            listeners: Mutex::new(Vec::new()),
            state_changed: AtomicBool::new(false),
            init: AtomicBool::new(true),
        }
    }

    /// Register a body at `position` facing `angle`, before the first tick.
    ///
    /// Fails once the simulation has started or when the id is already
    /// taken; the registry is append-only between construction and the
    /// first `step`, and only kills remove entries after that.
    pub fn register_body(
        &mut self,
        mut body: AgentBody,
        position: Point2d,
        angle: f64,
    ) -> EnvResult<()> {
        if self.has_started() {
            return Err(EnvError::SimulationStarted { body: body.id() });
        }
        if self.bodies.contains_key(&body.id()) {
            return Err(EnvError::DuplicateBody(body.id()));
        }

        let mobile = body.mobile_mut();
        mobile.set_position(position);
        mobile.set_angle(angle);

        self.model.on_body_created(&body);
        debug!(
            "registered body {} at ({}, {})",
            body.id(),
            position.x,
            position.y
        );
        self.bodies.insert(body.id(), body);
        Ok(())
    }

    // ── Read accessors ────────────────────────────────────────────────────

    /// World extent along x, in world units.
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// World extent along y, in world units.
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The shared clock.
    #[inline]
    pub fn clock(&self) -> &StepClock {
        &self.clock
    }

    /// A clonable handle to the clock for observer threads.
    pub fn clock_handle(&self) -> Arc<StepClock> {
        Arc::clone(&self.clock)
    }

    /// The model.
    #[inline]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable model access, for pre-start setup such as placing obstacles.
    #[inline]
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
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

    /// Number of live bodies.
    #[inline]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// True once the first tick ran.
    pub fn has_started(&self) -> bool {
        !self.init.load(Ordering::SeqCst)
    }

    /// The percepts last computed for `body`, or `None` for unknown ids.
    pub fn perceived_objects(&self, body: ObjectId) -> Option<Arc<[Percept]>> {
        self.bodies.get(&body).map(AgentBody::perceived_objects)
    }

    /// Snapshot every object in the world: one [`Percept`] per body plus
    /// the model's passive objects, sorted by ascending id.
    pub fn state(&self) -> WorldState {
        let mut objects: Vec<Percept> = self.bodies.values().map(Percept::of_body).collect();
        objects.extend(self.model.passive_objects());
        objects.sort_by_key(|p| p.id);
        WorldState { objects }
    }

    // ── Influence intake ──────────────────────────────────────────────────

    /// Route an influence to a live body's inbox.
    ///
    /// Returns what [`AgentBody::influence`] returns: `false` for motion
    /// requests aimed at the receiving body itself (merged, not queued) and
    /// for unknown ids, `true` for queued influences.
    pub fn submit_influence(&self, body: ObjectId, influence: Influence) -> bool {
        match self.bodies.get(&body) {
            Some(body) => body.influence(influence),
            None => {
                debug!("influence for unknown body {body} dropped");
                false
            }
        }
    }

    // ── Listeners ─────────────────────────────────────────────────────────

    /// Attach a change listener.
    pub fn add_listener(&self, listener: Arc<dyn EnvironmentListener>) {
        self.listeners.lock().push(listener);
    }

    /// Detach a previously attached listener (matched by allocation).
    pub fn remove_listener(&self, listener: &Arc<dyn EnvironmentListener>) {
        self.listeners.lock().retain(|l| !Arc::ptr_eq(l, listener));
    }

    // ── Tick pipeline ─────────────────────────────────────────────────────

    /// Run one tick.
    ///
    /// Influences submitted while this runs land in body inboxes and are
    /// consumed by the *next* tick; percepts published here stay readable
    /// until the next tick replaces them.
    pub fn step(&mut self) {
        let first_tick = self.init.swap(false, Ordering::SeqCst);
        self.state_changed.store(false, Ordering::SeqCst);
        let pre_time = self.clock.snapshot();

        // ── Phase 1: collect ──────────────────────────────────────────────
        //
        // Drain every inbox up front.  Influences arriving after this point
        // belong to the next tick.
        let mut motions: Vec<MotionInfluence> = Vec::new();
        let mut others: Vec<Influence> = Vec::new();
        for body in self.bodies.values() {
            if let Some(motion) = body.consume_motion_influence() {
                motions.push(motion);
            }
            others.extend(body.consume_other_influences());
        }

        // ── Phase 2: classify ─────────────────────────────────────────────
        //
        // Kills resolve before anything else touches the world, so a body
        // killed this tick neither moves nor perceives.
        let mut rest: Vec<Influence> = Vec::with_capacity(others.len());
        for influence in others {
            if matches!(influence.kind, InfluenceKind::Kill) {
                self.remove_body(influence.acting_object());
            } else {
                rest.push(influence);
            }
        }

        let endogenous = {
            // Explicit field borrows so the borrow checker sees disjoint access.
            let model = &mut self.model;
            let view = WorldView::new(&self.bodies, self.width, self.height, pre_time);
            model.endogenous_influences(&view, &rest)
        };
        for influence in endogenous {
            match influence.kind {
                InfluenceKind::Kill => self.remove_body(influence.acting_object()),
                InfluenceKind::Motion { mode, linear, angular } => match influence.target {
                    Some(target) => motions.push(MotionInfluence {
                        emitter: influence.emitter,
                        target,
                        mode,
                        linear,
                        angular,
                    }),
                    None => debug!("endogenous motion influence without a target dropped"),
                },
                _ => rest.push(influence),
            }
        }

        // Influences acting on a removed body die with it.
        motions.retain(|m| self.bodies.contains_key(&m.target));
        rest.retain(|i| {
            let acting = i.acting_object();
            acting.is_nil() || self.bodies.contains_key(&acting)
        });

        // ── Phase 3: resolve ──────────────────────────────────────────────
        if !(motions.is_empty() && rest.is_empty()) {
            let model = &mut self.model;
            let mut access = WorldAccess::new(
                &mut self.bodies,
                self.width,
                self.height,
                pre_time,
                &self.state_changed,
            );
            model.apply_influences(&mut access, &motions, &rest);
        }

        // ── Phase 4: advance ──────────────────────────────────────────────
        self.clock.increment();

        // ── Phase 5: perceive ─────────────────────────────────────────────
        //
        // Percepts are computed against the post-advance time and the
        // post-resolution registry, then published wholesale per body.
        let post_time = self.clock.snapshot();
        {
            let model = &mut self.model;
            let view = WorldView::new(&self.bodies, self.width, self.height, post_time);
            model.begin_perception(&view);
        }
        {
            let model = &self.model;
            let view = WorldView::new(&self.bodies, self.width, self.height, post_time);

            #[cfg(not(feature = "parallel"))]
            {
                for body in self.bodies.values() {
                    body.set_perceptions(model.perceptions_for(&view, body));
                }
            }

            #[cfg(feature = "parallel")]
            {
                use rayon::prelude::*;

                let bodies: Vec<&AgentBody> = self.bodies.values().collect();
                bodies.par_iter().for_each(|body| {
                    body.set_perceptions(model.perceptions_for(&view, body));
                });
            }
        }

        // ── Phase 6: notify ───────────────────────────────────────────────
        if first_tick || self.state_changed.load(Ordering::SeqCst) {
            self.notify_listeners();
        }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Remove a killed body and tell the model.  Nil and unknown targets
    /// are dropped with a log line; kills are best-effort, never an error.
    fn remove_body(&mut self, id: ObjectId) {
        if id.is_nil() {
            debug!("kill influence with no resolvable target dropped");
            return;
        }
        match self.bodies.remove(&id) {
            Some(body) => {
                self.model.on_body_destroyed(&body);
                self.state_changed.store(true, Ordering::SeqCst);
                debug!("body {id} destroyed");
            }
            None => debug!("kill influence for unknown body {id} ignored"),
        }
    }

    /// Deliver the end-of-tick event to a snapshot of the listener list.
    ///
    /// Snapshotting first keeps the lock out of listener callbacks, so a
    /// listener may add or remove listeners without deadlocking.
    fn notify_listeners(&self) {
        let listeners: Vec<Arc<dyn EnvironmentListener>> = self.listeners.lock().clone();
        if listeners.is_empty() {
            return;
        }

        let snap = self.clock.snapshot();
        let event = EnvironmentEvent {
            time: snap.time,
            step: snap.step,
            world: self.state(),
        };
        for listener in &listeners {
            listener.environment_changed(&event);
        }
    }
}

impl<M: EnvironmentModel> std::fmt::Debug for Environment<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bodies", &self.bodies.len())
            .field("clock", &self.clock)
            .finish()
    }
}
