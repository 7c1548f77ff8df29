//! Simulation time model.
//!
//! # Design
//!
//! Virtual time is a monotonically increasing `f64` seconds value advanced
//! by a fixed step each tick:
//!
//!   time_after_n_ticks = n * step_secs
//!
//! The step is fixed at construction, which keeps every tick's duration
//! identical and makes motion integration (`rate * dt`) exact in shape even
//! when agents ask for time in other units.
//!
//! `StepClock` is written by exactly one thread (the stepper calling
//! [`StepClock::increment`]) but read from arbitrarily many observer threads,
//! so its mutable state lives behind a `parking_lot::RwLock`.  Readers that
//! need a coherent (current time, step duration) pair take it in one call via
//! [`StepClock::snapshot`].

use std::fmt;

use parking_lot::RwLock;

// ── TimeUnit ──────────────────────────────────────────────────────────────────

/// Units accepted by the clock's read accessors.
///
/// Internally everything is seconds; conversions are pure scaling.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeUnit {
    #[default]
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// How many seconds one unit of `self` spans.
    #[inline]
    pub fn seconds_per_unit(self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Milliseconds => 1e-3,
            TimeUnit::Microseconds => 1e-6,
            TimeUnit::Nanoseconds => 1e-9,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Hours => 3_600.0,
            TimeUnit::Days => 86_400.0,
        }
    }

    /// Convert a seconds value into this unit.
    #[inline]
    pub fn from_secs(self, secs: f64) -> f64 {
        secs / self.seconds_per_unit()
    }

    /// Convert a value expressed in this unit into seconds.
    #[inline]
    pub fn to_secs(self, value: f64) -> f64 {
        value * self.seconds_per_unit()
    }
}

// ── TimeSnapshot ──────────────────────────────────────────────────────────────

/// A coherent (current time, last step duration) pair, both in seconds.
///
/// Taken under the clock's read lock so the two values always belong to the
/// same tick, never torn across an increment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSnapshot {
    /// Virtual seconds elapsed since the simulation started.
    pub time: f64,
    /// Duration of one tick in virtual seconds.
    pub step: f64,
}

// ── StepClock ─────────────────────────────────────────────────────────────────

/// Wall-clock pacing delay applied by drivers between ticks, in ms.
pub const DEFAULT_SIMULATION_DELAY_MS: f64 = 10.0;

struct ClockState {
    now_secs: f64,
    delay_ms: f64,
}

/// Fixed-step virtual time source.
///
/// One writer (the environment's stepper), many concurrent readers.  The
/// step duration is immutable after construction; only the current time and
/// the pacing delay change.
pub struct StepClock {
    step_secs: f64,
    state: RwLock<ClockState>,
}

impl StepClock {
    /// Create a clock with the given step duration in milliseconds.
    pub fn new(step_ms: f64) -> Self {
        Self {
            step_secs: TimeUnit::Milliseconds.to_secs(step_ms),
            state: RwLock::new(ClockState {
                now_secs: 0.0,
                delay_ms: DEFAULT_SIMULATION_DELAY_MS,
            }),
        }
    }

    /// Advance virtual time by one step.  Called once per tick by the
    /// stepper; never resets.
    pub fn increment(&self) {
        let mut state = self.state.write();
        state.now_secs += self.step_secs;
    }

    /// Current virtual time in seconds.
    #[inline]
    pub fn current_time(&self) -> f64 {
        self.state.read().now_secs
    }

    /// Current virtual time converted to `unit`.
    #[inline]
    pub fn current_time_in(&self, unit: TimeUnit) -> f64 {
        unit.from_secs(self.current_time())
    }

    /// Duration of the last (and every) step in seconds.
    #[inline]
    pub fn last_step_duration(&self) -> f64 {
        self.step_secs
    }

    /// Duration of the last (and every) step converted to `unit`.
    #[inline]
    pub fn last_step_duration_in(&self, unit: TimeUnit) -> f64 {
        unit.from_secs(self.step_secs)
    }

    /// Coherent (current time, step duration) pair.
    pub fn snapshot(&self) -> TimeSnapshot {
        let state = self.state.read();
        TimeSnapshot {
            time: state.now_secs,
            step: self.step_secs,
        }
    }

    /// Scale a per-second quantity to one step's worth.
    #[inline]
    pub fn per_second(&self, amount_per_second: f64) -> f64 {
        amount_per_second * self.step_secs
    }

    /// Wall-clock pacing delay in milliseconds, applied by drivers between
    /// ticks.  Purely for real-time pacing, never for correctness.
    #[inline]
    pub fn simulation_delay(&self) -> f64 {
        self.state.read().delay_ms
    }

    /// Set the pacing delay in milliseconds.  Negative values clamp to 0.
    pub fn set_simulation_delay(&self, delay_ms: f64) {
        let mut state = self.state.write();
        state.delay_ms = delay_ms.max(0.0);
    }
}

impl fmt::Display for StepClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snap = self.snapshot();
        write!(f, "t={:.3}s (step {:.3}s)", snap.time, snap.step)
    }
}

impl fmt::Debug for StepClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepClock")
            .field("step_secs", &self.step_secs)
            .field("now_secs", &self.current_time())
            .finish()
    }
}
