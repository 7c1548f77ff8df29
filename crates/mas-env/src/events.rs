//! World snapshots and the change-notification listener seam.

use mas_body::Percept;

// ── WorldState ────────────────────────────────────────────────────────────────

/// Snapshot of every object in the environment at one instant.
///
/// Holds one [`Percept`] per registered body plus whatever passive objects
/// the model contributes (obstacles, markers).  Entries are sorted by
/// ascending id so successive snapshots diff cleanly.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    /// One entry per object, ascending id order.
    pub objects: Vec<Percept>,
}

impl WorldState {
    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate the body entries only, skipping passive objects.
    pub fn bodies(&self) -> impl Iterator<Item = &Percept> {
        self.objects.iter().filter(|p| p.is_body())
    }
}

// ── EnvironmentEvent ──────────────────────────────────────────────────────────

/// Event delivered to listeners at the end of a tick.
///
/// `time` is read after the clock advanced, so the first event of a
/// simulation already carries `time == step`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnvironmentEvent {
    /// Virtual time in seconds at the end of the tick.
    pub time: f64,
    /// Step duration in seconds of the tick that produced this event.
    pub step: f64,
    /// Full world snapshot at `time`.
    pub world: WorldState,
}

// ── EnvironmentListener ───────────────────────────────────────────────────────

/// Observer notified when a tick left the world visibly changed.
///
/// Hooks take `&self`: listeners are shared behind `Arc`s and may be called
/// while other threads hold clones, so any mutable state needs interior
/// locking.  A notification is always delivered at the end of the first
/// tick, changed or not, so listeners can render the initial state.
pub trait EnvironmentListener: Send + Sync {
    fn environment_changed(&self, event: &EnvironmentEvent);
}
