//! Deterministic per-body and world-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each body gets its own independent `SmallRng` seeded by:
//!
//!   seed = world_seed XOR (id_digest * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads id digests uniformly across the seed space.  This means:
//!
//! - Bodies never share RNG state (no contention, no ordering dependency).
//! - A body's stream depends only on the world seed and its own id, so runs
//!   replay identically regardless of registration order.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::ObjectId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── BodyRng ───────────────────────────────────────────────────────────────────

/// Per-body deterministic RNG.
///
/// Create one per body at startup and keep it on the driver's side next to
/// the body id.  The type is `!Sync` to prevent accidental sharing across
/// threads.
pub struct BodyRng(SmallRng);

impl BodyRng {
    /// Seed deterministically from the run's world seed and a body id.
    pub fn new(world_seed: u64, body: ObjectId) -> Self {
        let seed = world_seed ^ body.as_u64().wrapping_mul(MIXING_CONSTANT);
        BodyRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

// ── WorldRng ──────────────────────────────────────────────────────────────────

/// World-level RNG for global operations (scenario layout, endogenous
/// events).  Used only in single-threaded or explicitly synchronised
/// contexts.
pub struct WorldRng(SmallRng);

impl WorldRng {
    pub fn new(seed: u64) -> Self {
        WorldRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `WorldRng` with a different seed offset — useful for
    /// seeding independent generators deterministically from the root seed.
    pub fn child(&mut self, offset: u64) -> WorldRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        WorldRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
