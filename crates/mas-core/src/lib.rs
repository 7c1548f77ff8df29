//! `mas-core` — foundational types for the `rust_mas` situated-agent framework.
//!
//! This crate is a dependency of every other `mas-*` crate.  It intentionally
//! has no `mas-*` dependencies and minimal external ones (`rand`, `uuid`,
//! `parking_lot`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`ids`]      | `ObjectId` — UUID identity for situated objects         |
//! | [`vector`]   | `Vector2d`, `Point2d` — plane math                      |
//! | [`shape`]    | `Shape2d`, `Bounds2d` — object footprints and AABBs     |
//! | [`time`]     | `StepClock`, `TimeUnit`, `TimeSnapshot`                 |
//! | [`rng`]      | `BodyRng` (per-body), `WorldRng` (global)               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.    |

pub mod ids;
pub mod rng;
pub mod shape;
pub mod time;
pub mod vector;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::ObjectId;
pub use rng::{BodyRng, WorldRng};
pub use shape::{Bounds2d, Shape2d};
pub use time::{StepClock, TimeSnapshot, TimeUnit};
pub use vector::{Point2d, Vector2d};
