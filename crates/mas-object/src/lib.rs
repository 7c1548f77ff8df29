//! `mas-object` — situated and mobile entities for the `rust_mas` framework.
//!
//! A [`SituatedObject`] is anything placed in a world: an identity, a
//! position, a footprint, an optional name, and a kind tag.  A
//! [`MobileObject`] wraps one and adds orientation, motion limits, and the
//! kinematic/steering integration math the environment uses to turn motion
//! requests into bounded displacements.
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`situated`] | `SituatedObject`, `ObjectKind`                        |
//! | [`mobile`]   | `MobileObject`, `MotionLimits`, motion integration    |

pub mod mobile;
pub mod situated;


pub use mobile::{MobileObject, MotionLimits};
pub use situated::{ObjectKind, SituatedObject};
