//! `mas-body` — agent bodies and the influence/percept exchange types.
//!
//! Agents never touch the world directly.  Each tick they *influence* their
//! body (motion requests, kill requests, custom messages) and read back
//! *percepts* (snapshots of what the body perceives).  The environment is
//! the only consumer of the buffered influences and the only producer of
//! percepts.
//!
//! | Module        | Contents                                             |
//! |---------------|------------------------------------------------------|
//! | [`influence`] | `Influence`, `InfluenceKind`, `MotionInfluence`      |
//! | [`percept`]   | `Percept` snapshots                                  |
//! | [`frustum`]   | `Frustum` perception fields of view                  |
//! | [`body`]      | `AgentBody` — mobile entity + influence inbox        |

pub mod body;
pub mod frustum;
pub mod influence;
pub mod percept;

#[cfg(test)]
mod tests;

pub use body::AgentBody;
pub use frustum::Frustum;
pub use influence::{Influence, InfluenceKind, MotionInfluence, MotionKind};
pub use percept::Percept;
