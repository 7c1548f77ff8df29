//! `mas-env` — the environment tick pipeline.
//!
//! The environment owns every registered body, the shared fixed-step clock,
//! and the tick loop that turns buffered influences into motion and fresh
//! percepts.  World-specific resolution lives behind the
//! [`EnvironmentModel`] trait; [`ContinuousWorld`] is the stock open-plane
//! model.
//!
//! | Module          | Contents                                            |
//! |-----------------|-----------------------------------------------------|
//! | [`environment`] | `Environment` — registry, clock, six-phase tick     |
//! | [`model`]       | `EnvironmentModel`, `WorldView`/`WorldAccess` seams |
//! | [`continuous`]  | `ContinuousWorld` — open plane, R-tree perception   |
//! | [`events`]      | `WorldState` snapshots, `EnvironmentListener`       |
//! | [`error`]       | `EnvError` / `EnvResult`                            |

pub mod continuous;
pub mod environment;
pub mod error;
pub mod events;
pub mod model;


pub use continuous::ContinuousWorld;
pub use environment::Environment;
pub use error::{EnvError, EnvResult};
pub use events::{EnvironmentEvent, EnvironmentListener, WorldState};
pub use model::{EnvironmentModel, NoopModel, WorldAccess, WorldView};
