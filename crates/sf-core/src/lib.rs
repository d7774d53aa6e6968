//! `sf-core`: foundational types for the social-force crowd simulator.
//!
//! This crate is a dependency of every other `sf-*` crate.  It intentionally
//! has no `sf-*` dependencies and minimal external ones (`glam`, `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`geometry`]    | `Vec2`, `VecExt`, `Segment`, `Rect`, `Circle`         |
//! | [`ids`]         | `AgentId`                                             |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`error`]       | `SfError`, `SfResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to `SimConfig`, `Tick` and  |
//!           | `AgentId`.  Required by `sf-scenario`.                     |

pub mod error;
pub mod geometry;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SfError, SfResult};
pub use geometry::{Circle, Rect, Segment, Vec2, VecExt};
pub use ids::AgentId;
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, SimConfig, Tick};
