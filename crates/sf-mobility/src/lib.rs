//! `sf-mobility`: social-force laws and the per-agent integration step.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`params`]     | `ForceParams`: every force constant, tunable              |
//! | [`forces`]     | will, intermediate, near, contact and wall force laws      |
//! | [`correction`] | overlap and obstacle penetration fix-ups, motion inhibition, kinematic constraint |
//! | [`engine`]     | `ForceModel::step`, `Drive`                                |
//!
//! # One step
//!
//! ```text
//! forces ─► position correction ─► v += F/m·dt ─► inhibition ─► kinematic clamp ─► p += v·dt
//! ```
//!
//! Every function reads other agents only through the `&Body` references it
//! is given (the start-of-tick snapshot) and writes only the agent being
//! stepped.

pub mod correction;
pub mod engine;
pub mod forces;
pub mod params;


pub use engine::{Drive, ForceModel};
pub use params::ForceParams;
