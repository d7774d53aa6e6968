//! `sf-nav`: goals, paths, waypoint triangulation, and routing.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                 |
//! |-------------------|----------------------------------------------------------|
//! | [`goal`]          | `Goal` (target + arrival range + loiter), `Path` (FIFO)  |
//! | [`triangulation`] | `Triangle`, `Triangulation` (Bowyer–Watson + R-tree)     |
//! | [`router`]        | `Router` trait, `AStarRouter`                            |
//! | [`error`]         | `NavError`, `NavResult<T>`                               |
//!
//! The mesh is built once per scenario from the candidate waypoints and is
//! read-only afterward, so a single `Triangulation` is shared by every agent
//! (and every Rayon worker) for the whole run.

pub mod error;
pub mod goal;
pub mod router;
pub mod triangulation;

#[cfg(test)]
mod tests;

pub use error::{NavError, NavResult};
pub use goal::{Goal, Path};
pub use router::{AStarRouter, Router};
pub use triangulation::{Triangle, Triangulation};
