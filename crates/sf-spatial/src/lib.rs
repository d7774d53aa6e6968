//! `sf-spatial`: neighbor indexing and static obstacles.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`bins`]     | `BinIndex` (uniform grid of agent ids), `Cell`                |
//! | [`obstacle`] | `Obstacle` (axis-aligned rectangle + inner flag) and queries  |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                            |
//!
//! The bin index is the only structure in the simulator that is shared and
//! mutated outside an agent's own update.  `sf-sim` reads it during the
//! parallel force phase and rebuckets it single-threaded after the barrier.

pub mod bins;
pub mod error;
pub mod obstacle;


pub use bins::{BinIndex, Cell};
pub use error::{SpatialError, SpatialResult};
pub use obstacle::{
    Obstacle, closest_obstacle, closest_solid_obstacle, point_blocked, segment_blocked,
    segment_crosses_solid,
};
