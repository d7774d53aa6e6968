//! `sf-behavior`: per-agent steering state machines.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`context`]    | `BehaviorContext<'a>`: read-only tick snapshot               |
//! | [`steering`]   | `Steering`: what a behavior hands the force model            |
//! | [`goal`]       | `GoalBehavior`: seek one goal, latch on arrival, loiter      |
//! | [`follower`]   | `FollowerBehavior`: trail another agent by line of sight     |
//! | [`wander`]     | `WanderBehavior`: hop between reachable candidate goals      |
//! | [`path`]       | `PathBehavior`: consume a `Path` goal by goal                |
//! | [`pathfinder`] | `PathfinderBehavior`: random destination, A* route, replans  |
//! | [`behavior`]   | `Behavior`: the tagged union the simulator stores per agent  |
//! | [`error`]      | `BehaviorError`, `BehaviorResult<T>`                          |
//!
//! # Design notes
//!
//! Every behavior answers one question per tick: *which point should this
//! agent walk toward?*  Answering with the agent's own position means "hold":
//! the force model then brakes the agent instead of driving it.
//!
//! Behaviors own only their own state.  Other agents are read through the
//! start-of-tick snapshot in [`BehaviorContext`] and referred to by
//! `AgentId`, and randomness comes from the agent's own `AgentRng`, so
//! stepping agents in parallel gives the same result as stepping them in
//! order.

pub mod behavior;
pub mod context;
pub mod error;
pub mod follower;
pub mod goal;
pub mod path;
pub mod pathfinder;
pub mod steering;
pub mod wander;

#[cfg(test)]
mod tests;

pub use behavior::Behavior;
pub use context::BehaviorContext;
pub use error::{BehaviorError, BehaviorResult};
pub use follower::FollowerBehavior;
pub use goal::GoalBehavior;
pub use path::PathBehavior;
pub use pathfinder::PathfinderBehavior;
pub use steering::Steering;
pub use wander::WanderBehavior;
