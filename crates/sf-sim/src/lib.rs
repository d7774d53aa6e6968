//! `sf-sim`: tick loop orchestrator for the social-force crowd simulator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Snapshot: copy every body; all reads this tick see this copy.
//!   ② Agents  : for each agent (parallel with the `parallel` feature):
//!                  Behavior::steer        → target
//!                  BinIndex::surrounding  → neighbors from the snapshot
//!                  ForceModel::step       → new velocity and position
//!   ③ Rebucket: BinIndex::update, single-threaded, after every agent.
//!   ④ Observe : on_snapshot every output_interval_ticks.
//! ```
//!
//! Each agent writes only its own body, behavior and RNG, so the sequential
//! and parallel builds give identical results.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs phase ② on Rayon's thread pool.                   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sf_agent::AgentStoreBuilder;
//! use sf_core::SimConfig;
//! use sf_nav::AStarRouter;
//! use sf_sim::{NoopObserver, SimBuilder};
//!
//! let (store, rngs) = builder.build();
//! let mut sim = SimBuilder::new(config, store, rngs, bins, AStarRouter::default())
//!     .behaviors(behaviors)
//!     .obstacles(obstacles)
//!     .mesh(mesh)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
