//! `sf-scenario`: JSON scenario loading for the social-force crowd simulator.
//!
//! A scenario file describes the world grid, obstacles, candidate waypoints,
//! and the agents with their behaviors (see [`file`] for the format).
//! [`Scenario::load_from_file`] parses and validates it; every configuration
//! error surfaces here, before tick 0.
//!
//! ```rust,ignore
//! let scenario = Scenario::load_from_file(Path::new("corridor.json"))?;
//! let mut sim = scenario.into_sim(AStarRouter::default())?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod error;
pub mod file;
pub mod loader;


pub use error::{ScenarioError, ScenarioResult};
pub use file::ScenarioFile;
pub use loader::Scenario;
