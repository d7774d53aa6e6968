//! `sf-agent`: agent kinematic state and storage.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`body`]    | `Body` (position, velocity, physical parameters), `BodyParams` |
//! | [`store`]   | `AgentStore` (bodies indexed by `AgentId`), `AgentRngs`     |
//! | [`builder`] | `AgentStoreBuilder` (explicit placement and scatter spawn)  |
//!
//! The population is fixed for the whole run: `AgentId(i)` is always
//! `store.bodies[i]`.  Behaviors refer to other agents only by id.

pub mod body;
pub mod builder;
pub mod store;

#[cfg(test)]
mod tests;

pub use body::{Body, BodyParams};
pub use builder::AgentStoreBuilder;
pub use store::{AgentRngs, AgentStore};
