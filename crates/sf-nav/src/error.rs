//! Navigation error type.

use thiserror::Error;

use sf_core::Vec2;

/// Errors produced by `sf-nav`.
///
/// Both variants are ordinary outcomes of a route query (an unreachable
/// destination, a degenerate waypoint set); behaviors absorb them and hold
/// position until their next replan.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NavError {
    #[error("no path from {from} to {to}")]
    NoPath { from: Vec2, to: Vec2 },

    #[error("navigation mesh has no vertices")]
    EmptyMesh,
}

pub type NavResult<T> = Result<T, NavError>;
