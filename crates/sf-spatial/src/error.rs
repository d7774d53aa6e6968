//! Spatial-subsystem error type.

use thiserror::Error;

use sf_core::AgentId;

/// Errors produced by `sf-spatial`.
///
/// Both index variants are contract violations by the caller: the simulation
/// loop treats them as fatal rather than as an expected outcome.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("{0} is not in the bin index")]
    NotIndexed(AgentId),

    #[error("{0} is already in the bin index")]
    AlreadyIndexed(AgentId),

    #[error("invalid bin grid: {0}")]
    InvalidGrid(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
