//! Framework error type.
//!
//! Sub-crates define their own error enums and either convert `SfError` into
//! them via `From` impls or keep it as one variant.

use thiserror::Error;

use crate::AgentId;

/// The top-level error type for `sf-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum SfError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `sf-*` crates.
pub type SfResult<T> = Result<T, SfError>;
