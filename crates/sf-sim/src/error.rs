use sf_behavior::BehaviorError;
use sf_core::SfError;
use sf_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error(transparent)]
    Core(#[from] SfError),

    /// The bin index lost track of an agent.  Never recovered from.
    #[error("spatial index inconsistency: {0}")]
    Index(#[from] SpatialError),

    #[error("behavior error: {0}")]
    Behavior(#[from] BehaviorError),
}

pub type SimResult<T> = Result<T, SimError>;
