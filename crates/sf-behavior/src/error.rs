use thiserror::Error;

use sf_core::AgentId;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("behavior configuration error: {0}")]
    Config(String),

    #[error("{agent} follows {target}, which does not exist")]
    UnknownTarget { agent: AgentId, target: AgentId },
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
