use sf_behavior::BehaviorError;
use sf_core::SfError;
use sf_spatial::SpatialError;
use thiserror::Error;

/// Errors that can occur when loading a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Well-formed JSON describing something the simulator cannot run.
    #[error("invalid scenario: {0}")]
    Invalid(String),

    #[error(transparent)]
    Core(#[from] SfError),

    #[error("invalid world grid: {0}")]
    Spatial(#[from] SpatialError),

    #[error("invalid behavior: {0}")]
    Behavior(#[from] BehaviorError),
}

pub type ScenarioResult<T> = Result<T, ScenarioError>;
