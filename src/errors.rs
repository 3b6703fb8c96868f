use thiserror::Error;

/// Error type for failures of the backing stores behind the planner.
///
/// Expected validation outcomes (a rejected menu, an assignment outside the
/// window) are never reported through this type.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type PlannerResult<T> = Result<T, PlannerError>;
