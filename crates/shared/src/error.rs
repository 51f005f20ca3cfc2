use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Validation,
    Internal,
}

/// Wire-serializable error body returned by the dashboard server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Failure raised while applying the hydrate action; the orchestrator
/// converts it into the sticky error-loading flag.
#[derive(Debug, Error)]
pub enum HydrationError {
    #[error("layout has not been committed yet")]
    MissingLayout,
    #[error("component paths have not been computed yet")]
    MissingPaths,
    #[error("dependency graph has not been computed yet")]
    MissingGraph,
    #[error("application already hydrated")]
    AlreadyHydrated,
}
