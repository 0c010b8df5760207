//! Error types for the Marathon deployer

use thiserror::Error;

/// Main error type for the Marathon deployer
#[derive(Error, Debug)]
pub enum DeployerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    /// Marathon answered with a non-success status
    #[error("Orchestrator error: {0}")]
    OrchestratorError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Server error: {0}")]
    ServerError(String),
}

impl DeployerError {
    /// Whether the error is a failed or timed out call to the orchestrator
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            DeployerError::HttpError(_) | DeployerError::OrchestratorError(_)
        )
    }
}
