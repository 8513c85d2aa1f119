// crates/backend-lib/src/error.rs

//! Central error type.
use thiserror::Error;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    Figment(#[from] figment::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "VAL_001",
            AppError::Internal(_) => "INT_001",
            AppError::Config(_) => "CFG_001",
            AppError::Figment(_) => "CFG_002",
            AppError::Io(_) => "IO_001",
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::InvalidInput(_) => "Invalid input provided".to_string(),
            AppError::Internal(_) => "An internal error occurred".to_string(),
            AppError::Config(_) | AppError::Figment(_) => "Invalid configuration".to_string(),
            AppError::Io(_) => "Internal error".to_string(),
        }
    }

    /// Caller mistakes, as opposed to faults in the system itself
    pub fn is_caller_error(&self) -> bool {
        matches!(self, AppError::InvalidInput(_))
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}
