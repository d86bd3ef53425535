use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum InsightError {
    #[error("Cannot parse config: {0}")]
    ConfigParsingError(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
}

/// Rejections raised while turning a form draft into credentials.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("port must be a number between 0 and 65535, got '{0}'")]
    InvalidPort(String),
}

impl From<std::io::Error> for InsightError {
    fn from(err: std::io::Error) -> Self {
        InsightError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for InsightError {
    fn from(err: serde_json::Error) -> Self {
        InsightError::Storage(err.to_string())
    }
}
