use thiserror::Error;

/// Status the backend uses to say the session id is no longer known.
pub const SESSION_EXPIRED_STATUS: u16 = 440;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("backend returned status {status}")]
    Server { status: u16, error: Option<String> },
    /// Status 440. `error` is the body's message, if it sent one.
    #[error("session expired")]
    SessionExpired { error: Option<String> },
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The backend's own `error` text, when it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { error, .. } | ApiError::SessionExpired { error } => {
                error.as_deref().filter(|msg| !msg.is_empty())
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message() {
        let err = ApiError::Server {
            status: 500,
            error: Some("relation \"orders\" does not exist".to_string()),
        };
        assert_eq!(err.server_message(), Some("relation \"orders\" does not exist"));
        assert_eq!(err.to_string(), "backend returned status 500");

        let err = ApiError::Server {
            status: 502,
            error: Some(String::new()),
        };
        assert_eq!(err.server_message(), None);
        assert_eq!(ApiError::Transport("refused".to_string()).server_message(), None);

        let err = ApiError::SessionExpired {
            error: Some("Session not found".to_string()),
        };
        assert_eq!(err.server_message(), Some("Session not found"));
        assert_eq!(ApiError::SessionExpired { error: None }.server_message(), None);
    }
}
