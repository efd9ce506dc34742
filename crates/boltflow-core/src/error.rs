//! Domain Errors
//!
//! Every failure the core can report to the presentation layer.
//! All of them are recoverable: the user can retry the action.

use thiserror::Error;

/// Common result type for core operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Core error taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Bad credentials, weak password, duplicate account, expired session
    #[error("{0}")]
    Auth(String),

    /// Input rejected before reaching the backend
    #[error("{0}")]
    Validation(String),

    /// Reading tasks failed
    #[error("Failed to load tasks: {0}")]
    Fetch(String),

    /// Mutation or delete targeted a task that does not exist
    #[error("Task {0} not found")]
    NotFound(String),

    #[error("You must be signed in")]
    NotSignedIn,

    /// The backend answered but rejected the request
    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// The request never completed
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl DomainError {
    pub fn auth(msg: impl Into<String>) -> Self {
        DomainError::Auth(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// True when the backend never saw the request
    pub fn is_transport(&self) -> bool {
        matches!(self, DomainError::Transport(_))
    }
}

impl From<reqwest::Error> for DomainError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            DomainError::Service {
                status: e.status().map(|s| s.as_u16()).unwrap_or(0),
                message: format!("unexpected response body: {}", e),
            }
        } else {
            DomainError::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(DomainError::auth("Invalid login credentials").to_string(), "Invalid login credentials");
        assert_eq!(DomainError::NotFound("abc".into()).to_string(), "Task abc not found");
        assert_eq!(
            DomainError::Service { status: 409, message: "conflict".into() }.to_string(),
            "Service error (409): conflict"
        );
    }

    #[test]
    fn test_is_transport() {
        assert!(DomainError::Transport("offline".into()).is_transport());
        assert!(!DomainError::Fetch("offline".into()).is_transport());
    }
}
