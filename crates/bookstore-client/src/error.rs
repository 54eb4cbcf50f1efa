//! # Client Error Types
//!
//! Error types for everything that talks to the bookstore API.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │ Authentication  │  │   Transport     │  │     HTTP Status         │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │ NotAuthenticated│  │ Transport       │  │ Http { status, message }│ │
//! │  │ (no network)    │  │ Decode          │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │     Input       │  │      Lifecycle          │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Validation     │  │  Cancelled              │ │
//! │  │  InvalidUrl     │  │  Core           │  │  TokenStore             │ │
//! │  │  ConfigLoad/Save│  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No variant is retried. Every failure ends the action that triggered it.

use bookstore_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Client error type covering every failure a client operation can report.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Authentication
    // =========================================================================
    /// No access token is available. Raised before any request is made.
    #[error("Not signed in")]
    NotAuthenticated,

    // =========================================================================
    // Transport / HTTP
    // =========================================================================
    /// The request never produced a response (DNS, connect, timeout, TLS).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("Server returned {status}{}", .message.as_deref().map(|m| format!(": {}", m)).unwrap_or_default())]
    Http { status: u16, message: Option<String> },

    /// The response body did not have the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(String),

    // =========================================================================
    // Input
    // =========================================================================
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Core(CoreError),

    // =========================================================================
    // Configuration
    // =========================================================================
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Session / Lifecycle
    // =========================================================================
    /// Reading or writing the persisted token failed.
    #[error("Token storage error: {0}")]
    TokenStore(String),

    /// The owning store was torn down while the operation was in flight.
    #[error("Operation cancelled")]
    Cancelled,
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(v) => ClientError::Validation(v),
            other => ClientError::Core(other),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::Http {
                status: status.as_u16(),
                message: None,
            }
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Sentence suitable for showing to an end user.
    ///
    /// Transport and HTTP failures read the same, except that a message
    /// supplied by the server is preferred when present.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::NotAuthenticated => "Please log in to continue.".to_string(),
            ClientError::Http {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ClientError::Http { status: 401, .. } | ClientError::Http { status: 403, .. } => {
                "Your session is not allowed to do that. Please log in again.".to_string()
            }
            ClientError::Transport(_) | ClientError::Http { .. } | ClientError::Decode(_) => {
                "Something went wrong talking to the bookstore. Please try again.".to_string()
            }
            ClientError::Validation(err) => err.to_string(),
            ClientError::Core(err) => err.to_string(),
            ClientError::InvalidConfig(_)
            | ClientError::InvalidUrl(_)
            | ClientError::ConfigLoadFailed(_)
            | ClientError::ConfigSaveFailed(_) => {
                format!("Configuration problem: {}", self)
            }
            ClientError::TokenStore(_) => "Could not access the saved session.".to_string(),
            ClientError::Cancelled => "The operation was cancelled.".to_string(),
        }
    }

    /// Returns true if the user needs to (re)authenticate.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            ClientError::NotAuthenticated
                | ClientError::Http { status: 401, .. }
                | ClientError::Http { status: 403, .. }
        )
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }

    /// Returns true if the request never got an HTTP response.
    pub fn is_transport_error(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_display_includes_message() {
        let err = ClientError::Http {
            status: 400,
            message: Some("Email already registered".into()),
        };
        assert_eq!(err.to_string(), "Server returned 400: Email already registered");

        let err = ClientError::Http {
            status: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "Server returned 500");
    }

    #[test]
    fn test_user_message_prefers_server_message() {
        let generic = ClientError::Transport("connection refused".into()).user_message();
        let status = ClientError::Http {
            status: 500,
            message: None,
        }
        .user_message();
        assert_eq!(generic, status);

        let custom = ClientError::Http {
            status: 400,
            message: Some("Book not found".into()),
        };
        assert_eq!(custom.user_message(), "Book not found");
    }

    #[test]
    fn test_categorization() {
        assert!(ClientError::NotAuthenticated.is_auth_error());
        assert!(ClientError::Http {
            status: 401,
            message: None
        }
        .is_auth_error());
        assert!(!ClientError::Transport("x".into()).is_auth_error());

        assert!(ClientError::InvalidUrl("x".into()).is_config_error());
        assert!(!ClientError::Cancelled.is_config_error());

        assert!(ClientError::Transport("x".into()).is_transport_error());
        assert!(!ClientError::Http {
            status: 502,
            message: None
        }
        .is_transport_error());
    }

    #[test]
    fn test_core_validation_flattens() {
        let err: ClientError = CoreError::Validation(ValidationError::Required {
            field: "title".into(),
        })
        .into();
        assert!(matches!(err, ClientError::Validation(_)));

        let err: ClientError = CoreError::LineNotFound("l1".into()).into();
        assert!(matches!(err, ClientError::Core(_)));
    }
}
