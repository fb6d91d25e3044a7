//! # POS Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Bridge state        │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Http{status}   │  │  NotConnected           │ │
//! │  │  InvalidUrl     │  │  Connection     │  │  NotAuthenticated       │ │
//! │  │  ConfigLoad     │  │  Timeout        │  │  ProductNotFound        │ │
//! │  │                 │  │  Decode         │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Every variant renders a one-line `user_message()` for the toast.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for POS operations.
pub type PosResult<T> = Result<T, PosError>;

#[derive(Debug, Error)]
pub enum PosError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid POS configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid POS URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to load POS config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save POS config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The POS answered with a non-2xx status.
    #[error("HTTP error! status: {status}")]
    Http { status: u16, body: String },

    /// Could not reach the POS at all.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("POS request timed out")]
    Timeout,

    /// Response body was not the JSON we expected.
    #[error("Unexpected POS response: {0}")]
    Decode(String),

    // =========================================================================
    // Bridge State Errors
    // =========================================================================
    #[error("POS is not connected")]
    NotConnected,

    #[error("Sign in to sync with the POS")]
    NotAuthenticated,

    #[error("Product not found: {0}")]
    ProductNotFound(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for PosError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PosError::Timeout
        } else if err.is_decode() {
            PosError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            PosError::Http {
                status: status.as_u16(),
                body: String::new(),
            }
        } else {
            PosError::ConnectionFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PosError {
    fn from(err: serde_json::Error) -> Self {
        PosError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for PosError {
    fn from(err: url::ParseError) -> Self {
        PosError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for PosError {
    fn from(err: std::io::Error) -> Self {
        PosError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for PosError {
    fn from(err: toml::de::Error) -> Self {
        PosError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for PosError {
    fn from(err: toml::ser::Error) -> Self {
        PosError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl PosError {
    /// True for failures a later attempt may not hit (network, 5xx, 429).
    pub fn is_retryable(&self) -> bool {
        match self {
            PosError::ConnectionFailed(_) | PosError::Timeout => true,
            PosError::Http { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            PosError::InvalidConfig(_)
                | PosError::InvalidUrl(_)
                | PosError::ConfigLoadFailed(_)
                | PosError::ConfigSaveFailed(_)
        )
    }

    /// One line for the toast surface.
    pub fn user_message(&self) -> String {
        match self {
            PosError::NotConnected => "POS is offline. Test the connection and try again.".into(),
            PosError::NotAuthenticated => "Sign in to sync with the POS.".into(),
            PosError::Timeout => "The POS did not answer in time.".into(),
            PosError::ConnectionFailed(_) => "Could not reach the POS.".into(),
            PosError::Http { status, .. } => format!("POS rejected the request (HTTP {status})."),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(PosError::Timeout.is_retryable());
        assert!(PosError::ConnectionFailed("refused".into()).is_retryable());
        assert!(PosError::Http {
            status: 503,
            body: String::new()
        }
        .is_retryable());
        assert!(PosError::Http {
            status: 429,
            body: String::new()
        }
        .is_retryable());

        assert!(!PosError::Http {
            status: 401,
            body: String::new()
        }
        .is_retryable());
        assert!(!PosError::NotConnected.is_retryable());
        assert!(!PosError::InvalidConfig("x".into()).is_retryable());
    }

    #[test]
    fn test_user_messages_are_single_line() {
        let errors = [
            PosError::NotConnected,
            PosError::NotAuthenticated,
            PosError::Timeout,
            PosError::Http {
                status: 500,
                body: "boom\nstack".into(),
            },
            PosError::Decode("expected array".into()),
        ];
        for err in errors {
            assert!(!err.user_message().contains('\n'), "{err:?}");
        }
    }

    #[test]
    fn test_http_display() {
        let err = PosError::Http {
            status: 404,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "HTTP error! status: 404");
    }

    #[test]
    fn test_config_errors() {
        assert!(PosError::InvalidUrl("x".into()).is_config_error());
        assert!(PosError::ConfigSaveFailed("x".into()).is_config_error());
        assert!(!PosError::Timeout.is_config_error());
        assert!(!PosError::NotAuthenticated.is_config_error());
    }
}
