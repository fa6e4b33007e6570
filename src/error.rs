// ============================================================================
// ERRORS - Failures surfaced by the services and stores
// ============================================================================

use serde::Deserialize;
use thiserror::Error;

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("not authorized (HTTP {}){}", .status, display_message(.message))]
    Auth {
        status: u16,
        message: Option<String>,
    },
    #[error("request rejected (HTTP {}){}", .status, display_message(.message))]
    Validation {
        status: u16,
        message: Option<String>,
    },
    #[error("resource not found{}", display_message(.message))]
    NotFound { message: Option<String> },
    #[error("unexpected response (HTTP {}){}", .status, display_message(.message))]
    Unknown {
        status: u16,
        message: Option<String>,
    },
    #[error("JSON format error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("localStorage is not available")]
    Unavailable,
    #[error("could not write key {key:?}: {reason}")]
    Write { key: String, reason: String },
}

fn display_message(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

/// Error body shape returned by the API: `{"error": "..."}`, sometimes
/// `{"message": "..."}`.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl ApiError {
    /// Classifies a non-2xx response.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = extract_message(body);
        match status {
            401 | 403 => Self::Auth { status, message },
            404 => Self::NotFound { message },
            400..=499 => Self::Validation { status, message },
            _ => Self::Unknown { status, message },
        }
    }

    /// Message provided by the server, if the response carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Auth { message, .. }
            | Self::Validation { message, .. }
            | Self::NotFound { message }
            | Self::Unknown { message, .. } => message.as_deref(),
            Self::Transport(_) | Self::Json(_) | Self::Storage(_) | Self::InvalidBaseUrl(_) => {
                None
            }
        }
    }

    /// Text shown to the user: the server message or `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. }
            | Self::Validation { status, .. }
            | Self::Unknown { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            _ => None,
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .error
        .or(parsed.message)
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_statuses() {
        assert!(matches!(
            ApiError::from_response(401, ""),
            ApiError::Auth { status: 401, .. }
        ));
        assert!(matches!(
            ApiError::from_response(403, ""),
            ApiError::Auth { status: 403, .. }
        ));
        assert!(matches!(
            ApiError::from_response(404, ""),
            ApiError::NotFound { .. }
        ));
        assert!(matches!(
            ApiError::from_response(422, ""),
            ApiError::Validation { status: 422, .. }
        ));
        assert!(matches!(
            ApiError::from_response(502, "Bad Gateway"),
            ApiError::Unknown { status: 502, message: None }
        ));
    }

    #[test]
    fn extracts_server_message() {
        let err = ApiError::from_response(400, r#"{"error":"Email already registered"}"#);
        assert_eq!(err.server_message(), Some("Email already registered"));
        assert_eq!(err.user_message("Failed to register"), "Email already registered");

        let err = ApiError::from_response(400, r#"{"message":"start_date is required"}"#);
        assert_eq!(err.server_message(), Some("start_date is required"));
    }

    #[test]
    fn falls_back_without_message() {
        let err = ApiError::from_response(500, "<html>oops</html>");
        assert_eq!(err.server_message(), None);
        assert_eq!(err.user_message("Failed to fetch trips"), "Failed to fetch trips");

        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.user_message("Failed to login"), "Failed to login");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn display_includes_message() {
        let err = ApiError::from_response(404, r#"{"error":"Trip not found"}"#);
        assert_eq!(err.to_string(), "resource not found: Trip not found");
        assert_eq!(err.status(), Some(404));
    }
}
