//! Error Types
//!
//! HTTP failures are normalized to `ApiError` at the fetch boundary.
//! Flow-level failures (forms, auth, storage) get their own enums.

use serde_json::Value;
use thiserror::Error;

/// Normalized request failure: `{message, status, data}`
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    /// HTTP status, absent when no response arrived
    pub status: Option<u16>,
    /// Decoded response body, if any
    pub data: Option<Value>,
}

impl ApiError {
    /// Failure with no response (connection refused, CORS, DNS...)
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            data: None,
        }
    }

    /// Failure before the request left the client (body encoding, form data)
    pub fn local(message: impl Into<String>) -> Self {
        Self::network(message)
    }

    /// Non-2xx response
    pub fn from_status(status: u16, data: Option<Value>) -> Self {
        Self {
            message: format!("Request failed with status code {}", status),
            status: Some(status),
            data,
        }
    }

    /// Success status with a body that does not match the expected shape
    pub fn decode(status: u16, err: impl std::fmt::Display, data: Option<Value>) -> Self {
        Self {
            message: err.to_string(),
            status: Some(status),
            data,
        }
    }

    /// True when the request never got a response
    pub fn is_network(&self) -> bool {
        self.status.is_none()
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    /// String field of the error body, e.g. DRF's `detail`
    pub fn body_str(&self, field: &str) -> Option<&str> {
        self.data.as_ref()?.get(field)?.as_str()
    }

    /// Whether the error body mentions `field` (DRF field errors)
    pub fn has_field(&self, field: &str) -> bool {
        self.data
            .as_ref()
            .and_then(|d| d.get(field))
            .map_or(false, |v| !v.is_null())
    }

    /// Server-provided detail, falling back to `fallback`
    pub fn detail_or(&self, fallback: &str) -> String {
        self.body_str("detail").unwrap_or(fallback).to_string()
    }
}

/// Client-side form validation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Email is required")]
    EmailRequired,
    #[error("Password is required")]
    PasswordRequired,
    #[error("First name is required")]
    FirstNameRequired,
    #[error("Last name is required")]
    LastNameRequired,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Password must be at least 8 characters long")]
    PasswordTooShort,
    #[error("Please enter your email address")]
    ResetEmailRequired,
    #[error("All fields are required.")]
    ResetFieldsRequired,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("Password must be at least 8 characters.")]
    ResetPasswordTooShort,
    #[error("Task title is required")]
    TaskTitleRequired,
    #[error("Please enter a title or content for your note.")]
    NoteEmpty,
    #[error("Please select a file to upload")]
    NoFileSelected,
}

/// Failures of the auth flows, already phrased for the user
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("{0}")]
    Failed(String),
}

impl AuthError {
    pub fn failed(message: impl Into<String>) -> Self {
        AuthError::Failed(message.into())
    }
}

/// Key-value storage failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("storage area unavailable")]
    Unavailable,
    #[error("storage write refused: {0}")]
    WriteRefused(String),
    #[error("cached user is not valid JSON: {0}")]
    Corrupt(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_error_shape() {
        let err = ApiError::from_status(404, Some(json!({"detail": "Not found."})));
        assert_eq!(err.message, "Request failed with status code 404");
        assert_eq!(err.status, Some(404));
        assert_eq!(err.body_str("detail"), Some("Not found."));
        assert!(!err.is_network());
    }

    #[test]
    fn test_network_error_has_no_status() {
        let err = ApiError::network("Failed to fetch");
        assert!(err.is_network());
        assert!(err.data.is_none());
        assert_eq!(err.detail_or("fallback"), "fallback");
    }

    #[test]
    fn test_field_errors() {
        let err = ApiError::from_status(400, Some(json!({"email": ["already exists"]})));
        assert!(err.has_field("email"));
        assert!(!err.has_field("password"));
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::PasswordTooShort.to_string(),
            "Password must be at least 8 characters long"
        );
        let auth: AuthError = ValidationError::EmailRequired.into();
        assert_eq!(auth.to_string(), "Email is required");
    }
}
