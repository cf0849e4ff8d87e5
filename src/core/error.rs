//! Typed error handling for the invoice dashboard
//!
//! This module provides the error hierarchy shared by the actions, the
//! storage backends and the HTTP surface.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: malformed, missing or out-of-range form fields
//! - [`StorageError`]: failures reported by an invoice store
//! - [`AuthError`]: identity provider failures that escape the login action
//! - [`ActionError`]: hard failures raised by an action itself
//! - [`ConfigError`]: configuration parsing and loading
//!
//! # Example
//!
//! ```rust,ignore
//! use invoices::prelude::*;
//!
//! match actions.update_invoice(&id, &form).await {
//!     Ok(ActionOutcome::Redirect(to)) => println!("go to {}", to),
//!     Ok(ActionOutcome::State(state)) => println!("{:?}", state.message),
//!     Err(DashboardError::Validation(e)) => eprintln!("bad input: {}", e),
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use crate::core::auth::ProviderError;

/// The main error type for the invoice dashboard
#[derive(Debug)]
pub enum DashboardError {
    /// Form validation errors
    Validation(ValidationError),

    /// Storage backend errors
    Storage(StorageError),

    /// Identity provider errors
    Auth(AuthError),

    /// Errors raised by an action before it touches the store
    Action(ActionError),

    /// Configuration errors
    Config(ConfigError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::Validation(e) => write!(f, "{}", e),
            DashboardError::Storage(e) => write!(f, "{}", e),
            DashboardError::Auth(e) => write!(f, "{}", e),
            DashboardError::Action(e) => write!(f, "{}", e),
            DashboardError::Config(e) => write!(f, "{}", e),
            DashboardError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashboardError::Validation(e) => Some(e),
            DashboardError::Storage(e) => Some(e),
            DashboardError::Auth(e) => Some(e),
            DashboardError::Action(e) => Some(e),
            DashboardError::Config(e) => Some(e),
            DashboardError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DashboardError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Validation(_) => StatusCode::BAD_REQUEST,
            DashboardError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Auth(e) => e.status_code(),
            DashboardError::Action(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DashboardError::Validation(_) => "VALIDATION_ERROR",
            DashboardError::Storage(_) => "STORAGE_ERROR",
            DashboardError::Auth(e) => e.error_code(),
            DashboardError::Action(_) => "ACTION_FAILED",
            DashboardError::Config(_) => "CONFIG_ERROR",
            DashboardError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            DashboardError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            DashboardError::Action(ActionError::Failed { action, .. }) => {
                Some(serde_json::json!({ "action": action }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Field name to the ordered list of messages reported for it
pub type FieldErrors = IndexMap<String, Vec<String>>;

/// Errors related to form validation
#[derive(Debug)]
pub enum ValidationError {
    /// One or more fields failed their rules
    FieldErrors(FieldErrors),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for DashboardError {
    fn from(err: ValidationError) -> Self {
        DashboardError::Validation(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug)]
pub enum StorageError {
    /// Connection error
    ConnectionError { backend: String, message: String },

    /// Statement execution error
    QueryError { backend: String, message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ConnectionError { backend, message } => {
                write!(f, "Failed to connect to {}: {}", backend, message)
            }
            StorageError::QueryError { backend, message } => {
                write!(f, "{} query error: {}", backend, message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for DashboardError {
    fn from(err: StorageError) -> Self {
        DashboardError::Storage(err)
    }
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Identity provider failures that are not shown to the user as a sign-in code
#[derive(Debug)]
pub enum AuthError {
    /// The provider failed for a reason other than bad credentials
    Provider(ProviderError),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Provider(e) => write!(f, "Identity provider error: {}", e),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthError::Provider(e) => Some(e),
        }
    }
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Provider(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::Provider(_) => "AUTH_PROVIDER_ERROR",
        }
    }
}

impl From<AuthError> for DashboardError {
    fn from(err: AuthError) -> Self {
        DashboardError::Auth(err)
    }
}

impl From<ProviderError> for DashboardError {
    fn from(err: ProviderError) -> Self {
        DashboardError::Auth(AuthError::Provider(err))
    }
}

// =============================================================================
// Action Errors
// =============================================================================

/// Hard failures raised by an action
#[derive(Debug)]
pub enum ActionError {
    /// The action refused to run
    Failed { action: String, message: String },
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Failed { message, .. } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for ActionError {}

impl From<ActionError> for DashboardError {
    fn from(err: ActionError) -> Self {
        DashboardError::Action(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Configuration file not found
    FileNotFound { path: String },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::FileNotFound { path } => {
                write!(f, "Configuration file not found: {}", path)
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for DashboardError {
    fn from(err: ConfigError) -> Self {
        DashboardError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        DashboardError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for DashboardError {
    fn from(err: serde_yaml::Error) -> Self {
        DashboardError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<anyhow::Error> for DashboardError {
    fn from(err: anyhow::Error) -> Self {
        DashboardError::Internal(err.to_string())
    }
}

/// A specialized Result type for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::ProviderErrorKind;

    #[test]
    fn test_field_errors_display_lists_every_field() {
        let mut errors = FieldErrors::new();
        errors.insert("customerId".into(), vec!["Please select a customer.".into()]);
        errors.insert(
            "status".into(),
            vec!["Please select an invoice status.".into()],
        );
        let display = ValidationError::FieldErrors(errors).to_string();
        assert!(display.contains("customerId"));
        assert!(display.contains("status"));
    }

    #[test]
    fn test_validation_error_details_carry_fields() {
        let mut errors = FieldErrors::new();
        errors.insert("amount".into(), vec!["too small".into()]);
        let err: DashboardError = ValidationError::FieldErrors(errors).into();
        let response = err.to_response();
        assert_eq!(response.code, "VALIDATION_ERROR");
        let details = response.details.expect("details should be present");
        assert_eq!(details["fields"]["amount"][0], "too small");
    }

    #[test]
    fn test_action_error_displays_message_verbatim() {
        let err = ActionError::Failed {
            action: "delete_invoice".to_string(),
            message: "Failed to Delete Invoice".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to Delete Invoice");
        let err: DashboardError = err.into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "ACTION_FAILED");
    }

    #[test]
    fn test_provider_error_maps_to_bad_gateway() {
        let err: DashboardError =
            ProviderError::new(ProviderErrorKind::Other, "upstream timed out").into();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert!(err.to_string().contains("upstream timed out"));
    }

    #[test]
    fn test_storage_error() {
        let err = StorageError::ConnectionError {
            backend: "MySQL".to_string(),
            message: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("MySQL"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_from_serde_yaml_error() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("a: [").unwrap_err();
        let err: DashboardError = yaml_err.into();
        assert!(matches!(
            err,
            DashboardError::Config(ConfigError::ParseError { .. })
        ));
    }
}
