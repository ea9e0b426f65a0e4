//! # CLI Error Type
//!
//! Unified error type for every `quote` subcommand.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the quote CLI                          │
//! │                                                                         │
//! │  Subcommand handler: Result<String, CliError>                          │
//! │         │                                                               │
//! │         ├── CoreError::EmptyCart ─────────────┐                         │
//! │         ├── ValidationError::Required ────────┤                         │
//! │         ├── StorageError::Io ─────────────────┼──► CliError { code,    │
//! │         ├── toml::de::Error ──────────────────┤        message }        │
//! │         └── product not in catalog ───────────┘                         │
//! │                                                                         │
//! │  main: prints "[CODE] message" to stderr, exits non-zero               │
//! │        (--json prints {"code": "...", "message": "..."} instead)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Email failures during checkout are not errors: the quotation is already
//! saved and the failure is reported through the notification.

use serde::Serialize;
use thiserror::Error;

use quote_core::{CoreError, ValidationError};
use quote_notify::EmailError;
use quote_store::StorageError;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Error returned from a subcommand.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Quotation not found: QT-1-abc"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
pub struct CliError {
    /// Machine-readable error code for scripting
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for CLI failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or quotation not found
    NotFound,

    /// Checkout form or argument validation failed
    ValidationError,

    /// Checkout refused (empty cart, already submitting)
    CheckoutError,

    /// Local storage failed
    StorageError,

    /// Email could not be delivered
    EmailError,

    /// Config file unreadable or malformed
    ConfigLoad,

    /// Config values rejected by validation
    InvalidConfig,

    /// Catalog file unreadable or malformed
    CatalogError,

    /// Anything else
    Internal,
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        CliError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    pub fn config_load(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ConfigLoad, message)
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::InvalidConfig, message)
    }

    pub fn catalog(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::CatalogError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self.code {
            ErrorCode::ValidationError | ErrorCode::CheckoutError => 2,
            ErrorCode::NotFound => 3,
            ErrorCode::ConfigLoad | ErrorCode::InvalidConfig => 78,
            _ => 1,
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            CoreError::EmptyCart | CoreError::CheckoutInFlight => {
                CliError::new(ErrorCode::CheckoutError, err.to_string())
            }
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::validation(err.to_string())
    }
}

impl From<StorageError> for CliError {
    fn from(err: StorageError) -> Self {
        tracing::error!("Storage error: {}", err);
        CliError::new(ErrorCode::StorageError, err.to_string())
    }
}

impl From<EmailError> for CliError {
    fn from(err: EmailError) -> Self {
        CliError::new(ErrorCode::EmailError, err.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::config_load(format!("Invalid config file: {}", err))
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        CliError::internal(format!("Failed to encode config: {}", err))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::internal(format!("JSON error: {}", err))
    }
}
