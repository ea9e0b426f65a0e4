//! # Error Types
//!
//! Domain-specific error types for quote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quote-core errors (this file)                                          │
//! │  ├── CoreError        - Checkout rejected before the store is touched   │
//! │  └── ValidationError  - Checkout form field failures                    │
//! │                                                                         │
//! │  quote-store errors (separate crate)                                    │
//! │  └── StorageError     - Backing read/write failures                     │
//! │                                                                         │
//! │  quote-cli errors (app)                                                 │
//! │  └── CliError         - What the user sees (code + message)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note what is NOT here: unknown product ids, quantities <= 0 and unknown
//! quotation ids are not errors. The store treats them as no-ops, removals
//! and `None` respectively.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Reasons a checkout submission is refused.
///
/// These are raised by the checkout flow, never by the store itself: the
/// store's operations are total.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The cart has no items, so there is nothing to quote.
    #[error("Cannot create a quotation from an empty cart")]
    EmptyCart,

    /// A checkout is already running for this session.
    ///
    /// ## When This Occurs
    /// ```text
    /// Submit ──► checkout in flight (waiting on email)
    ///    │
    ///    └──► Submit again ──► CheckoutInFlight (no duplicate quotation)
    /// ```
    #[error("A quotation is already being submitted")]
    CheckoutInFlight,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Checkout form validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. an email without a domain).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::EmptyCart.to_string(),
            "Cannot create a quotation from an empty cart"
        );

        let err = ValidationError::TooLong {
            field: "customerPhone".to_string(),
            max: 30,
        };
        assert_eq!(err.to_string(), "customerPhone must be at most 30 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "customerEmail".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(
            core_err.to_string(),
            "Validation error: customerEmail is required"
        );
    }
}
