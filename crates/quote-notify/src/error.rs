//! # Email Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Email Error Categories                               │
//! │                                                                         │
//! │  Rejected   provider answered, delivery refused (mock 5% failure)      │
//! │  Provider   provider could not be reached or misbehaved                │
//! │  Timeout    no answer within the configured delivery timeout           │
//! │                                                                         │
//! │  All three end up as SendOutcome { success: false, error } at the      │
//! │  service edge; the quotation itself is never rolled back.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use thiserror::Error;

/// Result type alias for email delivery.
pub type EmailResult<T> = Result<T, EmailError>;

/// Email delivery failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    /// The provider refused the message. The text is shown to the customer
    /// as-is.
    #[error("{0}")]
    Rejected(String),

    /// The provider itself failed.
    #[error("{provider} error: {message}")]
    Provider { provider: String, message: String },

    /// Delivery took longer than the configured timeout.
    #[error("Email delivery timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            EmailError::Rejected("Mock error: Email service temporarily unavailable".into())
                .to_string(),
            "Mock error: Email service temporarily unavailable"
        );
        assert_eq!(
            EmailError::Provider {
                provider: "sendgrid".into(),
                message: "401".into()
            }
            .to_string(),
            "sendgrid error: 401"
        );
        assert_eq!(
            EmailError::Timeout(Duration::from_secs(10)).to_string(),
            "Email delivery timed out after 10s"
        );
    }
}
