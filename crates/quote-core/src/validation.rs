//! # Validation Module
//!
//! Checkout form validation.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Consumer (form, CLI flags)                                   │
//! │  └── Required inputs present                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Checkout flow                                                │
//! │  └── THIS MODULE: trim, required, length, email shape                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: QuotationStore                                               │
//! │  └── No validation at all: store operations are total                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use quote_core::validation::validate_contact;
//! use quote_core::CustomerContact;
//!
//! let raw = CustomerContact::new("  Ana ", "a@x.com", "123").with_notes("   ");
//! let contact = validate_contact(&raw).unwrap();
//! assert_eq!(contact.customer_name, "Ana");
//! assert_eq!(contact.notes, None);
//! ```

use crate::error::ValidationError;
use crate::types::CustomerContact;
use crate::{MAX_CUSTOMER_NAME_LEN, MAX_CUSTOMER_PHONE_LEN, MAX_NOTES_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

fn required<'a>(field: &str, value: &'a str) -> ValidationResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(value)
}

fn max_len(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

/// Validates the customer name. Returns the trimmed name.
pub fn validate_customer_name(name: &str) -> ValidationResult<String> {
    let name = required("customerName", name)?;
    max_len("customerName", name, MAX_CUSTOMER_NAME_LEN)?;
    Ok(name.to_string())
}

/// Validates the customer email. Returns the trimmed address.
///
/// ## Rules
/// - Must not be blank
/// - Exactly one `@`, with a non-empty local part
/// - Domain contains a dot that is neither first nor last
/// - No whitespace
///
/// This is a shape check, not deliverability: the confirmation email is the
/// real test and its failure never blocks the quotation.
pub fn validate_customer_email(email: &str) -> ValidationResult<String> {
    let email = required("customerEmail", email)?;

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "customerEmail".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("must contain '@'"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must look like name@domain"));
    }

    let dot_ok = domain
        .find('.')
        .is_some_and(|pos| pos > 0 && !domain.ends_with('.'));
    if !dot_ok {
        return Err(invalid("domain must contain a dot"));
    }

    Ok(email.to_string())
}

/// Validates the customer phone. Returns the trimmed number.
pub fn validate_customer_phone(phone: &str) -> ValidationResult<String> {
    let phone = required("customerPhone", phone)?;
    max_len("customerPhone", phone, MAX_CUSTOMER_PHONE_LEN)?;
    Ok(phone.to_string())
}

/// Validates optional notes. Blank notes become `None`.
pub fn validate_notes(notes: Option<&str>) -> ValidationResult<Option<String>> {
    match notes.map(str::trim) {
        None | Some("") => Ok(None),
        Some(notes) => {
            max_len("notes", notes, MAX_NOTES_LEN)?;
            Ok(Some(notes.to_string()))
        }
    }
}

/// Validates a whole checkout form and returns the normalized contact.
pub fn validate_contact(contact: &CustomerContact) -> ValidationResult<CustomerContact> {
    Ok(CustomerContact {
        customer_name: validate_customer_name(&contact.customer_name)?,
        customer_email: validate_customer_email(&contact.customer_email)?,
        customer_phone: validate_customer_phone(&contact.customer_phone)?,
        notes: validate_notes(contact.notes.as_deref())?,
    })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity typed by a user before it is added to the cart.
///
/// No upper bound: there is no inventory backend to check against.
pub fn validate_add_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validate_customer_email() {
        assert!(validate_customer_email("a@x.com").is_ok());
        assert!(validate_customer_email(" juan@empresa.es ").is_ok());

        assert!(validate_customer_email("").is_err());
        assert!(validate_customer_email("no-at-sign.com").is_err());
        assert!(validate_customer_email("@x.com").is_err());
        assert!(validate_customer_email("a@localhost").is_err());
        assert!(validate_customer_email("a@.com").is_err());
        assert!(validate_customer_email("a@x.").is_err());
        assert!(validate_customer_email("a b@x.com").is_err());
        assert!(validate_customer_email("a@b@x.com").is_err());
    }

    #[test]
    fn test_required_fields_are_trimmed() {
        assert_eq!(
            validate_customer_name("   "),
            Err(ValidationError::Required {
                field: "customerName".to_string()
            })
        );
        assert_eq!(validate_customer_phone(" +34 600 ").unwrap(), "+34 600");
    }

    #[test]
    fn test_length_limits() {
        assert!(validate_customer_name(&"a".repeat(MAX_CUSTOMER_NAME_LEN)).is_ok());
        assert!(validate_customer_name(&"a".repeat(MAX_CUSTOMER_NAME_LEN + 1)).is_err());
        assert!(validate_customer_phone(&"1".repeat(MAX_CUSTOMER_PHONE_LEN + 1)).is_err());
        assert!(validate_notes(Some(&"n".repeat(MAX_NOTES_LEN + 1))).is_err());
    }

    #[test]
    fn test_validate_contact_normalizes() {
        let raw = CustomerContact::new(" Ana ", " a@x.com", "123 ").with_notes("  call after 5 ");
        let contact = validate_contact(&raw).unwrap();

        assert_eq!(
            contact,
            CustomerContact::new("Ana", "a@x.com", "123").with_notes("call after 5")
        );
    }

    #[test]
    fn test_validate_add_quantity() {
        assert!(validate_add_quantity(1).is_ok());
        assert!(validate_add_quantity(100_000).is_ok());
        assert!(validate_add_quantity(0).is_err());
        assert!(validate_add_quantity(-3).is_err());
    }
}
