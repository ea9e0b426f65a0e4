//! # quote-core: Pure Quotation Logic
//!
//! This crate is the **heart** of the quote cart. It holds the cart and
//! quotation-history state transitions as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Quote Cart Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Consumers (storefront UI, quote CLI)            │   │
//! │  │    Product Page ──► Quote Cart ──► Checkout Form ──► Receipt    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            quote-store (QuotationStore + commit step)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ quote-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   book    │  │ validation│  │   │
//! │  │   │ LineItem  │  │   Money   │  │ QuoteBook │  │  contact  │  │   │
//! │  │   │ Quotation │  │           │  │  merge    │  │   form    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO NETWORK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, LineItem, Quotation, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`book`] - The cart + history state container and its transitions
//! - [`id`] - Quotation id format
//! - [`error`] - Domain error types
//! - [`validation`] - Checkout form validation
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use quote_core::{CustomerContact, Money, Product, QuoteBook};
//!
//! let widget = Product::new(1, "Widget", Money::from_cents(1000));
//!
//! let mut book = QuoteBook::default();
//! book.add_item(&widget, 2);
//! assert_eq!(book.total().cents(), 2000);
//!
//! let contact = CustomerContact::new("Ana", "a@x.com", "123");
//! let quotation = book.create_quotation(&contact, "QT-1-abc".into(), Utc::now());
//! assert_eq!(quotation.total().cents(), 2000);
//! assert_eq!(book.item_count(), 0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod book;
pub mod error;
pub mod id;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use book::QuoteBook;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Prefix of every quotation identifier (`QT-<millis>-<suffix>`).
pub const QUOTATION_ID_PREFIX: &str = "QT";

/// Length of the random base36 suffix in generated identifiers.
pub const ID_SUFFIX_LEN: usize = 9;

/// Maximum length of the customer name on the checkout form.
pub const MAX_CUSTOMER_NAME_LEN: usize = 100;

/// Maximum length of the customer phone on the checkout form.
pub const MAX_CUSTOMER_PHONE_LEN: usize = 30;

/// Maximum length of the free-text notes on the checkout form.
pub const MAX_NOTES_LEN: usize = 2000;
