//! # quote-store: Persistence Layer for the Quote Cart
//!
//! Owns the cart and quotation history for a session and keeps them in
//! durable local storage.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         quote-store                                     │
//! │                                                                         │
//! │   ┌───────────────────────┐       ┌───────────────────────────────┐    │
//! │   │ SharedQuotationStore  │──────►│ QuotationStore                │    │
//! │   │ Arc<Mutex<_>>         │       │  QuoteBook (quote-core)       │    │
//! │   └───────────────────────┘       │  commit() after every change  │    │
//! │                                   └───────────────┬───────────────┘    │
//! │                                                   │ record::encode     │
//! │                                   ┌───────────────▼───────────────┐    │
//! │                                   │ dyn KeyValueStore             │    │
//! │                                   │  FileStore │ MemoryStore      │    │
//! │                                   └───────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use quote_core::{CustomerContact, Money, Product};
//! use quote_store::QuotationStore;
//!
//! let mut store = QuotationStore::in_memory();
//! store.add_item(&Product::new(1, "Widget", Money::from_cents(1000)), 2);
//!
//! let quotation = store.create_quotation(&CustomerContact::new("Ana", "a@x.com", "123"));
//! assert_eq!(quotation.total().cents(), 2000);
//! assert_eq!(store.item_count(), 0);
//! ```

pub mod backend;
pub mod error;
pub mod record;
pub mod shared;
pub mod store;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::{StorageError, StorageResult};
pub use record::RECORD_VERSION;
pub use shared::SharedQuotationStore;
pub use store::{unreadable_key, Clock, PersistFailureListener, QuotationStore};

/// Name of the record holding the cart and history.
pub const DEFAULT_STORAGE_KEY: &str = "quotation-storage";
