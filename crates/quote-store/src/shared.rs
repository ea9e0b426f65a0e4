//! # Shared Store Handle
//!
//! A cloneable handle to one [`QuotationStore`] for code that runs
//! concurrently (the checkout flow, async tasks, UI callbacks).
//!
//! ## Thread Safety
//! The store is wrapped in `Arc<Mutex<T>>`: every mutation is a transition
//! plus a commit, and two of those must never interleave.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  handle.with_store_mut(|s| s.add_item(&p, 1))                          │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  lock ──► transition ──► commit ──► unlock                              │
//! │                                                                         │
//! │  handle.with_store(|s| s.total())                                      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  lock ──► read ──► unlock   (never hold the guard across an .await)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use crate::store::QuotationStore;

/// Cloneable, thread-safe handle to a [`QuotationStore`].
#[derive(Debug, Clone)]
pub struct SharedQuotationStore {
    store: Arc<Mutex<QuotationStore>>,
}

impl SharedQuotationStore {
    pub fn new(store: QuotationStore) -> Self {
        SharedQuotationStore {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = shared.with_store(|store| store.total());
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&QuotationStore) -> R,
    {
        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&store)
    }

    /// Executes a function with write access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// shared.with_store_mut(|store| store.add_item(&product, 1));
    /// ```
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut QuotationStore) -> R,
    {
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }
}

impl From<QuotationStore> for SharedQuotationStore {
    fn from(store: QuotationStore) -> Self {
        Self::new(store)
    }
}
