//! # Quotation Store
//!
//! The single owner of cart and quotation-history state for a session.
//!
//! ## Transition + Commit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Every mutating call                                  │
//! │                                                                         │
//! │   add_item(p, 2)                                                        │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   QuoteBook::add_item  ← pure transition (quote-core)                  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   commit()  ── record::encode ──► KeyValueStore::set(key, json)        │
//! │        │                                │                               │
//! │        │                                └─ Err → log, remember,        │
//! │        │                                         notify listener       │
//! │        ▼                                                                │
//! │   return to caller (state is durable unless the write failed)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Construct one per application session and pass it around explicitly;
//! tests build isolated instances over a [`MemoryStore`].

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use quote_core::{id, CustomerContact, LineItem, Money, Product, ProductId, Quotation, QuoteBook};

use crate::backend::{KeyValueStore, MemoryStore};
use crate::error::StorageError;
use crate::record;
use crate::DEFAULT_STORAGE_KEY;

/// Called with every persistence failure (load or commit).
pub type PersistFailureListener = Box<dyn Fn(&StorageError) + Send + Sync>;

/// Supplies checkout timestamps. Replaceable for deterministic tests.
pub type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Cart + quotation history with write-through persistence.
pub struct QuotationStore {
    book: QuoteBook,
    backend: Arc<dyn KeyValueStore>,
    key: String,
    clock: Clock,
    last_persist_error: Option<StorageError>,
    listener: Option<PersistFailureListener>,
}

impl fmt::Debug for QuotationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuotationStore")
            .field("key", &self.key)
            .field("lines", &self.book.line_count())
            .field("quotations", &self.book.quotations().len())
            .field("last_persist_error", &self.last_persist_error)
            .finish()
    }
}

impl QuotationStore {
    /// Opens the store, reading the record stored under `key` once.
    ///
    /// ## Load Behavior
    /// - No record: empty cart and history
    /// - Record present: decoded, invariants re-established
    /// - Record that cannot be decoded: empty state, error kept as
    ///   [`last_persist_error`](Self::last_persist_error), and the raw text
    ///   copied to [`unreadable_key`] before the next mutation overwrites
    ///   the record
    /// - Backing read failure: empty state, error kept
    pub fn open(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let (book, load_error) = match backend.get(&key) {
            Ok(Some(raw)) => match record::decode(&raw) {
                Ok(book) => {
                    info!(
                        key = %key,
                        lines = book.line_count(),
                        quotations = book.quotations().len(),
                        "Quotation store restored"
                    );
                    (book, None)
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Stored quotation record unusable, starting empty");
                    keep_unreadable(backend.as_ref(), &key, &raw);
                    (QuoteBook::new(), Some(e))
                }
            },
            Ok(None) => {
                debug!(key = %key, "No stored quotation record, starting empty");
                (QuoteBook::new(), None)
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Stored quotation record unreadable, starting empty");
                (QuoteBook::new(), Some(e))
            }
        };

        QuotationStore {
            book,
            backend,
            key,
            clock: Box::new(Utc::now),
            last_persist_error: load_error,
            listener: None,
        }
    }

    /// A store over a fresh [`MemoryStore`] under the default key.
    pub fn in_memory() -> Self {
        Self::open(Arc::new(MemoryStore::new()), DEFAULT_STORAGE_KEY)
    }

    /// Registers a listener for persistence failures.
    pub fn with_failure_listener(mut self, listener: PersistFailureListener) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Replaces the clock used to stamp quotations.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    // =========================================================================
    // Mutations (each ends with a commit)
    // =========================================================================

    /// Adds `quantity` of `product`, merging into an existing line.
    pub fn add_item(&mut self, product: &Product, quantity: i64) {
        debug!(product_id = product.id, quantity, "add_item");
        self.book.add_item(product, quantity);
        self.commit();
    }

    /// Removes the line for `product_id`; unknown ids are a no-op.
    pub fn remove_item(&mut self, product_id: ProductId) {
        let removed = self.book.remove_item(product_id);
        debug!(product_id, removed, "remove_item");
        self.commit();
    }

    /// Sets a line's quantity; `quantity <= 0` removes the line.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        let changed = self.book.update_quantity(product_id, quantity);
        debug!(product_id, quantity, changed, "update_quantity");
        self.commit();
    }

    /// Empties the cart; history is kept.
    pub fn clear_items(&mut self) {
        debug!(lines = self.book.line_count(), "clear_items");
        self.book.clear_items();
        self.commit();
    }

    /// Checks out the cart into a new pending quotation.
    ///
    /// The quotation is appended to history, the cart is cleared, and the
    /// new record is committed before the quotation is returned. Contact
    /// details are not validated here.
    pub fn create_quotation(&mut self, contact: &CustomerContact) -> Quotation {
        let now = (self.clock)();
        let quotation_id = id::quotation_id(now, &mut rand::thread_rng());
        let quotation = self.book.create_quotation(contact, quotation_id, now);

        info!(
            quotation_id = %quotation.id(),
            lines = quotation.items().len(),
            total = %quotation.total(),
            "Quotation created"
        );

        self.commit();
        quotation
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Looks up a quotation. Stale or unknown ids give `None`.
    pub fn get_quotation(&self, id: &str) -> Option<&Quotation> {
        self.book.get_quotation(id)
    }

    /// Sum of current line subtotals.
    pub fn total(&self) -> Money {
        self.book.total()
    }

    /// Sum of current line quantities.
    pub fn item_count(&self) -> i64 {
        self.book.item_count()
    }

    pub fn items(&self) -> &[LineItem] {
        self.book.items()
    }

    pub fn quotations(&self) -> &[Quotation] {
        self.book.quotations()
    }

    pub fn is_empty(&self) -> bool {
        self.book.is_empty()
    }

    /// Read access to the underlying state.
    pub fn book(&self) -> &QuoteBook {
        &self.book
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The most recent persistence failure, if the last load or commit failed.
    /// Cleared by the next successful commit.
    pub fn last_persist_error(&self) -> Option<&StorageError> {
        self.last_persist_error.as_ref()
    }

    // =========================================================================
    // Commit
    // =========================================================================

    /// Writes the current book to the backing.
    fn commit(&mut self) {
        let result = record::encode(&self.book).and_then(|raw| self.backend.set(&self.key, &raw));

        match result {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                error!(key = %self.key, error = %e, "Failed to persist quotation store");
                if let Some(listener) = &self.listener {
                    listener(&e);
                }
                self.last_persist_error = Some(e);
            }
        }
    }
}

/// Key under which a record that failed to decode is kept.
pub fn unreadable_key(key: &str) -> String {
    format!("{key}.unreadable")
}

fn keep_unreadable(backend: &dyn KeyValueStore, key: &str, raw: &str) {
    let backup = unreadable_key(key);
    match backend.set(&backup, raw) {
        Ok(()) => warn!(key = %key, backup = %backup, "Unreadable quotation record kept"),
        Err(e) => error!(key = %key, backup = %backup, error = %e, "Failed to keep unreadable quotation record"),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageResult;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use quote_core::QuotationStatus;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn widget() -> Product {
        Product::new(1, "Widget", Money::from_cents(1000))
    }

    fn gadget() -> Product {
        Product::new(2, "Gadget", Money::from_cents(250))
    }

    fn ana() -> CustomerContact {
        CustomerContact::new("Ana", "a@x.com", "123")
    }

    /// Backing whose writes always fail.
    struct ReadOnly;

    impl KeyValueStore for ReadOnly {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }
        fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }
        fn remove(&self, _key: &str) -> StorageResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_every_mutation_is_committed() {
        let backend = MemoryStore::new();
        let mut store = QuotationStore::open(Arc::new(backend.clone()), "qs");

        store.add_item(&widget(), 2);
        let saved = record::decode(&backend.get("qs").unwrap().unwrap()).unwrap();
        assert_eq!(&saved, store.book());

        store.update_quantity(1, 3);
        let saved = record::decode(&backend.get("qs").unwrap().unwrap()).unwrap();
        assert_eq!(saved.line(1).unwrap().quantity(), 3);

        store.remove_item(1);
        let saved = record::decode(&backend.get("qs").unwrap().unwrap()).unwrap();
        assert!(saved.is_empty());
    }

    #[test]
    fn test_reopen_restores_identical_state() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = QuotationStore::open(backend.clone(), "qs");
        store.add_item(&widget(), 2);
        let quotation = store.create_quotation(&ana());
        store.add_item(&gadget(), 4);

        let reopened = QuotationStore::open(backend, "qs");
        assert_eq!(reopened.book(), store.book());
        assert_eq!(reopened.get_quotation(quotation.id()), Some(&quotation));
        assert_eq!(reopened.total().cents(), 1000);
    }

    #[test]
    fn test_create_quotation_scenario() {
        let mut store = QuotationStore::in_memory();
        store.add_item(&widget(), 2);

        let quotation = store.create_quotation(&ana());

        assert_eq!(quotation.total().cents(), 2000);
        assert_eq!(quotation.items()[0].subtotal().cents(), 2000);
        assert_eq!(quotation.status(), QuotationStatus::Pending);
        assert!(quotation.id().starts_with("QT-"));
        assert_eq!(store.item_count(), 0);
    }

    #[test]
    fn test_checkout_is_atomic_in_the_persisted_record() {
        let backend = MemoryStore::new();
        let mut store = QuotationStore::open(Arc::new(backend.clone()), "qs");
        store.add_item(&widget(), 1);

        let quotation = store.create_quotation(&ana());

        let saved = record::decode(&backend.get("qs").unwrap().unwrap()).unwrap();
        assert!(saved.is_empty());
        assert_eq!(saved.get_quotation(quotation.id()), Some(&quotation));
    }

    #[test]
    fn test_clock_stamps_quotation() {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 14, 5, 0).unwrap();
        let mut store = QuotationStore::in_memory().with_clock(Box::new(move || at));
        store.add_item(&widget(), 1);

        let quotation = store.create_quotation(&ana());
        assert_eq!(quotation.created_at(), at);
        assert!(quotation
            .id()
            .starts_with(&format!("QT-{}-", at.timestamp_millis())));
    }

    #[test]
    fn test_rapid_checkouts_get_distinct_ids() {
        let at = Utc::now();
        let mut store = QuotationStore::in_memory().with_clock(Box::new(move || at));

        store.add_item(&widget(), 1);
        let a = store.create_quotation(&ana());
        store.add_item(&widget(), 1);
        let b = store.create_quotation(&ana());

        assert_ne!(a.id(), b.id());
        assert_eq!(store.quotations().len(), 2);
    }

    #[test]
    fn test_corrupt_record_starts_empty_and_is_overwritten() {
        let backend = MemoryStore::new();
        backend.set("qs", "{ definitely not json").unwrap();

        let mut store = QuotationStore::open(Arc::new(backend.clone()), "qs");
        assert!(store.is_empty());
        assert!(matches!(
            store.last_persist_error(),
            Some(StorageError::Serialization(_))
        ));

        store.add_item(&widget(), 1);
        assert!(store.last_persist_error().is_none());
        assert!(record::decode(&backend.get("qs").unwrap().unwrap()).is_ok());
        assert_eq!(
            backend.get("qs.unreadable").unwrap().as_deref(),
            Some("{ definitely not json")
        );
    }

    #[test]
    fn test_decimal_price_record_is_kept_aside_not_destroyed() {
        let raw = r#"{"state":{"items":[],"quotations":[{"id":"QT-1-abc","customerName":"Ana","customerEmail":"a@x.com","customerPhone":"123","items":[{"productId":1,"productName":"Widget","productPrice":10.5,"quantity":2,"subtotal":21}],"total":21,"createdAt":"2026-10-18T14:05:00Z","status":"pending"}]},"version":0}"#;
        let backend = MemoryStore::new();
        backend.set("qs", raw).unwrap();

        let mut store = QuotationStore::open(Arc::new(backend.clone()), "qs");
        assert!(store.quotations().is_empty());
        assert!(matches!(
            store.last_persist_error(),
            Some(StorageError::Serialization(_))
        ));

        store.add_item(&widget(), 1);
        store.create_quotation(&ana());

        assert_eq!(backend.get(&unreadable_key("qs")).unwrap().as_deref(), Some(raw));
        let saved = record::decode(&backend.get("qs").unwrap().unwrap()).unwrap();
        assert_eq!(saved.quotations().len(), 1);
    }

    #[test]
    fn test_invalid_history_is_kept_aside() {
        let raw = r#"{"state":{"quotations":[{"id":"QT-1-abc","customerName":"Ana","customerEmail":"a@x.com","customerPhone":"123","items":[{"productId":1,"productName":"Widget","productPrice":1000,"quantity":0}],"total":0,"createdAt":"2026-10-18T14:05:00Z"}]},"version":1}"#;
        let backend = MemoryStore::new();
        backend.set("qs", raw).unwrap();

        let store = QuotationStore::open(Arc::new(backend.clone()), "qs");
        assert!(matches!(
            store.last_persist_error(),
            Some(StorageError::InvalidRecord(_))
        ));
        assert_eq!(backend.get("qs.unreadable").unwrap().as_deref(), Some(raw));
    }

    #[test]
    fn test_huge_quantities_persist_without_overflow() {
        let backend = Arc::new(MemoryStore::new());
        let mut store = QuotationStore::open(backend.clone(), "qs");
        let qty = i64::MAX / 1000 + 1;

        store.add_item(&widget(), qty);
        store.add_item(&widget(), qty);

        let line = &store.items()[0];
        assert!(line.quantity() > 0);
        assert!(line.subtotal().cents() >= 0);
        assert_eq!(line.subtotal(), line.product_price().multiply_quantity(line.quantity()));
        assert!(store.last_persist_error().is_none());

        let reopened = QuotationStore::open(backend, "qs");
        assert!(reopened.last_persist_error().is_none());
        assert_eq!(reopened.book(), store.book());
        assert_eq!(reopened.total().cents(), i64::MAX);
    }

    #[test]
    fn test_write_failure_is_not_thrown() {
        let failures = Arc::new(AtomicUsize::new(0));
        let seen = failures.clone();
        let mut store = QuotationStore::open(Arc::new(ReadOnly), "qs").with_failure_listener(
            Box::new(move |_: &StorageError| {
                seen.fetch_add(1, Ordering::SeqCst);
            }),
        );

        store.add_item(&widget(), 2);
        let quotation = store.create_quotation(&ana());

        assert_eq!(quotation.total().cents(), 2000);
        assert!(store.is_empty());
        assert_eq!(store.quotations().len(), 1);
        assert!(matches!(store.last_persist_error(), Some(StorageError::Io(_))));
        assert_eq!(failures.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_no_ops_are_not_errors() {
        let mut store = QuotationStore::in_memory();
        store.add_item(&widget(), 1);

        store.remove_item(42);
        store.update_quantity(42, 7);
        store.update_quantity(1, -5);

        assert!(store.is_empty());
        assert!(store.get_quotation("QT-0-unknown").is_none());
        assert!(store.last_persist_error().is_none());
    }
}
