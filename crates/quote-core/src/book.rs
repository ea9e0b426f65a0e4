//! # Quote Book
//!
//! The cart and the quotation history, and every transition between states.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    QuoteBook Transitions                                │
//! │                                                                         │
//! │  Consumer Action          Method                 State Change           │
//! │  ───────────────          ──────                 ────────────           │
//! │                                                                         │
//! │  Add to quote ──────────► add_item() ──────────► merge or push line    │
//! │                                                                         │
//! │  Change quantity ───────► update_quantity() ───► set qty / remove (<=0)│
//! │                                                                         │
//! │  Click remove ──────────► remove_item() ───────► retain others         │
//! │                                                                         │
//! │  Empty quote ───────────► clear_items() ───────► items.clear()         │
//! │                                                                         │
//! │  Submit form ───────────► create_quotation() ──► snapshot + clear      │
//! │                                                                         │
//! │  NOTE: No method fails. Unknown ids are no-ops, quantities <= 0 on     │
//! │        update mean "remove", missing quotations are `None`.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The book knows nothing about storage or the clock: quotation ids and
//! timestamps are handed in. `quote-store` wraps it with the commit step.

use chrono::{DateTime, Utc};

use crate::money::Money;
use crate::types::{CustomerContact, LineItem, Product, ProductId, Quotation};

/// The persisted slice of the quote cart: line items plus quotation history.
///
/// ## Invariants
/// - At most one line per `product_id`
/// - Every line has `quantity >= 1` and a consistent subtotal
/// - Quotations are append-only
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteBook {
    items: Vec<LineItem>,
    quotations: Vec<Quotation>,
}

impl QuoteBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Cart Mutations
    // =========================================================================

    /// Adds a product to the cart or increases its quantity.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity grows by `quantity`, subtotal is
    ///   recomputed from the price captured on first add
    /// - Product not in cart: a new snapshot line is appended
    /// - `quantity <= 0`: nothing happens
    ///
    /// There is no maximum quantity; a merged quantity saturates at
    /// `i64::MAX` and the subtotal saturates with it.
    pub fn add_item(&mut self, product: &Product, quantity: i64) {
        if quantity <= 0 {
            return;
        }

        if let Some(item) = self.line_mut(product.id) {
            let merged = item.quantity().saturating_add(quantity);
            item.set_quantity(merged);
            return;
        }

        self.items.push(LineItem::from_product(product, quantity));
    }

    /// Removes the line for `product_id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product_id() != product_id);
        self.items.len() != before
    }

    /// Sets the quantity of an existing line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: the line is removed
    /// - Unknown `product_id`: nothing happens
    ///
    /// Returns whether the cart changed.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }

        match self.line_mut(product_id) {
            Some(item) => {
                item.set_quantity(quantity);
                true
            }
            None => false,
        }
    }

    /// Empties the cart. Quotation history is untouched.
    pub fn clear_items(&mut self) {
        self.items.clear();
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Snapshots the cart into a pending quotation and clears the cart.
    ///
    /// ## Commit Semantics
    /// ```text
    /// items ──mem::take──► Quotation.items (by value)
    ///   │                        │
    ///   ▼                        ▼
    /// []  (cart empty)     quotations.push(clone) ──► returned by value
    /// ```
    /// Both halves happen in one `&mut self` call, so no caller can observe
    /// the quotation recorded with the cart still full, or the reverse.
    ///
    /// Contact details are taken as given; validation is the caller's job.
    pub fn create_quotation(
        &mut self,
        contact: &CustomerContact,
        id: String,
        created_at: DateTime<Utc>,
    ) -> Quotation {
        let items = std::mem::take(&mut self.items);
        let quotation = Quotation::new(id, contact, items, created_at);
        self.quotations.push(quotation.clone());
        quotation
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Looks up a quotation by id. Unknown ids are `None`, not an error.
    pub fn get_quotation(&self, id: &str) -> Option<&Quotation> {
        self.quotations.iter().find(|q| q.id() == id)
    }

    /// Sum of all current line subtotals.
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Sum of all current line quantities.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |count, item| count.saturating_add(item.quantity()))
    }

    /// Number of distinct products in the cart.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn quotations(&self) -> &[Quotation] {
        &self.quotations
    }

    pub fn line(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.product_id() == product_id)
    }

    /// Rebuilds a book from lines and quotations read from storage.
    ///
    /// Duplicate cart lines for the same product are merged into the first
    /// one. Quotations are taken as recorded.
    pub fn restore(items: Vec<LineItem>, quotations: Vec<Quotation>) -> Self {
        let mut book = QuoteBook {
            items: Vec::with_capacity(items.len()),
            quotations,
        };
        for item in items {
            match book.line_mut(item.product_id()) {
                Some(existing) => {
                    let merged = existing.quantity().saturating_add(item.quantity());
                    existing.set_quantity(merged);
                }
                None => book.items.push(item),
            }
        }
        book
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|item| item.product_id() == product_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QuotationStatus;
    use pretty_assertions::assert_eq;

    fn widget() -> Product {
        Product::new(1, "Widget", Money::from_cents(1000)).with_picture("/uploads/widget.png")
    }

    fn gadget() -> Product {
        Product::new(2, "Gadget", Money::from_cents(250))
    }

    fn ana() -> CustomerContact {
        CustomerContact::new("Ana", "a@x.com", "123")
    }

    fn assert_subtotals_consistent(book: &QuoteBook) {
        for item in book.items() {
            assert_eq!(
                item.subtotal(),
                item.product_price().multiply_quantity(item.quantity())
            );
        }
    }

    #[test]
    fn test_add_same_product_merges_lines() {
        let mut book = QuoteBook::new();
        book.add_item(&widget(), 1);
        book.add_item(&widget(), 3);

        assert_eq!(book.line_count(), 1);
        let line = book.line(1).unwrap();
        assert_eq!(line.quantity(), 4);
        assert_eq!(line.subtotal().cents(), 4000);
    }

    #[test]
    fn test_merge_holds_for_any_pair_of_quantities() {
        for (q1, q2) in [(1, 1), (2, 5), (7, 3), (1, 999)] {
            let mut book = QuoteBook::new();
            book.add_item(&gadget(), q1);
            book.add_item(&gadget(), q2);

            assert_eq!(book.line_count(), 1);
            let line = book.line(2).unwrap();
            assert_eq!(line.quantity(), q1 + q2);
            assert_eq!(line.subtotal().cents(), (q1 + q2) * 250);
        }
    }

    #[test]
    fn test_merge_keeps_price_captured_on_first_add() {
        let mut book = QuoteBook::new();
        book.add_item(&widget(), 1);

        let mut repriced = widget();
        repriced.price = Money::from_cents(5000);
        repriced.name = "Widget v2".to_string();
        book.add_item(&repriced, 1);

        let line = book.line(1).unwrap();
        assert_eq!(line.product_name(), "Widget");
        assert_eq!(line.subtotal().cents(), 2000);
    }

    #[test]
    fn test_add_non_positive_quantity_is_noop() {
        let mut book = QuoteBook::new();
        book.add_item(&widget(), 0);
        book.add_item(&widget(), -2);
        assert!(book.is_empty());
    }

    #[test]
    fn test_add_has_no_upper_bound() {
        let mut book = QuoteBook::new();
        book.add_item(&gadget(), 1_000_000);
        book.add_item(&gadget(), 1_000_000);
        assert_eq!(book.item_count(), 2_000_000);
    }

    #[test]
    fn test_update_quantity_recomputes_subtotal() {
        let mut book = QuoteBook::new();
        book.add_item(&widget(), 2);

        assert!(book.update_quantity(1, 5));
        assert_eq!(book.line(1).unwrap().subtotal().cents(), 5000);
        assert_subtotals_consistent(&book);
    }

    #[test]
    fn test_update_quantity_zero_removes_exactly_one_line() {
        let mut book = QuoteBook::new();
        book.add_item(&widget(), 2);
        book.add_item(&gadget(), 1);

        assert!(book.update_quantity(1, 0));
        assert_eq!(book.line_count(), 1);
        assert!(book.line(1).is_none());
    }

    #[test]
    fn test_update_quantity_negative_removes() {
        let mut book = QuoteBook::new();
        book.add_item(&widget(), 2);

        assert!(book.update_quantity(1, -5));
        assert!(book.is_empty());
    }

    #[test]
    fn test_unknown_product_is_noop() {
        let mut book = QuoteBook::new();
        book.add_item(&widget(), 2);
        let before = book.clone();

        assert!(!book.update_quantity(99, 3));
        assert!(!book.update_quantity(99, 0));
        assert!(!book.remove_item(99));
        assert_eq!(book, before);
    }

    #[test]
    fn test_totals() {
        let mut book = QuoteBook::new();
        assert!(book.total().is_zero());
        assert_eq!(book.item_count(), 0);

        book.add_item(&widget(), 2);
        book.add_item(&gadget(), 3);

        assert_eq!(book.total().cents(), 2750);
        assert_eq!(book.item_count(), 5);
    }

    #[test]
    fn test_clear_items_keeps_history() {
        let mut book = QuoteBook::new();
        book.add_item(&widget(), 1);
        book.create_quotation(&ana(), "QT-1-a".into(), Utc::now());
        book.add_item(&gadget(), 1);

        book.clear_items();
        assert!(book.is_empty());
        assert_eq!(book.quotations().len(), 1);
    }

    #[test]
    fn test_create_quotation_widget_scenario() {
        let mut book = QuoteBook::new();
        book.add_item(&widget(), 2);

        let quotation = book.create_quotation(&ana(), "QT-1-a".into(), Utc::now());

        assert_eq!(quotation.total().cents(), 2000);
        assert_eq!(quotation.items().len(), 1);
        assert_eq!(quotation.items()[0].subtotal().cents(), 2000);
        assert_eq!(quotation.status(), QuotationStatus::Pending);
        assert_eq!(quotation.customer_name(), "Ana");
        assert_eq!(book.item_count(), 0);
        assert!(book.is_empty());
    }

    #[test]
    fn test_create_quotation_snapshots_n_items_and_total() {
        let mut book = QuoteBook::new();
        book.add_item(&widget(), 1);
        book.add_item(&gadget(), 4);
        let (n, total) = (book.line_count(), book.total());

        let quotation = book.create_quotation(&ana(), "QT-2-b".into(), Utc::now());

        assert_eq!(quotation.items().len(), n);
        assert_eq!(quotation.total(), total);
        assert_eq!(book.get_quotation("QT-2-b"), Some(&quotation));
    }

    #[test]
    fn test_quotation_is_isolated_from_later_cart_changes() {
        let mut book = QuoteBook::new();
        book.add_item(&widget(), 2);
        let quotation = book.create_quotation(&ana(), "QT-3-c".into(), Utc::now());

        book.add_item(&widget(), 5);
        book.add_item(&gadget(), 1);
        book.update_quantity(1, 9);

        let stored = book.get_quotation("QT-3-c").unwrap();
        assert_eq!(stored, &quotation);
        assert_eq!(stored.items()[0].quantity(), 2);
        assert_eq!(stored.total().cents(), 2000);
    }

    #[test]
    fn test_get_unknown_quotation_is_none() {
        let book = QuoteBook::new();
        assert!(book.get_quotation("QT-0-missing").is_none());
    }

    #[test]
    fn test_restore_merges_duplicate_lines() {
        let line = |qty| LineItem::restore(1, "Widget".into(), Money::from_cents(1000), None, qty);
        let items = [line(1), line(2)].into_iter().flatten().collect();
        let book = QuoteBook::restore(items, Vec::new());

        assert_eq!(book.line_count(), 1);
        assert_eq!(book.line(1).unwrap().quantity(), 3);
        assert_eq!(book.total().cents(), 3000);
        assert!(book.quotations().is_empty());
        assert_subtotals_consistent(&book);
    }

    #[test]
    fn test_restore_keeps_quotations_as_recorded() {
        let item = LineItem::restore(1, "Widget".into(), Money::from_cents(1000), None, 2).unwrap();
        let recorded = Quotation::restore(
            "QT-1-a".into(),
            ana(),
            vec![item],
            Money::from_cents(1500),
            Utc::now(),
            QuotationStatus::Sent,
        );
        let book = QuoteBook::restore(Vec::new(), vec![recorded.clone()]);

        assert_eq!(book.get_quotation("QT-1-a"), Some(&recorded));
        assert_eq!(book.get_quotation("QT-1-a").unwrap().total().cents(), 1500);
    }

    #[test]
    fn test_huge_quantities_saturate_instead_of_overflowing() {
        let qty = i64::MAX / 1000 + 1;
        let mut book = QuoteBook::new();
        book.add_item(&widget(), qty);
        book.add_item(&widget(), qty);

        let line = book.line(1).unwrap();
        assert!(line.quantity() > 0);
        assert_eq!(line.quantity(), qty * 2);
        assert_eq!(line.subtotal().cents(), i64::MAX);
        assert_subtotals_consistent(&book);

        book.add_item(&gadget(), i64::MAX);
        book.add_item(&gadget(), i64::MAX);
        assert_eq!(book.line(2).unwrap().quantity(), i64::MAX);
        assert_eq!(book.item_count(), i64::MAX);
        assert_eq!(book.total().cents(), i64::MAX);

        let quotation = book.create_quotation(&ana(), "QT-9-z".into(), Utc::now());
        assert_eq!(quotation.total().cents(), i64::MAX);
        assert_eq!(quotation.item_count(), i64::MAX);
    }
}
