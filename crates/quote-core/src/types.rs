//! # Domain Types
//!
//! Core domain types of the quote cart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    LineItem     │   │   Quotation     │       │
//! │  │  (CMS input)    │──►│  (cart entry)   │──►│ (frozen record) │       │
//! │  │  id             │   │  product_id     │   │  id "QT-..."    │       │
//! │  │  name           │   │  name snapshot  │   │  items snapshot │       │
//! │  │  price          │   │  quantity >= 1  │   │  total          │       │
//! │  │  picture[]      │   │  subtotal       │   │  status         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │ CustomerContact │   │ QuotationStatus │                             │
//! │  │  name / email   │   │  Pending (init) │                             │
//! │  │  phone / notes  │   │  Sent/Approved/ │                             │
//! │  └─────────────────┘   │  Rejected       │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A LineItem copies the product's name, price and first image when it is
//! added. Later catalog edits never reach the cart, and a Quotation copies the
//! line items by value so later cart edits never reach the quotation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{cms_decimal, Money};

/// Product identifier as assigned by the CMS.
pub type ProductId = u64;

// =============================================================================
// Product (catalog input)
// =============================================================================

/// A media entry attached to a CMS product.
///
/// The CMS sends many more fields (formats, hash, mime, ...); only what the
/// cart needs is kept and the rest is ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Picture {
    pub url: String,
    #[serde(default)]
    pub alternative_text: Option<String>,
}

/// A product as read from the catalog.
///
/// The store reads `id`, `name`, `price` and the primary image exactly once,
/// when the product is added to the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,

    pub name: String,

    /// Unit price. Decimal euros on the wire, cents in memory.
    #[serde(with = "cms_decimal")]
    pub price: Money,

    #[serde(default)]
    pub description: Option<String>,

    /// Media gallery; the first entry is the primary image.
    #[serde(default)]
    pub picture: Option<Vec<Picture>>,
}

impl Product {
    /// Creates a product without description or pictures.
    pub fn new(id: ProductId, name: impl Into<String>, price: Money) -> Self {
        Product {
            id,
            name: name.into(),
            price,
            description: None,
            picture: None,
        }
    }

    /// Adds a picture to the gallery (builder style, used by tests and seeds).
    pub fn with_picture(mut self, url: impl Into<String>) -> Self {
        self.picture.get_or_insert_with(Vec::new).push(Picture {
            url: url.into(),
            alternative_text: None,
        });
        self
    }

    /// URL of the first picture, if any.
    pub fn primary_image(&self) -> Option<&str> {
        self.picture
            .as_deref()
            .and_then(|pictures| pictures.first())
            .map(|picture| picture.url.as_str())
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One cart entry.
///
/// ## Invariants
/// - `quantity >= 1`
/// - `subtotal == quantity * product_price`
///
/// Fields are private so the invariants can only be changed through the
/// methods below. `subtotal` is serialized for consumers but never read
/// back: a line rebuilt from storage goes through [`LineItem::restore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    #[ts(type = "number")]
    product_id: ProductId,
    product_name: String,
    product_price: Money,
    #[ts(type = "number")]
    quantity: i64,
    subtotal: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    product_image: Option<String>,
}

impl LineItem {
    /// Creates a new line item from a product and quantity.
    ///
    /// ## Price Freezing
    /// The price is captured at this moment. If the catalog price changes
    /// later, this line keeps the original price.
    pub(crate) fn from_product(product: &Product, quantity: i64) -> Self {
        LineItem {
            product_id: product.id,
            product_name: product.name.clone(),
            product_price: product.price,
            quantity,
            subtotal: product.price.multiply_quantity(quantity),
            product_image: product.primary_image().map(str::to_owned),
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn product_price(&self) -> Money {
        self.product_price
    }

    pub fn product_image(&self) -> Option<&str> {
        self.product_image.as_deref()
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    /// Overwrites the quantity and recomputes the subtotal.
    pub(crate) fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
        self.subtotal = self.product_price.multiply_quantity(quantity);
    }

    /// Rebuilds a line from stored fields.
    ///
    /// The subtotal is derived from `product_price * quantity`. Returns
    /// `None` when `quantity <= 0`.
    pub fn restore(
        product_id: ProductId,
        product_name: String,
        product_price: Money,
        product_image: Option<String>,
        quantity: i64,
    ) -> Option<Self> {
        if quantity <= 0 {
            return None;
        }
        Some(LineItem {
            product_id,
            product_name,
            product_price,
            quantity,
            subtotal: product_price.multiply_quantity(quantity),
            product_image,
        })
    }
}

// =============================================================================
// Quotation Status
// =============================================================================

/// Lifecycle status of a quotation.
///
/// Quotations are created `Pending`. The other states belong to the sales
/// workflow outside this crate; nothing here moves a quotation out of
/// `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum QuotationStatus {
    #[default]
    Pending,
    Sent,
    Approved,
    Rejected,
}

impl QuotationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotationStatus::Pending => "pending",
            QuotationStatus::Sent => "sent",
            QuotationStatus::Approved => "approved",
            QuotationStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for QuotationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Customer Contact
// =============================================================================

/// Contact details captured by the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerContact {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub notes: Option<String>,
}

impl CustomerContact {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        CustomerContact {
            customer_name: name.into(),
            customer_email: email.into(),
            customer_phone: phone.into(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

// =============================================================================
// Quotation
// =============================================================================

/// An immutable record of a completed checkout.
///
/// All fields are read-only after construction. `items` is a value copy of
/// the cart and `total` was computed once from those items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Quotation {
    id: String,
    customer_name: String,
    customer_email: String,
    customer_phone: String,
    items: Vec<LineItem>,
    total: Money,
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
    status: QuotationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    notes: Option<String>,
}

impl Quotation {
    /// Freezes a set of line items into a pending quotation.
    pub(crate) fn new(
        id: String,
        contact: &CustomerContact,
        items: Vec<LineItem>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let total = items.iter().map(LineItem::subtotal).sum();
        Quotation {
            id,
            customer_name: contact.customer_name.clone(),
            customer_email: contact.customer_email.clone(),
            customer_phone: contact.customer_phone.clone(),
            items,
            total,
            created_at,
            status: QuotationStatus::Pending,
            notes: contact.notes.clone(),
        }
    }

    /// Rebuilds a quotation from stored fields.
    ///
    /// Nothing is recomputed: `total` and `status` are kept exactly as they
    /// were recorded.
    pub fn restore(
        id: String,
        contact: CustomerContact,
        items: Vec<LineItem>,
        total: Money,
        created_at: DateTime<Utc>,
        status: QuotationStatus,
    ) -> Self {
        Quotation {
            id,
            customer_name: contact.customer_name,
            customer_email: contact.customer_email,
            customer_phone: contact.customer_phone,
            items,
            total,
            created_at,
            status,
            notes: contact.notes,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn customer_email(&self) -> &str {
        &self.customer_email
    }

    pub fn customer_phone(&self) -> &str {
        &self.customer_phone
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn status(&self) -> QuotationStatus {
        self.status
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Sum of the quantities on the quotation.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |count, item| count.saturating_add(item.quantity()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
