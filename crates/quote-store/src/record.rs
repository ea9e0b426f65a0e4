//! Persisted record format.
//!
//! A single named record holds the whole persisted slice:
//!
//! ```json
//! { "state": { "items": [...], "quotations": [...] }, "version": 1 }
//! ```
//!
//! Amounts are integer cents. Only stored facts are written: line subtotals
//! are derived again on load, quotation totals are kept as recorded.
//!
//! ## Version History
//! | Version | Change                                  |
//! |---------|-----------------------------------------|
//! | 0       | Lines carried a `subtotal` (ignored)    |
//! | 1       | Lines without `subtotal`                |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quote_core::{CustomerContact, LineItem, Money, ProductId, Quotation, QuotationStatus, QuoteBook};

use crate::error::{StorageError, StorageResult};

/// Version written by this build.
pub const RECORD_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    state: StoredState,
    #[serde(default)]
    version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredState {
    #[serde(default)]
    items: Vec<StoredLine>,
    #[serde(default)]
    quotations: Vec<StoredQuotation>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLine {
    product_id: ProductId,
    product_name: String,
    product_price: Money,
    quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    product_image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredQuotation {
    id: String,
    customer_name: String,
    customer_email: String,
    customer_phone: String,
    items: Vec<StoredLine>,
    total: Money,
    created_at: DateTime<Utc>,
    #[serde(default)]
    status: QuotationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

impl From<&LineItem> for StoredLine {
    fn from(item: &LineItem) -> Self {
        StoredLine {
            product_id: item.product_id(),
            product_name: item.product_name().to_string(),
            product_price: item.product_price(),
            quantity: item.quantity(),
            product_image: item.product_image().map(str::to_owned),
        }
    }
}

impl From<&Quotation> for StoredQuotation {
    fn from(quotation: &Quotation) -> Self {
        StoredQuotation {
            id: quotation.id().to_string(),
            customer_name: quotation.customer_name().to_string(),
            customer_email: quotation.customer_email().to_string(),
            customer_phone: quotation.customer_phone().to_string(),
            items: quotation.items().iter().map(StoredLine::from).collect(),
            total: quotation.total(),
            created_at: quotation.created_at(),
            status: quotation.status(),
            notes: quotation.notes().map(str::to_owned),
        }
    }
}

impl StoredLine {
    fn into_line(self) -> Option<LineItem> {
        LineItem::restore(
            self.product_id,
            self.product_name,
            self.product_price,
            self.product_image,
            self.quantity,
        )
    }
}

impl StoredQuotation {
    /// History is never repaired: a line that cannot exist makes the whole
    /// record invalid.
    fn into_quotation(self) -> StorageResult<Quotation> {
        let id = self.id;
        let items = self
            .items
            .into_iter()
            .map(|line| {
                let quantity = line.quantity;
                line.into_line().ok_or_else(|| {
                    StorageError::InvalidRecord(format!(
                        "quotation {id} has a line with quantity {quantity}"
                    ))
                })
            })
            .collect::<StorageResult<Vec<_>>>()?;

        let contact = CustomerContact {
            customer_name: self.customer_name,
            customer_email: self.customer_email,
            customer_phone: self.customer_phone,
            notes: self.notes,
        };
        Ok(Quotation::restore(
            id,
            contact,
            items,
            self.total,
            self.created_at,
            self.status,
        ))
    }
}

/// Encodes a book as a versioned record.
pub fn encode(book: &QuoteBook) -> StorageResult<String> {
    let envelope = Envelope {
        state: StoredState {
            items: book.items().iter().map(StoredLine::from).collect(),
            quotations: book.quotations().iter().map(StoredQuotation::from).collect(),
        },
        version: RECORD_VERSION,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Decodes a versioned record.
///
/// ## Load Rules
/// - Newer `version`: [`StorageError::UnsupportedVersion`]
/// - Cart lines with `quantity <= 0` are dropped, duplicates merged
/// - A quotation line with `quantity <= 0`: [`StorageError::InvalidRecord`]
pub fn decode(raw: &str) -> StorageResult<QuoteBook> {
    let envelope: Envelope = serde_json::from_str(raw)?;
    if envelope.version > RECORD_VERSION {
        return Err(StorageError::UnsupportedVersion {
            found: envelope.version,
            supported: RECORD_VERSION,
        });
    }

    let state = envelope.state;
    let quotations = state
        .quotations
        .into_iter()
        .map(StoredQuotation::into_quotation)
        .collect::<StorageResult<Vec<_>>>()?;
    let items = state.items.into_iter().filter_map(StoredLine::into_line).collect();

    Ok(QuoteBook::restore(items, quotations))
}
