//! # Subcommand Handlers
//!
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (output type, shared rendering)
//! ├── cart.rs       ◄─── add, update, remove, clear, cart
//! └── quotation.rs  ◄─── checkout, show, history, reset
//! ```
//!
//! Every handler returns a [`Rendered`] pair: human text for the terminal
//! and a JSON value for `--json`.

pub mod cart;
pub mod quotation;

use serde::Serialize;

use quote_core::{LineItem, Money, Quotation};
use quote_notify::template::format_eur;
use quote_notify::Notification;
use quote_store::QuotationStore;

use crate::error::CliResult;

/// Handler output in both presentations.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub text: String,
    pub json: serde_json::Value,
}

impl Rendered {
    pub fn new(text: impl Into<String>, data: &impl Serialize) -> CliResult<Self> {
        Ok(Rendered {
            text: text.into(),
            json: serde_json::to_value(data)?,
        })
    }
}

/// Cart contents and derived totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<LineItem>,
    pub total: Money,
    pub item_count: i64,
}

impl From<&QuotationStore> for CartView {
    fn from(store: &QuotationStore) -> Self {
        CartView {
            items: store.items().to_vec(),
            total: store.total(),
            item_count: store.item_count(),
        }
    }
}

pub(crate) fn render_lines(items: &[LineItem]) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(&format!(
            "  #{:<6} {:<32} {:>12} x {:<4} {:>14}\n",
            item.product_id(),
            item.product_name(),
            format_eur(item.product_price()),
            item.quantity(),
            format_eur(item.subtotal()),
        ));
    }
    out
}

pub(crate) fn render_cart(view: &CartView) -> String {
    if view.items.is_empty() {
        return "El carrito de cotización está vacío.\n".to_string();
    }
    format!(
        "Carrito ({} artículos)\n{}  TOTAL: {}\n",
        view.item_count,
        render_lines(&view.items),
        format_eur(view.total)
    )
}

pub(crate) fn render_quotation(quotation: &Quotation) -> String {
    let mut out = format!(
        "Cotización {}\n  Fecha:    {}\n  Estado:   {}\n  Cliente:  {} <{}> {}\n",
        quotation.id(),
        quotation.created_at().format("%Y-%m-%d %H:%M UTC"),
        quotation.status(),
        quotation.customer_name(),
        quotation.customer_email(),
        quotation.customer_phone(),
    );
    if let Some(notes) = quotation.notes() {
        out.push_str(&format!("  Notas:    {}\n", notes));
    }
    out.push_str(&render_lines(quotation.items()));
    out.push_str(&format!("  TOTAL: {}\n", format_eur(quotation.total())));
    out
}

pub(crate) fn render_notification(notification: &Notification) -> String {
    format!("{}\n{}\n", notification.title, notification.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_core::Product;

    #[test]
    fn test_empty_cart_text() {
        let store = QuotationStore::in_memory();
        assert_eq!(
            render_cart(&CartView::from(&store)),
            "El carrito de cotización está vacío.\n"
        );
    }

    #[test]
    fn test_cart_text_and_json() {
        let mut store = QuotationStore::in_memory();
        store.add_item(&Product::new(7, "Lámpara", Money::from_cents(1250)), 3);

        let view = CartView::from(&store);
        let text = render_cart(&view);
        assert!(text.starts_with("Carrito (3 artículos)\n"));
        assert!(text.contains("Lámpara"));
        assert!(text.ends_with("TOTAL: 37,50 €\n"));

        let rendered = Rendered::new(text, &view).unwrap();
        assert_eq!(rendered.json["itemCount"], 3);
        assert_eq!(rendered.json["total"], 3750);
        assert_eq!(rendered.json["items"][0]["productName"], "Lámpara");
    }
}
