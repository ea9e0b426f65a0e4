//! # Cart Commands
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quote add catalog.json 7 -q 2   ──► add_item      (merges by id)      │
//! │  quote update 7 5                ──► update_quantity (≤ 0 removes)     │
//! │  quote remove 7                  ──► remove_item   (unknown: no-op)    │
//! │  quote clear                     ──► clear_items   (history kept)      │
//! │  quote cart                      ──► read only                          │
//! │                                                                         │
//! │  Every mutation is committed to disk before the command returns.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use tracing::debug;

use quote_core::validation::validate_add_quantity;
use quote_core::ProductId;

use super::{render_cart, CartView, Rendered};
use crate::catalog::Catalog;
use crate::context::AppContext;
use crate::error::CliResult;

fn cart_rendered(ctx: &AppContext, headline: Option<String>) -> CliResult<Rendered> {
    let view = ctx.store.with_store(|store| CartView::from(store));
    let mut text = headline.map(|h| h + "\n").unwrap_or_default();
    text.push_str(&render_cart(&view));
    Rendered::new(text, &view)
}

/// Shows the current cart.
pub fn show_cart(ctx: &AppContext) -> CliResult<Rendered> {
    debug!("cart command");
    cart_rendered(ctx, None)
}

/// Adds a catalog product to the cart.
///
/// The quantity typed on the command line must be positive; the price and
/// image are frozen from the catalog entry at this moment.
pub fn add(
    ctx: &AppContext,
    catalog_path: &Path,
    product_id: ProductId,
    quantity: i64,
) -> CliResult<Rendered> {
    debug!(product_id, quantity, "add command");
    validate_add_quantity(quantity)?;

    let catalog = Catalog::load(catalog_path)?;
    let product = catalog.find(product_id)?;
    ctx.store.with_store_mut(|store| store.add_item(product, quantity));

    cart_rendered(ctx, Some(format!("Añadido: {} x {}", product.name, quantity)))
}

/// Sets a line's quantity. Zero or negative removes the line.
pub fn update(ctx: &AppContext, product_id: ProductId, quantity: i64) -> CliResult<Rendered> {
    debug!(product_id, quantity, "update command");
    ctx.store
        .with_store_mut(|store| store.update_quantity(product_id, quantity));
    cart_rendered(ctx, None)
}

/// Removes a line from the cart.
pub fn remove(ctx: &AppContext, product_id: ProductId) -> CliResult<Rendered> {
    debug!(product_id, "remove command");
    ctx.store.with_store_mut(|store| store.remove_item(product_id));
    cart_rendered(ctx, None)
}

/// Empties the cart.
pub fn clear(ctx: &AppContext) -> CliResult<Rendered> {
    debug!("clear command");
    ctx.store.with_store_mut(|store| store.clear_items());
    cart_rendered(ctx, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;
    use crate::error::ErrorCode;
    use pretty_assertions::assert_eq;
    use quote_notify::email::MockProvider;
    use quote_store::MemoryStore;
    use std::sync::Arc;

    fn ctx() -> AppContext {
        AppContext::with_parts(
            StorefrontConfig::default(),
            Arc::new(MemoryStore::new()),
            Arc::new(MockProvider::reliable()),
        )
    }

    fn catalog_file() -> tempfile::NamedTempFile {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"{"data": [{"id": 1, "name": "Widget", "price": 10},
                         {"id": 2, "name": "Gadget", "price": 2.5}]}"#,
        )
        .unwrap();
        file
    }

    #[test]
    fn test_add_update_remove_clear() {
        let ctx = ctx();
        let catalog = catalog_file();

        add(&ctx, catalog.path(), 1, 2).unwrap();
        add(&ctx, catalog.path(), 1, 1).unwrap();
        let rendered = add(&ctx, catalog.path(), 2, 4).unwrap();
        assert_eq!(rendered.json["itemCount"], 7);
        assert_eq!(rendered.json["total"], 4000);

        let rendered = update(&ctx, 1, 1).unwrap();
        assert_eq!(rendered.json["total"], 2000);

        let rendered = remove(&ctx, 2).unwrap();
        assert_eq!(rendered.json["items"].as_array().unwrap().len(), 1);

        let rendered = clear(&ctx).unwrap();
        assert_eq!(rendered.json["itemCount"], 0);
        assert!(rendered.text.contains("vacío"));
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let ctx = ctx();
        let catalog = catalog_file();

        let err = add(&ctx, catalog.path(), 1, 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(ctx.store.with_store(|s| s.is_empty()));
    }

    #[test]
    fn test_add_unknown_product() {
        let ctx = ctx();
        let catalog = catalog_file();

        let err = add(&ctx, catalog.path(), 99, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_update_to_zero_removes() {
        let ctx = ctx();
        let catalog = catalog_file();
        add(&ctx, catalog.path(), 1, 2).unwrap();

        let rendered = update(&ctx, 1, 0).unwrap();
        assert_eq!(rendered.json["itemCount"], 0);
    }
}
