//! # Quotation Commands
//!
//! Checkout and the quotation history.

use serde::Serialize;
use tracing::{debug, info};

use quote_core::{CustomerContact, Quotation};

use super::{render_notification, render_quotation, Rendered};
use crate::context::AppContext;
use crate::error::{CliError, CliResult};

/// Submits the cart as a quotation and emails the customer.
///
/// ## Output
/// The saved quotation followed by the notification the storefront would
/// show (email sent, or email failed but quotation saved).
pub async fn checkout(ctx: &AppContext, form: CustomerContact) -> CliResult<Rendered> {
    debug!("checkout command");
    let receipt = ctx.checkout.submit(&form).await?;

    let mut text = render_quotation(&receipt.quotation);
    if let Some(notification) = ctx.notifications.current() {
        text.push('\n');
        text.push_str(&render_notification(&notification));
    }
    Rendered::new(text, &receipt)
}

/// Shows one quotation from the history.
pub fn show(ctx: &AppContext, id: &str) -> CliResult<Rendered> {
    debug!(quotation_id = id, "show command");
    let quotation = ctx
        .store
        .with_store(|store| store.get_quotation(id).cloned())
        .ok_or_else(|| CliError::not_found("Quotation", id))?;
    Rendered::new(render_quotation(&quotation), &quotation)
}

#[derive(Serialize)]
struct HistoryView<'a> {
    quotations: &'a [Quotation],
}

/// Lists every quotation, oldest first.
pub fn history(ctx: &AppContext) -> CliResult<Rendered> {
    debug!("history command");
    let quotations = ctx.store.with_store(|store| store.quotations().to_vec());

    let text = if quotations.is_empty() {
        "No hay cotizaciones.\n".to_string()
    } else {
        quotations
            .iter()
            .map(|q| {
                format!(
                    "{}  {}  {:<9} {:>14}  {}\n",
                    q.id(),
                    q.created_at().format("%Y-%m-%d %H:%M"),
                    q.status().as_str(),
                    quote_notify::template::format_eur(q.total()),
                    q.customer_name()
                )
            })
            .collect()
    };
    Rendered::new(
        text,
        &HistoryView {
            quotations: &quotations,
        },
    )
}

/// Deletes the persisted cart and history.
pub fn reset(ctx: &AppContext) -> CliResult<Rendered> {
    let key = &ctx.config.storage.key;
    ctx.backend.remove(key)?;
    info!(key = %key, "Stored quotation data removed");
    Rendered::new(
        "Datos locales eliminados.\n",
        &serde_json::json!({ "removed": key }),
    )
}
