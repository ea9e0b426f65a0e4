//! # Checkout Flow
//!
//! Turns the current cart plus a filled-in contact form into a saved
//! quotation, then tries to email the customer.
//!
//! ## Submission Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  submit(form)                                                           │
//! │     │                                                                   │
//! │     ├─1─ in-flight guard ──────────── busy? ──► CheckoutInFlight        │
//! │     ├─2─ validate_contact(form) ───── bad?  ──► Validation(..)          │
//! │     ├─3─ cart empty? ─────────────────────────► EmptyCart               │
//! │     ├─4─ store.create_quotation  (committed; the quotation now exists) │
//! │     ├─5─ email.send_quotation_confirmation  (bounded by timeout)       │
//! │     ├─6─ notify: email_success(id) │ email_error(text)                 │
//! │     ▼                                                                   │
//! │  CheckoutReceipt { quotation, email }                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Steps 1-3 leave the cart untouched. After step 4 the flow cannot fail:
//! an email problem only changes which notification is shown.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tracing::{info, warn};

use quote_core::validation::validate_contact;
use quote_core::{CoreError, CoreResult, CustomerContact, Quotation};
use quote_notify::{EmailService, NotificationCenter, SendOutcome};
use quote_store::SharedQuotationStore;

/// What a successful submission produced.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub quotation: Quotation,
    pub email: SendOutcome,
}

/// Coordinates store, email and notifications for one session.
#[derive(Debug)]
pub struct CheckoutFlow {
    store: SharedQuotationStore,
    email: EmailService,
    notifications: NotificationCenter,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag on every exit path.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl CheckoutFlow {
    pub fn new(
        store: SharedQuotationStore,
        email: EmailService,
        notifications: NotificationCenter,
    ) -> Self {
        CheckoutFlow {
            store,
            email,
            notifications,
            in_flight: AtomicBool::new(false),
        }
    }

    /// True while a submission is between validation and notification.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// Runs one checkout.
    pub async fn submit(&self, form: &CustomerContact) -> CoreResult<CheckoutReceipt> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("Checkout already in flight, ignoring submission");
            return Err(CoreError::CheckoutInFlight);
        }
        let _guard = InFlight(&self.in_flight);

        let contact = validate_contact(form)?;

        let quotation = self.store.with_store_mut(|store| {
            if store.is_empty() {
                return Err(CoreError::EmptyCart);
            }
            Ok(store.create_quotation(&contact))
        })?;

        let email = self.email.send_quotation_confirmation(&quotation).await;
        if email.success {
            self.notifications.email_success(email.message_id.as_deref());
        } else {
            let error = email.error.as_deref().unwrap_or("error desconocido");
            self.notifications.email_error(error);
        }

        info!(
            quotation_id = %quotation.id(),
            email_sent = email.success,
            "Checkout complete"
        );

        Ok(CheckoutReceipt { quotation, email })
    }
}
