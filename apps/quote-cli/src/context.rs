//! # Application Context
//!
//! Everything a subcommand needs, built once per invocation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AppContext                                                             │
//! │    config         StorefrontConfig (file + env + flags)                 │
//! │    backend        FileStore at <data dir>                               │
//! │    store          SharedQuotationStore ── persist failures ──┐          │
//! │    notifications  NotificationCenter  ◄──────────────────────┘          │
//! │    checkout       CheckoutFlow(store, EmailService, notifications)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::info;

use quote_notify::{
    email::create_provider, EmailProvider, EmailService, Notification, NotificationCenter,
    QuotationTemplate, Severity,
};
use quote_store::{FileStore, KeyValueStore, QuotationStore, SharedQuotationStore, StorageError};

use crate::checkout::CheckoutFlow;
use crate::config::StorefrontConfig;
use crate::error::CliResult;

const STORAGE_WARNING_TITLE: &str = "⚠️ No se pudieron guardar los datos";

/// Shared state for one CLI invocation.
pub struct AppContext {
    pub config: StorefrontConfig,
    pub backend: Arc<dyn KeyValueStore>,
    pub store: SharedQuotationStore,
    pub notifications: NotificationCenter,
    pub checkout: CheckoutFlow,
}

impl AppContext {
    /// Opens the file-backed store and the configured email provider.
    pub fn open(config: StorefrontConfig) -> CliResult<Self> {
        let dir = config.data_dir()?;
        info!(?dir, key = %config.storage.key, "Opening quotation store");

        let provider = create_provider(&config.email_config());
        Ok(Self::with_parts(config, Arc::new(FileStore::new(dir)), provider))
    }

    /// Builds a context over explicit parts.
    pub fn with_parts(
        config: StorefrontConfig,
        backend: Arc<dyn KeyValueStore>,
        provider: Arc<dyn EmailProvider>,
    ) -> Self {
        let notifications = NotificationCenter::new(config.notification_durations());

        let listener_center = notifications.clone();
        let store = QuotationStore::open(backend.clone(), config.storage.key.clone())
            .with_failure_listener(Box::new(move |e: &StorageError| {
                storage_warning(&listener_center, e)
            }));
        if let Some(e) = store.last_persist_error() {
            storage_warning(&notifications, e);
        }
        let store = SharedQuotationStore::new(store);

        let template = QuotationTemplate::new(config.company.clone());
        let email = EmailService::new(provider, config.email_config().sender(), template)
            .with_timeout(config.email_timeout());

        let checkout = CheckoutFlow::new(store.clone(), email, notifications.clone());

        AppContext {
            config,
            backend,
            store,
            notifications,
            checkout,
        }
    }
}

fn storage_warning(center: &NotificationCenter, error: &StorageError) {
    center.show(Notification::new(
        Severity::Warning,
        STORAGE_WARNING_TITLE,
        error.to_string(),
        center.durations().warning,
    ));
}
