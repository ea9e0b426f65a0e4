//! # Email Service
//!
//! Sends the confirmation email for a saved quotation.
//!
//! ```text
//! send_quotation_confirmation(&quotation)
//!      │
//!      ├── QuotationTemplate::render  → subject, html, text
//!      ├── EmailMessage { to: customer_email, from: configured sender }
//!      ├── tokio::time::timeout(provider.send(..))
//!      │        ├─ Ok(id)        → SendOutcome { success: true,  messageId }
//!      │        ├─ Err(e)        → SendOutcome { success: false, error }
//!      │        └─ elapsed       → SendOutcome { success: false, "timed out" }
//!      ▼
//! never panics, never returns Err: delivery problems are data
//! ```

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use quote_core::Quotation;

use crate::email::{create_provider, EmailConfig, EmailMessage, EmailProvider, SendOutcome, Sender};
use crate::error::{EmailError, EmailResult};
use crate::template::QuotationTemplate;

/// Default upper bound on one delivery attempt.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Renders and delivers quotation emails.
#[derive(Clone)]
pub struct EmailService {
    provider: Arc<dyn EmailProvider>,
    template: QuotationTemplate,
    sender: Sender,
    timeout: Duration,
}

impl std::fmt::Debug for EmailService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailService")
            .field("provider", &self.provider.name())
            .field("sender", &self.sender)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl EmailService {
    pub fn new(provider: Arc<dyn EmailProvider>, sender: Sender, template: QuotationTemplate) -> Self {
        EmailService {
            provider,
            template,
            sender,
            timeout: DEFAULT_SEND_TIMEOUT,
        }
    }

    /// Builds the service with the provider selected by `config`.
    pub fn from_config(config: &EmailConfig, template: QuotationTemplate) -> Self {
        Self::new(create_provider(config), config.sender(), template)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Sends the confirmation for `quotation` to its customer.
    pub async fn send_quotation_confirmation(&self, quotation: &Quotation) -> SendOutcome {
        let rendered = self.template.render(quotation);
        let message = EmailMessage::new(
            quotation.customer_email(),
            rendered.subject,
            rendered.html_content,
        )
        .with_text(rendered.text_content);

        let result = self.deliver(message).await;
        match &result {
            Ok(message_id) => info!(
                quotation_id = %quotation.id(),
                %message_id,
                "Quotation confirmation sent"
            ),
            Err(e) => warn!(
                quotation_id = %quotation.id(),
                error = %e,
                "Quotation confirmation not sent"
            ),
        }
        result.into()
    }

    /// Sends an arbitrary message through the configured provider.
    pub async fn send_custom(&self, message: EmailMessage) -> SendOutcome {
        let to = message.to.clone();
        let result = self.deliver(message).await;
        if let Err(e) = &result {
            warn!(%to, error = %e, "Email not sent");
        }
        result.into()
    }

    async fn deliver(&self, mut message: EmailMessage) -> EmailResult<String> {
        if message.from.is_none() {
            message.from = Some(self.sender.clone());
        }

        match tokio::time::timeout(self.timeout, self.provider.send(&message)).await {
            Ok(result) => result,
            Err(_) => Err(EmailError::Timeout(self.timeout)),
        }
    }
}
