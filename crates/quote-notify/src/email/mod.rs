//! # Email Delivery
//!
//! The message types and the provider seam.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Provider Selection                                   │
//! │                                                                         │
//! │  EmailConfig.provider                                                   │
//! │      │                                                                  │
//! │      ├── mock ──────────────────► MockProvider                         │
//! │      │                                                                  │
//! │      ├── sendgrid ─┐                                                    │
//! │      ├── resend ───┼────────────► PendingProvider ──► MockProvider     │
//! │      └── emailjs ──┘              (warns: vendor not wired yet)        │
//! │                                                                         │
//! │  FnProvider wraps any async closure; used by tests and embedders.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod providers;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::EmailResult;

pub use config::{EmailConfig, ProviderKind};
pub use providers::{create_provider, FnProvider, MockProvider, PendingProvider};

/// Envelope sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sender {
    pub email: String,
    pub name: String,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// A file attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAttachment {
    pub filename: String,
    pub content: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// One outgoing email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<EmailAttachment>,
    /// Filled in by the service from configuration when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Sender>,
}

impl EmailMessage {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        html_content: impl Into<String>,
    ) -> Self {
        EmailMessage {
            to: to.into(),
            subject: subject.into(),
            html_content: html_content.into(),
            text_content: None,
            attachments: Vec::new(),
            from: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    pub fn with_attachment(mut self, attachment: EmailAttachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

/// Result of a send, in the shape the storefront UI consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SendOutcome {
    pub fn sent(message_id: impl Into<String>) -> Self {
        SendOutcome {
            success: true,
            message_id: Some(message_id.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        SendOutcome {
            success: false,
            message_id: None,
            error: Some(error.into()),
        }
    }
}

impl From<EmailResult<String>> for SendOutcome {
    fn from(result: EmailResult<String>) -> Self {
        match result {
            Ok(message_id) => SendOutcome::sent(message_id),
            Err(e) => SendOutcome::failed(e.to_string()),
        }
    }
}

/// Something that can deliver an [`EmailMessage`].
///
/// Returns the provider's message id on success.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Short name used in logs (`mock`, `sendgrid`, ...).
    fn name(&self) -> &str;

    async fn send(&self, message: &EmailMessage) -> EmailResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EmailError;

    #[test]
    fn test_outcome_shape() {
        let sent: SendOutcome = Ok::<_, EmailError>("mock-1-abc".to_string()).into();
        assert_eq!(
            serde_json::to_value(&sent).unwrap(),
            serde_json::json!({"success": true, "messageId": "mock-1-abc"})
        );

        let failed: SendOutcome = Err(EmailError::Rejected("nope".into())).into();
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            serde_json::json!({"success": false, "error": "nope"})
        );
    }

    #[test]
    fn test_sender_display() {
        let sender = Sender {
            email: "noreply@empresa.com".into(),
            name: "Su Empresa S.L.".into(),
        };
        assert_eq!(sender.to_string(), "Su Empresa S.L. <noreply@empresa.com>");
    }
}
