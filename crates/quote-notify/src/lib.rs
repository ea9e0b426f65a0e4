//! # quote-notify: Confirmation Email + User Notifications
//!
//! ## Modules
//!
//! - [`email`] - Message types, the [`EmailProvider`] seam and providers
//! - [`template`] - Spanish confirmation email rendering
//! - [`service`] - [`EmailService`]: render, deliver, time out
//! - [`notification`] - [`NotificationCenter`]: what the user sees, and for how long
//! - [`error`] - [`EmailError`]
//!
//! ## After Checkout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quotation saved ──► EmailService::send_quotation_confirmation          │
//! │                              │                                          │
//! │              ┌───────────────┴───────────────┐                          │
//! │              ▼                               ▼                          │
//! │     success: email_success(id)       failure: email_error(text)        │
//! │              │                               │                          │
//! │              └──────────► NotificationCenter ◄┘                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod email;
pub mod error;
pub mod notification;
pub mod service;
pub mod template;

pub use email::{
    EmailAttachment, EmailConfig, EmailMessage, EmailProvider, ProviderKind, SendOutcome, Sender,
};
pub use error::{EmailError, EmailResult};
pub use notification::{Notification, NotificationCenter, NotificationDurations, Severity};
pub use service::{EmailService, DEFAULT_SEND_TIMEOUT};
pub use template::{CompanyProfile, EmailTemplate, QuotationTemplate};
