//! Email provider configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::Sender;

/// Default envelope sender address.
pub const DEFAULT_FROM_EMAIL: &str = "noreply@empresa.com";

/// Default envelope sender name.
pub const DEFAULT_FROM_NAME: &str = "Su Empresa S.L.";

/// Which delivery backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Mock,
    Sendgrid,
    Resend,
    Emailjs,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Mock => "mock",
            ProviderKind::Sendgrid => "sendgrid",
            ProviderKind::Resend => "resend",
            ProviderKind::Emailjs => "emailjs",
        }
    }

    /// Parses a provider name, treating anything unknown as `mock`.
    pub fn from_name_lossy(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            warn!(provider = name, "Unknown email provider, using mock");
            ProviderKind::Mock
        })
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(ProviderKind::Mock),
            "sendgrid" => Ok(ProviderKind::Sendgrid),
            "resend" => Ok(ProviderKind::Resend),
            "emailjs" => Ok(ProviderKind::Emailjs),
            other => Err(format!("unknown email provider '{other}'")),
        }
    }
}

/// Provider selection and sender identity.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub provider: ProviderKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub from_email: String,
    pub from_name: String,
}

impl EmailConfig {
    pub fn sender(&self) -> Sender {
        Sender {
            email: self.from_email.clone(),
            name: self.from_name.clone(),
        }
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        EmailConfig {
            provider: ProviderKind::Mock,
            api_key: None,
            from_email: DEFAULT_FROM_EMAIL.to_string(),
            from_name: DEFAULT_FROM_NAME.to_string(),
        }
    }
}

// API keys stay out of logs.
impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("from_email", &self.from_email)
            .field("from_name", &self.from_name)
            .finish()
    }
}
