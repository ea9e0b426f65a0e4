//! Email provider implementations.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use rand::Rng;
use tracing::{info, warn};

use quote_core::id;

use super::{EmailConfig, EmailMessage, EmailProvider, ProviderKind};
use crate::error::{EmailError, EmailResult};

/// Default simulated latency of the mock provider.
pub const MOCK_DELAY: Duration = Duration::from_secs(1);

/// Default probability that the mock provider rejects a message.
pub const MOCK_FAILURE_RATE: f64 = 0.05;

/// Error text of a simulated mock failure.
pub const MOCK_FAILURE_MESSAGE: &str = "Mock error: Email service temporarily unavailable";

const PREVIEW_CHARS: usize = 100;

// =============================================================================
// Mock Provider
// =============================================================================

/// Logs the message instead of sending it.
///
/// ## Behavior
/// - Waits `delay` to simulate network latency
/// - Rejects with [`MOCK_FAILURE_MESSAGE`] with probability `failure_rate`
/// - Otherwise returns `mock-<millis>-<base36 x9>`
#[derive(Debug, Clone)]
pub struct MockProvider {
    delay: Duration,
    failure_rate: f64,
}

impl MockProvider {
    pub fn new() -> Self {
        MockProvider {
            delay: MOCK_DELAY,
            failure_rate: MOCK_FAILURE_RATE,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the rejection probability, clamped to `0.0..=1.0`.
    pub fn with_failure_rate(mut self, failure_rate: f64) -> Self {
        self.failure_rate = if failure_rate.is_nan() {
            0.0
        } else {
            failure_rate.clamp(0.0, 1.0)
        };
        self
    }

    /// A mock that answers immediately and never fails.
    pub fn reliable() -> Self {
        Self::new()
            .with_delay(Duration::ZERO)
            .with_failure_rate(0.0)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(&self, message: &EmailMessage) -> EmailResult<String> {
        let preview: String = message.html_content.chars().take(PREVIEW_CHARS).collect();
        let attachments: Vec<&str> = message
            .attachments
            .iter()
            .map(|a| a.filename.as_str())
            .collect();
        info!(
            to = %message.to,
            subject = %message.subject,
            preview = %preview,
            ?attachments,
            "Mock email service: sending email"
        );

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let roll: f64 = rand::thread_rng().gen();
        if roll < self.failure_rate {
            return Err(EmailError::Rejected(MOCK_FAILURE_MESSAGE.to_string()));
        }

        Ok(id::prefixed_id("mock", Utc::now(), &mut rand::thread_rng()))
    }
}

// =============================================================================
// Pending Vendor Provider
// =============================================================================

/// Stand-in for a vendor integration that is configured but not wired up.
/// Warns on every send and delegates to a [`MockProvider`].
#[derive(Debug, Clone)]
pub struct PendingProvider {
    kind: ProviderKind,
    fallback: MockProvider,
}

impl PendingProvider {
    pub fn new(kind: ProviderKind, fallback: MockProvider) -> Self {
        PendingProvider { kind, fallback }
    }
}

#[async_trait]
impl EmailProvider for PendingProvider {
    fn name(&self) -> &str {
        self.kind.as_str()
    }

    async fn send(&self, message: &EmailMessage) -> EmailResult<String> {
        warn!(provider = %self.kind, "Email provider not configured, using mock");
        self.fallback.send(message).await
    }
}

// =============================================================================
// Closure Provider
// =============================================================================

type SendFn = dyn Fn(EmailMessage) -> BoxFuture<'static, EmailResult<String>> + Send + Sync;

/// Adapts an async closure into a provider.
///
/// ## Usage
/// ```rust,ignore
/// let provider = FnProvider::new("outbox", |message| async move {
///     outbox.push(message).await;
///     Ok("queued-1".to_string())
/// });
/// ```
pub struct FnProvider {
    name: String,
    send: Box<SendFn>,
}

impl FnProvider {
    pub fn new<F, Fut>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(EmailMessage) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = EmailResult<String>> + Send + 'static,
    {
        FnProvider {
            name: name.into(),
            send: Box::new(move |message| f(message).boxed()),
        }
    }
}

impl std::fmt::Debug for FnProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnProvider").field("name", &self.name).finish()
    }
}

#[async_trait]
impl EmailProvider for FnProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, message: &EmailMessage) -> EmailResult<String> {
        (self.send)(message.clone()).await
    }
}

// =============================================================================
// Factory
// =============================================================================

/// Builds the provider selected by `config`.
pub fn create_provider(config: &EmailConfig) -> Arc<dyn EmailProvider> {
    match config.provider {
        ProviderKind::Mock => Arc::new(MockProvider::new()),
        kind => {
            if config.api_key.is_none() {
                warn!(provider = %kind, "No API key configured for email provider");
            }
            Arc::new(PendingProvider::new(kind, MockProvider::new()))
        }
    }
}
