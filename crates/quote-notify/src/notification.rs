//! # Notification Center
//!
//! Holds the one notification the UI is currently showing and hides it
//! again after its display duration.
//!
//! ## Auto-Hide Timeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  t=0     show(A, 5s)   generation=1   current=A   timer(gen 1) armed   │
//! │  t=3s    show(B, 8s)   generation=2   current=B   timer(gen 2) armed   │
//! │  t=5s    timer(gen 1) fires: generation is 2 → ignored, B stays         │
//! │  t=11s   timer(gen 2) fires: generation is 2 → current=None            │
//! │                                                                         │
//! │  duration 0 → sticky: no timer, stays until hide() or the next show()  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Subscribers get every change through a `tokio::sync::watch` receiver.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

// =============================================================================
// Notification
// =============================================================================

/// Visual severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

/// A message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub title: String,
    pub message: String,
    /// Zero means the notification stays until dismissed.
    #[serde(with = "duration_ms")]
    pub duration: Duration,
}

impl Notification {
    pub fn new(
        severity: Severity,
        title: impl Into<String>,
        message: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Notification {
            severity,
            title: title.into(),
            message: message.into(),
            duration,
        }
    }

    pub fn is_sticky(&self) -> bool {
        self.duration.is_zero()
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}

/// Display durations per severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationDurations {
    pub success: Duration,
    pub error: Duration,
    pub warning: Duration,
    pub info: Duration,
}

impl Default for NotificationDurations {
    fn default() -> Self {
        NotificationDurations {
            success: Duration::from_millis(5000),
            error: Duration::from_millis(8000),
            warning: Duration::from_millis(6000),
            info: Duration::from_millis(5000),
        }
    }
}

// =============================================================================
// Center
// =============================================================================

struct Inner {
    current: watch::Sender<Option<Notification>>,
    generation: AtomicU64,
    durations: NotificationDurations,
}

/// Cloneable handle; clones share the current notification.
#[derive(Clone)]
pub struct NotificationCenter {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("current", &*self.inner.current.borrow())
            .field("generation", &self.inner.generation.load(Ordering::SeqCst))
            .finish()
    }
}

impl NotificationCenter {
    pub fn new(durations: NotificationDurations) -> Self {
        let (current, _) = watch::channel(None);
        NotificationCenter {
            inner: Arc::new(Inner {
                current,
                generation: AtomicU64::new(0),
                durations,
            }),
        }
    }

    /// The notification currently visible.
    pub fn current(&self) -> Option<Notification> {
        self.inner.current.borrow().clone()
    }

    /// Receives every change, including hides.
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.inner.current.subscribe()
    }

    pub fn durations(&self) -> &NotificationDurations {
        &self.inner.durations
    }

    /// Replaces the visible notification.
    ///
    /// Non-sticky notifications schedule an auto-hide on the current tokio
    /// runtime. Outside a runtime the notification stays until replaced.
    pub fn show(&self, notification: Notification) {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let duration = notification.duration;
        debug!(
            severity = ?notification.severity,
            title = %notification.title,
            generation,
            "Showing notification"
        );
        self.inner.current.send_replace(Some(notification));

        if duration.is_zero() {
            return;
        }
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let inner = Arc::clone(&self.inner);
                handle.spawn(async move {
                    tokio::time::sleep(duration).await;
                    if inner.generation.load(Ordering::SeqCst) == generation {
                        inner.current.send_replace(None);
                    }
                });
            }
            Err(_) => warn!("No async runtime, notification will not auto-hide"),
        }
    }

    /// Dismisses the visible notification now.
    pub fn hide(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        self.inner.current.send_replace(None);
    }

    pub fn email_success(&self, message_id: Option<&str>) {
        let message = match message_id {
            Some(id) => format!("Su cotización ha sido enviada. ID del mensaje: {id}"),
            None => "Su cotización ha sido enviada por correo electrónico.".to_string(),
        };
        self.show(Notification::new(
            Severity::Success,
            "✅ Email enviado exitosamente",
            message,
            self.inner.durations.success,
        ));
    }

    pub fn email_error(&self, error: &str) {
        self.show(Notification::new(
            Severity::Error,
            "❌ Error al enviar email",
            format!(
                "No se pudo enviar el email de confirmación: {error}. \
                 Su cotización se ha guardado correctamente."
            ),
            self.inner.durations.error,
        ));
    }

    pub fn email_warning(&self, message: impl Into<String>) {
        self.show(Notification::new(
            Severity::Warning,
            "⚠️ Advertencia del servicio de email",
            message,
            self.inner.durations.warning,
        ));
    }

    pub fn info(&self, title: impl Into<String>, message: impl Into<String>) {
        self.show(Notification::new(
            Severity::Info,
            title,
            message,
            self.inner.durations.info,
        ));
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(NotificationDurations::default())
    }
}
