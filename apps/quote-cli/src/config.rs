//! # Storefront Configuration
//!
//! Configuration for the `quote` CLI.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --data-dir /tmp/quotes                                             │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     QUOTE_DATA_DIR, QUOTE_STORAGE_KEY, QUOTE_EMAIL_PROVIDER,           │
//! │     QUOTE_EMAIL_API_KEY, QUOTE_EMAIL_FROM, QUOTE_EMAIL_FROM_NAME       │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/quote/config.toml (Linux)                                │
//! │     ~/Library/Application Support/com.empresa.quote/config.toml        │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [storage]
//! dir = "/var/lib/quote"       # default: platform data dir
//! key = "quotation-storage"
//!
//! [email]
//! provider = "mock"            # mock | sendgrid | resend | emailjs
//! from_email = "noreply@empresa.com"
//! from_name = "Su Empresa S.L."
//! timeout_secs = 10
//!
//! [company]
//! name = "Su Empresa S.L."
//! email = "ventas@empresa.com"
//! phone = "+34 123 456 789"
//! hours = "Lunes a Viernes, 9:00 - 18:00"
//!
//! [notifications]
//! success_ms = 5000
//! error_ms = 8000
//! warning_ms = 6000
//! info_ms = 5000
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use quote_notify::email::config::{DEFAULT_FROM_EMAIL, DEFAULT_FROM_NAME};
use quote_notify::{CompanyProfile, EmailConfig, NotificationDurations, ProviderKind};
use quote_store::DEFAULT_STORAGE_KEY;

use crate::error::{CliError, CliResult};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Platform directories for this application.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "empresa", "quote")
}

// =============================================================================
// Sections
// =============================================================================

/// Where the cart record lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Data directory. `None` means the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Record name inside the data directory.
    pub key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            dir: None,
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// Email delivery settings.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailSettings {
    pub provider: ProviderKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    pub from_email: String,
    pub from_name: String,

    /// Upper bound on one delivery attempt.
    pub timeout_secs: u64,
}

impl Default for EmailSettings {
    fn default() -> Self {
        EmailSettings {
            provider: ProviderKind::Mock,
            api_key: None,
            from_email: DEFAULT_FROM_EMAIL.to_string(),
            from_name: DEFAULT_FROM_NAME.to_string(),
            timeout_secs: 10,
        }
    }
}

impl fmt::Debug for EmailSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailSettings")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("from_email", &self.from_email)
            .field("from_name", &self.from_name)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Notification display durations in milliseconds. `0` keeps the
/// notification until dismissed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub success_ms: u64,
    pub error_ms: u64,
    pub warning_ms: u64,
    pub info_ms: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        NotificationSettings {
            success_ms: 5000,
            error_ms: 8000,
            warning_ms: 6000,
            info_ms: 5000,
        }
    }
}

// =============================================================================
// Storefront Config
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub email: EmailSettings,

    #[serde(default)]
    pub company: CompanyProfile,

    #[serde(default)]
    pub notifications: NotificationSettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, or the platform config file)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                config = Self::read_file(&path)?;
            } else if explicit {
                return Err(CliError::config_load(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn read_file(path: &Path) -> CliResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CliError::config_load(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> CliResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| CliError::config_load("No config path available"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CliError::config_load(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| {
            CliError::config_load(format!("Failed to write {}: {}", path.display(), e))
        })?;

        info!(?path, "Config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        if self.storage.key.trim().is_empty() {
            return Err(CliError::invalid_config("storage.key must not be empty"));
        }

        if !self.email.from_email.contains('@') {
            return Err(CliError::invalid_config(format!(
                "email.from_email must be an email address, got: '{}'",
                self.email.from_email
            )));
        }

        if self.email.timeout_secs == 0 {
            return Err(CliError::invalid_config(
                "email.timeout_secs must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Applies `QUOTE_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from `lookup`, keyed by environment variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("QUOTE_DATA_DIR") {
            debug!(dir = %dir, "Overriding data dir from environment");
            self.storage.dir = Some(PathBuf::from(dir));
        }

        if let Some(key) = lookup("QUOTE_STORAGE_KEY") {
            self.storage.key = key;
        }

        if let Some(provider) = lookup("QUOTE_EMAIL_PROVIDER") {
            debug!(provider = %provider, "Overriding email provider from environment");
            self.email.provider = ProviderKind::from_name_lossy(&provider);
        }

        if let Some(api_key) = lookup("QUOTE_EMAIL_API_KEY") {
            self.email.api_key = Some(api_key);
        }

        if let Some(from) = lookup("QUOTE_EMAIL_FROM") {
            self.email.from_email = from;
        }

        if let Some(name) = lookup("QUOTE_EMAIL_FROM_NAME") {
            self.email.from_name = name;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Resolved data directory.
    pub fn data_dir(&self) -> CliResult<PathBuf> {
        match &self.storage.dir {
            Some(dir) => Ok(dir.clone()),
            None => project_dirs()
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or_else(|| CliError::config_load("Could not determine app data directory")),
        }
    }

    pub fn email_config(&self) -> EmailConfig {
        if self.email.provider != ProviderKind::Mock && self.email.api_key.is_none() {
            warn!(provider = %self.email.provider, "Email provider selected without an API key");
        }
        EmailConfig {
            provider: self.email.provider,
            api_key: self.email.api_key.clone(),
            from_email: self.email.from_email.clone(),
            from_name: self.email.from_name.clone(),
        }
    }

    pub fn email_timeout(&self) -> Duration {
        Duration::from_secs(self.email.timeout_secs)
    }

    pub fn notification_durations(&self) -> NotificationDurations {
        let n = &self.notifications;
        NotificationDurations {
            success: Duration::from_millis(n.success_ms),
            error: Duration::from_millis(n.error_ms),
            warning: Duration::from_millis(n.warning_ms),
            info: Duration::from_millis(n.info_ms),
        }
    }
}
