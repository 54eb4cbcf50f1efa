//! # Client Configuration
//!
//! Where the API lives, how long to wait for it, and where the session token
//! is kept.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BOOKSTORE_API_URL=https://books.example.com                        │
//! │     BOOKSTORE_UPDATED_FLAG_MS=1500                                     │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/client/client.toml (Linux)                               │
//! │     ~/Library/Application Support/com.bookstore.client/client.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:5000, 10s connect, 30s request, 1s flag           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # client.toml
//! [api]
//! base_url = "http://localhost:5000"
//! connect_timeout_secs = 10
//! request_timeout_secs = 30
//!
//! [session]
//! token_file = "/home/me/.local/share/client/token"  # optional
//!
//! [cart]
//! updated_flag_ms = 1000
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};

/// Default API origin used by the reference deployment.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// How long the cart's "just updated" flag stays raised after an add.
pub const UPDATED_FLAG_DURATION: Duration = Duration::from_millis(1000);

// =============================================================================
// Sections
// =============================================================================

/// `[api]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Origin of the bookstore API; `/api/...` paths are joined onto it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// `[session]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Overrides the token file location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_file: Option<PathBuf>,
}

/// `[cart]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSettings {
    #[serde(default = "default_updated_flag_ms")]
    pub updated_flag_ms: u64,
}

fn default_updated_flag_ms() -> u64 {
    UPDATED_FLAG_DURATION.as_millis() as u64
}

impl Default for CartSettings {
    fn default() -> Self {
        CartSettings {
            updated_flag_ms: default_updated_flag_ms(),
        }
    }
}

// =============================================================================
// Client Config
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub cart: CartSettings,
}

impl ClientConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (client.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| ClientError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load client config, using defaults");
            Self::default()
        })
    }

    /// Saves configuration to file and returns the path written.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Client config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let url = url::Url::parse(&self.api.base_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ClientError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.connect_timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "connect_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.api.request_timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides read through `lookup`.
    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("BOOKSTORE_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(secs) = lookup("BOOKSTORE_CONNECT_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(s) => self.api.connect_timeout_secs = s,
                Err(_) => warn!(value = %secs, "Ignoring non-numeric BOOKSTORE_CONNECT_TIMEOUT_SECS"),
            }
        }

        if let Some(secs) = lookup("BOOKSTORE_REQUEST_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(s) => self.api.request_timeout_secs = s,
                Err(_) => warn!(value = %secs, "Ignoring non-numeric BOOKSTORE_REQUEST_TIMEOUT_SECS"),
            }
        }

        if let Some(path) = lookup("BOOKSTORE_TOKEN_FILE") {
            self.session.token_file = Some(PathBuf::from(path));
        }

        if let Some(ms) = lookup("BOOKSTORE_UPDATED_FLAG_MS") {
            match ms.parse::<u64>() {
                Ok(ms) => self.cart.updated_flag_ms = ms,
                Err(_) => warn!(value = %ms, "Ignoring non-numeric BOOKSTORE_UPDATED_FLAG_MS"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "bookstore", "client")
            .map(|dirs| dirs.config_dir().join("client.toml"))
    }

    /// Returns the default token file path.
    pub fn default_token_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "bookstore", "client")
            .map(|dirs| dirs.data_dir().join("token"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.api.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }

    pub fn updated_flag_duration(&self) -> Duration {
        Duration::from_millis(self.cart.updated_flag_ms)
    }

    /// Configured token file, else the platform default.
    pub fn token_path(&self) -> Option<PathBuf> {
        self.session
            .token_file
            .clone()
            .or_else(Self::default_token_path)
    }
}
