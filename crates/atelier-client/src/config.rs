//! Client configuration loaded from environment variables.
//!
//! All settings have sensible defaults so the client can start with zero
//! configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Directory holding the database file.
    /// Env: `ATELIER_DATA_DIR`
    /// Default: the platform data directory.
    pub data_dir: Option<PathBuf>,

    /// Base duration of the simulated backend delay.
    /// Env: `ATELIER_SIMULATED_LATENCY_MS`
    /// Default: `1000`
    pub simulated_latency: Duration,

    /// Base URL of the avatar placeholder service used for fabricated
    /// accounts.
    /// Env: `ATELIER_AVATAR_SERVICE`
    /// Default: `https://ui-avatars.com/api`
    pub avatar_service: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            simulated_latency: Duration::from_millis(1000),
            avatar_service: "https://ui-avatars.com/api".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("ATELIER_DATA_DIR") {
            if !dir.is_empty() {
                config.data_dir = Some(PathBuf::from(dir));
            }
        }

        if let Ok(val) = std::env::var("ATELIER_SIMULATED_LATENCY_MS") {
            if let Ok(ms) = val.parse::<u64>() {
                config.simulated_latency = Duration::from_millis(ms);
            } else {
                tracing::warn!(
                    value = %val,
                    "Invalid ATELIER_SIMULATED_LATENCY_MS, using default"
                );
            }
        }

        if let Ok(url) = std::env::var("ATELIER_AVATAR_SERVICE") {
            if !url.is_empty() {
                config.avatar_service = url.trim_end_matches('/').to_string();
            }
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }

    /// Delay for ordinary simulated requests (sign-in, hire, review).
    pub fn request_latency(&self) -> Duration {
        self.simulated_latency
    }

    /// Delay for simulated card processing, twice the base latency.
    pub fn payment_latency(&self) -> Duration {
        self.simulated_latency * 2
    }

    /// Placeholder avatar URL for a fabricated account.
    pub fn avatar_url(&self, name: &str) -> String {
        format!(
            "{}/?name={}&background=random",
            self.avatar_service,
            name.replace(' ', "+")
        )
    }
}
