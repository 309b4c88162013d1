//! REST server configuration, resolved once at startup.

use crate::session::DEFAULT_SESSION_IDLE;
use safekeep_vault::VaultConfig;
use std::time::Duration;

/// Default listen address.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Default upload body limit (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SAFEKEEP_MAX_UPLOAD_BYTES must be a positive integer, got: '{0}'")]
    InvalidUploadLimit(String),
    #[error("SAFEKEEP_SESSION_IDLE_SECS must be a positive integer, got: '{0}'")]
    InvalidSessionIdle(String),
}

#[derive(Clone, Debug)]
pub struct RestConfig {
    pub addr: String,
    pub max_upload_bytes: usize,
    /// Idle time after which a session's recovery codes are forgotten.
    pub session_idle: Duration,
    pub vault: VaultConfig,
}

impl RestConfig {
    /// Build the config from raw environment values.
    ///
    /// Missing or blank values fall back to the defaults.
    pub fn from_env_values(
        addr: Option<String>,
        max_upload_bytes: Option<String>,
        session_idle_secs: Option<String>,
        data_dir: Option<String>,
    ) -> Result<Self, ConfigError> {
        let addr = non_blank(addr).unwrap_or_else(|| DEFAULT_REST_ADDR.into());
        let max_upload_bytes = match non_blank(max_upload_bytes) {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidUploadLimit(raw))?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };
        let session_idle = match non_blank(session_idle_secs) {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|n| *n > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::InvalidSessionIdle(raw))?,
            None => DEFAULT_SESSION_IDLE,
        };

        Ok(Self {
            addr,
            max_upload_bytes,
            session_idle,
            vault: VaultConfig::from_env_value(data_dir),
        })
    }

    /// Read the `SAFEKEEP_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_values(
            std::env::var("SAFEKEEP_REST_ADDR").ok(),
            std::env::var("SAFEKEEP_MAX_UPLOAD_BYTES").ok(),
            std::env::var("SAFEKEEP_SESSION_IDLE_SECS").ok(),
            std::env::var("SAFEKEEP_DATA_DIR").ok(),
        )
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
