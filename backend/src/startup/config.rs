//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `EXERCISE_TRACKER_*` environment variables
//! and configuration files, in OrthoConfig's usual precedence.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Settings controlling the listener and the backing store.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXERCISE_TRACKER")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// PostgreSQL URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Delete all users and exercises once at startup.
    #[ortho_config(default = false)]
    pub clear_on_startup: bool,
    /// Comma-separated origins allowed by CORS; absent or `*` allows any.
    pub cors_allowed_origins: Option<String>,
}

impl ServerSettings {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    /// Explicit CORS origins; empty when any origin is allowed.
    pub fn cors_allowed_origins(&self) -> Vec<String> {
        let Some(raw) = self.cors_allowed_origins.as_deref() else {
            return Vec::new();
        };
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();
        if origins.iter().any(|origin| origin == "*") {
            return Vec::new();
        }
        origins
    }
}
