//! Server configuration.
//!
//! Loaded from a TOML file:
//!
//! ```toml
//! listen = "127.0.0.1:8080"
//!
//! [auth]
//! secret = "change-me-to-a-32-byte-minimum-secret!"
//! access_token_lifetime = "15m"
//! refresh_token_lifetime = "7d"
//!
//! [[users]]
//! email = "admin@example.com"
//! username = "admin"
//! password = "admin-password"
//! roles = ["ADMIN", "USER"]
//! ```
//!
//! Seed passwords are plaintext in the file and hashed at startup; this
//! is a development convenience of the reference server, not a pattern
//! for production stores.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context;
use gateward_auth::AuthConfig;
use serde::Deserialize;

/// Root server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. "127.0.0.1:8080".
    pub listen: String,

    /// Token signing and cookie configuration.
    pub auth: AuthConfig,

    /// Accounts seeded into the in-memory store at startup.
    pub users: Vec<SeedUser>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:8080".to_string(),
            auth: AuthConfig::default(),
            users: Vec::new(),
        }
    }
}

/// An account to seed at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedUser {
    /// Email address, the login identifier.
    pub email: String,

    /// Display username.
    pub username: String,

    /// Plaintext password, hashed at startup.
    pub password: String,

    /// First name.
    #[serde(default)]
    pub first_name: String,

    /// Last name.
    #[serde(default)]
    pub last_name: String,

    /// Role names.
    #[serde(default)]
    pub roles: BTreeSet<String>,

    /// Whether the account may authenticate.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// Loads configuration from a TOML file.
pub fn load_config(path: &Path) -> anyhow::Result<ServerConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    let config: ServerConfig =
        toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))?;
    Ok(config)
}
