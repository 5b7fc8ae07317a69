//! Authentication configuration.
//!
//! Configuration for token signing and lifetimes, plus the refresh-token
//! cookie. Durations are parsed with humantime, so TOML values read
//! naturally:
//!
//! ```toml
//! [auth]
//! secret = "change-me-to-a-32-byte-minimum-secret!"
//! access_token_lifetime = "15m"
//! refresh_token_lifetime = "7d"
//!
//! [auth.cookie]
//! name = "refresh_token"
//! path = "/auth/refresh"
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Minimum signing secret length in bytes.
///
/// HS256 requires key material of at least the hash output size
/// (256 bits); shorter secrets are rejected at configuration time.
pub const MIN_SECRET_BYTES: usize = 32;

/// Errors produced by configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The signing secret is not set.
    #[error("signing secret must be set")]
    MissingSecret,

    /// The signing secret is too short for the signing algorithm.
    #[error("signing secret must be at least {MIN_SECRET_BYTES} bytes, got {length}")]
    WeakSecret {
        /// Length of the configured secret in bytes.
        length: usize,
    },

    /// A token lifetime is zero.
    #[error("{field} must be greater than zero")]
    ZeroLifetime {
        /// Name of the offending configuration field.
        field: &'static str,
    },
}

/// Token signing and lifetime configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Symmetric HMAC signing secret.
    ///
    /// Shared by token minting and verification. Keep it out of source
    /// control; environment interpolation or a secrets file is the
    /// expected supply path.
    pub secret: String,

    /// Access token lifetime.
    /// Access tokens travel with every request, so keep them short.
    #[serde(with = "humantime_serde")]
    pub access_token_lifetime: Duration,

    /// Refresh token lifetime.
    /// Refresh tokens live in an HttpOnly cookie and can be longer.
    #[serde(with = "humantime_serde")]
    pub refresh_token_lifetime: Duration,

    /// Refresh-token cookie settings.
    pub cookie: CookieConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            access_token_lifetime: Duration::from_secs(15 * 60),
            refresh_token_lifetime: Duration::from_secs(7 * 24 * 3600),
            cookie: CookieConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the secret is missing or undersized,
    /// or if either token lifetime is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if self.secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::WeakSecret {
                length: self.secret.len(),
            });
        }
        if self.access_token_lifetime.is_zero() {
            return Err(ConfigError::ZeroLifetime {
                field: "access_token_lifetime",
            });
        }
        if self.refresh_token_lifetime.is_zero() {
            return Err(ConfigError::ZeroLifetime {
                field: "refresh_token_lifetime",
            });
        }
        Ok(())
    }
}

/// Refresh-token cookie configuration.
///
/// The defaults follow the hardened shape: HttpOnly, Secure, scoped to
/// the refresh endpoint so the browser never sends the refresh token
/// anywhere else.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CookieConfig {
    /// Cookie name.
    pub name: String,

    /// Cookie path. Scopes which requests carry the cookie.
    pub path: String,

    /// Only send the cookie over HTTPS.
    pub secure: bool,

    /// Hide the cookie from client-side JavaScript.
    pub http_only: bool,

    /// SameSite attribute: "strict", "lax", or "none".
    pub same_site: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "refresh_token".to_string(),
            path: "/auth/refresh".to_string(),
            secure: true,
            http_only: true,
            same_site: "strict".to_string(),
        }
    }
}
