//! Token minting and validation.
//!
//! [`JwtService`] is the stateless core of the crate: it mints signed,
//! self-contained tokens from a [`Principal`] view and validates token
//! strings back into claims. No server-side session state exists; a
//! minted token is valid until its natural expiry.
//!
//! Access and refresh tokens are structurally identical. The only
//! difference is the lifetime they are minted with; callers track which
//! is which.
//!
//! # Example
//!
//! ```ignore
//! let service = JwtService::from_config(&config)?;
//! let access = service.generate_access_token(&user)?;
//! let parsed = service.parse(access.as_str());
//! ```

use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use time::OffsetDateTime;

use crate::config::{AuthConfig, ConfigError};
use crate::error::{AuthError, AuthResult};
use crate::principal::Principal;
use crate::token::claims::TokenClaims;

/// A minted or successfully parsed token: validated claims together with
/// their compact wire representation.
///
/// The two halves are kept in lockstep; the rendered string is exactly
/// the artifact the claims were signed into (or parsed from).
#[derive(Debug, Clone)]
pub struct SignedToken {
    claims: TokenClaims,
    encoded: String,
}

impl SignedToken {
    /// The validated claims.
    #[must_use]
    pub fn claims(&self) -> &TokenClaims {
        &self.claims
    }

    /// The compact JWS serialization (`header.claims.signature`).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    /// Consumes the token, returning the wire string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.encoded
    }

    /// Returns `true` if the token is expired right now.
    ///
    /// Expiry is a property of a successfully parsed token, checked
    /// explicitly by callers; it is never a parse failure.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.claims.is_expired()
    }
}

/// Service for minting and validating signed tokens.
///
/// Stateless and `Send + Sync`: its only fields are the keys derived
/// from the shared secret and the two configured lifetimes, so one
/// instance is safely shared across all concurrent requests.
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtService {
    /// Creates a new service from raw key material and lifetimes.
    ///
    /// Secret strength is the config layer's responsibility
    /// ([`AuthConfig::validate`]); this constructor accepts what it is
    /// given.
    #[must_use]
    pub fn new(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Creates a new service from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid.
    pub fn from_config(config: &AuthConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(
            config.secret.as_bytes(),
            config.access_token_lifetime,
            config.refresh_token_lifetime,
        ))
    }

    /// The configured access token lifetime.
    #[must_use]
    pub fn access_token_lifetime(&self) -> Duration {
        self.access_ttl
    }

    /// The configured refresh token lifetime.
    #[must_use]
    pub fn refresh_token_lifetime(&self) -> Duration {
        self.refresh_ttl
    }

    /// Mints a token for `principal` expiring `ttl_seconds` from now.
    ///
    /// Claims carry denormalized copies of the principal's attributes at
    /// mint time; the role set is joined into a single comma-delimited
    /// claim. Pure computation, no I/O.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidPrincipal`] if the principal is
    /// disabled. Disabled accounts are refused tokens outright rather
    /// than being issued tokens that cannot be revoked.
    pub fn generate(
        &self,
        principal: &dyn Principal,
        ttl_seconds: i64,
    ) -> AuthResult<SignedToken> {
        if !principal.is_enabled() {
            return Err(AuthError::invalid_principal(
                "cannot generate token for disabled principal",
            ));
        }

        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = TokenClaims {
            sub: principal.id().to_string(),
            email: principal.email().to_string(),
            username: principal.username().to_string(),
            first_name: principal.first_name().to_string(),
            last_name: principal.last_name().to_string(),
            roles: TokenClaims::join_roles(&principal.roles()),
            enabled: principal.is_enabled(),
            iat: now,
            exp: now + ttl_seconds,
        };

        let encoded = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::invalid_principal(format!("token encoding failed: {e}")))?;

        Ok(SignedToken { claims, encoded })
    }

    /// Mints a short-lived access token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidPrincipal`] if the principal is disabled.
    pub fn generate_access_token(&self, principal: &dyn Principal) -> AuthResult<SignedToken> {
        self.generate(principal, seconds(self.access_ttl))
    }

    /// Mints a long-lived refresh token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidPrincipal`] if the principal is disabled.
    pub fn generate_refresh_token(&self, principal: &dyn Principal) -> AuthResult<SignedToken> {
        self.generate(principal, seconds(self.refresh_ttl))
    }

    /// Verifies and decodes a token string.
    ///
    /// Returns `None` on any verification or structural failure: bad
    /// signature, malformed compact serialization, wrong algorithm,
    /// missing claims. Callers cannot distinguish the causes, by design;
    /// the middleware treats all of them as "no valid auth".
    ///
    /// Expiry is *not* checked here. An expired token parses
    /// successfully and reports [`SignedToken::is_expired`] as `true`.
    #[must_use]
    pub fn parse(&self, token: &str) -> Option<SignedToken> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is the caller's explicit check, not a parse failure.
        validation.validate_exp = false;
        validation.validate_aud = false;

        match decode::<TokenClaims>(token, &self.decoding_key, &validation) {
            Ok(data) => Some(SignedToken {
                claims: data.claims,
                encoded: token.to_string(),
            }),
            Err(e) => {
                tracing::debug!(error = %e, "Token rejected");
                None
            }
        }
    }
}

/// Converts a configured lifetime to whole seconds for the `exp` claim.
fn seconds(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)
}
