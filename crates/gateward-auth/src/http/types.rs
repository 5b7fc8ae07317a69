//! Request and response types for the auth endpoints.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::storage::User;
use crate::token::SignedToken;

/// Login request body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Account email address.
    pub email: String,

    /// Plaintext password.
    pub password: String,
}

/// Successful token response.
///
/// Returned by login and refresh. The refresh token never appears here;
/// it travels only in the HttpOnly cookie.
///
/// # Example
///
/// ```json
/// {
///   "access_token": "eyJhbG...",
///   "token_type": "Bearer",
///   "expires_in": 900
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    /// The access token, compact serialization.
    pub access_token: String,

    /// Token type, always "Bearer".
    pub token_type: String,

    /// Access token lifetime in seconds.
    pub expires_in: u64,
}

impl TokenResponse {
    /// Builds a response from a minted access token.
    #[must_use]
    pub fn from_token(token: &SignedToken) -> Self {
        let claims = token.claims();
        Self {
            access_token: token.as_str().to_string(),
            token_type: "Bearer".to_string(),
            expires_in: u64::try_from(claims.exp - claims.iat).unwrap_or(0),
        }
    }
}

/// Public view of a user account.
///
/// Everything except the password hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Unique identifier.
    pub id: Uuid,

    /// Email address.
    pub email: String,

    /// Display username.
    pub username: String,

    /// First name.
    pub first_name: String,

    /// Last name.
    pub last_name: String,

    /// Assigned role names.
    pub roles: BTreeSet<String>,

    /// Whether the account may authenticate.
    pub enabled: bool,

    /// When the account was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            roles: user.roles,
            enabled: user.enabled,
            created_at: user.created_at,
        }
    }
}
