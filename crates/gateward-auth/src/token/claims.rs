//! Token claims model.
//!
//! A fixed, strongly-typed claims structure instead of an open-ended
//! string-keyed map: every attribute a token carries is a named field
//! here, serialized to the wire claim names used inside the signed
//! payload.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Delimiter used for the comma-joined role claim.
const ROLE_DELIMITER: char = ',';

/// The signed payload of a token.
///
/// Claims are denormalized copies of the principal's attributes at mint
/// time. Authorization-relevant fields (roles, enabled) may therefore be
/// stale; refresh always re-reads the live principal before minting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the principal's identifier, stringified.
    pub sub: String,

    /// Email address at mint time.
    pub email: String,

    /// Username at mint time.
    pub username: String,

    /// First name at mint time.
    #[serde(rename = "firstName")]
    pub first_name: String,

    /// Last name at mint time.
    #[serde(rename = "lastName")]
    pub last_name: String,

    /// Role names joined with `,`. Empty string means no roles.
    pub roles: String,

    /// Enabled flag at mint time.
    pub enabled: bool,

    /// Issued-at, Unix timestamp.
    pub iat: i64,

    /// Expiration, Unix timestamp.
    pub exp: i64,
}

impl TokenClaims {
    /// Parses the subject claim back into a principal identifier.
    ///
    /// Returns `None` if the subject is not a valid UUID (a token minted
    /// by someone else against the same key, or corrupted claims).
    #[must_use]
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }

    /// Reconstructs the role set from the comma-joined claim.
    ///
    /// Entries are trimmed; an empty claim yields an empty set.
    #[must_use]
    pub fn role_set(&self) -> BTreeSet<String> {
        self.roles
            .split(ROLE_DELIMITER)
            .map(str::trim)
            .filter(|role| !role.is_empty())
            .map(ToString::to_string)
            .collect()
    }

    /// Joins a role set into the comma-delimited claim representation.
    #[must_use]
    pub fn join_roles(roles: &BTreeSet<String>) -> String {
        roles.iter().cloned().collect::<Vec<_>>().join(",")
    }

    /// Returns `true` if the token is expired at `now` (Unix seconds).
    #[must_use]
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }

    /// Returns `true` if the token is expired right now.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(OffsetDateTime::now_utc().unix_timestamp())
    }
}
