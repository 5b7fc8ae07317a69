//! Authentication context types.
//!
//! The request-scoped context installed by the authentication layer and
//! read by extractors and handlers. Explicitly carried in request
//! extensions, never in process-global state.

use std::collections::BTreeSet;
use std::sync::Arc;

use uuid::Uuid;

use crate::token::TokenClaims;

/// Prefix applied to role names when mapping them to authorities.
pub const ROLE_PREFIX: &str = "ROLE_";

/// Authenticated request context.
///
/// Built by the [`authenticate`](crate::middleware::authenticate) layer
/// from a valid, unexpired bearer token. Claims are `Arc`-wrapped so the
/// context clones cheaply into extractors.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The principal's identifier, from the token subject.
    pub user_id: Uuid,

    /// Granted authorities: each role name with [`ROLE_PREFIX`] applied.
    pub authorities: BTreeSet<String>,

    /// The validated token claims.
    pub claims: Arc<TokenClaims>,
}

impl AuthContext {
    /// Builds a context from validated claims.
    ///
    /// Returns `None` if the subject claim is not a parseable
    /// identifier; such a token authenticates nothing.
    #[must_use]
    pub fn from_claims(claims: TokenClaims) -> Option<Self> {
        let user_id = claims.user_id()?;
        let authorities = claims
            .role_set()
            .into_iter()
            .map(|role| format!("{ROLE_PREFIX}{role}"))
            .collect();

        Some(Self {
            user_id,
            authorities,
            claims: Arc::new(claims),
        })
    }

    /// Returns `true` if the context holds the exact authority string.
    #[must_use]
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.contains(authority)
    }

    /// Returns `true` if the context holds the role (unprefixed name).
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.has_authority(&format!("{ROLE_PREFIX}{role}"))
    }
}
