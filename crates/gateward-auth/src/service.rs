//! Login and refresh orchestration.
//!
//! [`AuthService`] ties the token service to the user store: it verifies
//! credentials, mints the access/refresh pair at login, and redeems
//! refresh tokens for fresh access tokens.
//!
//! Nothing here retries: credential and token failures are final, and
//! the single store lookup per operation propagates its error
//! immediately.

use std::sync::Arc;

use crate::error::{AuthError, AuthResult};
use crate::middleware::AuthContext;
use crate::password::CredentialVerifier;
use crate::storage::{User, UserStore};
use crate::token::{JwtService, SignedToken};

/// The access/refresh pair minted at login.
///
/// The two tokens are independent mints; nothing binds them together,
/// and either remains valid until its own natural expiry.
#[derive(Debug, Clone)]
pub struct LoginTokens {
    /// Short-lived access token.
    pub access: SignedToken,

    /// Long-lived refresh token, destined for the HttpOnly cookie.
    pub refresh: SignedToken,
}

/// Authentication orchestrator.
///
/// Stateless besides its shared collaborators; clone-cheap via `Arc`.
#[derive(Clone)]
pub struct AuthService {
    jwt: Arc<JwtService>,
    users: Arc<dyn UserStore>,
    verifier: Arc<dyn CredentialVerifier>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        jwt: Arc<JwtService>,
        users: Arc<dyn UserStore>,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            jwt,
            users,
            verifier,
        }
    }

    /// The underlying token service.
    #[must_use]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    /// A shared handle to the token service, for the auth layer state.
    #[must_use]
    pub fn jwt_handle(&self) -> Arc<JwtService> {
        Arc::clone(&self.jwt)
    }

    /// Authenticates credentials and mints the token pair.
    ///
    /// Unknown account, wrong password, and disabled account all
    /// collapse into [`AuthError::InvalidCredentials`]; the boundary
    /// exposes no distinction between them.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] on any authentication failure,
    /// [`AuthError::Storage`] if the user lookup fails.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<LoginTokens> {
        let Some(user) = self.users.find_by_email(email).await? else {
            tracing::debug!("Login rejected: unknown account");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.verifier.verify(password, &user.password_hash).await? {
            tracing::debug!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        if !user.enabled {
            tracing::debug!(user_id = %user.id, "Login rejected: account disabled");
            return Err(AuthError::InvalidCredentials);
        }

        let access = self.jwt.generate_access_token(&user)?;
        let refresh = self.jwt.generate_refresh_token(&user)?;

        tracing::info!(user_id = %user.id, "Login succeeded");
        Ok(LoginTokens { access, refresh })
    }

    /// Redeems a refresh token for a new access token.
    ///
    /// The principal is re-fetched by the token's subject id, so the new
    /// access token reflects the account's *current* roles and flags,
    /// not the claims frozen into the refresh token. The refresh token
    /// itself is never rotated or invalidated by use; it stays valid
    /// until natural expiry.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidRefreshToken`] if the token fails to parse,
    /// is expired, or no enabled account matches its subject;
    /// [`AuthError::Storage`] if the lookup fails.
    pub async fn refresh(&self, refresh_token: &str) -> AuthResult<SignedToken> {
        let Some(token) = self.jwt.parse(refresh_token) else {
            tracing::debug!("Refresh rejected: token did not parse");
            return Err(AuthError::InvalidRefreshToken);
        };

        if token.is_expired() {
            tracing::debug!("Refresh rejected: token expired");
            return Err(AuthError::InvalidRefreshToken);
        }

        let Some(user_id) = token.claims().user_id() else {
            tracing::debug!("Refresh rejected: unparseable subject");
            return Err(AuthError::InvalidRefreshToken);
        };

        let Some(user) = self.users.find_by_id(user_id).await? else {
            tracing::debug!(user_id = %user_id, "Refresh rejected: account gone");
            return Err(AuthError::InvalidRefreshToken);
        };

        if !user.enabled {
            tracing::debug!(user_id = %user_id, "Refresh rejected: account disabled");
            return Err(AuthError::InvalidRefreshToken);
        }

        let access = self.jwt.generate_access_token(&user)?;
        tracing::debug!(user_id = %user_id, "Access token refreshed");
        Ok(access)
    }

    /// Loads the account behind an authenticated request context.
    ///
    /// Returns `None` if the account no longer exists.
    ///
    /// # Errors
    ///
    /// [`AuthError::Storage`] if the lookup fails.
    pub async fn current_user(&self, ctx: &AuthContext) -> AuthResult<Option<User>> {
        self.users.find_by_id(ctx.user_id).await
    }
}
