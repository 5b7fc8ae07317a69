//! Bearer token authentication layer and extractors.
//!
//! [`authenticate`] runs once per request, before routing: it derives an
//! [`AuthContext`] from the `Authorization: Bearer <token>` header and
//! installs it into request extensions. It never rejects a request;
//! absent, malformed, expired, and disabled-claim tokens all pass
//! through unauthenticated, indistinguishably. Route-level policy (the
//! [`RequireAuth`] extractor) is what turns "unauthenticated" into 401
//! for protected routes.
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware, routing::get};
//! use gateward_auth::middleware::{AuthState, RequireAuth, authenticate};
//!
//! async fn whoami(RequireAuth(ctx): RequireAuth) -> String {
//!     ctx.user_id.to_string()
//! }
//!
//! let app = Router::new()
//!     .route("/whoami", get(whoami))
//!     .layer(middleware::from_fn_with_state(auth_state, authenticate));
//! ```

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::AuthError;
use crate::token::JwtService;

use super::types::AuthContext;

/// State for the authentication layer.
#[derive(Clone)]
pub struct AuthState {
    /// Token service used to validate bearer tokens.
    pub jwt: Arc<JwtService>,
}

impl AuthState {
    /// Creates a new auth state.
    #[must_use]
    pub fn new(jwt: Arc<JwtService>) -> Self {
        Self { jwt }
    }
}

/// Authentication middleware.
///
/// Per request: extract the bearer token, validate it, and on success
/// install an [`AuthContext`] extension. Every outcome continues down
/// the stack; this layer's only side effect is the extension insert.
pub async fn authenticate(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(ctx) = context_from_request(&state, &request) {
        request.extensions_mut().insert(ctx);
    }
    next.run(request).await
}

/// Derives an auth context from the request's `Authorization` header.
///
/// `None` covers every unauthenticated outcome: no header, non-Bearer
/// scheme, parse failure, expired token, disabled-account claim,
/// unparseable subject.
fn context_from_request(state: &AuthState, request: &Request) -> Option<AuthContext> {
    let header = request.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let bearer = header.strip_prefix("Bearer ")?;
    if bearer.is_empty() {
        return None;
    }

    let token = state.jwt.parse(bearer)?;

    if token.is_expired() {
        tracing::debug!("Bearer token expired");
        return None;
    }
    if !token.claims().enabled {
        tracing::debug!("Bearer token carries disabled-account claim");
        return None;
    }

    AuthContext::from_claims(token.claims().clone())
}

/// Extractor for routes that require authentication.
///
/// Rejects with 401 if the authentication layer installed no context.
/// This is the route-level authorization policy; the layer itself never
/// rejects.
pub struct RequireAuth(pub AuthContext);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(Self)
            .ok_or_else(|| AuthError::unauthorized("Missing or invalid bearer token"))
    }
}

/// Extractor for routes that behave differently when authenticated.
///
/// Never rejects; yields `None` for unauthenticated requests.
pub struct OptionalAuth(pub Option<AuthContext>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<AuthContext>().cloned()))
    }
}
