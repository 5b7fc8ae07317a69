//! HTTP surface for login, refresh, and revocation.
//!
//! [`router`] returns a ready-to-merge `Router` with the four auth
//! endpoints, with the authentication layer already applied so
//! `/auth/me` sees the request context. Consumers apply the same layer
//! (via [`AppState::auth_state`]) to their own protected routes.
//!
//! # Example
//!
//! ```ignore
//! let state = AppState::new(auth_service, cookie_config);
//! let app = Router::new()
//!     .merge(gateward_auth::http::router(state.clone()))
//!     .route("/reports", get(reports))
//!     .layer(middleware::from_fn_with_state(
//!         state.auth_state.clone(),
//!         authenticate,
//!     ));
//! ```

pub mod handlers;
pub mod types;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};

use crate::config::CookieConfig;
use crate::middleware::{AuthState, authenticate};
use crate::service::AuthService;

pub use handlers::{login_handler, me_handler, refresh_handler, revoke_refresh_token_handler};
pub use types::{LoginRequest, TokenResponse, UserResponse};

/// Shared state for the auth endpoints.
#[derive(Clone)]
pub struct AppState {
    /// Login/refresh orchestrator.
    pub auth: AuthService,

    /// State for the authentication layer, shared with consumer routes.
    pub auth_state: AuthState,

    /// Refresh-token cookie settings.
    pub cookie: CookieConfig,
}

impl AppState {
    /// Creates the endpoint state from an auth service and cookie config.
    #[must_use]
    pub fn new(auth: AuthService, cookie: CookieConfig) -> Self {
        let auth_state = AuthState::new(auth.jwt_handle());
        Self {
            auth,
            auth_state,
            cookie,
        }
    }

    /// Creates the endpoint state reusing an existing auth layer state.
    #[must_use]
    pub fn with_auth_state(auth: AuthService, auth_state: AuthState, cookie: CookieConfig) -> Self {
        Self {
            auth,
            auth_state,
            cookie,
        }
    }
}

/// Builds the auth endpoint router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/auth/login", post(login_handler))
        .route("/auth/refresh", post(refresh_handler))
        .route("/auth/revoke-refresh-token", post(revoke_refresh_token_handler))
        .route("/auth/me", get(me_handler))
        .layer(from_fn_with_state(state.auth_state.clone(), authenticate))
        .with_state(state)
}
