//! Axum handlers for the auth endpoints.
//!
//! - `POST /auth/login` - credentials in, access token out, refresh
//!   token set as an HttpOnly cookie
//! - `POST /auth/refresh` - refresh cookie in, new access token out
//! - `POST /auth/revoke-refresh-token` - clears the cookie
//! - `GET /auth/me` - the authenticated account

use std::time::Duration;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::config::CookieConfig;
use crate::error::{AuthError, AuthResult};
use crate::middleware::RequireAuth;

use super::AppState;
use super::types::{LoginRequest, TokenResponse, UserResponse};

/// Logs in with email and password.
///
/// On success the response body carries the access token and the
/// refresh token is set as a path-scoped HttpOnly cookie with
/// `Max-Age` equal to the refresh lifetime.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> AuthResult<(CookieJar, Json<TokenResponse>)> {
    let tokens = state.auth.login(&body.email, &body.password).await?;

    let max_age = state.auth.jwt().refresh_token_lifetime();
    let jar = jar.add(refresh_cookie(
        &state.cookie,
        tokens.refresh.into_string(),
        max_age,
    ));

    Ok((jar, Json(TokenResponse::from_token(&tokens.access))))
}

/// Exchanges the refresh-token cookie for a new access token.
pub async fn refresh_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AuthResult<Json<TokenResponse>> {
    let Some(cookie) = jar.get(&state.cookie.name) else {
        tracing::debug!("Refresh rejected: cookie missing");
        return Err(AuthError::InvalidRefreshToken);
    };

    let access = state.auth.refresh(cookie.value()).await?;
    Ok(Json(TokenResponse::from_token(&access)))
}

/// Clears the refresh-token cookie.
///
/// Client-side revocation only: tokens are stateless, so a refresh
/// token already captured elsewhere remains valid until its natural
/// expiry. The current access token likewise runs out its remaining
/// lifetime.
pub async fn revoke_refresh_token_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, StatusCode) {
    // Removal must match the name and path the cookie was set with.
    let jar = jar.remove(
        Cookie::build((state.cookie.name.clone(), ""))
            .path(state.cookie.path.clone())
            .build(),
    );
    (jar, StatusCode::NO_CONTENT)
}

/// Returns the authenticated account.
///
/// 404 if the account vanished after the token was minted.
pub async fn me_handler(
    State(state): State<AppState>,
    RequireAuth(ctx): RequireAuth,
) -> AuthResult<Response> {
    match state.auth.current_user(&ctx).await? {
        Some(user) => Ok(Json(UserResponse::from(user)).into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

/// Builds the refresh-token cookie from configuration.
fn refresh_cookie(config: &CookieConfig, value: String, max_age: Duration) -> Cookie<'static> {
    Cookie::build((config.name.clone(), value))
        .path(config.path.clone())
        .http_only(config.http_only)
        .secure(config.secure)
        .same_site(parse_same_site(&config.same_site))
        .max_age(time::Duration::seconds(
            i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX),
        ))
        .build()
}

fn parse_same_site(value: &str) -> SameSite {
    match value.to_ascii_lowercase().as_str() {
        "lax" => SameSite::Lax,
        "none" => SameSite::None,
        _ => SameSite::Strict,
    }
}
