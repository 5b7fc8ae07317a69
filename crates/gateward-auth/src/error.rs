//! Authentication error types.
//!
//! This module defines the error taxonomy for token minting, login and
//! refresh operations, together with the HTTP mapping used by the
//! handlers and extractors.
//!
//! Token *parse* failures are deliberately not part of this taxonomy:
//! [`JwtService::parse`](crate::token::JwtService::parse) reports them as
//! `None` so that the authentication middleware can treat a malformed
//! token exactly like an absent one.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Errors that can occur during authentication operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A token was requested for a missing or disabled principal.
    #[error("Invalid principal: {message}")]
    InvalidPrincipal {
        /// Description of why the principal was rejected.
        message: String,
    },

    /// The supplied credentials do not match any enabled account.
    ///
    /// Unknown account and wrong password are intentionally
    /// indistinguishable to prevent account enumeration.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The refresh token is missing, malformed, or expired.
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// The request lacks valid authentication context.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Description of why the request is unauthorized.
        message: String,
    },

    /// An error occurred while loading auth data from the user store.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage error.
        message: String,
    },
}

impl AuthError {
    /// Creates a new `InvalidPrincipal` error.
    #[must_use]
    pub fn invalid_principal(message: impl Into<String>) -> Self {
        Self::InvalidPrincipal {
            message: message.into(),
        }
    }

    /// Creates a new `Unauthorized` error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates a new `Storage` error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Returns the HTTP status code this error maps to.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials | Self::InvalidRefreshToken | Self::Unauthorized { .. } => {
                StatusCode::UNAUTHORIZED
            }
            Self::InvalidPrincipal { .. } => StatusCode::BAD_REQUEST,
            Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal detail stays in the logs, not in the response body.
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "Internal error during authentication");
            "internal error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Type alias for authentication results.
pub type AuthResult<T> = Result<T, AuthError>;
