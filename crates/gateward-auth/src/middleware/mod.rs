//! HTTP middleware for request authentication.
//!
//! - [`auth`] - The per-request authentication layer and extractors
//! - [`types`] - The request-scoped [`AuthContext`]

pub mod auth;
pub mod types;

pub use auth::{AuthState, OptionalAuth, RequireAuth, authenticate};
pub use types::{AuthContext, ROLE_PREFIX};
