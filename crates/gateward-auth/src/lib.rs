//! # gateward-auth
//!
//! Stateless, dual-token JWT authentication for axum services.
//!
//! This crate provides:
//! - A token service minting signed, self-contained access and refresh
//!   tokens from a narrow principal view
//! - A never-rejecting authentication layer that installs a
//!   request-scoped auth context from bearer tokens
//! - Login/refresh orchestration over pluggable user storage and
//!   credential verification
//! - Ready-made axum handlers for `/auth/login`, `/auth/refresh`,
//!   `/auth/revoke-refresh-token`, and `/auth/me`
//!
//! ## Design
//!
//! Tokens are stateless: no session store, no revocation list. Access
//! and refresh tokens are structurally identical, differing only in
//! lifetime; the refresh token lives in an HttpOnly cookie and is never
//! rotated on use. Refresh always re-reads the live account, so role
//! changes take effect on the next access token.
//!
//! ## Modules
//!
//! - [`config`] - Signing secret, lifetimes, cookie settings
//! - [`token`] - Claims model and the signing service
//! - [`principal`] - The capability view of the host's user type
//! - [`middleware`] - Authentication layer and extractors
//! - [`service`] - Login/refresh orchestration
//! - [`http`] - Axum handlers and router
//! - [`storage`] - User record and lookup traits
//! - [`password`] - Credential verification

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod password;
pub mod principal;
pub mod service;
pub mod storage;
pub mod token;

pub use config::{AuthConfig, ConfigError, CookieConfig, MIN_SECRET_BYTES};
pub use error::{AuthError, AuthResult};
pub use http::{AppState, LoginRequest, TokenResponse, UserResponse, router};
pub use middleware::{AuthContext, AuthState, OptionalAuth, ROLE_PREFIX, RequireAuth, authenticate};
pub use password::{Argon2Verifier, CredentialVerifier};
pub use principal::Principal;
pub use service::{AuthService, LoginTokens};
pub use storage::{MemoryUserStore, User, UserStore};
pub use token::{JwtService, SignedToken, TokenClaims};
