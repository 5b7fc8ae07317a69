//! Token model and signing service.
//!
//! - [`claims`] - The strongly-typed claims structure embedded in tokens
//! - [`service`] - Minting and validation over the shared secret

pub mod claims;
pub mod service;

pub use claims::TokenClaims;
pub use service::{JwtService, SignedToken};
