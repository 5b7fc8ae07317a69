//! Storage traits for auth-related data.
//!
//! - [`user`] - The stored user record and lookup trait
//! - [`memory`] - In-memory implementation for tests and demos

pub mod memory;
pub mod user;

pub use memory::MemoryUserStore;
pub use user::{User, UserStore};
