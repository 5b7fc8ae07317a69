//! User record and storage trait.
//!
//! Defines the interface the orchestration layer uses to look up
//! accounts. Implementations are provided by the host application
//! (database-backed in production, [`MemoryUserStore`] in tests and the
//! reference server).
//!
//! [`MemoryUserStore`]: crate::storage::MemoryUserStore

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::AuthResult;
use crate::principal::Principal;

/// A stored user account.
///
/// This is the record the auth service reads when logging in or
/// refreshing; how it is persisted is the store implementation's
/// concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, used as the token subject.
    pub id: Uuid,

    /// Email address, the login identifier. Unique across users.
    pub email: String,

    /// Display username.
    pub username: String,

    /// First name.
    pub first_name: String,

    /// Last name.
    pub last_name: String,

    /// Assigned role names.
    pub roles: BTreeSet<String>,

    /// Whether the account may authenticate.
    pub enabled: bool,

    /// Password hash in PHC string format (never serialized out).
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// When the account was created.
    #[serde(default = "OffsetDateTime::now_utc")]
    pub created_at: OffsetDateTime,
}

impl Principal for User {
    fn id(&self) -> Uuid {
        self.id
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn first_name(&self) -> &str {
        &self.first_name
    }

    fn last_name(&self) -> &str {
        &self.last_name
    }

    fn roles(&self) -> BTreeSet<String> {
        self.roles.clone()
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Storage interface for user lookup.
///
/// Both lookups are synchronous calls from the caller's perspective and
/// are never retried by the auth service; failures propagate
/// immediately as [`AuthError::Storage`](crate::AuthError::Storage).
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Finds a user by identifier.
    async fn find_by_id(&self, id: Uuid) -> AuthResult<Option<User>>;

    /// Finds a user by email address.
    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>>;
}
