//! Principal capability trait.
//!
//! The token service never holds a reference to the host application's
//! full user entity. It reads identity attributes through this narrow,
//! read-only view, which the host's user type implements.

use std::collections::BTreeSet;

use uuid::Uuid;

/// Read-only view of a user-like entity, as embedded in tokens.
///
/// Implement this for whatever type your application stores users in;
/// the token service copies these attributes into token claims at mint
/// time and never touches the entity again.
///
/// # Example
///
/// ```ignore
/// struct Account { /* ... */ }
///
/// impl Principal for Account {
///     fn id(&self) -> Uuid { self.id }
///     fn email(&self) -> &str { &self.email }
///     // ...
/// }
/// ```
pub trait Principal: Send + Sync {
    /// Unique identifier. Becomes the token's `sub` claim and must never
    /// change for a given account.
    fn id(&self) -> Uuid;

    /// Email address, typically the login identifier.
    fn email(&self) -> &str;

    /// Display username (profile URLs, mentions). May equal the email.
    fn username(&self) -> &str;

    /// First name.
    fn first_name(&self) -> &str;

    /// Last name.
    fn last_name(&self) -> &str;

    /// Assigned role names, e.g. `{"ADMIN", "USER"}`.
    fn roles(&self) -> BTreeSet<String>;

    /// Whether the account may authenticate. Disabled accounts are
    /// refused tokens outright.
    fn is_enabled(&self) -> bool;
}
