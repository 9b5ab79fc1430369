//! Account lookup and persistence.
//!
//! The storage backend is a collaborator behind [`UserDirectory`]; the server
//! ships with [`InMemoryUserDirectory`]. Usernames and emails are unique, and
//! implementations enforce that in the write itself: [`create`] and
//! [`persist`] fail with [`DirectoryError::UsernameTaken`] or
//! [`DirectoryError::EmailTaken`] instead of overwriting another account.
//!
//! [`create`]: UserDirectory::create
//! [`persist`]: UserDirectory::persist

mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::modules::users::model::Account;

pub use memory::InMemoryUserDirectory;

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Username already exists")]
    UsernameTaken,

    #[error("Email already exists")]
    EmailTaken,

    #[error("No user found by username: {0}")]
    NotFound(String),

    #[error("User directory unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DirectoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DirectoryError>;

    /// All accounts, ordered by username.
    async fn list(&self) -> Result<Vec<Account>, DirectoryError>;

    /// Stores a new account. Never replaces an existing one.
    async fn create(&self, account: Account) -> Result<Account, DirectoryError>;

    /// Replaces the account stored under `current_username` with `account`,
    /// moving it when the username changes.
    async fn persist(&self, current_username: &str, account: Account)
    -> Result<Account, DirectoryError>;

    /// Rotates the last-login dates: the previous login becomes the displayed
    /// one and `at` becomes the latest. Returns the updated account.
    async fn record_login(
        &self,
        username: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<Account>, DirectoryError>;

    /// Marks the account locked. Returns the updated account.
    async fn lock(&self, username: &str) -> Result<Option<Account>, DirectoryError>;

    /// Replaces the stored password hash. Returns the updated account.
    async fn set_password_hash(
        &self,
        username: &str,
        password_hash: String,
    ) -> Result<Option<Account>, DirectoryError>;

    /// Removes the account. Returns whether it existed.
    async fn delete(&self, username: &str) -> Result<bool, DirectoryError>;
}
