use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;

use super::{DirectoryError, UserDirectory};
use crate::modules::users::model::Account;

/// Process-local directory keyed by username.
///
/// Reads go straight to the map. Writes are serialized so that uniqueness
/// checks and the write that depends on them see the same state.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    accounts: DashMap<String, Account>,
    writes: Mutex<()>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let directory = Self::new();
        for account in accounts {
            directory.accounts.insert(account.username.clone(), account);
        }
        directory
    }

    /// Whether an account other than `except` holds `email`.
    fn email_taken(&self, email: &str, except: Option<&str>) -> bool {
        self.accounts.iter().any(|entry| {
            entry.value().email.eq_ignore_ascii_case(email) && Some(entry.key().as_str()) != except
        })
    }

    async fn modify(&self, username: &str, change: impl FnOnce(&mut Account) + Send) -> Option<Account> {
        let _writes = self.writes.lock().await;
        let mut account = self.accounts.get_mut(username)?;
        change(&mut account);
        Some(account.clone())
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DirectoryError> {
        Ok(self.accounts.get(username).map(|entry| entry.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DirectoryError> {
        Ok(self
            .accounts
            .iter()
            .find(|entry| entry.value().email.eq_ignore_ascii_case(email))
            .map(|entry| entry.value().clone()))
    }

    async fn list(&self) -> Result<Vec<Account>, DirectoryError> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        accounts.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(accounts)
    }

    async fn create(&self, account: Account) -> Result<Account, DirectoryError> {
        let _writes = self.writes.lock().await;

        if self.accounts.contains_key(&account.username) {
            return Err(DirectoryError::UsernameTaken);
        }
        if self.email_taken(&account.email, None) {
            return Err(DirectoryError::EmailTaken);
        }

        self.accounts.insert(account.username.clone(), account.clone());
        Ok(account)
    }

    async fn persist(
        &self,
        current_username: &str,
        account: Account,
    ) -> Result<Account, DirectoryError> {
        let _writes = self.writes.lock().await;

        if !self.accounts.contains_key(current_username) {
            return Err(DirectoryError::NotFound(current_username.to_string()));
        }
        let renamed = account.username != current_username;
        if renamed && self.accounts.contains_key(&account.username) {
            return Err(DirectoryError::UsernameTaken);
        }
        if self.email_taken(&account.email, Some(current_username)) {
            return Err(DirectoryError::EmailTaken);
        }

        if renamed {
            self.accounts.remove(current_username);
        }
        self.accounts.insert(account.username.clone(), account.clone());
        Ok(account)
    }

    async fn record_login(
        &self,
        username: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<Account>, DirectoryError> {
        Ok(self
            .modify(username, |account| {
                account.last_login_date_display = account.last_login_date;
                account.last_login_date = Some(at);
            })
            .await)
    }

    async fn lock(&self, username: &str) -> Result<Option<Account>, DirectoryError> {
        Ok(self
            .modify(username, |account| account.non_locked = false)
            .await)
    }

    async fn set_password_hash(
        &self,
        username: &str,
        password_hash: String,
    ) -> Result<Option<Account>, DirectoryError> {
        Ok(self
            .modify(username, |account| account.password_hash = password_hash)
            .await)
    }

    async fn delete(&self, username: &str) -> Result<bool, DirectoryError> {
        let _writes = self.writes.lock().await;
        Ok(self.accounts.remove(username).is_some())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use supportportal_core::Role;

    use super::*;

    fn account(username: &str, email: &str) -> Account {
        Account {
            user_id: "0000000001".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: String::new(),
            role: Role::User,
            authorities: Role::User.authorities().iter().map(|a| a.to_string()).collect(),
            active: true,
            non_locked: true,
            join_date: Utc::now(),
            last_login_date: None,
            last_login_date_display: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let directory = InMemoryUserDirectory::new();
        directory.create(account("jdoe", "jdoe@example.com")).await.unwrap();

        let found = directory.find_by_username("jdoe").await.unwrap().unwrap();
        assert_eq!(found.email, "jdoe@example.com");

        let by_email = directory.find_by_email("JDOE@example.com").await.unwrap();
        assert_eq!(by_email.unwrap().username, "jdoe");

        assert!(directory.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_never_overwrites() {
        let directory = InMemoryUserDirectory::with_accounts([account("jdoe", "jdoe@example.com")]);

        let same_username = directory.create(account("jdoe", "other@example.com")).await;
        assert!(matches!(same_username, Err(DirectoryError::UsernameTaken)));

        let same_email = directory.create(account("john", "JDoe@Example.com")).await;
        assert!(matches!(same_email, Err(DirectoryError::EmailTaken)));

        let stored = directory.find_by_username("jdoe").await.unwrap().unwrap();
        assert_eq!(stored.email, "jdoe@example.com");
        assert_eq!(directory.list().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_creates_admit_one() {
        let directory = Arc::new(InMemoryUserDirectory::new());

        let tasks: Vec<_> = (0..16)
            .map(|n| {
                let directory = Arc::clone(&directory);
                tokio::spawn(async move {
                    let mut candidate = account("dup", &format!("dup{n}@example.com"));
                    candidate.user_id = format!("{n:0>10}");
                    directory.create(candidate).await.is_ok()
                })
            })
            .collect();

        let mut created = 0;
        for task in tasks {
            if task.await.unwrap() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(directory.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_persist_replaces() {
        let directory = InMemoryUserDirectory::with_accounts([account("jdoe", "old@example.com")]);
        directory
            .persist("jdoe", account("jdoe", "new@example.com"))
            .await
            .unwrap();

        let accounts = directory.list().await.unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].email, "new@example.com");
    }

    #[tokio::test]
    async fn test_persist_renames() {
        let directory = InMemoryUserDirectory::with_accounts([account("jdoe", "jdoe@example.com")]);
        directory
            .persist("jdoe", account("john", "jdoe@example.com"))
            .await
            .unwrap();

        assert!(directory.find_by_username("jdoe").await.unwrap().is_none());
        assert!(directory.find_by_username("john").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_persist_rejects_taken_username_and_email() {
        let directory = InMemoryUserDirectory::with_accounts([
            account("jdoe", "jdoe@example.com"),
            account("amy", "amy@example.com"),
        ]);

        let taken_username = directory.persist("jdoe", account("amy", "jdoe@example.com")).await;
        assert!(matches!(taken_username, Err(DirectoryError::UsernameTaken)));

        let taken_email = directory.persist("jdoe", account("jdoe", "amy@example.com")).await;
        assert!(matches!(taken_email, Err(DirectoryError::EmailTaken)));

        let missing = directory.persist("ghost", account("ghost", "ghost@example.com")).await;
        assert!(matches!(missing, Err(DirectoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_record_login_rotates_dates() {
        let directory = InMemoryUserDirectory::with_accounts([account("jdoe", "jdoe@example.com")]);
        let first = Utc::now();
        let second = first + chrono::Duration::minutes(5);

        directory.record_login("jdoe", first).await.unwrap();
        let updated = directory.record_login("jdoe", second).await.unwrap().unwrap();

        assert_eq!(updated.last_login_date, Some(second));
        assert_eq!(updated.last_login_date_display, Some(first));
        assert!(directory.record_login("ghost", second).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lock_keeps_other_fields() {
        let mut stored = account("jdoe", "jdoe@example.com");
        stored.password_hash = "hash".to_string();
        let directory = InMemoryUserDirectory::with_accounts([stored]);

        let locked = directory.lock("jdoe").await.unwrap().unwrap();

        assert!(!locked.non_locked);
        assert_eq!(locked.password_hash, "hash");
    }

    #[tokio::test]
    async fn test_list_is_ordered_and_delete() {
        let directory = InMemoryUserDirectory::with_accounts([
            account("zed", "zed@example.com"),
            account("amy", "amy@example.com"),
        ]);

        let names: Vec<String> = directory
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.username)
            .collect();
        assert_eq!(names, vec!["amy", "zed"]);

        assert!(directory.delete("amy").await.unwrap());
        assert!(!directory.delete("amy").await.unwrap());
        assert_eq!(directory.list().await.unwrap().len(), 1);
    }
}
