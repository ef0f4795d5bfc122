//! Account store module
//!
//! This module provides the `AccountStore` struct which owns every account
//! for the lifetime of the process and defines when they are persisted.
//!
//! The AccountStore is responsible for:
//! - Loading all accounts once at startup
//! - Creating new accounts and persisting them immediately
//! - Handing out accounts for the session controller to mutate
//! - Saving the full mapping at the end of each session

use crate::core::traits::{AccountMap, AccountStorage};
use crate::types::{normalize_username, Account, AtmError, Pin};
use tracing::info;

/// Owns all accounts and the storage they are persisted to
///
/// There is no global state: `main` owns the store and passes it by
/// mutable reference into the session controller.
pub struct AccountStore<S: AccountStorage> {
    /// Map of normalized usernames to accounts
    accounts: AccountMap,
    storage: S,
}

impl<S: AccountStorage> AccountStore<S> {
    /// Load all accounts from `storage`
    ///
    /// # Errors
    ///
    /// Propagates storage failures, including `CorruptData` for a data file
    /// that cannot be parsed.
    pub fn load(storage: S) -> Result<Self, AtmError> {
        let accounts = storage.load()?;
        info!(
            location = %storage.location(),
            accounts = accounts.len(),
            "account store loaded"
        );
        Ok(Self { accounts, storage })
    }

    /// Persist every account (username, PIN and balance only)
    pub fn save(&mut self) -> Result<(), AtmError> {
        self.storage.save(&self.accounts)?;
        info!(
            location = %self.storage.location(),
            accounts = self.accounts.len(),
            "account store saved"
        );
        Ok(())
    }

    /// Create a zero-balance account and persist the store immediately
    ///
    /// The username is normalized before the duplicate check, so `Alice`
    /// and `alice` name the same account. If the save fails the new account
    /// is removed again, leaving memory consistent with disk.
    ///
    /// # Errors
    ///
    /// - `InvalidUsername` if the username is blank
    /// - `DuplicateUser` if the username is already taken
    /// - Any storage error raised while saving
    pub fn create(&mut self, username: &str, pin: Pin) -> Result<&Account, AtmError> {
        let username = normalize_username(username)?;
        if self.accounts.contains_key(&username) {
            return Err(AtmError::duplicate_user(&username));
        }

        self.accounts
            .insert(username.clone(), Account::new(username.clone(), pin));

        if let Err(e) = self.save() {
            self.accounts.remove(&username);
            return Err(e);
        }

        info!(username = %username, "user created");
        Ok(&self.accounts[&username])
    }

    /// Look up an account by (unnormalized) username
    pub fn get(&self, username: &str) -> Option<&Account> {
        let username = normalize_username(username).ok()?;
        self.accounts.get(&username)
    }

    /// Look up an account for mutation
    pub fn get_mut(&mut self, username: &str) -> Option<&mut Account> {
        let username = normalize_username(username).ok()?;
        self.accounts.get_mut(&username)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.get(username).is_some()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Usernames in sorted order
    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.accounts.keys().map(String::as_str)
    }

    /// The storage backing this store
    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryStorage;

    fn pin(s: &str) -> Pin {
        Pin::parse(s).unwrap()
    }

    #[test]
    fn test_load_empty_storage() {
        let store = AccountStore::load(MemoryStorage::new()).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_create_inserts_zero_balance_account() {
        let mut store = AccountStore::load(MemoryStorage::new()).unwrap();

        let account = store.create("alice", pin("1234")).unwrap();

        assert_eq!(account.username(), "alice");
        assert_eq!(account.balance(), 0);
        assert!(account.verify_secret("1234"));
    }

    #[test]
    fn test_create_normalizes_username() {
        let mut store = AccountStore::load(MemoryStorage::new()).unwrap();

        store.create("  Alice ", pin("1234")).unwrap();

        assert!(store.contains("alice"));
        assert!(store.contains("ALICE"));
        assert_eq!(store.usernames().collect::<Vec<_>>(), vec!["alice"]);
    }

    #[test]
    fn test_create_persists_immediately() {
        let mut store = AccountStore::load(MemoryStorage::new()).unwrap();

        store.create("alice", pin("1234")).unwrap();

        assert_eq!(store.storage().save_count(), 1);
        let reloaded = store.storage().load().unwrap();
        assert_eq!(reloaded["alice"].balance(), 0);
        assert_eq!(reloaded["alice"].pin().as_str(), "1234");
    }

    #[test]
    fn test_create_duplicate_is_case_insensitive() {
        let mut store = AccountStore::load(MemoryStorage::new()).unwrap();
        store.create("alice", pin("1234")).unwrap();

        let result = store.create("ALICE", pin("5678"));

        assert_eq!(result.unwrap_err(), AtmError::duplicate_user("alice"));
        assert_eq!(store.len(), 1);
        assert!(store.get("alice").unwrap().verify_secret("1234"));
    }

    #[test]
    fn test_create_rejects_blank_username() {
        let mut store = AccountStore::load(MemoryStorage::new()).unwrap();

        let result = store.create("   ", pin("1234"));

        assert_eq!(result.unwrap_err(), AtmError::InvalidUsername);
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_rolls_back_when_save_fails() {
        let mut store = AccountStore::load(MemoryStorage::failing_saves()).unwrap();

        let result = store.create("alice", pin("1234"));

        assert!(matches!(result, Err(AtmError::IoError { .. })));
        assert!(!store.contains("alice"));
    }

    #[test]
    fn test_get_mut_allows_mutation() {
        let mut store = AccountStore::load(MemoryStorage::new()).unwrap();
        store.create("alice", pin("1234")).unwrap();

        store.get_mut("Alice").unwrap().deposit(50).unwrap();

        assert_eq!(store.get("alice").unwrap().balance(), 50);
    }

    #[test]
    fn test_get_unknown_user() {
        let store = AccountStore::load(MemoryStorage::new()).unwrap();
        assert!(store.get("ghost").is_none());
        assert!(store.get("").is_none());
    }

    #[test]
    fn test_balance_round_trips_but_history_does_not() {
        let mut store = AccountStore::load(MemoryStorage::new()).unwrap();
        store.create("Alice", pin("1234")).unwrap();
        store.get_mut("alice").unwrap().deposit(70).unwrap();
        store.save().unwrap();

        let storage = store.storage().clone();
        let reloaded = AccountStore::load(storage).unwrap();
        let account = reloaded.get("alice").unwrap();

        assert_eq!(account.balance(), 70);
        assert!(account.verify_secret("1234"));
        assert!(account.history().is_empty());
    }
}
