//! Core business logic module
//!
//! This module contains the account persistence components:
//! - `traits` - The storage abstraction behind the store
//! - `account_store` - Ownership of all accounts and their load/save/create contract

pub mod account_store;
pub mod traits;

pub use account_store::AccountStore;
pub use traits::{AccountMap, AccountStorage};
