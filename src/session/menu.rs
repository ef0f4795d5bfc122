//! Menu definitions and selection parsing

use crate::types::AtmError;
use std::str::FromStr;

pub const MAIN_MENU: &str = "\nChoose an option:\n1. Login\n2. Create a new user\n3. Quit";
pub const MAIN_MENU_PROMPT: &str = "Select (1-3): ";

pub const ACCOUNT_MENU: &str = "\nChoose an option:\n\
1. View Balance\n\
2. Withdraw\n\
3. Deposit\n\
4. Change PIN\n\
5. View Transaction History\n\
6. Quit";
pub const ACCOUNT_MENU_PROMPT: &str = "Select (1-6): ";

/// Options offered while nobody is logged in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuChoice {
    Login,
    CreateUser,
    Quit,
}

impl FromStr for MainMenuChoice {
    type Err = AtmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MainMenuChoice::Login),
            "2" => Ok(MainMenuChoice::CreateUser),
            "3" => Ok(MainMenuChoice::Quit),
            other => Err(AtmError::invalid_option(other)),
        }
    }
}

/// Options offered to an authenticated user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountMenuChoice {
    ViewBalance,
    Withdraw,
    Deposit,
    ChangePin,
    ViewHistory,
    /// Ends the session; shown as "Quit"
    Logout,
}

impl FromStr for AccountMenuChoice {
    type Err = AtmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(AccountMenuChoice::ViewBalance),
            "2" => Ok(AccountMenuChoice::Withdraw),
            "3" => Ok(AccountMenuChoice::Deposit),
            "4" => Ok(AccountMenuChoice::ChangePin),
            "5" => Ok(AccountMenuChoice::ViewHistory),
            "6" => Ok(AccountMenuChoice::Logout),
            other => Err(AtmError::invalid_option(other)),
        }
    }
}
