//! Interactive teller terminal
//!
//! The `Terminal` drives the session state machine over a prompt, dispatches
//! menu choices to account operations, and decides when the store is saved:
//! right after a user is created, and whenever an authenticated session
//! ends (logout or end of input).
//!
//! Every error raised by an account operation is recovered here and shown as
//! a message. Only storage and terminal I/O failures propagate out of `run`.

use crate::core::{AccountStorage, AccountStore};
use crate::session::auth::{AttemptOutcome, LoginAttempt, SessionState};
use crate::session::config::TerminalConfig;
use crate::session::menu::{
    AccountMenuChoice, MainMenuChoice, ACCOUNT_MENU, ACCOUNT_MENU_PROMPT, MAIN_MENU,
    MAIN_MENU_PROMPT,
};
use crate::session::prompt::Prompter;
use crate::types::{normalize_username, parse_amount, Account, AtmError, Pin};
use std::io::{BufRead, Write};
use tracing::{info, warn};

const WELCOME_BANNER: &str = "=== Welcome to the ATM ===";
const FAREWELL: &str = "Goodbye!";
const SESSION_CLOSED: &str = "Thank you for using the ATM!";

/// What the run loop does after a step
enum Step {
    Continue(SessionState),
    Exit,
}

/// Whether an account operation finished or ran out of input
enum Flow {
    Done,
    InputClosed,
}

/// Interactive terminal bound to an account store
pub struct Terminal<'a, S: AccountStorage, R, W> {
    store: &'a mut AccountStore<S>,
    prompter: Prompter<R, W>,
    config: TerminalConfig,
    state: SessionState,
}

impl<'a, S, R, W> Terminal<'a, S, R, W>
where
    S: AccountStorage,
    R: BufRead,
    W: Write,
{
    pub fn new(store: &'a mut AccountStore<S>, input: R, output: W, config: TerminalConfig) -> Self {
        Self {
            store,
            prompter: Prompter::new(input, output),
            config,
            state: SessionState::Anonymous,
        }
    }

    /// Current position in the login/logout cycle
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Run until the user quits or input ends
    ///
    /// # Errors
    ///
    /// Returns storage errors raised while saving and I/O errors on the
    /// prompt. Everything else is reported to the user and the loop goes on.
    pub fn run(&mut self) -> Result<(), AtmError> {
        self.prompter.say(WELCOME_BANNER)?;

        loop {
            let state = std::mem::replace(&mut self.state, SessionState::Anonymous);
            let step = match state {
                SessionState::Anonymous => self.main_menu_step()?,
                SessionState::Authenticating(attempt) => self.login_step(attempt)?,
                SessionState::Authenticated { username } => self.account_menu_step(username)?,
            };

            match step {
                Step::Continue(next) => self.state = next,
                Step::Exit => return Ok(()),
            }
        }
    }

    fn main_menu_step(&mut self) -> Result<Step, AtmError> {
        self.prompter.say(MAIN_MENU)?;
        let Some(input) = self.prompter.ask(MAIN_MENU_PROMPT)? else {
            return Ok(Step::Exit);
        };

        match input.parse::<MainMenuChoice>() {
            Ok(MainMenuChoice::Login) => self.begin_login(),
            Ok(MainMenuChoice::CreateUser) => self.create_user(),
            Ok(MainMenuChoice::Quit) => {
                self.prompter.say(FAREWELL)?;
                Ok(Step::Exit)
            }
            Err(e) => {
                self.report(&e)?;
                Ok(Step::Continue(SessionState::Anonymous))
            }
        }
    }

    fn begin_login(&mut self) -> Result<Step, AtmError> {
        let Some(input) = self.prompter.ask("Enter username: ")? else {
            return Ok(Step::Exit);
        };

        let username = match normalize_username(&input) {
            Ok(username) if self.store.contains(&username) => username,
            Ok(username) => {
                warn!(username = %username, "login for unknown user");
                self.report(&AtmError::user_not_found(&username))?;
                return Ok(Step::Continue(SessionState::Anonymous));
            }
            Err(e) => {
                self.report(&e)?;
                return Ok(Step::Continue(SessionState::Anonymous));
            }
        };

        let attempt = LoginAttempt::new(&username);
        Ok(Step::Continue(SessionState::Authenticating(attempt)))
    }

    fn login_step(&mut self, mut attempt: LoginAttempt) -> Result<Step, AtmError> {
        let Some(candidate) = self.prompter.ask_secret("Enter your 4-digit PIN: ")? else {
            return Ok(Step::Exit);
        };

        let Some(account) = self.store.get(attempt.username()) else {
            self.report(&AtmError::user_not_found(attempt.username()))?;
            return Ok(Step::Continue(SessionState::Anonymous));
        };

        match attempt.submit(account, &candidate) {
            AttemptOutcome::Granted => {
                let username = attempt.username().to_string();
                info!(username = %username, "login succeeded");
                self.prompter.say(&format!("\nWelcome, {}!", username))?;
                Ok(Step::Continue(SessionState::Authenticated { username }))
            }
            AttemptOutcome::Rejected { remaining } => {
                warn!(username = %attempt.username(), remaining, "invalid PIN");
                self.prompter.say("Invalid PIN.")?;
                Ok(Step::Continue(SessionState::Authenticating(attempt)))
            }
            AttemptOutcome::LockedOut => {
                self.prompter.say("Invalid PIN.")?;
                let error = attempt.into_error();
                warn!(%error, "login refused");
                self.report(&error)?;
                Ok(Step::Continue(SessionState::Anonymous))
            }
        }
    }

    fn account_menu_step(&mut self, username: String) -> Result<Step, AtmError> {
        self.prompter.say(ACCOUNT_MENU)?;
        let Some(input) = self.prompter.ask(ACCOUNT_MENU_PROMPT)? else {
            self.end_session(&username)?;
            return Ok(Step::Exit);
        };

        let flow = match input.parse::<AccountMenuChoice>() {
            Ok(AccountMenuChoice::ViewBalance) => {
                let balance = self.account(&username)?.balance();
                let message = format!("Current balance: {}", self.config.format_money(balance));
                self.prompter.say(&message)?;
                Flow::Done
            }
            Ok(AccountMenuChoice::Withdraw) => self.withdraw(&username)?,
            Ok(AccountMenuChoice::Deposit) => self.deposit(&username)?,
            Ok(AccountMenuChoice::ChangePin) => self.change_pin(&username)?,
            Ok(AccountMenuChoice::ViewHistory) => {
                let report = self.account(&username)?.history_report(&self.config.currency);
                self.prompter.say("\nTransaction History:")?;
                self.prompter.say(&report)?;
                Flow::Done
            }
            Ok(AccountMenuChoice::Logout) => {
                self.end_session(&username)?;
                return Ok(Step::Continue(SessionState::Anonymous));
            }
            Err(e) => {
                self.report(&e)?;
                Flow::Done
            }
        };

        match flow {
            Flow::Done => Ok(Step::Continue(SessionState::Authenticated { username })),
            Flow::InputClosed => {
                self.end_session(&username)?;
                Ok(Step::Exit)
            }
        }
    }

    fn withdraw(&mut self, username: &str) -> Result<Flow, AtmError> {
        let Some(input) = self.prompter.ask("Enter amount to withdraw: ")? else {
            return Ok(Flow::InputClosed);
        };

        let result = match parse_amount(&input) {
            Ok(amount) => self.account_mut(username)?.withdraw(amount),
            Err(e) => Err(e),
        };

        match result {
            Ok(balance) => {
                let message = format!(
                    "Withdrawal successful. New balance: {}",
                    self.config.format_money(balance)
                );
                self.prompter.say(&message)?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Done)
    }

    fn deposit(&mut self, username: &str) -> Result<Flow, AtmError> {
        let Some(input) = self.prompter.ask("Enter amount to deposit: ")? else {
            return Ok(Flow::InputClosed);
        };

        let result = match parse_amount(&input) {
            Ok(amount) => self.account_mut(username)?.deposit(amount),
            Err(e) => Err(e),
        };

        match result {
            Ok(balance) => {
                let message = format!(
                    "Deposit successful. New balance: {}",
                    self.config.format_money(balance)
                );
                self.prompter.say(&message)?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Done)
    }

    fn change_pin(&mut self, username: &str) -> Result<Flow, AtmError> {
        let Some(input) = self.prompter.ask("Enter new 4-digit PIN: ")? else {
            return Ok(Flow::InputClosed);
        };

        let current = self.account(username)?.pin().clone();
        let new_pin = match Pin::parse(&input) {
            Ok(pin) if pin != current => pin,
            Ok(_) => {
                self.report(&AtmError::invalid_pin_format(
                    "new PIN must differ from the current PIN",
                ))?;
                return Ok(Flow::Done);
            }
            Err(e) => {
                self.report(&e)?;
                return Ok(Flow::Done);
            }
        };

        let Some(confirmation) = self.prompter.ask_secret("Confirm new PIN: ")? else {
            return Ok(Flow::InputClosed);
        };
        if !new_pin.matches(&confirmation) {
            self.report(&AtmError::PinMismatch)?;
            return Ok(Flow::Done);
        }

        match self.account_mut(username)?.change_secret(new_pin) {
            Ok(()) => {
                info!(username = %username, "PIN changed");
                self.prompter.say("PIN successfully changed.")?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(Flow::Done)
    }

    fn create_user(&mut self) -> Result<Step, AtmError> {
        let Some(input) = self.prompter.ask("Enter a new username: ")? else {
            return Ok(Step::Exit);
        };

        let username = match normalize_username(&input) {
            Ok(username) if self.store.contains(&username) => {
                self.report(&AtmError::duplicate_user(&username))?;
                return Ok(Step::Continue(SessionState::Anonymous));
            }
            Ok(username) => username,
            Err(e) => {
                self.report(&e)?;
                return Ok(Step::Continue(SessionState::Anonymous));
            }
        };

        let pin = loop {
            let Some(input) = self.prompter.ask("Enter a 4-digit PIN: ")? else {
                return Ok(Step::Exit);
            };
            match Pin::parse(&input) {
                Ok(pin) => break pin,
                Err(_) => self
                    .prompter
                    .say("Invalid PIN. Please enter a 4-digit number.")?,
            }
        };

        match self.store.create(&username, pin).map(|_| ()) {
            Ok(()) => self.prompter.say("User created successfully!")?,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => self.report(&e)?,
        }
        Ok(Step::Continue(SessionState::Anonymous))
    }

    /// Save the store and say goodbye to the logged-in user
    fn end_session(&mut self, username: &str) -> Result<(), AtmError> {
        self.store.save()?;
        info!(username = %username, "session ended");
        self.prompter.say(SESSION_CLOSED)
    }

    fn account(&self, username: &str) -> Result<&Account, AtmError> {
        self.store
            .get(username)
            .ok_or_else(|| AtmError::user_not_found(username))
    }

    fn account_mut(&mut self, username: &str) -> Result<&mut Account, AtmError> {
        self.store
            .get_mut(username)
            .ok_or_else(|| AtmError::user_not_found(username))
    }

    /// Show a recoverable error as a user-facing message
    fn report(&mut self, error: &AtmError) -> Result<(), AtmError> {
        let message = self.user_message(error);
        self.prompter.say(&message)
    }

    fn user_message(&self, error: &AtmError) -> String {
        match error {
            AtmError::InvalidAmount { .. } => {
                "Invalid amount. Amounts must be positive multiples of 10.".to_string()
            }
            AtmError::InsufficientFunds { available, .. } => format!(
                "Insufficient balance. Current balance: {}",
                self.config.format_money(*available)
            ),
            AtmError::InvalidPinFormat { .. } => "Invalid PIN format or same as old.".to_string(),
            AtmError::PinMismatch => "PIN mismatch.".to_string(),
            AtmError::InvalidUsername => "Username must not be empty.".to_string(),
            AtmError::DuplicateUser { .. } => "Username already exists!".to_string(),
            AtmError::UserNotFound { .. } => "User not found.".to_string(),
            AtmError::AuthFailed { .. } => "Too many failed attempts.".to_string(),
            AtmError::InvalidOption { .. } => "Invalid option.".to_string(),
            AtmError::ArithmeticOverflow { .. } => "Amount too large for this account.".to_string(),
            other => other.to_string(),
        }
    }
}
