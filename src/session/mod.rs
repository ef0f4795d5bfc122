//! Interactive session module
//!
//! Everything between the user and the account store:
//! - `auth` - Session state machine and PIN attempts
//! - `config` - Terminal configuration (currency symbol)
//! - `menu` - Menu text and selection parsing
//! - `prompt` - Line-oriented prompt I/O
//! - `terminal` - The controller that runs the menus

pub mod auth;
pub mod config;
pub mod menu;
pub mod prompt;
pub mod terminal;

pub use auth::{AttemptOutcome, LoginAttempt, SessionState, MAX_PIN_ATTEMPTS};
pub use config::TerminalConfig;
pub use menu::{AccountMenuChoice, MainMenuChoice};
pub use prompt::Prompter;
pub use terminal::Terminal;

use crate::core::AccountStore;
use crate::io::JsonFileStorage;
use crate::types::AtmError;
use std::io::{BufRead, Write};
use std::path::Path;

/// Open the data file, load the store and run a terminal over `input`/`output`
///
/// The data file stays locked until this returns.
///
/// # Errors
///
/// - `StoreLocked` if another terminal is using the data file
/// - `CorruptData` if the data file cannot be parsed (the file is not modified)
/// - `IoError` if saving fails or the terminal cannot be read or written
pub fn run_session<R: BufRead, W: Write>(
    data_file: &Path,
    config: TerminalConfig,
    input: R,
    output: W,
) -> Result<(), AtmError> {
    let storage = JsonFileStorage::open(data_file)?;
    let mut store = AccountStore::load(storage)?;
    let mut terminal = Terminal::new(&mut store, input, output, config);
    terminal.run()
}
