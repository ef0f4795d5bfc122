use crate::session::config::TerminalConfig;
use clap::Parser;
use std::path::PathBuf;

/// Simulated teller terminal backed by a JSON data file
#[derive(Parser, Debug)]
#[command(name = "atm-terminal")]
#[command(about = "Simulated teller terminal backed by a JSON data file", long_about = None)]
pub struct CliArgs {
    /// Path of the JSON file holding the accounts
    #[arg(
        long = "data-file",
        value_name = "PATH",
        default_value = "users.json",
        help = "Path of the account data file (created on first save)"
    )]
    pub data_file: PathBuf,

    /// Currency symbol prefixed to amounts
    #[arg(
        long = "currency",
        value_name = "SYMBOL",
        help = "Currency symbol shown before amounts (default: €)"
    )]
    pub currency: Option<String>,
}

impl CliArgs {
    /// Create a TerminalConfig from CLI arguments
    ///
    /// A missing currency uses the default; a blank one falls back to the
    /// default with a warning.
    pub fn to_terminal_config(&self) -> TerminalConfig {
        match self.currency.as_deref() {
            Some(currency) => TerminalConfig::new(currency),
            None => TerminalConfig::default(),
        }
    }
}
