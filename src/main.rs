//! ATM Terminal CLI
//!
//! Interactive teller terminal over stdin/stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --data-file bank.json
//! cargo run -- --currency '$'
//! RUST_LOG=info cargo run
//! ```
//!
//! Logs go to stderr so they never mix with the terminal transcript.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (corrupt data file, data file in use, I/O failure while saving)

use rust_atm_terminal::cli;
use rust_atm_terminal::session;
use std::io;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = args.to_terminal_config();

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = session::run_session(&args.data_file, config, stdin.lock(), stdout.lock()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
