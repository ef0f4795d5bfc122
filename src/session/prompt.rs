//! Line-oriented prompt I/O
//!
//! Wraps any `BufRead`/`Write` pair so the terminal can be driven by stdin
//! and stdout in production and by byte buffers in tests.

use crate::types::AtmError;
use std::io::{BufRead, Write};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` (no newline) and read one line
    ///
    /// Returns `None` once input is exhausted. The line is trimmed; invalid
    /// UTF-8 is replaced rather than rejected.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>, AtmError> {
        Ok(self.read_line(prompt)?.map(|line| line.trim().to_string()))
    }

    /// Like [`ask`](Self::ask), but only the line ending is stripped
    ///
    /// Used for PINs compared against a stored secret.
    pub fn ask_secret(&mut self, prompt: &str) -> Result<Option<String>, AtmError> {
        Ok(self
            .read_line(prompt)?
            .map(|line| line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, AtmError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            // Finish the prompt line so later output starts cleanly
            writeln!(self.output)?;
            return Ok(None);
        }

        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }

    /// Print one line
    pub fn say(&mut self, message: &str) -> Result<(), AtmError> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }
}
