//! User interface module - interactive confirmation and message output.
//!
//! - `logger` - the [Logger] sink and its implementations
//! - This module - the [Confirm] gate and terminal prompt handling

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use console::style;

use crate::error::{Result, SemtagError};

pub mod logger;

pub use logger::{BufferedLogger, ConsoleLogger, Level, Logger, Verbosity};

/// Yes/no gate in front of every mutation
///
/// Returns `Ok(true)` only on an affirmative answer. Anything else,
/// including no answer at all, means "do nothing".
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Source of one line of user input
pub type ReadAnswer = fn() -> io::Result<String>;

/// Asks on the controlling terminal and reads one line from stdin
#[derive(Debug, Clone, Copy)]
pub struct TerminalPrompt {
    timeout: Option<Duration>,
    read: ReadAnswer,
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        TerminalPrompt {
            timeout: None,
            read: read_stdin_line,
        }
    }
}

impl TerminalPrompt {
    /// Treat a prompt left unanswered for `timeout` as declined; `None`
    /// waits indefinitely
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        TerminalPrompt {
            timeout,
            ..Self::default()
        }
    }

    /// Read answers from `read` instead of stdin
    pub fn with_reader(mut self, read: ReadAnswer) -> Self {
        self.read = read;
        self
    }
}

impl Confirm for TerminalPrompt {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        print!("\n{} {}: ", style(prompt).bold(), style("(y/N)").dim());
        io::stdout().flush()?;

        let read = self.read;
        let answer = match self.timeout {
            None => read()?,
            Some(timeout) => {
                // stdin has no portable timed read; the reader thread is left
                // blocked on timeout and goes away with the process
                let (tx, rx) = mpsc::channel();
                thread::spawn(move || {
                    let _ = tx.send(read());
                });

                match rx.recv_timeout(timeout) {
                    Ok(answer) => answer?,
                    Err(RecvTimeoutError::Timeout) => {
                        println!();
                        tracing::debug!(?timeout, "confirmation timed out");
                        return Ok(false);
                    }
                    Err(RecvTimeoutError::Disconnected) => {
                        return Err(SemtagError::prompt("input reader stopped unexpectedly"));
                    }
                }
            }
        };

        Ok(is_affirmative(&answer))
    }
}

/// Always gives the same answer without asking. Used for `--force` style
/// automation and in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&self, _prompt: &str) -> Result<bool> {
        Ok(self.0)
    }
}

fn read_stdin_line() -> io::Result<String> {
    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input)
}

/// Accepts "y" or "yes" in any case; everything else declines
pub fn is_affirmative(answer: &str) -> bool {
    let response = answer.trim().to_lowercase();
    response == "y" || response == "yes"
}
