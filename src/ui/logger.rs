//! User-facing message output.
//!
//! The workflow reports through the [Logger] trait and never formats or
//! colors anything itself. [ConsoleLogger] is the terminal implementation,
//! [BufferedLogger] keeps messages in memory.

use std::cell::RefCell;

use console::style;

/// How chatty the process is. Fixed once at startup from `--debug`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    #[default]
    Normal,
    Debug,
}

impl Verbosity {
    pub fn from_debug_flag(debug: bool) -> Self {
        if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }

    pub fn is_debug(self) -> bool {
        self == Verbosity::Debug
    }
}

/// Message severity, as recorded by [BufferedLogger]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Log,
    Info,
    Warn,
    Debug,
    Error,
}

/// Sink for the messages the workflow reports
pub trait Logger {
    /// Headline message
    fn log(&self, message: &str);
    /// Detail line under a headline
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    /// Only shown when debugging is enabled
    fn debug(&self, message: &str);
    fn error(&self, message: &str);
}

/// Styled terminal output
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleLogger {
    verbosity: Verbosity,
}

impl ConsoleLogger {
    pub fn new(verbosity: Verbosity) -> Self {
        let logger = ConsoleLogger { verbosity };
        logger.debug("Debugging messages enabled!");
        logger
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, message: &str) {
        println!("{}", style(message).bold());
    }

    fn info(&self, message: &str) {
        println!("{}", style(message).cyan());
    }

    fn warn(&self, message: &str) {
        eprintln!("{} {}", style("⚠").yellow(), style(message).yellow());
    }

    fn debug(&self, message: &str) {
        if self.verbosity.is_debug() {
            eprintln!("{} {}", style("[debug]").dim(), style(message).dim());
        }
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", style("ERROR:").red().bold(), message);
    }
}

/// Records every message, debug included, in the order received
#[derive(Debug, Default)]
pub struct BufferedLogger {
    entries: RefCell<Vec<(Level, String)>>,
}

impl BufferedLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.borrow().clone()
    }

    /// Messages logged at `level`
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Whether any message at any level contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.borrow().iter().any(|(_, m)| m.contains(needle))
    }

    fn push(&self, level: Level, message: &str) {
        self.entries.borrow_mut().push((level, message.to_string()));
    }
}

impl Logger for BufferedLogger {
    fn log(&self, message: &str) {
        self.push(Level::Log, message);
    }

    fn info(&self, message: &str) {
        self.push(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(Level::Warn, message);
    }

    fn debug(&self, message: &str) {
        self.push(Level::Debug, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::Error, message);
    }
}
