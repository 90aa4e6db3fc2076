//! Command line switches registered at run time.
//!
//! A switch is registered from a list of strings: `-d` and `--debug` name it,
//! a placeholder after the name declares a value (`--debug LEVEL` or
//! `--debug=LEVEL` for a required one, `--debug [LEVEL]` for an optional
//! one), `--[no-]debug` also accepts `--no-debug`, and every other string is a
//! line of description for the help output.
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! let mut parser = optswitch::OptionParser::new();
//! parser.on(["-d", "--debug [level]", "enable debug mode"])?;
//! parser.on(["-i", "--interactive", "enable interactive mode"])?;
//!
//! let mut args = vec!["-d".to_string(), "verbose".to_string(), "file.txt".to_string()];
//! let mut opts = BTreeMap::new();
//! parser.parse_into(&mut args, &mut opts)?;
//!
//! assert_eq!(args, ["file.txt"]);
//! assert_eq!(opts["debug"], optswitch::Value::from("verbose"));
//! # Ok::<(), optswitch::Error>(())
//! ```
mod ast;
mod emit;
mod option_parser;
mod parse;
mod rt;

use std::fmt;

pub use crate::option_parser::{OptionParser, Settings};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A switch that requires a value was the last token.
    #[error("missing argument: {0}")]
    MissingArgument(String),
    /// A `-x` or `--xyz` token that matches no registered switch.
    #[error("invalid option: {0}")]
    InvalidOption(String),
    /// An abbreviated long option that matches more than one switch.
    #[error("ambiguous option: {option} ({})", .candidates.join(", "))]
    AmbiguousOption { option: String, candidates: Vec<String> },
    /// `--flag=value` given to a switch that takes no value.
    #[error("needless argument: {0}")]
    NeedlessArgument(String),
    #[error("invalid switch definition: {0}")]
    InvalidSwitch(String),
}

impl Error {
    /// Prints the error and exits the process with status 2.
    pub fn exit(self) -> ! {
        eprintln!("{self}");
        std::process::exit(2)
    }
}

/// A value captured for a matched switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Switches without a value, and `--[no-]flag` switches.
    Bool(bool),
    Str(String),
    /// An optional value that wasn't given.
    Absent,
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(it) => Some(it.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(it) => Some(*it),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Value {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Value {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Value {
        Value::Str(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(it) => fmt::Display::fmt(it, f),
            Value::Str(it) => fmt::Display::fmt(it, f),
            Value::Absent => Ok(()),
        }
    }
}
