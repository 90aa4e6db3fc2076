use crate::{Error, Result};

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Token {
    /// `--name` or `--name=value`.
    Long { name: String, value: Option<String> },
    /// The characters after a single `-`, possibly several switches clustered together.
    Short(String),
    Positional(String),
}

/// Walks an argument list front to back, splitting it into option tokens and
/// positionals.
pub(crate) struct Scanner {
    rargs: Vec<String>,
    positionals: Vec<String>,
    after_double_dash: bool,
}

impl Scanner {
    pub(crate) fn new(mut args: Vec<String>) -> Self {
        args.reverse();
        Self { rargs: args, positionals: Vec::new(), after_double_dash: false }
    }

    pub(crate) fn next_token(&mut self) -> Option<Token> {
        let arg = self.rargs.pop()?;
        if self.after_double_dash {
            return Some(Token::Positional(arg));
        }
        if arg == "--" {
            tracing::debug!("`--` seen, remaining arguments are positional");
            self.after_double_dash = true;
            return self.next_token();
        }
        if let Some(long) = arg.strip_prefix("--") {
            let res = match long.split_once('=') {
                Some((name, value)) => {
                    Token::Long { name: name.to_string(), value: Some(value.to_string()) }
                }
                None => Token::Long { name: long.to_string(), value: None },
            };
            return Some(res);
        }
        match arg.strip_prefix('-') {
            Some(cluster) if !cluster.is_empty() => Some(Token::Short(cluster.to_string())),
            _ => Some(Token::Positional(arg)),
        }
    }

    /// Takes the next argument as the value of `flag`, whatever it looks like.
    pub(crate) fn next_value(&mut self, flag: &str) -> Result<String> {
        self.rargs.pop().ok_or_else(|| Error::MissingArgument(flag.to_string()))
    }

    /// Like `next_value`, but leaves a following `--` in place.
    pub(crate) fn opt_value(&mut self) -> Option<String> {
        match self.rargs.last() {
            Some(it) if it == "--" => None,
            _ => self.rargs.pop(),
        }
    }

    pub(crate) fn push_positional(&mut self, arg: String) {
        tracing::trace!(%arg, "positional");
        self.positionals.push(arg)
    }

    /// Stops scanning: `arg` and everything after it are left as they are.
    pub(crate) fn stop(&mut self, arg: String) {
        self.positionals.push(arg);
        while let Some(it) = self.rargs.pop() {
            self.positionals.push(it);
        }
    }

    pub(crate) fn finish(self) -> Vec<String> {
        debug_assert!(self.rargs.is_empty());
        self.positionals
    }
}
