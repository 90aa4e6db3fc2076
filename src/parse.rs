//! Parsing of the strings handed to [`OptionParser::on`].
//!
//! Each string is one of: a short form (`-d`, `-d LEVEL`, `-d [LEVEL]`,
//! `-dLEVEL`), a long form (`--debug`, `--debug LEVEL`, `--debug=LEVEL`,
//! `--debug[=LEVEL]`, `--[no-]debug`), or a line of description.
//!
//! [`OptionParser::on`]: crate::OptionParser::on

use crate::{
    ast::{Arity, Switch},
    Error, Result,
};

macro_rules! bail {
    ($($tt:tt)*) => {
        return Err(Error::InvalidSwitch(format!($($tt)*)))
    };
}

enum Piece {
    Short { name: char, placeholder: Option<String> },
    Long { name: String, negatable: bool, placeholder: Option<String> },
    Desc(String),
}

pub(crate) fn switch<'a, I>(specs: I) -> Result<Switch<'a>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut res = Switch {
        shorts: Vec::new(),
        longs: Vec::new(),
        arity: Arity::None,
        placeholder: None,
        desc: Vec::new(),
        negatable: false,
        callback: None,
    };

    for spec in specs {
        let (placeholder, name) = match piece(spec.as_ref())? {
            Piece::Short { name, placeholder } => {
                res.shorts.push(name);
                (placeholder, format!("-{name}"))
            }
            Piece::Long { name, negatable, placeholder } => {
                res.negatable |= negatable;
                let display = format!("--{name}");
                res.longs.push(name);
                (placeholder, display)
            }
            Piece::Desc(line) => {
                res.desc.push(line);
                continue;
            }
        };
        if let Some(placeholder) = placeholder {
            res.arity = arity(&placeholder, &name)?;
            res.placeholder = Some(placeholder);
        }
    }

    if res.shorts.is_empty() && res.longs.is_empty() {
        bail!("a short or long name is required: {:?}", res.desc);
    }
    if res.negatable && res.arity != Arity::None {
        bail!("`--[no-]{}` can't take a value", res.longs[0]);
    }
    Ok(res)
}

fn piece(spec: &str) -> Result<Piece> {
    let p = &mut Cursor::new(spec);

    if p.eat_str("--") {
        let negatable = p.eat_str("[no-]");
        let name = match p.eat_name() {
            Some(it) => it,
            None => bail!("expected a long name: `{spec}`"),
        };
        let placeholder = p.rest();
        return Ok(Piece::Long { name, negatable, placeholder });
    }

    if p.eat_punct('-') {
        let name = match p.eat_char() {
            Some(it) if !it.is_whitespace() && it != '[' && it != '=' => it,
            _ => bail!("expected a short name: `{spec}`"),
        };
        let placeholder = p.rest();
        return Ok(Piece::Short { name, placeholder });
    }

    Ok(Piece::Desc(spec.to_string()))
}

/// `[...]` and `[=...]` make the value optional, anything else makes it required.
fn arity(placeholder: &str, name: &str) -> Result<Arity> {
    let label = placeholder.trim_start().trim_start_matches('=');
    if label.trim().is_empty() {
        bail!("empty value placeholder for `{name}`");
    }
    let res = if placeholder.trim_start().starts_with('[') {
        if !placeholder.trim_end().ends_with(']') {
            bail!("unclosed `[` in `{name}{placeholder}`");
        }
        Arity::Optional
    } else {
        Arity::Required
    };
    Ok(res)
}

struct Cursor {
    rchars: Vec<char>,
}

impl Cursor {
    fn new(s: &str) -> Self {
        let mut rchars = s.chars().collect::<Vec<_>>();
        rchars.reverse();
        Self { rchars }
    }

    fn eat_punct(&mut self, punct: char) -> bool {
        match self.rchars.last() {
            Some(&c) if c == punct => {
                self.rchars.pop();
                true
            }
            _ => false,
        }
    }
    fn eat_str(&mut self, s: &str) -> bool {
        let n = s.chars().count();
        if self.rchars.len() < n || !self.rchars.iter().rev().take(n).copied().eq(s.chars()) {
            return false;
        }
        self.rchars.truncate(self.rchars.len() - n);
        true
    }
    fn eat_char(&mut self) -> Option<char> {
        self.rchars.pop()
    }
    fn eat_name(&mut self) -> Option<String> {
        let mut buf = String::new();
        while let Some(&c) = self.rchars.last() {
            if !(c.is_alphanumeric() || c == '-' || c == '_') {
                break;
            }
            buf.push(c);
            self.rchars.pop();
        }
        if buf.is_empty() {
            None
        } else {
            Some(buf)
        }
    }
    fn rest(&mut self) -> Option<String> {
        if self.rchars.is_empty() {
            return None;
        }
        let res = self.rchars.iter().rev().collect::<String>();
        self.rchars.clear();
        Some(res)
    }
}
