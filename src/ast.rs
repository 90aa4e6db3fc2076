use std::fmt;

use crate::Value;

pub(crate) type Callback<'a> = Box<dyn FnMut(Value) + 'a>;

#[derive(Debug)]
pub(crate) enum Entry<'a> {
    Switch(Switch<'a>),
    Separator(String),
}

pub(crate) struct Switch<'a> {
    pub(crate) shorts: Vec<char>,
    pub(crate) longs: Vec<String>,
    pub(crate) arity: Arity,
    /// Placeholder exactly as written after the name, e.g. ` [level]` or `=FILE`.
    pub(crate) placeholder: Option<String>,
    pub(crate) desc: Vec<String>,
    pub(crate) negatable: bool,
    pub(crate) callback: Option<Callback<'a>>,
}

impl Switch<'_> {
    /// Key under which matches land in the destination map.
    pub(crate) fn key(&self) -> String {
        match (self.longs.first(), self.shorts.first()) {
            (Some(long), _) => long.clone(),
            (None, Some(short)) => short.to_string(),
            (None, None) => unreachable!("switch without a name"),
        }
    }

    /// Name used in error messages and logs, `--debug` or `-d`.
    pub(crate) fn display_name(&self) -> String {
        match (self.longs.first(), self.shorts.first()) {
            (Some(long), _) => format!("--{long}"),
            (None, Some(short)) => format!("-{short}"),
            (None, None) => unreachable!("switch without a name"),
        }
    }
}

impl fmt::Debug for Switch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Switch")
            .field("shorts", &self.shorts)
            .field("longs", &self.longs)
            .field("arity", &self.arity)
            .field("placeholder", &self.placeholder)
            .field("desc", &self.desc)
            .field("negatable", &self.negatable)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Arity {
    None,
    Optional,
    Required,
}
