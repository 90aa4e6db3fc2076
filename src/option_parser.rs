use std::{collections::BTreeMap, fmt};

use crate::{
    ast::{Arity, Entry, Switch},
    emit, parse,
    rt::{Scanner, Token},
    Error, Result, Value,
};

/// Knobs for help rendering and long option matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Width of the switch-name column in help output.
    pub summary_width: usize,
    /// Printed before every switch line in help output.
    pub summary_indent: String,
    /// Disables matching `--deb` against `--debug`.
    pub require_exact: bool,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings { summary_width: 32, summary_indent: " ".repeat(4), require_exact: false }
    }
}

/// A registry of switches, plus the scanner that applies them to argument lists.
///
/// `'a` is the lifetime of whatever the registered callbacks borrow.
#[derive(Default)]
pub struct OptionParser<'a> {
    banner: Option<String>,
    entries: Vec<Entry<'a>>,
    settings: Settings,
}

impl<'a> OptionParser<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self { settings, ..Self::default() }
    }

    /// Creates a parser and hands it to `setup` once.
    ///
    /// ```
    /// let parser = optswitch::OptionParser::with(|opts| {
    ///     opts.set_banner("Usage: demo [options]");
    ///     opts.on(["-v", "--verbose", "run verbosely"])?;
    ///     Ok(())
    /// })?;
    /// assert!(parser.help().starts_with("Usage: demo [options]\n"));
    /// # Ok::<(), optswitch::Error>(())
    /// ```
    pub fn with<F>(setup: F) -> Result<Self>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let mut res = Self::new();
        setup(&mut res)?;
        Ok(res)
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn set_banner(&mut self, banner: impl Into<String>) -> &mut Self {
        self.banner = Some(banner.into());
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Registers a switch. See the [crate docs](crate) for the accepted forms.
    pub fn on<I>(&mut self, specs: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let switch = parse::switch(specs)?;
        self.register(switch);
        Ok(self)
    }

    /// Registers a switch which calls `callback` with the captured value on every match.
    pub fn on_with<I, F>(&mut self, specs: I, callback: F) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        F: FnMut(Value) + 'a,
    {
        let mut switch = parse::switch(specs)?;
        switch.callback = Some(Box::new(callback));
        self.register(switch);
        Ok(self)
    }

    /// Adds a line of free text to the help output.
    pub fn separator(&mut self, text: impl Into<String>) -> &mut Self {
        self.entries.push(Entry::Separator(text.into()));
        self
    }

    fn register(&mut self, switch: Switch<'a>) {
        for &short in &switch.shorts {
            if self.find_short(short).is_some() {
                tracing::warn!("`-{short}` registered twice, the later definition wins");
            }
        }
        for long in &switch.longs {
            if self.find_exact_long(long).is_some() {
                tracing::warn!("`--{long}` registered twice, the later definition wins");
            }
        }
        self.entries.push(Entry::Switch(switch));
    }

    /// Applies the registered switches to `args`, invoking callbacks.
    ///
    /// Consumed options and their values are removed from `args`, positionals
    /// stay in order. On error `args` is left unchanged.
    pub fn parse(&mut self, args: &mut Vec<String>) -> Result<()> {
        *args = self.scan(args.clone(), None, true)?;
        Ok(())
    }

    /// Like [`parse`](Self::parse), and also stores every match in `into`,
    /// keyed by the long name (or the short name when there is none).
    pub fn parse_into(
        &mut self,
        args: &mut Vec<String>,
        into: &mut BTreeMap<String, Value>,
    ) -> Result<()> {
        *args = self.scan(args.clone(), Some(into), true)?;
        Ok(())
    }

    /// Like [`parse`](Self::parse), but stops at the first positional argument.
    pub fn order(&mut self, args: &mut Vec<String>) -> Result<()> {
        *args = self.scan(args.clone(), None, false)?;
        Ok(())
    }

    pub fn order_into(
        &mut self,
        args: &mut Vec<String>,
        into: &mut BTreeMap<String, Value>,
    ) -> Result<()> {
        *args = self.scan(args.clone(), Some(into), false)?;
        Ok(())
    }

    /// Non-destructive [`parse`](Self::parse): returns the positionals.
    pub fn parse_args<S: AsRef<str>>(&mut self, args: &[S]) -> Result<Vec<String>> {
        self.scan(owned(args), None, true)
    }

    pub fn parse_args_into<S: AsRef<str>>(
        &mut self,
        args: &[S],
        into: &mut BTreeMap<String, Value>,
    ) -> Result<Vec<String>> {
        self.scan(owned(args), Some(into), true)
    }

    pub fn help(&self) -> String {
        emit::help(self.banner(), &self.entries, &self.settings)
    }

    fn scan(
        &mut self,
        args: Vec<String>,
        mut into: Option<&mut BTreeMap<String, Value>>,
        permute: bool,
    ) -> Result<Vec<String>> {
        let mut p = Scanner::new(args);
        while let Some(token) = p.next_token() {
            match token {
                Token::Positional(arg) if permute => p.push_positional(arg),
                Token::Positional(arg) => {
                    p.stop(arg);
                    break;
                }
                Token::Long { name, value } => {
                    let (idx, value) = self.long(&mut p, &name, value)?;
                    self.fire(idx, value, into.as_deref_mut());
                }
                Token::Short(cluster) => self.short(&mut p, &cluster, into.as_deref_mut())?,
            }
        }
        Ok(p.finish())
    }

    /// `-di` is `-d -i`, unless `-d` takes a value, in which case it's `-d i`.
    fn short(
        &mut self,
        p: &mut Scanner,
        cluster: &str,
        mut into: Option<&mut BTreeMap<String, Value>>,
    ) -> Result<()> {
        for (i, c) in cluster.char_indices() {
            let flag = format!("-{c}");
            let idx = self.find_short(c).ok_or_else(|| Error::InvalidOption(flag.clone()))?;
            let rest = &cluster[i + c.len_utf8()..];
            let arity = self.switch(idx).arity;
            let value = match arity {
                Arity::None => Value::Bool(true),
                _ if !rest.is_empty() => {
                    self.fire(idx, Value::Str(rest.to_string()), into);
                    return Ok(());
                }
                Arity::Optional => p.opt_value().map_or(Value::Absent, Value::Str),
                Arity::Required => Value::Str(p.next_value(&flag)?),
            };
            self.fire(idx, value, into.as_deref_mut());
        }
        Ok(())
    }

    fn long(
        &self,
        p: &mut Scanner,
        name: &str,
        inline: Option<String>,
    ) -> Result<(usize, Value)> {
        let (idx, negated) = self.find_long(name)?;
        let switch = self.switch(idx);
        let flag =
            if negated { format!("--no-{}", switch.longs[0]) } else { switch.display_name() };
        let value = match (switch.arity, inline) {
            (Arity::None, Some(inline)) => {
                return Err(Error::NeedlessArgument(format!("{flag}={inline}")))
            }
            (Arity::None, None) => Value::Bool(!negated),
            (_, Some(inline)) => Value::Str(inline),
            (Arity::Optional, None) => p.opt_value().map_or(Value::Absent, Value::Str),
            (Arity::Required, None) => Value::Str(p.next_value(&flag)?),
        };
        Ok((idx, value))
    }

    fn fire(&mut self, idx: usize, value: Value, into: Option<&mut BTreeMap<String, Value>>) {
        let switch = match &mut self.entries[idx] {
            Entry::Switch(it) => it,
            Entry::Separator(_) => unreachable!(),
        };
        tracing::debug!(switch = %switch.display_name(), ?value, "matched");
        if let Some(into) = into {
            into.insert(switch.key(), value.clone());
        }
        if let Some(callback) = &mut switch.callback {
            callback(value);
        }
    }

    fn switch(&self, idx: usize) -> &Switch<'a> {
        match &self.entries[idx] {
            Entry::Switch(it) => it,
            Entry::Separator(_) => unreachable!(),
        }
    }

    fn switches(&self) -> impl Iterator<Item = (usize, &Switch<'a>)> {
        self.entries.iter().enumerate().rev().filter_map(|(idx, entry)| match entry {
            Entry::Switch(it) => Some((idx, it)),
            Entry::Separator(_) => None,
        })
    }

    fn find_short(&self, short: char) -> Option<usize> {
        self.switches().find(|(_, it)| it.shorts.contains(&short)).map(|(idx, _)| idx)
    }

    fn find_exact_long(&self, long: &str) -> Option<usize> {
        self.switches().find(|(_, it)| it.longs.iter().any(|l| l == long)).map(|(idx, _)| idx)
    }

    /// Resolves a long name to a switch, and whether it was the `--no-` form.
    fn find_long(&self, name: &str) -> Result<(usize, bool)> {
        if let Some(idx) = self.find_exact_long(name) {
            return Ok((idx, false));
        }
        if let Some(idx) = name.strip_prefix("no-").and_then(|it| self.find_negatable(it)) {
            return Ok((idx, true));
        }
        if self.settings.require_exact || name.is_empty() {
            return Err(Error::InvalidOption(format!("--{name}")));
        }

        let mut candidates: Vec<(usize, bool, String)> = Vec::new();
        for (_, switch) in self.switches() {
            for long in &switch.longs {
                let (long, negated) = if long.starts_with(name) {
                    (long.clone(), false)
                } else if switch.negatable && format!("no-{long}").starts_with(name) {
                    (format!("no-{long}"), true)
                } else {
                    continue;
                };
                let idx = if negated {
                    self.find_negatable(&long["no-".len()..])
                } else {
                    self.find_exact_long(&long)
                };
                if let Some(idx) = idx {
                    if !candidates.iter().any(|(i, n, _)| (*i, *n) == (idx, negated)) {
                        candidates.push((idx, negated, format!("--{long}")));
                    }
                }
            }
        }
        match candidates.len() {
            0 => Err(Error::InvalidOption(format!("--{name}"))),
            1 => {
                let (idx, negated, _) = candidates.remove(0);
                Ok((idx, negated))
            }
            _ => {
                candidates.reverse();
                Err(Error::AmbiguousOption {
                    option: format!("--{name}"),
                    candidates: candidates.into_iter().map(|(_, _, it)| it).collect(),
                })
            }
        }
    }

    fn find_negatable(&self, long: &str) -> Option<usize> {
        self.find_exact_long(long).filter(|&idx| self.switch(idx).negatable)
    }
}

fn owned<S: AsRef<str>>(args: &[S]) -> Vec<String> {
    args.iter().map(|it| it.as_ref().to_string()).collect()
}

impl fmt::Display for OptionParser<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.help())
    }
}

impl fmt::Debug for OptionParser<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionParser")
            .field("banner", &self.banner)
            .field("entries", &self.entries)
            .field("settings", &self.settings)
            .finish()
    }
}
