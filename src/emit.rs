use std::fmt::Write;

use crate::{
    ast::{Entry, Switch},
    Settings,
};

macro_rules! w {
    ($($tt:tt)*) => {
        drop(write!($($tt)*))
    };
}

pub(crate) fn help(banner: Option<&str>, entries: &[Entry<'_>], settings: &Settings) -> String {
    let mut buf = String::new();
    if let Some(banner) = banner {
        w!(buf, "{banner}\n");
    }
    for entry in entries {
        match entry {
            Entry::Switch(switch) => summarize(&mut buf, switch, settings),
            Entry::Separator(text) => w!(buf, "{text}\n"),
        }
    }
    buf
}

fn summarize(buf: &mut String, switch: &Switch<'_>, settings: &Settings) {
    let indent = &settings.summary_indent;
    let width = settings.summary_width;
    let left = names(switch);

    let mut desc = switch.desc.iter();
    match desc.next() {
        None => w!(buf, "{indent}{left}\n"),
        Some(first) if left.chars().count() <= width => {
            w!(buf, "{indent}{left:<width$} {first}\n")
        }
        Some(first) => {
            w!(buf, "{indent}{left}\n");
            w!(buf, "{indent}{blank:width$} {first}\n", blank = "");
        }
    }
    for line in desc {
        w!(buf, "{indent}{blank:width$} {line}\n", blank = "");
    }
}

/// `-d, --debug [level]`. Long-only switches are shifted so that long names line up.
fn names(switch: &Switch<'_>) -> String {
    let mut res = switch.shorts.iter().map(|it| format!("-{it}")).collect::<Vec<_>>().join(", ");
    let no = if switch.negatable { "[no-]" } else { "" };
    for long in &switch.longs {
        res.push_str(if res.is_empty() { "    " } else { ", " });
        w!(res, "--{no}{long}");
    }
    if let Some(placeholder) = &switch.placeholder {
        res.push_str(placeholder);
    }
    res
}
