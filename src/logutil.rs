//! Value escaping for single-line `key=value` output.
//!
//! A stringified value passes through a fixed pipeline before it lands on a line:
//!
//! 1. backslash `\` => `\\`
//! 2. null byte => `\0`
//! 3. newline => `\n`
//! 4. tab => `\t`
//! 5. quote normalization (see [`escape_quotes`])
//! 6. conditional quoting (see [`quote_string`])
//!
//! Backslash escaping has to run first so the backslashes inserted by the later
//! steps are not doubled. Carriage return is left untouched; consumers of the
//! existing output depend on this exact escaping set.

use std::borrow::Cow;

use crate::logger::LogError;
use crate::value::Value;

/// One text-to-text step of the escape pipeline.
pub type EscapeStep = fn(&str) -> Cow<'_, str>;

/// The escape steps in the order they must be applied. Quoting is applied
/// afterwards since it depends on the `force_quotes` flag.
pub const ESCAPE_PIPELINE: [EscapeStep; 5] = [
    escape_backslash,
    escape_null,
    escape_newline,
    escape_tab,
    escape_quotes,
];

fn replace_all<'a>(s: &'a str, from: char, to: &str) -> Cow<'a, str> {
    if s.contains(from) {
        Cow::Owned(s.replace(from, to))
    } else {
        Cow::Borrowed(s)
    }
}

pub fn escape_backslash(s: &str) -> Cow<'_, str> {
    replace_all(s, '\\', "\\\\")
}

pub fn escape_null(s: &str) -> Cow<'_, str> {
    replace_all(s, '\0', "\\0")
}

/// Only `\n` is escaped; `\r` passes through as-is.
pub fn escape_newline(s: &str) -> Cow<'_, str> {
    replace_all(s, '\n', "\\n")
}

pub fn escape_tab(s: &str) -> Cow<'_, str> {
    replace_all(s, '\t', "\\t")
}

/// Normalize double quotes so a value never closes its own quoting.
///
/// If the text already contains a single quote, double quotes are escaped as
/// `\"`. Otherwise every double quote becomes a single quote. The second case
/// is lossy on purpose: `say "hi"` is logged as `say 'hi'`.
pub fn escape_quotes(s: &str) -> Cow<'_, str> {
    if s.contains('\'') {
        replace_all(s, '"', "\\\"")
    } else {
        replace_all(s, '"', "'")
    }
}

/// Wrap `s` in double quotes when forced or when it contains a space.
pub fn quote_string(s: &str, force: bool) -> Cow<'_, str> {
    if force || s.contains(' ') {
        Cow::Owned(format!("\"{}\"", s))
    } else {
        Cow::Borrowed(s)
    }
}

/// Run already-stringified text through the escape pipeline and quoting.
pub fn escape_text(raw: &str, force_quotes: bool) -> String {
    let mut text = Cow::Borrowed(raw);
    for step in ESCAPE_PIPELINE {
        let changed = match step(&text) {
            Cow::Owned(next) => Some(next),
            Cow::Borrowed(_) => None,
        };
        if let Some(next) = changed {
            text = Cow::Owned(next);
        }
    }
    quote_string(&text, force_quotes).into_owned()
}

/// Stringify `value` with `stringify` and escape the result.
///
/// Errors come only from the stringify strategy and are passed through unchanged.
pub fn escape_value<F>(value: &Value, stringify: F, force_quotes: bool) -> Result<String, LogError>
where
    F: Fn(&Value) -> Result<String, LogError>,
{
    let raw = stringify(value)?;
    Ok(escape_text(&raw, force_quotes))
}
