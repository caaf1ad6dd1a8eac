//! Substitutes `{{ path }}` and `{{ path | filter }}` placeholders.

use std::fmt::Write;

use tracing::debug;

use crate::render::cond::is_path_char;
use crate::types::span::Span;
use crate::Value;

/// A placeholder found in text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// The span of the entire placeholder including the braces.
    pub span: Span,
    pub path: &'a str,
    pub filter: Option<&'a str>,
}

/// A text filter applied to a substituted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Filter {
    Upper,
    Lower,
    Title,
}

/// Replaces every placeholder in `text` with the filtered value from the
/// context.
///
/// Missing values and [`Value::None`] render as the empty string. Unknown
/// filters are ignored. Substitution is a single pass: substituted values are
/// never scanned for placeholders again.
///
/// ```
/// let ctx = descargo::value! { cliente: { NOMBRE: "juan layan" } };
/// let out = descargo::substitute("Sr. {{ cliente.NOMBRE | title }}{{ x }}.", &ctx);
/// assert_eq!(out, "Sr. Juan Layan.");
/// ```
pub fn substitute(text: &str, ctx: &Value) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    while let Some(ph) = find_placeholder(text, cursor) {
        out.push_str(&text[cursor..ph.span.m]);
        match ctx.lookup(ph.path) {
            Some(value) => render_value(&mut out, value, ph.filter),
            None => debug!(path = ph.path, "placeholder value is missing"),
        }
        cursor = ph.span.n;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Finds the first placeholder in `text` starting at or after byte `from`.
pub fn find_placeholder(text: &str, from: usize) -> Option<Placeholder<'_>> {
    let mut i = from;
    while let Some(j) = text.get(i..)?.find("{{") {
        let m = i + j;
        if let Some(ph) = match_placeholder(text, m) {
            return Some(ph);
        }
        i = m + 1;
    }
    None
}

/// Attempts to match a placeholder at exactly byte `m`.
fn match_placeholder(text: &str, m: usize) -> Option<Placeholder<'_>> {
    let i = skip_whitespace(text, m + 2);
    let j = take_while(text, i, is_path_char)?;
    let path = &text[i..j];

    let mut k = skip_whitespace(text, j);
    let mut filter = None;
    if text[k..].starts_with('|') {
        let a = skip_whitespace(text, k + 1);
        let b = take_while(text, a, is_filter_char)?;
        filter = Some(&text[a..b]);
        k = skip_whitespace(text, b);
    }

    text[k..].starts_with("}}").then(|| Placeholder {
        span: Span::from(m..k + 2),
        path,
        filter,
    })
}

fn skip_whitespace(text: &str, i: usize) -> usize {
    let rest = &text[i..];
    i + (rest.len() - rest.trim_start().len())
}

/// Returns the end of a non-empty run of matching characters.
fn take_while(text: &str, i: usize, f: fn(char) -> bool) -> Option<usize> {
    let rest = &text[i..];
    let n = rest.find(|c| !f(c)).unwrap_or(rest.len());
    (n > 0).then_some(i + n)
}

fn is_filter_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn render_value(out: &mut String, value: &Value, filter: Option<&str>) {
    let filter = filter.and_then(|name| {
        let f = Filter::from_name(name);
        if f.is_none() {
            debug!(filter = name, "unknown filter, value is used unchanged");
        }
        f
    });
    match filter {
        None => write_value(out, value),
        Some(f) => {
            let mut s = String::new();
            write_value(&mut s, value);
            out.push_str(&f.apply(&s));
        }
    }
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::None => {}
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Integer(i) => {
            let _ = write!(out, "{i}");
        }
        Value::Float(f) => write_float(out, *f),
        Value::String(s) => out.push_str(s),
        Value::List(list) => {
            for (i, item) in list.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, item);
            }
        }
        value @ Value::Map(_) => {
            debug!(kind = value.human(), "value cannot be rendered as text");
        }
    }
}

/// Writes the shortest text that round-trips to `f`.
///
/// Decimal exponents below -4 or from 16 up are written in exponent form
/// with a signed exponent of at least two digits, e.g. `1e+20`, `1.5e-07`.
/// Otherwise the number is written positionally, with `.0` if integral.
fn write_float(out: &mut String, f: f64) {
    if f.is_nan() {
        out.push_str("nan");
        return;
    }
    if f.is_infinite() {
        out.push_str(if f > 0.0 { "inf" } else { "-inf" });
        return;
    }

    let sci = format!("{f:e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    if f != 0.0 && !(-4..16).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        let _ = write!(out, "{mantissa}e{sign}{:02}", exp.unsigned_abs());
    } else if f.fract() == 0.0 {
        let _ = write!(out, "{f:.1}");
    } else {
        let _ = write!(out, "{f}");
    }
}

impl Filter {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "upper" => Some(Self::Upper),
            "lower" => Some(Self::Lower),
            "title" => Some(Self::Title),
            _ => None,
        }
    }

    fn apply(self, s: &str) -> String {
        match self {
            Self::Upper => s.to_uppercase(),
            Self::Lower => s.to_lowercase(),
            Self::Title => title(s),
        }
    }
}

/// Uppercases the first letter of every word and lowercases the rest. A word
/// starts at any letter that doesn't follow another letter.
fn title(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
