//! Evaluates the condition of an `[[IF]]` or `[[ELIF]]` tag.

use crate::Value;

/// A parsed condition expression.
#[derive(Debug, PartialEq)]
enum Condition<'a> {
    /// `!path`
    Not(&'a str),
    /// `path == literal`
    Eq(&'a str, Value),
    /// `path != literal`
    Ne(&'a str, Value),
    /// `path`
    Truthy(&'a str),
}

/// Evaluates a condition expression against the context.
///
/// The supported forms, tried in this order, are:
///
/// - `!path`: the looked up value is falsy.
/// - `path == literal`: the looked up value equals the literal.
/// - `path != literal`: the looked up value does not equal the literal.
/// - `path`: the looked up value is truthy.
///
/// A missing path is treated as [`Value::None`]. Text that does not form a
/// valid path simply finds nothing, so a malformed condition is false.
///
/// ```
/// let ctx = descargo::value! { TIPO: "semaforo", PLAZO: 0 };
/// assert!(descargo::eval_condition("TIPO == 'semaforo'", &ctx));
/// assert!(descargo::eval_condition("!PLAZO", &ctx));
/// assert!(!descargo::eval_condition("MISSING", &ctx));
/// ```
pub fn eval_condition(expr: &str, ctx: &Value) -> bool {
    Condition::parse(expr).eval(ctx)
}

impl<'a> Condition<'a> {
    fn parse(expr: &'a str) -> Self {
        let expr = expr.trim();
        if let Some(path) = expr.strip_prefix('!') {
            return Self::Not(path.trim());
        }
        if let Some((path, lit)) = split_comparison(expr, "==") {
            return Self::Eq(path, Value::parse_literal(lit));
        }
        if let Some((path, lit)) = split_comparison(expr, "!=") {
            return Self::Ne(path, Value::parse_literal(lit));
        }
        Self::Truthy(expr)
    }

    fn eval(&self, ctx: &Value) -> bool {
        match self {
            Self::Not(path) => !lookup(ctx, path).is_truthy(),
            Self::Eq(path, lit) => lookup(ctx, path) == lit,
            Self::Ne(path, lit) => lookup(ctx, path) != lit,
            Self::Truthy(path) => lookup(ctx, path).is_truthy(),
        }
    }
}

static NONE: Value = Value::None;

fn lookup<'c>(ctx: &'c Value, path: &str) -> &'c Value {
    ctx.lookup(path).unwrap_or(&NONE)
}

/// Splits `path <op> literal` where the path consists of path characters and
/// the literal is non-empty and on a single line.
fn split_comparison<'a>(expr: &'a str, op: &str) -> Option<(&'a str, &'a str)> {
    let end = expr.find(|c: char| !is_path_char(c)).unwrap_or(expr.len());
    if end == 0 {
        return None;
    }
    let (path, rest) = expr.split_at(end);
    let lit = rest.trim_start().strip_prefix(op)?.trim_start();
    if lit.is_empty() || lit.contains('\n') {
        return None;
    }
    Some((path, lit))
}

pub(crate) fn is_path_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}
