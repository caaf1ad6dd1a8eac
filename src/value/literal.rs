use crate::Value;

impl Value {
    /// Parses a literal as written on the right hand side of `==` or `!=`.
    ///
    /// - `true` and `false` (any case) are booleans.
    /// - `null` and `none` (any case) are [`Value::None`].
    /// - Text wrapped in single or double quotes is a string with the quotes
    ///   removed. There are no escape sequences.
    /// - Text containing a `.` that parses as a number is a float, text that
    ///   parses as an integer is an integer.
    /// - Anything else is the trimmed text as a string.
    pub fn parse_literal(token: &str) -> Value {
        let t = token.trim();

        if t.eq_ignore_ascii_case("true") {
            return Value::Bool(true);
        }
        if t.eq_ignore_ascii_case("false") {
            return Value::Bool(false);
        }
        if t.eq_ignore_ascii_case("null") || t.eq_ignore_ascii_case("none") {
            return Value::None;
        }
        if let Some(s) = unquote(t) {
            return Value::String(s.to_owned());
        }

        let number = if t.contains('.') {
            t.parse().ok().map(Value::Float)
        } else {
            t.parse().ok().map(Value::Integer)
        };
        number.unwrap_or_else(|| Value::String(t.to_owned()))
    }
}

fn unquote(t: &str) -> Option<&str> {
    ['\'', '"']
        .into_iter()
        .find(|&q| t.starts_with(q) && t.ends_with(q))
        .map(|_| t.get(1..t.len() - 1).unwrap_or_default())
}
