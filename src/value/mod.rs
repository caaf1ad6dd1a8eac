//! Defines the [`Value`] enum, representing the data a template is rendered
//! with.

#[cfg(feature = "serde")]
mod de;
mod from;
mod literal;
#[cfg(feature = "serde")]
mod ser;

pub use std::collections::BTreeMap as Map;
pub use std::vec::Vec as List;

/// Data to be rendered represented as a recursive enum.
///
/// The context of a render is a [`Value::Map`] at the root. Nested maps are
/// addressed with dotted paths like `cliente.NOMBRE`.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(List<Value>),
    Map(Map<String, Value>),
}

/// Strings that are false in a condition, compared case-insensitively after
/// trimming. Every other string is true.
const FALSY_STRINGS: &[&str] = &["false", "no", "0", "", "null", "none"];

impl Value {
    /// Looks up a dotted path, e.g. `a.b.c`.
    ///
    /// Each segment indexes into a map. Returns `None` if a segment is missing
    /// or if an intermediate value is not a map.
    ///
    /// ```
    /// let ctx = descargo::value! { a: { b: "text" } };
    /// assert_eq!(ctx.lookup("a.b"), Some(&descargo::Value::from("text")));
    /// assert_eq!(ctx.lookup("a.b.c"), None);
    /// ```
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        path.split('.').try_fold(self, |value, key| match value {
            Value::Map(map) => map.get(key),
            _ => None,
        })
    }

    /// Returns whether this value counts as true in a condition.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Integer(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => {
                let s = s.trim().to_lowercase();
                !FALSY_STRINGS.contains(&s.as_str())
            }
            Value::List(_) | Value::Map(_) => true,
        }
    }

    /// Inserts `value` under the top-level `key` unless the key is already
    /// present. Returns `true` if the value was inserted.
    ///
    /// Does nothing if this value is not a map.
    pub fn set_default(&mut self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        match self {
            Value::Map(map) => {
                let mut inserted = false;
                map.entry(key.into()).or_insert_with(|| {
                    inserted = true;
                    value.into()
                });
                inserted
            }
            _ => false,
        }
    }

    pub(crate) fn human(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }
}

/// Values are equal only if they are of the same kind and hold the same data.
/// Integers and floats are both numbers and compare by numeric value, so the
/// string `"3"` never equals the number `3` but `3` equals `3.0`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Bool(s), Self::Bool(o)) => s == o,
            (Self::Integer(s), Self::Integer(o)) => s == o,
            (Self::Float(s), Self::Float(o)) => s == o,
            (Self::Integer(i), Self::Float(f)) | (Self::Float(f), Self::Integer(i)) => {
                int_eq_float(*i, *f)
            }
            (Self::String(s), Self::String(o)) => s == o,
            (Self::List(s), Self::List(o)) => s == o,
            (Self::Map(s), Self::Map(o)) => s == o,
            _ => false,
        }
    }
}

/// Compares without rounding `i` to the nearest float.
fn int_eq_float(i: i64, f: f64) -> bool {
    // the range of floats that convert to an i64 without saturating
    const MIN: f64 = -9_223_372_036_854_775_808.0;
    const MAX: f64 = 9_223_372_036_854_775_808.0;
    f.fract() == 0.0 && (MIN..MAX).contains(&f) && f as i64 == i
}
