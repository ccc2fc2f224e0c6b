//! Field values and ordered field sets.
//!
//! [`Value`] is the closed set of things a log field can carry. Anything else can be
//! turned into a `Value` through [`Value::display`] (any `Display` type) or
//! [`Value::from_serialize`] (any `serde::Serialize` type).

use std::fmt;

use serde::Serialize;

use crate::logger::LogError;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
    /// Nested mapping, rendered in insertion order
    Map(Fields),
}

impl Value {
    /// Capture any `Display` value as text.
    pub fn display<T: fmt::Display + ?Sized>(value: &T) -> Self {
        Value::Text(value.to_string())
    }

    /// Convert a serializable value through its JSON data model.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, LogError> {
        serde_json::to_value(value)
            .map(Value::from)
            .map_err(|e| LogError::UnstringifiableValue(e.to_string()))
    }

    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{:?}", s),
            other => fmt::Display::fmt(other, f),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::UInt(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt_nested(f)?;
                }
                f.write_str("]")
            }
            Value::Map(fields) => {
                f.write_str("{")?;
                for (i, (label, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}: ", label)?;
                    value.fmt_nested(f)?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Default stringify strategy: the value's `Display` form.
///
/// Floats use Rust's `Display`, so a whole float like `1.0` renders as `1`.
pub fn force_string(value: &Value) -> Result<String, LogError> {
    Ok(value.to_string())
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty: $($t:ty),+) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::$variant(n as $target)
                }
            }
        )+
    };
}

impl_from_int!(Int, i64: i8, i16, i32, i64, isize);
impl_from_int!(UInt, u64: u8, u16, u32, u64, usize);

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<uuid::Uuid> for Value {
    fn from(id: uuid::Uuid) -> Self {
        Value::Text(id.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<Fields> for Value {
    fn from(fields: Fields) -> Self {
        Value::Map(fields)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Json::String(s) => Value::Text(s),
            Json::Array(items) => Value::List(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => Value::Map(map.into_iter().collect()),
        }
    }
}

/// Ordered label => value mapping.
///
/// Iteration follows insertion order. Re-inserting a label replaces its value but
/// keeps the label at its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    entries: Vec<(String, Value)>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, label: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(label, value);
        self
    }

    /// Insert or replace `label`, returning the previous value if there was one.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let label = label.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((label, value));
                None
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), v))
    }

    /// `self` followed by `overrides`; on a shared label the override's value wins.
    pub fn merged(&self, overrides: &Fields) -> Fields {
        let mut out = self.clone();
        for (label, value) in overrides.iter() {
            out.insert(label, value.clone());
        }
        out
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        fields.extend(iter);
        fields
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Fields {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (label, value) in iter {
            self.insert(label, value);
        }
    }
}

impl IntoIterator for Fields {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Build a [`Fields`] in insertion order.
///
/// ```
/// let fields = simplog::fields! { "context" => "abc", "retries" => 3 };
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::value::Fields::new()
    };
    ($($label:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::value::Fields::new();
        $( fields.insert($label, $value); )+
        fields
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_render_plainly() {
        assert_eq!(force_string(&Value::from("one two three")).unwrap(), "one two three");
        assert_eq!(force_string(&Value::from(123)).unwrap(), "123");
        assert_eq!(force_string(&Value::from(-7i8)).unwrap(), "-7");
        assert_eq!(force_string(&Value::from(true)).unwrap(), "true");
        assert_eq!(force_string(&Value::from(2.5)).unwrap(), "2.5");
        assert_eq!(force_string(&Value::from(None::<i32>)).unwrap(), "null");
    }

    #[test]
    fn whole_floats_render_without_fraction() {
        assert_eq!(force_string(&Value::from(1.0)).unwrap(), "1");
        assert_eq!(force_string(&Value::from(0.5f32)).unwrap(), "0.5");
    }

    #[test]
    fn display_values_become_text() {
        use std::net::Ipv4Addr;
        let v = Value::display(&Ipv4Addr::LOCALHOST);
        assert_eq!(v, Value::Text("127.0.0.1".to_string()));
        assert_eq!(
            crate::logutil::escape_value(&v, force_string, true).unwrap(),
            "\"127.0.0.1\""
        );
    }

    #[test]
    fn list_renders_bracketed() {
        assert_eq!(force_string(&Value::from(vec![1, 2, 3])).unwrap(), "[1, 2, 3]");
        assert_eq!(force_string(&Value::from(vec!["a", "b"])).unwrap(), "[\"a\", \"b\"]");
    }

    #[test]
    fn map_renders_in_insertion_order() {
        let map = fields! { "one" => 1, "two" => 2, "three" => 3 };
        assert_eq!(
            force_string(&Value::from(map)).unwrap(),
            "{\"one\": 1, \"two\": 2, \"three\": 3}"
        );
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut fields = fields! { "a" => 1, "b" => 2 };
        assert_eq!(fields.insert("a", 10), Some(Value::Int(1)));
        let labels: Vec<&str> = fields.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, ["a", "b"]);
        assert_eq!(fields.get("a"), Some(&Value::Int(10)));
    }

    #[test]
    fn merged_prefers_overrides() {
        let base = fields! { "context" => "abc", "color" => "red" };
        let call = fields! { "laser" => "beam", "color" => "blue" };
        let merged = base.merged(&call);
        let pairs: Vec<(&str, String)> = merged.iter().map(|(l, v)| (l, v.to_string())).collect();
        assert_eq!(
            pairs,
            [
                ("context", "abc".to_string()),
                ("color", "blue".to_string()),
                ("laser", "beam".to_string())
            ]
        );
        assert_eq!(base.get("color"), Some(&Value::from("red")));
    }

    #[test]
    fn from_serialize_uses_json_model() {
        #[derive(Serialize)]
        struct Meal {
            name: &'static str,
            courses: u32,
        }
        let v = Value::from_serialize(&Meal { name: "lunch", courses: 2 }).unwrap();
        match v {
            Value::Map(fields) => {
                assert_eq!(fields.get("name"), Some(&Value::from("lunch")));
                assert_eq!(fields.get("courses"), Some(&Value::Int(2)));
            }
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn from_serialize_reports_failure() {
        use std::collections::HashMap;
        let mut bad = HashMap::new();
        bad.insert(vec![1u8], 1);
        let err = Value::from_serialize(&bad).unwrap_err();
        assert!(matches!(err, LogError::UnstringifiableValue(_)));
    }
}
