use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Structured data attached to an expected error
///
/// Keys are unique; inserting an existing key replaces its value.
/// Iteration follows insertion order so rendered bodies are stable, while
/// equality compares content only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context(IndexMap<String, ContextValue>);

impl Context {
    /// Create an empty context
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous value for the key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Option<ContextValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder form of [`insert`](Self::insert)
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a value by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.0.get(key)
    }

    /// Mutable access to a value by key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut ContextValue> {
        self.0.get_mut(key)
    }

    /// Remove a key, keeping the order of the remaining entries
    pub fn remove(&mut self, key: &str) -> Option<ContextValue> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, ContextValue> {
        self.0.iter()
    }

    /// Iterate keys in insertion order
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, ContextValue> {
        self.0.keys()
    }
}

impl<K, V> FromIterator<(K, V)> for Context
where
    K: Into<String>,
    V: Into<ContextValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K, V> Extend<(K, V)> for Context
where
    K: Into<String>,
    V: Into<ContextValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Context
where
    K: Into<String>,
    V: Into<ContextValue>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl IntoIterator for Context {
    type Item = (String, ContextValue);
    type IntoIter = indexmap::map::IntoIter<String, ContextValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Context {
    type Item = (&'a String, &'a ContextValue);
    type IntoIter = indexmap::map::Iter<'a, String, ContextValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A single context value
///
/// Closed set of the value shapes error context needs. Serializes as plain
/// JSON. Numbers that do not fit `Integer` or a finite `Float` are held as
/// `Text` so no digits are lost.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContextValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<ContextValue>),
    Map(Context),
}

impl ContextValue {
    /// Text content, if this is a text value
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Integer content, if this is an integer value
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for ContextValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ContextValueVisitor)
    }
}

struct ContextValueVisitor;

impl<'de> Visitor<'de> for ContextValueVisitor {
    type Value = ContextValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ContextValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ContextValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        ContextValue::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(ContextValue::Bool(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(ContextValue::Integer(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(ContextValue::from(value))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(ContextValue::from(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(ContextValue::from(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(ContextValue::Text(value))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(value) = seq.next_element()? {
            values.push(value);
        }
        Ok(ContextValue::List(values))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut context = Context::new();
        while let Some((key, value)) = map.next_entry::<String, ContextValue>()? {
            context.insert(key, value);
        }
        Ok(ContextValue::Map(context))
    }
}

impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            other => {
                let json = serde_json::to_string(other).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for ContextValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for ContextValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

// Values past i64::MAX keep their exact digits as text
impl From<u64> for ContextValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::Integer)
    }
}

// JSON has no NaN or infinity
impl From<f64> for ContextValue {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            Self::Float(value)
        } else {
            Self::Text(value.to_string())
        }
    }
}

impl From<Context> for ContextValue {
    fn from(value: Context) -> Self {
        Self::Map(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for ContextValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for ContextValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_existing_key() {
        let mut ctx = Context::new();
        assert!(ctx.insert("field", "email").is_none());
        let previous = ctx.insert("field", "name");

        assert_eq!(previous, Some(ContextValue::from("email")));
        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.get("field").and_then(ContextValue::as_str), Some("name"));
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a = Context::new().with("a", 1).with("b", true);
        let b = Context::new().with("b", true).with("a", 1);
        assert_eq!(a, b);
    }

    #[test]
    fn serializes_in_insertion_order() {
        let ctx = Context::new()
            .with("userId", "42")
            .with("attempts", 3)
            .with("retryable", false)
            .with("nested", Context::from([("path", "/tmp")]))
            .with("tags", vec!["a", "b"])
            .with("missing", None::<String>);

        let json = serde_json::to_string(&ctx).unwrap();
        assert_eq!(
            json,
            r#"{"userId":"42","attempts":3,"retryable":false,"nested":{"path":"/tmp"},"tags":["a","b"],"missing":null}"#
        );
    }

    #[test]
    fn deserializes_plain_json() {
        let ctx: Context = serde_json::from_str(r#"{"id":7,"ratio":0.5,"name":"x","ok":true}"#).unwrap();
        assert_eq!(ctx.get("id"), Some(&ContextValue::Integer(7)));
        assert_eq!(ctx.get("ratio"), Some(&ContextValue::Float(0.5)));
        assert_eq!(ctx.get("name"), Some(&ContextValue::Text("x".to_owned())));
        assert_eq!(ctx.get("ok"), Some(&ContextValue::Bool(true)));
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut ctx = Context::from([("a", 1), ("b", 2), ("c", 3)]);
        ctx.remove("b");
        let keys: Vec<_> = ctx.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "c"]);
    }

    #[test]
    fn huge_unsigned_values_become_text() {
        assert_eq!(ContextValue::from(u64::MAX), ContextValue::Text(u64::MAX.to_string()));
        assert_eq!(ContextValue::from(42_u64), ContextValue::Integer(42));
    }

    #[test]
    fn non_finite_floats_become_text() {
        assert_eq!(ContextValue::from(f64::NAN), ContextValue::Text("NaN".to_owned()));
        assert_eq!(ContextValue::from(f64::INFINITY), ContextValue::Text("inf".to_owned()));
        assert_eq!(ContextValue::from(1.5), ContextValue::Float(1.5));
    }

    #[test]
    fn huge_json_integers_deserialize_as_text() {
        let raw = r#"{"big": 18446744073709551615, "small": 7, "ratio": 0.5}"#;
        let context: Context = serde_json::from_str(raw).unwrap();

        assert_eq!(context.get("big"), Some(&ContextValue::Text("18446744073709551615".to_owned())));
        assert_eq!(context.get("small"), Some(&ContextValue::Integer(7)));
        assert_eq!(context.get("ratio"), Some(&ContextValue::Float(0.5)));
    }

    #[test]
    fn display_prints_text_raw_and_others_as_json() {
        assert_eq!(ContextValue::from("plain").to_string(), "plain");
        assert_eq!(ContextValue::from(vec![1, 2]).to_string(), "[1,2]");
        assert_eq!(ContextValue::Null.to_string(), "null");
    }
}
