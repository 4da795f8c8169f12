//! Nested attribute container
//!
//! A tree of string keys whose leaves are JSON values. Intermediate nodes
//! spring into existence when written through [`Dynamic::node`] or
//! [`Dynamic::set_path`].
//!
//! ```
//! use nark_infrastructure::utils::Dynamic;
//!
//! let mut d = Dynamic::new();
//! d.set_path(["x", "y", "value"], "Hello World").unwrap();
//! let json = d.to_value();
//! assert_eq!(json["x"]["y"]["value"], "Hello World");
//! assert_eq!(Dynamic::from_value(json).unwrap(), d);
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map;

use nark_domain::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// One entry of a [`Dynamic`]
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// A leaf value
    Value(Value),
    /// A nested container
    Node(Dynamic),
}

impl Entry {
    /// The leaf value, if this is one
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Node(_) => None,
        }
    }

    /// The nested container, if this is one
    pub fn as_node(&self) -> Option<&Dynamic> {
        match self {
            Self::Node(node) => Some(node),
            Self::Value(_) => None,
        }
    }

    fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Node(Dynamic::from(map)),
            other => Self::Value(other),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Node(node) => node.to_value(),
        }
    }
}

/// Nested attribute container
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dynamic {
    fields: BTreeMap<String, Entry>,
}

impl Dynamic {
    /// An empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON object; nested objects become nodes
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self::from(map)),
            other => Err(Error::invalid_argument(format!(
                "Dynamic can only be built from an object, got {other}"
            ))),
        }
    }

    /// Convert back into a JSON object
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(key, entry)| (key.clone(), entry.to_json()))
                .collect(),
        )
    }

    /// Set `key`; object values are stored as nested nodes
    pub fn set<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) -> &mut Self {
        self.fields.insert(key.into(), Entry::from_json(value.into()));
        self
    }

    /// Entry stored under `key`
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.fields.get(key)
    }

    /// Leaf value stored under `key`
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.get(key).and_then(Entry::as_value)
    }

    /// Nested node stored under `key`
    pub fn child(&self, key: &str) -> Option<&Dynamic> {
        self.get(key).and_then(Entry::as_node)
    }

    /// Nested node under `key`, created empty when absent
    ///
    /// Fails when `key` already holds a leaf value.
    pub fn node<K: Into<String>>(&mut self, key: K) -> Result<&mut Dynamic> {
        let key = key.into();
        match self
            .fields
            .entry(key)
            .or_insert_with(|| Entry::Node(Dynamic::new()))
        {
            Entry::Node(node) => Ok(node),
            Entry::Value(_) => Err(Error::invalid_argument(
                "cannot descend into a key holding a value",
            )),
        }
    }

    /// Set a value at a nested path, creating intermediate nodes
    pub fn set_path<I, K, V>(&mut self, path: I, value: V) -> Result<()>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut keys: Vec<String> = path.into_iter().map(Into::into).collect();
        let Some(last) = keys.pop() else {
            return Err(Error::invalid_argument("path must not be empty"));
        };
        let mut node = self;
        for key in keys {
            node = node.node(key)?;
        }
        node.set(last, value);
        Ok(())
    }

    /// Entry at a nested path
    pub fn get_path<I, K>(&self, path: I) -> Option<&Entry>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut keys = path.into_iter();
        let first = keys.next()?;
        keys.try_fold(self.get(first.as_ref())?, |entry, key| {
            entry.as_node()?.get(key.as_ref())
        })
    }

    /// Remove `key`, returning its entry
    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        self.fields.remove(key)
    }

    /// Whether `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Whether some leaf directly under this node equals `value`
    pub fn contains_value<V: Into<Value>>(&self, value: V) -> bool {
        let value = value.into();
        self.values().any(|entry| entry.as_value() == Some(&value))
    }

    /// Keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Entries in key order
    pub fn values(&self) -> impl Iterator<Item = &Entry> {
        self.fields.values()
    }

    /// `(key, entry)` pairs in key order
    pub fn iter(&self) -> btree_map::Iter<'_, String, Entry> {
        self.fields.iter()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether there are no keys
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for Dynamic {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            fields: map
                .into_iter()
                .map(|(key, value)| (key, Entry::from_json(value)))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dynamic {
    type Item = (&'a String, &'a Entry);
    type IntoIter = btree_map::Iter<'a, String, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl Serialize for Dynamic {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Dynamic {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}
