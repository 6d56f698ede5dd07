//! Decoded values and the insertion-ordered map that holds them.
//!
//! CSA tags and ASCCONV protocols are both heterogeneous trees: a tag value
//! may be a number, a string, a list of either, or (for the ASCII protocol
//! tag) a nested mapping. `Value` is the tagged union for all of them and
//! `OrderedMap` keeps keys in a deterministic, caller-visible order.

use std::collections::HashMap;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A decoded CSA or ASCCONV value.
///
/// # Examples
/// ```
/// use csa_header::Value;
///
/// let value = Value::List(vec![Value::Int(1), Value::Null]);
/// assert_eq!(value.at(0).and_then(Value::as_i64), Some(1));
/// assert!(value.at(1).is_some_and(Value::is_null));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
    Map(OrderedMap<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric view of the value; integers are widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            Value::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&OrderedMap<Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Look up `key` when this value is a map.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Look up list element `index` when this value is a list.
    pub fn at(&self, index: usize) -> Option<&Value> {
        self.as_list().and_then(|items| items.get(index))
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Int(value) => serializer.serialize_i64(*value),
            Value::Float(value) => serializer.serialize_f64(*value),
            Value::Text(value) => serializer.serialize_str(value),
            Value::List(items) => items.serialize(serializer),
            Value::Map(map) => map.serialize(serializer),
        }
    }
}

/// String-keyed map that iterates in a well-defined insertion order.
///
/// Two insertion disciplines are offered: [`OrderedMap::insert`] keeps the
/// position of the first insertion of a key, while
/// [`OrderedMap::insert_last`] moves a re-inserted key to the end.
///
/// # Examples
/// ```
/// use csa_header::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert("b", 1);
/// map.insert("a", 2);
/// map.insert("b", 3);
/// assert_eq!(map.keys().collect::<Vec<_>>(), ["b", "a"]);
///
/// map.insert_last("b", 4);
/// assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b"]);
/// assert_eq!(map.get("b"), Some(&4));
/// ```
#[derive(Debug, Clone)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        match self.index.get(key) {
            Some(&position) => Some(&mut self.entries[position].1),
            None => None,
        }
    }

    /// Insert or overwrite `key`, keeping its original position if present.
    ///
    /// Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        if let Some(&position) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[position].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// Insert or overwrite `key`, moving it to the end of the iteration order.
    ///
    /// Returns the previous value, if any.
    pub fn insert_last(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        let previous = self.remove(&key);
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        previous
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        let position = self.index.remove(key)?;
        let (_, value) = self.entries.remove(position);
        for (shifted, (entry_key, _)) in self.entries.iter().enumerate().skip(position) {
            self.index.insert(entry_key.clone(), shifted);
        }
        Some(value)
    }

    /// Return the value for `key`, inserting `default()` at the end first if
    /// the key is missing.
    pub fn get_or_insert_with(&mut self, key: &str, default: impl FnOnce() -> V) -> &mut V {
        let position = match self.index.get(key) {
            Some(&position) => position,
            None => {
                let position = self.entries.len();
                self.index.insert(key.to_string(), position);
                self.entries.push((key.to_string(), default()));
                position
            }
        };
        &mut self.entries[position].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }
}

impl<V: PartialEq> PartialEq for OrderedMap<V> {
    /// Maps are equal when they hold the same entries in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::{OrderedMap, Value};

    #[test]
    fn insert_keeps_first_position() {
        let mut map = OrderedMap::new();
        map.insert("x", 1);
        map.insert("y", 2);
        assert_eq!(map.insert("x", 3), Some(1));
        assert_eq!(map.keys().collect::<Vec<_>>(), ["x", "y"]);
        assert_eq!(map.get("x"), Some(&3));
    }

    #[test]
    fn insert_last_moves_key_to_end() {
        let mut map = OrderedMap::new();
        map.insert_last("x", 1);
        map.insert_last("y", 2);
        map.insert_last("z", 3);
        assert_eq!(map.insert_last("x", 4), Some(1));
        assert_eq!(map.keys().collect::<Vec<_>>(), ["y", "z", "x"]);
        assert_eq!(map.get("y"), Some(&2));
        assert_eq!(map.get("z"), Some(&3));
        assert_eq!(map.get("x"), Some(&4));
    }

    #[test]
    fn remove_reindexes_following_entries() {
        let mut map: OrderedMap<i32> = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        assert_eq!(map.remove("a"), Some(1));
        assert_eq!(map.get("b"), Some(&2));
        assert_eq!(map.get("c"), Some(&3));
        assert_eq!(map.len(), 2);
        assert!(!map.contains_key("a"));
    }

    #[test]
    fn get_or_insert_with_appends_once() {
        let mut map: OrderedMap<Value> = OrderedMap::new();
        *map.get_or_insert_with("k", || Value::Int(1)) = Value::Int(2);
        map.get_or_insert_with("k", || Value::Int(9));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("k"), Some(&Value::Int(2)));

        if let Some(value) = map.get_mut("k") {
            *value = Value::Null;
        }
        assert_eq!(map.values().collect::<Vec<_>>(), [&Value::Null]);
    }

    #[test]
    fn value_serializes_in_map_order() {
        let map: OrderedMap<Value> = [
            ("zeta", Value::Int(1)),
            ("alpha", Value::List(vec![Value::Null, Value::Float(0.5)])),
            ("mid", Value::Text("txt".to_string())),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&Value::Map(map)).expect("json");
        assert_eq!(json, r#"{"zeta":1,"alpha":[null,0.5],"mid":"txt"}"#);
    }

    #[test]
    fn accessors_reject_other_shapes() {
        let value = Value::Text("1".to_string());
        assert_eq!(value.as_i64(), None);
        assert_eq!(value.as_f64(), None);
        assert!(value.get("x").is_none());
        assert!(value.at(0).is_none());
        assert_eq!(Value::Int(2).as_f64(), Some(2.0));
    }
}
