//! Insertion-ordered persistent map.
use crate::{Atom, Data, Value};
use imbl::{HashMap, Vector};
use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::fmt;

/// A persistent mapping from keys to values that remembers first-insertion order.
///
/// Cloning is cheap: both the entries and the key order are structurally shared, so a clone taken
/// before a mutation stays valid (and unchanged) afterwards.
#[derive(Clone, Default)]
pub struct ValueMap {
    entries: HashMap<Atom, Value>,
    /// Keys in first-insertion order. Always holds exactly the keys of `entries`.
    order: Vector<Atom>,
}

impl ValueMap {
    /// Creates a new, empty map.
    pub fn new() -> ValueMap {
        ValueMap {
            entries: HashMap::new(),
            order: Vector::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the value corresponding to the key.
    pub fn get(&self, key: &Atom) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &Atom) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts a value and returns the previous one.
    ///
    /// Overwriting an existing key keeps its original position.
    pub fn insert(&mut self, key: Atom, value: Value) -> Option<Value> {
        let previous = self.entries.insert(key.clone(), value);
        if previous.is_none() {
            self.order.push_back(key);
        }
        previous
    }

    /// Removes a key and returns its value.
    pub fn remove(&mut self, key: &Atom) -> Option<Value> {
        let previous = self.entries.remove(key)?;
        if let Some(index) = self.order.index_of(key) {
            self.order.remove(index);
        }
        Some(previous)
    }

    /// Returns a new map with the given entry added or replaced.
    #[must_use]
    pub fn update(&self, key: impl Into<Atom>, value: impl Into<Value>) -> ValueMap {
        let mut map = self.clone();
        map.insert(key.into(), value.into());
        map
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Atom> + '_ {
        self.order.iter()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Atom, &Value)> + '_ {
        self.order
            .iter()
            .filter_map(move |key| self.entries.get(key).map(|value| (key, value)))
    }
}

// Order-insensitive: two maps holding the same entries are the same regardless of how they were built.
impl Data for ValueMap {
    fn same(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(key, value)| other.entries.get(key).is_some_and(|o| value.same(o)))
    }
}

impl PartialEq for ValueMap {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl fmt::Debug for ValueMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<Atom>, V: Into<Value>> FromIterator<(K, V)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ValueMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<Atom>, V: Into<Value>> Extend<(K, V)> for ValueMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key.into(), value.into());
        }
    }
}

impl Serialize for ValueMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ValueMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueMapVisitor;

        impl<'de> Visitor<'de> for ValueMapVisitor {
            type Value = ValueMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of assigns")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ValueMap, A::Error> {
                let mut map = ValueMap::new();
                while let Some((key, value)) = access.next_entry::<Atom, Value>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(ValueMapVisitor)
    }
}
