//! Collection representations for list and map fields.
//!
//! `List` and `Map` are immutable and cheap to clone; decoders collect into
//! a local buffer and freeze it. `Vec` and `MapBuf` are the growable forms
//! used for fields that recurse through a collection.

use crate::eq::{SchemaEq, SchemaHash, entries_eq, entries_hash};
use derive_more::Deref;
use std::{hash::Hasher, sync::Arc};

///
/// List
///

#[derive(Clone, Debug, Deref)]
pub struct List<T>(Arc<[T]>);

impl<T> List<T> {
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::from(Vec::new()))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    /// A new list with `value` appended; `self` is left untouched.
    #[must_use]
    pub fn pushed(&self, value: T) -> Self
    where
        T: Clone,
    {
        self.iter().cloned().chain(std::iter::once(value)).collect()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(items: Vec<T>) -> Self {
        Self(Arc::from(items))
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: SchemaEq> SchemaEq for List<T> {
    fn schema_eq(&self, other: &Self) -> bool {
        self.as_slice().schema_eq(other.as_slice())
    }
}

impl<T: SchemaHash> SchemaHash for List<T> {
    fn schema_hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().schema_hash(state);
    }
}

impl<T: SchemaEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.schema_eq(other)
    }
}

impl<T: SchemaEq> Eq for List<T> {}

///
/// MapBuf
///
/// Insertion-ordered association list with unique keys. Inserting an
/// existing key replaces its value in place.
///

#[derive(Clone, Debug)]
pub struct MapBuf<K, V>(Vec<(K, V)>);

impl<K, V> MapBuf<K, V> {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.0.iter().map(|(k, v)| (k, v))
    }

    #[must_use]
    pub fn as_entries(&self) -> &[(K, V)] {
        &self.0
    }

    #[must_use]
    pub fn freeze(self) -> Map<K, V> {
        Map(Arc::from(self.0))
    }
}

impl<K: SchemaEq, V> MapBuf<K, V> {
    /// Insert or replace; returns the replaced value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.0.iter_mut().find(|(k, _)| k.schema_eq(&key)) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.0.push((key, value));
                None
            }
        }
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        lookup(&self.0, key)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let pos = self.0.iter().position(|(k, _)| k.schema_eq(key))?;

        Some(self.0.remove(pos).1)
    }
}

impl<K, V> Default for MapBuf<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: SchemaEq, V> FromIterator<(K, V)> for MapBuf<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }

        map
    }
}

impl<K: SchemaEq, V: SchemaEq> SchemaEq for MapBuf<K, V> {
    fn schema_eq(&self, other: &Self) -> bool {
        entries_eq(&self.0, &other.0)
    }
}

impl<K: SchemaHash, V: SchemaHash> SchemaHash for MapBuf<K, V> {
    fn schema_hash<H: Hasher>(&self, state: &mut H) {
        entries_hash(&self.0, state);
    }
}

impl<K: SchemaEq, V: SchemaEq> PartialEq for MapBuf<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.schema_eq(other)
    }
}

impl<K: SchemaEq, V: SchemaEq> Eq for MapBuf<K, V> {}

///
/// Map
/// frozen form of `MapBuf`
///

#[derive(Clone, Debug)]
pub struct Map<K, V>(Arc<[(K, V)]>);

impl<K, V> Map<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::from(Vec::new()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.0.iter().map(|(k, v)| (k, v))
    }

    #[must_use]
    pub fn as_entries(&self) -> &[(K, V)] {
        &self.0
    }
}

impl<K: SchemaEq, V> Map<K, V> {
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        lookup(&self.0, key)
    }

    /// A new map with `key` set to `value`; `self` is left untouched.
    #[must_use]
    pub fn inserted(&self, key: K, value: V) -> Self
    where
        K: Clone,
        V: Clone,
    {
        let mut buf: MapBuf<K, V> = self.0.iter().cloned().collect();
        buf.insert(key, value);

        buf.freeze()
    }
}

impl<K, V> Default for Map<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: SchemaEq, V> FromIterator<(K, V)> for Map<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter().collect::<MapBuf<K, V>>().freeze()
    }
}

impl<K, V> From<MapBuf<K, V>> for Map<K, V> {
    fn from(buf: MapBuf<K, V>) -> Self {
        buf.freeze()
    }
}

impl<K: SchemaEq, V: SchemaEq> SchemaEq for Map<K, V> {
    fn schema_eq(&self, other: &Self) -> bool {
        entries_eq(&self.0, &other.0)
    }
}

impl<K: SchemaHash, V: SchemaHash> SchemaHash for Map<K, V> {
    fn schema_hash<H: Hasher>(&self, state: &mut H) {
        entries_hash(&self.0, state);
    }
}

impl<K: SchemaEq, V: SchemaEq> PartialEq for Map<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.schema_eq(other)
    }
}

impl<K: SchemaEq, V: SchemaEq> Eq for Map<K, V> {}

// lookup
fn lookup<'a, K: SchemaEq, V>(entries: &'a [(K, V)], key: &K) -> Option<&'a V> {
    entries
        .iter()
        .find(|(k, _)| k.schema_eq(key))
        .map(|(_, v)| v)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eq::hash_one;

    #[test]
    fn list_clones_share_storage() {
        let list: List<i32> = vec![1, 2, 3].into();
        let copy = list.clone();

        assert!(Arc::ptr_eq(&list.0, &copy.0));
        assert_eq!(copy.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn pushed_leaves_original_intact() {
        let list: List<i32> = vec![1].into();
        let longer = list.pushed(2);

        assert_eq!(list.len(), 1);
        assert_eq!(longer.as_slice(), &[1, 2]);
    }

    #[test]
    fn map_insert_replaces_existing_key() {
        let mut buf = MapBuf::new();
        buf.insert("a".to_string(), 1);
        buf.insert("b".to_string(), 2);
        let prev = buf.insert("a".to_string(), 3);

        assert_eq!(prev, Some(1));
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.get(&"a".to_string()), Some(&3));
    }

    #[test]
    fn maps_compare_as_sets() {
        let a: Map<u32, f64> = [(1, 0.5), (2, f64::NAN)].into_iter().collect();
        let b: Map<u32, f64> = [(2, f64::NAN), (1, 0.5)].into_iter().collect();

        assert_eq!(a, b);
        assert_eq!(hash_one(&a), hash_one(&b));
    }

    #[test]
    fn inserted_leaves_original_intact() {
        let a: Map<u32, u32> = [(1, 1)].into_iter().collect();
        let b = a.inserted(1, 2);

        assert_eq!(a.get(&1), Some(&1));
        assert_eq!(b.get(&1), Some(&2));
        assert_eq!(b.len(), 1);
    }
}
