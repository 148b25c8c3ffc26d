use std::borrow::Borrow;
use std::hash::Hash;

use fnv::FnvHashMap;

/// Hash map keyed with FNV, used for every small-key lookup table of the workspace
/// (variable assignments, auxiliary-state banks, ciphertext tables).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Map<K: Eq + Hash, V>(pub FnvHashMap<K, V>);

impl<K: Eq + Hash, V> Map<K, V> {
    pub fn new() -> Self {
        Self(FnvHashMap::<K, V>::default())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(FnvHashMap::with_capacity_and_hasher(capacity, Default::default()))
    }

    pub fn insert(&mut self, k: K, data: V) -> Option<V> {
        self.0.insert(k, data)
    }

    pub fn get<Q>(&self, k: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.0.get(k)
    }

    pub fn contains_key<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.0.contains_key(k)
    }

    pub fn get_or_insert_with<F: FnOnce() -> V>(&mut self, k: K, f: F) -> &mut V {
        self.0.entry(k).or_insert_with(f)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.0.keys()
    }
}

impl<K: Eq + Hash, V> Default for Map<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for Map<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<K: Eq + Hash, V> Extend<(K, V)> for Map<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl<K: Eq + Hash, V> IntoIterator for Map<K, V> {
    type Item = (K, V);
    type IntoIter = std::collections::hash_map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
