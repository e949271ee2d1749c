//! An ordered map with navigable lookups, implemented with an AVL tree.
//!
//! The map stores `(key, value)` entries in the same engine the set uses,
//! with a comparator that looks at keys only. All balancing behavior is
//! shared; the adapter adds the map-shaped operations on top.

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::ops::{Bound, RangeBounds};

use crate::compare::{Comparator, NaturalOrder};
use crate::error::Error;
use crate::tree::{self, Tree};

/// An ordered map with navigable lookups, implemented with an AVL tree.
///
/// ```
/// use navtree::OrderedMap;
/// let mut map = OrderedMap::new();
/// map.set(1, "one");
/// map.set(3, "three");
/// map.set(5, "five");
/// assert_eq!(map.get(&3), Some(&"three"));
/// assert_eq!(map.floor_entry(&4), Some((&3, &"three")));
/// assert_eq!(map.higher_entry(&3), Some((&5, &"five")));
/// ```
#[derive(Clone)]
pub struct OrderedMap<K, V, C = NaturalOrder> {
    tree: Tree<Entry<K, V>, KeyOrder<C>>,
    cmp: C,
}

#[derive(Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    fn as_pair(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// Orders entries by key alone, so the value half never affects the
/// position of an entry in the tree.
#[derive(Clone)]
struct KeyOrder<C>(C);

impl<K, V, C> Comparator<Entry<K, V>> for KeyOrder<C>
where
    C: Comparator<K>,
{
    fn cmp(&self, lhs: &Entry<K, V>, rhs: &Entry<K, V>) -> Ordering {
        self.0.cmp(&lhs.key, &rhs.key)
    }
}

/// The stored neighborhood of a probed key: the nearest entries below,
/// equal to and above it.
#[derive(Debug)]
pub struct EntryNeighbors<'a, K, V> {
    pub lower: Option<(&'a K, &'a V)>,
    pub exact: Option<(&'a K, &'a V)>,
    pub higher: Option<(&'a K, &'a V)>,
}

// Derived Clone/Copy would demand K: Clone and V: Clone.
impl<K, V> Clone for EntryNeighbors<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for EntryNeighbors<'_, K, V> {}

/// An iterator over the entries of a map in ascending key order.
pub struct Iter<'a, K, V> {
    inner: tree::Iter<'a, Entry<K, V>>,
}

/// An iterator over the keys of a map in ascending order.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of a map in ascending key order.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over a bounded slice of a map in ascending key order.
pub struct Range<'a, K, V> {
    inner: tree::Range<'a, Entry<K, V>>,
}

/// An owning iterator over the entries of a map in ascending key order.
pub struct IntoIter<K, V> {
    inner: tree::IntoIter<Entry<K, V>>,
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Creates an empty map ordered by `K`'s `Ord` implementation.
    /// No memory is allocated until the first entry is inserted.
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, V, C> OrderedMap<K, V, C> {
    /// Returns true if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Clears the map, dropping all entries.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the entry with the smallest key.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.min().map(Entry::as_pair)
    }

    /// Returns the entry with the largest key.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.max().map(Entry::as_pair)
    }

    /// Returns the entry with the smallest key, or [`Error::Empty`] on an
    /// empty map.
    pub fn lowest(&self) -> Result<(&K, &V), Error> {
        self.first_key_value().ok_or(Error::Empty)
    }

    /// Returns the entry with the largest key, or [`Error::Empty`] on an
    /// empty map.
    pub fn highest(&self) -> Result<(&K, &V), Error> {
        self.last_key_value().ok_or(Error::Empty)
    }

    /// Gets an iterator over all entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.tree.iter(),
        }
    }

    /// Gets an iterator over all keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over all values in ascending key order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}

impl<K, V, C> OrderedMap<K, V, C>
where
    C: Comparator<K>,
{
    /// Creates an empty map ordered by the given key comparator.
    pub fn with_comparator(cmp: C) -> Self
    where
        C: Clone,
    {
        Self {
            tree: Tree::new(KeyOrder(cmp.clone())),
            cmp,
        }
    }

    /// Returns a reference to the value stored under the given key.
    pub fn get(&self, key: &K) -> Option<&V> {
        let cmp = &self.cmp;
        self.tree
            .find_by(|e| cmp.cmp(key, &e.key))
            .map(|e| &e.value)
    }

    /// Returns a mutable reference to the value stored under the given key.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let cmp = &self.cmp;
        self.tree
            .find_by_mut(|e| cmp.cmp(key, &e.key))
            .map(|e| &mut e.value)
    }

    /// Returns references to the entry stored under the given key.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let cmp = &self.cmp;
        self.tree.find_by(|e| cmp.cmp(key, &e.key)).map(Entry::as_pair)
    }

    /// Returns true if an entry with the given key exists.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Stores a value under the given key.
    ///
    /// If the key is already present the value is replaced in place and
    /// the previous one returned; the tree shape does not change.
    /// Otherwise a new entry is inserted and `None` returned.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let cmp = &self.cmp;
        if let Some(entry) = self.tree.find_by_mut(|e| cmp.cmp(&key, &e.key)) {
            return Some(std::mem::replace(&mut entry.value, value));
        }
        let inserted = self.tree.insert(Entry { key, value });
        debug_assert!(inserted);
        None
    }

    /// Inserts a new entry, or reports [`Error::DuplicateKey`] if the key
    /// is already present. The map is left untouched on error.
    pub fn add(&mut self, key: K, value: V) -> Result<(), Error> {
        if self.contains_key(&key) {
            return Err(Error::DuplicateKey);
        }
        let inserted = self.tree.insert(Entry { key, value });
        debug_assert!(inserted);
        Ok(())
    }

    /// Removes the entry with the given key and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let cmp = &self.cmp;
        self.tree
            .remove_by(|e| cmp.cmp(key, &e.key))
            .map(|e| e.value)
    }

    /// Removes the entry with the given key and returns it.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let cmp = &self.cmp;
        self.tree
            .remove_by(|e| cmp.cmp(key, &e.key))
            .map(Entry::into_pair)
    }

    /// Returns the stored neighborhood of `key` — the nearest entries
    /// below, equal to and above it — from a single descent.
    pub fn search_around(&self, key: &K) -> EntryNeighbors<'_, K, V> {
        let cmp = &self.cmp;
        let around = self.tree.around_by(|e| cmp.cmp(key, &e.key));
        EntryNeighbors {
            lower: around.lower.map(Entry::as_pair),
            exact: around.exact.map(Entry::as_pair),
            higher: around.higher.map(Entry::as_pair),
        }
    }

    /// Returns the entry with the greatest key strictly less than the
    /// given one.
    pub fn lower_entry(&self, key: &K) -> Option<(&K, &V)> {
        self.search_around(key).lower
    }

    /// Returns the entry with the greatest key less than or equal to the
    /// given one.
    pub fn floor_entry(&self, key: &K) -> Option<(&K, &V)> {
        let around = self.search_around(key);
        around.exact.or(around.lower)
    }

    /// Returns the entry with the least key greater than or equal to the
    /// given one.
    pub fn ceiling_entry(&self, key: &K) -> Option<(&K, &V)> {
        let around = self.search_around(key);
        around.exact.or(around.higher)
    }

    /// Returns the entry with the least key strictly greater than the
    /// given one.
    pub fn higher_entry(&self, key: &K) -> Option<(&K, &V)> {
        self.search_around(key).higher
    }

    /// Returns the greatest key strictly less than the given one.
    pub fn lower_key(&self, key: &K) -> Option<&K> {
        self.lower_entry(key).map(|(k, _)| k)
    }

    /// Returns the greatest key less than or equal to the given one.
    pub fn floor_key(&self, key: &K) -> Option<&K> {
        self.floor_entry(key).map(|(k, _)| k)
    }

    /// Returns the least key greater than or equal to the given one.
    pub fn ceiling_key(&self, key: &K) -> Option<&K> {
        self.ceiling_entry(key).map(|(k, _)| k)
    }

    /// Returns the least key strictly greater than the given one.
    pub fn higher_key(&self, key: &K) -> Option<&K> {
        self.higher_entry(key).map(|(k, _)| k)
    }

    /// Like [`lower_entry`](Self::lower_entry), for callers that know the
    /// neighbor exists: [`Error::Empty`] on an empty map,
    /// [`Error::NoSuchBound`] when no entry qualifies.
    pub fn require_lower_entry(&self, key: &K) -> Result<(&K, &V), Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        self.lower_entry(key).ok_or(Error::NoSuchBound)
    }

    /// Like [`floor_entry`](Self::floor_entry), erring when no entry
    /// qualifies.
    pub fn require_floor_entry(&self, key: &K) -> Result<(&K, &V), Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        self.floor_entry(key).ok_or(Error::NoSuchBound)
    }

    /// Like [`ceiling_entry`](Self::ceiling_entry), erring when no entry
    /// qualifies.
    pub fn require_ceiling_entry(&self, key: &K) -> Result<(&K, &V), Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        self.ceiling_entry(key).ok_or(Error::NoSuchBound)
    }

    /// Like [`higher_entry`](Self::higher_entry), erring when no entry
    /// qualifies.
    pub fn require_higher_entry(&self, key: &K) -> Result<(&K, &V), Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        self.higher_entry(key).ok_or(Error::NoSuchBound)
    }

    /// Gets an iterator over the entries whose keys fall within the given
    /// bounds, in ascending key order.
    ///
    /// Returns [`Error::InvalidRange`] before any traversal if the lower
    /// bound lies above the upper bound under the map's comparator, or if
    /// the bounds are equal and both excluded.
    pub fn range<R>(&self, range: R) -> Result<Range<'_, K, V>, Error>
    where
        R: RangeBounds<K>,
    {
        let cmp = &self.cmp;
        if let (Bound::Included(s) | Bound::Excluded(s), Bound::Included(e) | Bound::Excluded(e)) =
            (range.start_bound(), range.end_bound())
        {
            match cmp.cmp(s, e) {
                Ordering::Greater => return Err(Error::InvalidRange),
                Ordering::Equal
                    if matches!(range.start_bound(), Bound::Excluded(_))
                        && matches!(range.end_bound(), Bound::Excluded(_)) =>
                {
                    return Err(Error::InvalidRange)
                }
                _ => {}
            }
        }
        let lower = match range.start_bound() {
            Bound::Unbounded => Bound::Unbounded,
            Bound::Included(k) => Bound::Included(probe(cmp, k)),
            Bound::Excluded(k) => Bound::Excluded(probe(cmp, k)),
        };
        let upper = match range.end_bound() {
            Bound::Unbounded => Bound::Unbounded,
            Bound::Included(k) => Bound::Included(probe(cmp, k)),
            Bound::Excluded(k) => Bound::Excluded(probe(cmp, k)),
        };
        Ok(Range {
            inner: self.tree.range_by(lower, upper),
        })
    }
}

#[cfg(any(test, feature = "consistency_check"))]
impl<K, V, C> OrderedMap<K, V, C>
where
    C: Comparator<K>,
{
    /// Asserts that the internal tree structure is consistent.
    pub fn check_consistency(&self) {
        self.tree.check_consistency()
    }

    pub fn height(&self) -> usize {
        self.tree.height()
    }
}

// Orders a range bound against stored entries by key.
fn probe<'a, K, V, C>(cmp: &'a C, bound: &'a K) -> impl Fn(&Entry<K, V>) -> Ordering + 'a
where
    C: Comparator<K>,
{
    move |e| cmp.cmp(bound, &e.key)
}

impl<K: Ord, V> Default for OrderedMap<K, V> {
    /// Creates an empty map.
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.set(key, value);
        }
        map
    }
}

impl<K, V, C> Extend<(K, V)> for OrderedMap<K, V, C>
where
    C: Comparator<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        iter.into_iter().for_each(|(key, value)| {
            self.set(key, value);
        });
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for OrderedMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for OrderedMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for OrderedMap<K, V, C> {}

impl<'a, K, V, C> IntoIterator for &'a OrderedMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> IntoIterator for OrderedMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.tree.into_iter(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Entry::as_pair)
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

impl<'a, K, V> Iterator for Range<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Entry::as_pair)
    }
}

impl<K, V> Clone for Range<'_, K, V> {
    fn clone(&self) -> Self {
        Range {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Entry::into_pair)
    }
}
