//! An ordered set with navigable lookups, implemented with an AVL tree.

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::ops::{Bound, RangeBounds};

use crate::compare::{Comparator, NaturalOrder};
use crate::error::Error;
use crate::tree::{self, Neighbors, Tree};

/// An ordered set with navigable lookups, implemented with an AVL tree.
///
/// Besides the usual set operations it answers neighborhood queries —
/// [`lower`](Self::lower), [`floor`](Self::floor), [`ceiling`](Self::ceiling)
/// and [`higher`](Self::higher) — in a single O(log n) descent, and iterates
/// over bounded slices in ascending order.
///
/// ```
/// use navtree::OrderedSet;
/// let mut set = OrderedSet::new();
/// set.insert(2);
/// set.insert(4);
/// set.insert(6);
/// assert_eq!(set.floor(&5), Some(&4));
/// assert_eq!(set.ceiling(&5), Some(&6));
/// assert_eq!(set.floor(&4), Some(&4));
/// assert_eq!(set.higher(&6), None);
/// ```
#[derive(Clone)]
pub struct OrderedSet<T, C = NaturalOrder> {
    tree: Tree<T, C>,
}

/// An iterator over the values of a set in ascending order.
pub struct Iter<'a, T> {
    inner: tree::Iter<'a, T>,
}

/// An iterator over a bounded slice of a set in ascending order.
pub struct Range<'a, T> {
    inner: tree::Range<'a, T>,
}

/// An owning iterator over the values of a set in ascending order.
pub struct IntoIter<T> {
    inner: tree::IntoIter<T>,
}

impl<T: Ord> OrderedSet<T> {
    /// Creates an empty set ordered by `T`'s `Ord` implementation.
    /// No memory is allocated until the first value is inserted.
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T, C> OrderedSet<T, C> {
    /// Returns true if the set contains no values.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the number of values in the set.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Clears the set, dropping all values.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the smallest value.
    pub fn min(&self) -> Option<&T> {
        self.tree.min()
    }

    /// Returns the largest value.
    pub fn max(&self) -> Option<&T> {
        self.tree.max()
    }

    /// Returns the smallest value, or [`Error::Empty`] on an empty set.
    pub fn lowest(&self) -> Result<&T, Error> {
        self.min().ok_or(Error::Empty)
    }

    /// Returns the largest value, or [`Error::Empty`] on an empty set.
    pub fn highest(&self) -> Result<&T, Error> {
        self.max().ok_or(Error::Empty)
    }

    /// Gets an iterator over all values in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.tree.iter(),
        }
    }
}

impl<T, C> OrderedSet<T, C>
where
    C: Comparator<T>,
{
    /// Creates an empty set ordered by the given comparator.
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            tree: Tree::new(cmp),
        }
    }

    /// Inserts a value into the set.
    /// Returns false and leaves the set untouched if an equal value is
    /// already present.
    pub fn insert(&mut self, value: T) -> bool {
        self.tree.insert(value)
    }

    /// Removes a value from the set.
    /// Returns whether the value was previously in the set.
    pub fn remove(&mut self, value: &T) -> bool {
        self.tree.remove(value).is_some()
    }

    /// Removes a value from the set and returns it.
    pub fn take(&mut self, value: &T) -> Option<T> {
        self.tree.remove(value)
    }

    /// Returns true if the set contains a value equal to the given one.
    pub fn contains(&self, value: &T) -> bool {
        self.tree.find(value).is_some()
    }

    /// Returns a reference to the stored value equal to the given one.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.tree.find(value)
    }

    /// Returns the stored neighborhood of `value` — the nearest values
    /// below, equal to and above it — from a single descent.
    ///
    /// ```
    /// use navtree::OrderedSet;
    /// let set: navtree::OrderedSet<i32> = [2, 4, 6].into_iter().collect();
    /// let around = set.search_around(&5);
    /// assert_eq!(around.lower, Some(&4));
    /// assert_eq!(around.exact, None);
    /// assert_eq!(around.higher, Some(&6));
    /// ```
    pub fn search_around(&self, value: &T) -> Neighbors<'_, T> {
        self.tree.around(value)
    }

    /// Returns the greatest value strictly less than the given one.
    pub fn lower(&self, value: &T) -> Option<&T> {
        self.search_around(value).lower
    }

    /// Returns the greatest value less than or equal to the given one.
    pub fn floor(&self, value: &T) -> Option<&T> {
        let around = self.search_around(value);
        around.exact.or(around.lower)
    }

    /// Returns the least value greater than or equal to the given one.
    pub fn ceiling(&self, value: &T) -> Option<&T> {
        let around = self.search_around(value);
        around.exact.or(around.higher)
    }

    /// Returns the least value strictly greater than the given one.
    pub fn higher(&self, value: &T) -> Option<&T> {
        self.search_around(value).higher
    }

    /// Like [`lower`](Self::lower), for callers that know the neighbor
    /// exists: [`Error::Empty`] on an empty set, [`Error::NoSuchBound`]
    /// when no stored value qualifies.
    pub fn require_lower(&self, value: &T) -> Result<&T, Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        self.lower(value).ok_or(Error::NoSuchBound)
    }

    /// Like [`floor`](Self::floor), erring when no stored value qualifies.
    pub fn require_floor(&self, value: &T) -> Result<&T, Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        self.floor(value).ok_or(Error::NoSuchBound)
    }

    /// Like [`ceiling`](Self::ceiling), erring when no stored value
    /// qualifies.
    pub fn require_ceiling(&self, value: &T) -> Result<&T, Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        self.ceiling(value).ok_or(Error::NoSuchBound)
    }

    /// Like [`higher`](Self::higher), erring when no stored value
    /// qualifies.
    pub fn require_higher(&self, value: &T) -> Result<&T, Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        self.higher(value).ok_or(Error::NoSuchBound)
    }

    /// Gets an iterator over the values within the given bounds, in
    /// ascending order. The walk visits only the result plus one setup
    /// path, never the whole tree.
    ///
    /// Returns [`Error::InvalidRange`] before any traversal if the lower
    /// bound lies above the upper bound under the set's comparator, or if
    /// the bounds are equal and both excluded.
    ///
    /// ```
    /// use navtree::OrderedSet;
    /// use std::ops::Bound;
    /// let set: navtree::OrderedSet<i32> = [3, 5, 10, 14, 16, 20].into_iter().collect();
    /// let slice: Vec<i32> = set
    ///     .range((Bound::Excluded(12), Bound::Excluded(18)))
    ///     .unwrap()
    ///     .copied()
    ///     .collect();
    /// assert_eq!(slice, [14, 16]);
    /// ```
    pub fn range<R>(&self, range: R) -> Result<Range<'_, T>, Error>
    where
        R: RangeBounds<T>,
    {
        let cmp = self.tree.comparator();
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
            Bound::Included(v) => Bound::Included(probe(cmp, v)),
            Bound::Excluded(v) => Bound::Excluded(probe(cmp, v)),
        };
        let upper = match range.end_bound() {
            Bound::Unbounded => Bound::Unbounded,
            Bound::Included(v) => Bound::Included(probe(cmp, v)),
            Bound::Excluded(v) => Bound::Excluded(probe(cmp, v)),
        };
        Ok(Range {
            inner: self.tree.range_by(lower, upper),
        })
    }
}

#[cfg(any(test, feature = "consistency_check"))]
impl<T, C> OrderedSet<T, C>
where
    C: Comparator<T>,
{
    /// Asserts that the internal tree structure is consistent.
    pub fn check_consistency(&self) {
        self.tree.check_consistency()
    }

    pub fn height(&self) -> usize {
        self.tree.height()
    }
}

// Orders a range bound against stored elements.
fn probe<'a, T, C>(cmp: &'a C, bound: &'a T) -> impl Fn(&T) -> Ordering + 'a
where
    C: Comparator<T>,
{
    move |x| cmp.cmp(bound, x)
}

impl<T: Ord> Default for OrderedSet<T> {
    /// Creates an empty set.
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<T, C> Extend<T> for OrderedSet<T, C>
where
    C: Comparator<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|value| {
            self.insert(value);
        });
    }
}

impl<'a, T, C> Extend<&'a T> for OrderedSet<T, C>
where
    T: Copy + 'a,
    C: Comparator<T>,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: fmt::Debug, C> fmt::Debug for OrderedSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, C> PartialEq for OrderedSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for OrderedSet<T, C> {}

impl<'a, T, C> IntoIterator for &'a OrderedSet<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C> IntoIterator for OrderedSet<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.tree.into_iter(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Iterator for Range<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl<T> Clone for Range<'_, T> {
    fn clone(&self) -> Self {
        Range {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}
