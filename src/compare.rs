//! Comparison strategies for the ordered containers.

use std::cmp::Ordering;

/// A total order over `T`, chosen when a container is constructed.
///
/// The containers never fall back to `Ord` once built; every comparison
/// goes through the comparator they were created with. Any closure of the
/// shape `Fn(&T, &T) -> Ordering` is a comparator:
///
/// ```
/// use navtree::OrderedSet;
/// let mut set = OrderedSet::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// set.insert(1);
/// set.insert(2);
/// set.insert(3);
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
/// ```
pub trait Comparator<T> {
    fn cmp(&self, lhs: &T, rhs: &T) -> Ordering;
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn cmp(&self, lhs: &T, rhs: &T) -> Ordering {
        self(lhs, rhs)
    }
}

/// The `Ord` implementation of `T`; the default comparator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord> Comparator<T> for NaturalOrder {
    fn cmp(&self, lhs: &T, rhs: &T) -> Ordering {
        lhs.cmp(rhs)
    }
}
