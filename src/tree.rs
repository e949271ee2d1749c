//! Balance-factor AVL tree over owned links.
//!
//! This is the engine behind [`OrderedSet`](crate::OrderedSet) and
//! [`OrderedMap`](crate::OrderedMap). Every mutating walk receives the link
//! to the current subtree and fixes it up on the way back, so nodes need no
//! parent pointers and rotations are plain box reshuffles.

use std::cmp::Ordering;
use std::ops::Bound;
use std::ptr;

use crate::compare::Comparator;

pub(crate) type Link<T> = Option<Box<Node<T>>>;

#[derive(Clone)]
pub(crate) struct Node<T> {
    value: T,
    // height(right) - height(left), in {-1, 0, +1} between operations.
    balance: i8,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn new(value: T) -> Box<Self> {
        Box::new(Node {
            value,
            balance: 0,
            left: None,
            right: None,
        })
    }
}

#[derive(Clone)]
pub(crate) struct Tree<T, C> {
    root: Link<T>,
    len: usize,
    cmp: C,
}

/// The neighborhood of a probe value, produced by a single descent.
///
/// `lower` is the greatest stored value strictly below the probe, `exact`
/// the stored value equal to it, `higher` the least stored value strictly
/// above it. Any slot without a qualifying value is `None`.
#[derive(Debug)]
pub struct Neighbors<'a, T> {
    pub lower: Option<&'a T>,
    pub exact: Option<&'a T>,
    pub higher: Option<&'a T>,
}

// Derived Clone/Copy would demand T: Clone although only references are held.
impl<T> Clone for Neighbors<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Neighbors<'_, T> {}

impl<T, C> Tree<T, C> {
    pub fn new(cmp: C) -> Self {
        Self {
            root: None,
            len: 0,
            cmp,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    pub fn min(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.value)
    }

    pub fn max(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.value)
    }

    /// Looks up an element by a probe that reports where the target sorts
    /// relative to the probed element.
    pub fn find_by<F>(&self, probe: F) -> Option<&T>
    where
        F: Fn(&T) -> Ordering,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match probe(&node.value) {
                Ordering::Equal => return Some(&node.value),
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
            }
        }
        None
    }

    /// Mutable lookup. Callers must not change how the element sorts; the
    /// map adapter uses this to replace the value half of an entry in place.
    pub fn find_by_mut<F>(&mut self, probe: F) -> Option<&mut T>
    where
        F: Fn(&T) -> Ordering,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            match probe(&node.value) {
                Ordering::Equal => return Some(&mut node.value),
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Greater => current = node.right.as_deref_mut(),
            }
        }
        None
    }

    /// Removes the element matched by the probe and returns it.
    pub fn remove_by<F>(&mut self, probe: F) -> Option<T>
    where
        F: Fn(&T) -> Ordering,
    {
        let (removed, _) = Self::remove_at(&mut self.root, &probe);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Collects the nearest neighbors of the probe target in one descent.
    ///
    /// Moving right leaves the current element behind as the best lower
    /// candidate, moving left as the best higher candidate. On an exact
    /// match the true predecessor and successor are completed by walking
    /// the child spines; the total path is still one root-to-leaf walk.
    pub fn around_by<F>(&self, probe: F) -> Neighbors<'_, T>
    where
        F: Fn(&T) -> Ordering,
    {
        let mut neighbors = Neighbors {
            lower: None,
            exact: None,
            higher: None,
        };
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match probe(&node.value) {
                Ordering::Less => {
                    neighbors.higher = Some(&node.value);
                    current = node.left.as_deref();
                }
                Ordering::Greater => {
                    neighbors.lower = Some(&node.value);
                    current = node.right.as_deref();
                }
                Ordering::Equal => {
                    neighbors.exact = Some(&node.value);
                    let mut pred = node.left.as_deref();
                    while let Some(p) = pred {
                        neighbors.lower = Some(&p.value);
                        pred = p.right.as_deref();
                    }
                    let mut succ = node.right.as_deref();
                    while let Some(s) = succ {
                        neighbors.higher = Some(&s.value);
                        succ = s.left.as_deref();
                    }
                    break;
                }
            }
        }
        neighbors
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root)
    }

    pub fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self.root)
    }

    /// Bounded in-order walk. The bounds are probes reporting where the
    /// bound value sorts relative to a stored element; the edges must
    /// already be validated against each other by the caller.
    pub fn range_by<L, U>(&self, lower: Bound<L>, upper: Bound<U>) -> Range<'_, T>
    where
        L: Fn(&T) -> Ordering,
        U: Fn(&T) -> Ordering,
    {
        let upper_ok = |value: &T| match &upper {
            Bound::Unbounded => true,
            Bound::Included(p) => p(value) != Ordering::Less,
            Bound::Excluded(p) => p(value) == Ordering::Greater,
        };

        // Greatest element inside the upper edge; the iterator stops there.
        let mut last = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if upper_ok(&node.value) {
                last = Some(&node.value);
                current = node.right.as_deref();
            } else {
                current = node.left.as_deref();
            }
        }
        let mut range = Range {
            stack: Vec::new(),
            last,
        };
        if range.last.is_none() {
            return range;
        }

        // Descend to the least element inside the lower edge, stacking
        // every node the walk turns left at.
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            let inside = match &lower {
                Bound::Unbounded => true,
                Bound::Included(p) => p(&node.value) != Ordering::Greater,
                Bound::Excluded(p) => p(&node.value) == Ordering::Less,
            };
            if inside {
                range.stack.push(node);
                current = node.left.as_deref();
            } else {
                current = node.right.as_deref();
            }
        }

        // The edges may not intersect: the walk yields nothing if the
        // start position already lies beyond the upper edge.
        let empty = match range.stack.last() {
            None => true,
            Some(first) => !upper_ok(&first.value),
        };
        if empty {
            range.stack.clear();
            range.last = None;
        }
        range
    }

    fn remove_at<F>(link: &mut Link<T>, probe: &F) -> (Option<T>, bool)
    where
        F: Fn(&T) -> Ordering,
    {
        let Some(node) = link else {
            return (None, false);
        };
        let (removed, shrank, from_left) = match probe(&node.value) {
            Ordering::Less => {
                let (removed, shrank) = Self::remove_at(&mut node.left, probe);
                (removed, shrank, true)
            }
            Ordering::Greater => {
                let (removed, shrank) = Self::remove_at(&mut node.right, probe);
                (removed, shrank, false)
            }
            Ordering::Equal => {
                if node.left.is_none() || node.right.is_none() {
                    let node = link.take().unwrap();
                    *link = if node.left.is_some() {
                        node.left
                    } else {
                        node.right
                    };
                    return (Some(node.value), true);
                }
                // Two children: replace the payload with the in-order
                // successor pulled out of the right subtree. Rotations stay
                // confined to that single downward pass.
                let (successor, shrank) = Self::take_min(&mut node.right);
                let removed = std::mem::replace(&mut node.value, successor);
                (Some(removed), shrank, false)
            }
        };
        if !shrank {
            return (removed, false);
        }
        let shrank = if from_left {
            Self::shrink_left(link)
        } else {
            Self::shrink_right(link)
        };
        (removed, shrank)
    }

    // Unlinks the leftmost node of a non-empty subtree.
    fn take_min(link: &mut Link<T>) -> (T, bool) {
        let node = link.as_mut().unwrap();
        if node.left.is_some() {
            let (min, shrank) = Self::take_min(&mut node.left);
            if !shrank {
                return (min, false);
            }
            (min, Self::shrink_left(link))
        } else {
            let node = link.take().unwrap();
            *link = node.right;
            (node.value, true)
        }
    }

    // The left subtree lost one level of height.
    // Returns whether this subtree shrank as well.
    fn shrink_left(link: &mut Link<T>) -> bool {
        let node = link.as_mut().unwrap();
        node.balance += 1;
        match node.balance {
            0 => true,
            1 => false,
            _ => Self::rebalance_right(link),
        }
    }

    // The right subtree lost one level of height.
    fn shrink_right(link: &mut Link<T>) -> bool {
        let node = link.as_mut().unwrap();
        node.balance -= 1;
        match node.balance {
            0 => true,
            -1 => false,
            _ => Self::rebalance_left(link),
        }
    }

    /// The balance hit -2: the left subtree is two levels higher.
    /// Restores the AVL bound at this link and returns whether the subtree
    /// height decreased. A single rotation around a child with balance 0
    /// keeps the height (possible after deletions only); every other case
    /// reduces it by one.
    fn rebalance_left(link: &mut Link<T>) -> bool {
        let node = link.as_mut().unwrap();
        let left_balance = node.left.as_ref().unwrap().balance;
        if left_balance <= 0 {
            Self::rotate_right(link);
            let root = link.as_mut().unwrap();
            if left_balance == 0 {
                root.balance = 1;
                root.right.as_mut().unwrap().balance = -1;
                false
            } else {
                root.balance = 0;
                root.right.as_mut().unwrap().balance = 0;
                true
            }
        } else {
            let grand_balance = node.left.as_ref().unwrap().right.as_ref().unwrap().balance;
            Self::rotate_left(&mut node.left);
            Self::rotate_right(link);
            let root = link.as_mut().unwrap();
            root.balance = 0;
            root.left.as_mut().unwrap().balance = if grand_balance > 0 { -1 } else { 0 };
            root.right.as_mut().unwrap().balance = if grand_balance < 0 { 1 } else { 0 };
            true
        }
    }

    /// Mirror image of [`rebalance_left`](Self::rebalance_left) for a
    /// balance of +2.
    fn rebalance_right(link: &mut Link<T>) -> bool {
        let node = link.as_mut().unwrap();
        let right_balance = node.right.as_ref().unwrap().balance;
        if right_balance >= 0 {
            Self::rotate_left(link);
            let root = link.as_mut().unwrap();
            if right_balance == 0 {
                root.balance = -1;
                root.left.as_mut().unwrap().balance = 1;
                false
            } else {
                root.balance = 0;
                root.left.as_mut().unwrap().balance = 0;
                true
            }
        } else {
            let grand_balance = node.right.as_ref().unwrap().left.as_ref().unwrap().balance;
            Self::rotate_right(&mut node.right);
            Self::rotate_left(link);
            let root = link.as_mut().unwrap();
            root.balance = 0;
            root.left.as_mut().unwrap().balance = if grand_balance > 0 { -1 } else { 0 };
            root.right.as_mut().unwrap().balance = if grand_balance < 0 { 1 } else { 0 };
            true
        }
    }

    fn rotate_left(link: &mut Link<T>) {
        let mut node = link.take().unwrap();
        let mut right = node.right.take().unwrap();
        node.right = right.left.take();
        right.left = Some(node);
        *link = Some(right);
    }

    fn rotate_right(link: &mut Link<T>) {
        let mut node = link.take().unwrap();
        let mut left = node.left.take().unwrap();
        node.left = left.right.take();
        left.right = Some(node);
        *link = Some(left);
    }
}

impl<T, C> Tree<T, C>
where
    C: Comparator<T>,
{
    /// Inserts a value unless an equal one is already stored.
    pub fn insert(&mut self, value: T) -> bool {
        let cmp = &self.cmp;
        let (inserted, _) = Self::insert_at(&mut self.root, value, cmp);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    pub fn find(&self, value: &T) -> Option<&T> {
        self.find_by(|x| self.cmp.cmp(value, x))
    }

    pub fn remove(&mut self, value: &T) -> Option<T> {
        let cmp = &self.cmp;
        let (removed, _) = Self::remove_at(&mut self.root, &|x: &T| cmp.cmp(value, x));
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    pub fn around(&self, value: &T) -> Neighbors<'_, T> {
        self.around_by(|x| self.cmp.cmp(value, x))
    }

    // Returns (inserted, subtree grew by one level).
    fn insert_at(link: &mut Link<T>, value: T, cmp: &C) -> (bool, bool) {
        let Some(node) = link else {
            *link = Some(Node::new(value));
            return (true, true);
        };
        let (inserted, grew, into_left) = match cmp.cmp(&value, &node.value) {
            Ordering::Equal => return (false, false),
            Ordering::Less => {
                let (inserted, grew) = Self::insert_at(&mut node.left, value, cmp);
                (inserted, grew, true)
            }
            Ordering::Greater => {
                let (inserted, grew) = Self::insert_at(&mut node.right, value, cmp);
                (inserted, grew, false)
            }
        };
        if !grew {
            return (inserted, false);
        }
        node.balance += if into_left { -1 } else { 1 };
        match node.balance {
            // The shorter side caught up; height is unchanged further up.
            0 => (inserted, false),
            -1 | 1 => (inserted, true),
            // A rotation restores the height this subtree had before the
            // insert, so growth never propagates past it.
            -2 => {
                Self::rebalance_left(link);
                (inserted, false)
            }
            _ => {
                Self::rebalance_right(link);
                (inserted, false)
            }
        }
    }
}

#[cfg(any(test, feature = "consistency_check"))]
impl<T, C> Tree<T, C>
where
    C: Comparator<T>,
{
    /// Asserts the search-tree order, the stored balance factors and the
    /// AVL bound at every node, and the incremental length.
    pub fn check_consistency(&self) {
        let (_, count) = Self::check_node(&self.root, &self.cmp, None, None);
        assert_eq!(count, self.len);
    }

    /// Height of the tree in nodes; empty is 0, a lone root is 1.
    pub fn height(&self) -> usize {
        Self::node_height(&self.root)
    }

    fn check_node<'a>(
        link: &'a Link<T>,
        cmp: &C,
        min: Option<&'a T>,
        max: Option<&'a T>,
    ) -> (usize, usize) {
        let Some(node) = link else {
            return (0, 0);
        };
        if let Some(min) = min {
            assert_eq!(cmp.cmp(&node.value, min), Ordering::Greater);
        }
        if let Some(max) = max {
            assert_eq!(cmp.cmp(&node.value, max), Ordering::Less);
        }
        let (left_height, left_count) = Self::check_node(&node.left, cmp, min, Some(&node.value));
        let (right_height, right_count) =
            Self::check_node(&node.right, cmp, Some(&node.value), max);
        assert_eq!(node.balance as isize, right_height as isize - left_height as isize);
        assert!(node.balance.abs() <= 1);
        (1 + left_height.max(right_height), 1 + left_count + right_count)
    }

    fn node_height(link: &Link<T>) -> usize {
        match link {
            None => 0,
            Some(node) => 1 + Self::node_height(&node.left).max(Self::node_height(&node.right)),
        }
    }
}

/// Ascending in-order iterator holding the path to the next element.
pub(crate) struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    fn new(root: &'a Link<T>) -> Self {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(root.as_deref());
        iter
    }

    fn push_left(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some(&node.value)
    }
}

// Derived Clone would demand T: Clone although only references are held.
impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            stack: self.stack.clone(),
        }
    }
}

/// Ascending owning iterator; detaches nodes as it walks.
pub(crate) struct IntoIter<T> {
    stack: Vec<Box<Node<T>>>,
}

impl<T> IntoIter<T> {
    fn new(root: Link<T>) -> Self {
        let mut iter = IntoIter { stack: Vec::new() };
        iter.push_left(root);
        iter
    }

    fn push_left(&mut self, mut link: Link<T>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left(node.right.take());
        Some(node.value)
    }
}

/// Bounded ascending iterator; stops after yielding the precomputed last
/// element, so cost stays proportional to the result plus the setup path.
pub(crate) struct Range<'a, T> {
    stack: Vec<&'a Node<T>>,
    last: Option<&'a T>,
}

impl<'a, T> Range<'a, T> {
    fn push_left(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Range<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let last = self.last?;
        let node = self.stack.pop()?;
        if ptr::eq(&node.value, last) {
            self.stack.clear();
            self.last = None;
            return Some(&node.value);
        }
        self.push_left(node.right.as_deref());
        Some(&node.value)
    }
}

// Derived Clone would demand T: Clone although only references are held.
impl<T> Clone for Range<'_, T> {
    fn clone(&self) -> Self {
        Range {
            stack: self.stack.clone(),
            last: self.last,
        }
    }
}
