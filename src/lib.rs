//! An ordered set and an ordered map with navigable lookups, implemented
//! with an AVL tree.
//!
//! Both containers keep their elements sorted under a comparator chosen at
//! construction ([`NaturalOrder`] by default) and answer neighborhood
//! queries — `lower`, `floor`, `ceiling`, `higher` and the combined
//! [`search_around`](OrderedSet::search_around) — in a single O(log n)
//! descent. Bounded range iteration visits only the requested slice plus
//! one setup path.
//!
//! ```
//! use navtree::{OrderedMap, OrderedSet};
//!
//! let mut set = OrderedSet::new();
//! for x in [16, 2, 18, 4, 20, 6] {
//!     set.insert(x);
//! }
//! let around = set.search_around(&5);
//! assert_eq!(around.lower, Some(&4));
//! assert_eq!(around.exact, None);
//! assert_eq!(around.higher, Some(&6));
//!
//! let mut map = OrderedMap::new();
//! map.set("a", 1);
//! map.set("c", 3);
//! assert_eq!(map.ceiling_key(&"b"), Some(&"c"));
//! ```
//!
//! The containers are single-threaded by contract: nothing locks
//! internally, and `&mut self` on every mutating operation rules out
//! interleaved updates. All operations are synchronous and in-memory.
//!
//! With the `consistency_check` feature the containers expose
//! `check_consistency`, which asserts the search-tree order, the balance
//! factor bookkeeping and the element count of the underlying tree.

mod compare;
mod error;
pub mod map;
pub mod set;
mod tree;

pub use compare::{Comparator, NaturalOrder};
pub use error::Error;
pub use map::{EntryNeighbors, OrderedMap};
pub use set::OrderedSet;
pub use tree::Neighbors;

#[cfg(test)]
mod tests;
