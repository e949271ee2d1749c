use pretty_assertions::assert_eq;
use std::ops::Bound;

use super::{Error, OrderedMap, OrderedSet};

const N: i32 = 1_000;
const LARGE_N: i32 = 1_000_000;

#[test]
fn test_new() {
    let set_i32 = OrderedSet::<i32>::new();
    assert!(set_i32.is_empty());
    set_i32.check_consistency();

    let set_string = OrderedSet::<String>::new();
    assert!(set_string.is_empty());
    set_string.check_consistency();

    let map = OrderedMap::<i32, String>::new();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    map.check_consistency();
}

#[test]
fn test_rebalance() {
    {
        //     3 ->   2
        //    /      / \
        //   2      1   3
        //  /
        // 1
        let mut set = OrderedSet::new();
        set.insert(3);
        set.insert(2);
        set.insert(1);
        set.check_consistency();
        assert_eq!(set.height(), 2);
    }
    {
        //     3   ->     3 ->   2
        //    / \        /      / \
        //   2   4      2      1   3
        //  /          /
        // 1          1
        let mut set = OrderedSet::new();
        set.insert(3);
        set.insert(2);
        set.insert(4);
        set.insert(1);
        set.check_consistency();
        assert_eq!(set.height(), 3);
        set.remove(&4);
        set.check_consistency();
        assert_eq!(set.height(), 2);
    }
    {
        //   3  ->   2
        //  /       / \
        // 1       1   3
        //  \
        //   2
        let mut set = OrderedSet::new();
        set.insert(3);
        set.insert(1);
        set.insert(2);
        set.check_consistency();
        assert_eq!(set.height(), 2);
    }
    {
        //   3   ->   3  ->   2
        //  / \      /       / \
        // 1   4    1       1   3
        //  \        \
        //   2        2
        let mut set = OrderedSet::new();
        set.insert(3);
        set.insert(1);
        set.insert(4);
        set.insert(2);
        set.check_consistency();
        assert_eq!(set.height(), 3);
        set.remove(&4);
        set.check_consistency();
        assert_eq!(set.height(), 2);
    }
    {
        // 1 ->    2
        //  \     / \
        //   2   1   3
        //    \
        //     3
        let mut set = OrderedSet::new();
        set.insert(1);
        set.insert(2);
        set.insert(3);
        set.check_consistency();
        assert_eq!(set.height(), 2);
    }
    {
        //   1     -> 1     ->    2
        //  / \        \         / \
        // 0   2        2       1   3
        //      \        \
        //       3        3
        let mut set = OrderedSet::new();
        set.insert(1);
        set.insert(0);
        set.insert(2);
        set.insert(3);
        set.check_consistency();
        assert_eq!(set.height(), 3);
        set.remove(&0);
        set.check_consistency();
        assert_eq!(set.height(), 2);
    }
    {
        // 1   ->  2
        //  \     / \
        //   3   1   3
        //  /
        // 2
        let mut set = OrderedSet::new();
        set.insert(1);
        set.insert(3);
        set.insert(2);
        set.check_consistency();
        assert_eq!(set.height(), 2);
    }
    {
        //   1   ->  1   ->  2
        //  / \       \     / \
        // 0   3       3   1   3
        //    /       /
        //   2       2
        let mut set = OrderedSet::new();
        set.insert(1);
        set.insert(0);
        set.insert(3);
        set.insert(2);
        set.check_consistency();
        assert_eq!(set.height(), 3);
        set.remove(&0);
        set.check_consistency();
        assert_eq!(set.height(), 2);
    }
}

#[test]
fn test_insert() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();
    values.sort_unstable();
    values.dedup();

    let mut set = OrderedSet::new();
    for value in &values {
        assert!(set.insert(*value));
        set.check_consistency();
    }
    assert_eq!(set.len(), values.len());

    // A duplicate insert reports false and changes nothing.
    for value in &values {
        assert!(!set.insert(*value));
    }
    assert_eq!(set.len(), values.len());
    set.check_consistency();
}

#[test]
fn test_insert_sorted_range() {
    let mut set = OrderedSet::new();
    for value in 0..N {
        assert!(set.insert(value));
        set.check_consistency();
    }
    assert_eq!(set.len(), N as usize);
    assert!(set.height() > 0);
    assert!(set.height() < N as usize / 2);
    assert!(set.get(&-42).is_none());
}

#[test]
fn test_insert_shuffled_range() {
    use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

    let mut values: Vec<i32> = (0..N).collect();
    let mut rng = StdRng::seed_from_u64(0);
    values.shuffle(&mut rng);

    let mut set = OrderedSet::new();
    for value in &values {
        assert!(set.insert(*value));
        set.check_consistency();
    }
    assert_eq!(set.len(), values.len());

    for value in &values {
        assert!(!set.insert(*value));
    }
    assert_eq!(set.len(), values.len());
}

#[test]
fn test_get_contains() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();

    let mut set = OrderedSet::new();
    assert!(set.get(&42).is_none());
    for value in &values {
        set.insert(*value);
    }

    for value in &values {
        assert!(set.contains(value));
        assert_eq!(set.get(value), Some(value));
    }
    assert!(!set.contains(&-42));
    assert!(set.get(&-42).is_none());
}

#[test]
fn test_clear() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();
    values.sort_unstable();
    values.dedup();

    let mut set = OrderedSet::new();
    for value in &values {
        set.insert(*value);
    }
    assert!(!set.is_empty());
    assert_eq!(set.len(), values.len());

    set.clear();
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);

    for value in &values {
        assert!(set.insert(*value));
    }
    assert!(!set.is_empty());
    assert_eq!(set.len(), values.len());
    set.check_consistency();
}

#[test]
fn test_remove() {
    use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();
    values.sort_unstable();
    values.dedup();

    let mut set = OrderedSet::new();
    for value in &values {
        set.insert(*value);
    }

    // Removing every element in random order must pass through balanced
    // intermediate trees and end at the empty one.
    values.shuffle(&mut rng);
    for value in &values {
        assert!(set.contains(value));
        assert!(set.remove(value));
        assert!(!set.contains(value));
        assert!(!set.remove(value));
        set.check_consistency();
    }
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
}

#[test]
fn test_take() {
    let mut set = OrderedSet::new();
    set.insert(String::from("a"));
    set.insert(String::from("b"));
    assert_eq!(set.take(&String::from("a")), Some(String::from("a")));
    assert_eq!(set.take(&String::from("a")), None);
    assert_eq!(set.len(), 1);
    set.check_consistency();
}

#[test]
fn test_search_around_scenario() {
    let mut set = OrderedSet::new();
    for value in [16, 2, 18, 4, 20, 6, 22, 8, 24, 10, 26, 12, 28, 14, 30] {
        set.insert(value);
    }
    set.check_consistency();

    let around = set.search_around(&5);
    assert_eq!(around.lower, Some(&4));
    assert_eq!(around.exact, None);
    assert_eq!(around.higher, Some(&6));

    let around = set.search_around(&10);
    assert_eq!(around.lower, Some(&8));
    assert_eq!(around.exact, Some(&10));
    assert_eq!(around.higher, Some(&12));

    let around = set.search_around(&30);
    assert_eq!(around.lower, Some(&28));
    assert_eq!(around.exact, Some(&30));
    assert_eq!(around.higher, None);

    let around = set.search_around(&1);
    assert_eq!(around.lower, None);
    assert_eq!(around.exact, None);
    assert_eq!(around.higher, Some(&2));
}

#[test]
fn test_search_around_matches_reference() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut values: Vec<i32> = (0..200).map(|_| rng.gen_range(0..100)).collect();

    let mut set = OrderedSet::new();
    for value in &values {
        set.insert(*value);
    }
    values.sort_unstable();
    values.dedup();

    for probe in -1..=101 {
        let around = set.search_around(&probe);
        let lower = values.iter().filter(|v| **v < probe).max();
        let exact = values.iter().find(|v| **v == probe);
        let higher = values.iter().filter(|v| **v > probe).min();
        assert_eq!(around.lower, lower);
        assert_eq!(around.exact, exact);
        assert_eq!(around.higher, higher);
    }
}

#[test]
fn test_floor_ceiling_consistency() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(1);
    let mut set = OrderedSet::new();
    for _ in 0..200 {
        set.insert(rng.gen_range(0..100));
    }

    for probe in -1..=101 {
        if let Some(floor) = set.floor(&probe) {
            assert!(*floor <= probe);
            assert_eq!(*floor == probe, set.contains(&probe));
        }
        if let Some(ceiling) = set.ceiling(&probe) {
            assert!(*ceiling >= probe);
            assert_eq!(*ceiling == probe, set.contains(&probe));
        }
        if let Some(lower) = set.lower(&probe) {
            assert!(*lower < probe);
        }
        if let Some(higher) = set.higher(&probe) {
            assert!(*higher > probe);
        }
    }
}

#[test]
fn test_require_forms() {
    let mut set = OrderedSet::new();
    assert_eq!(set.require_floor(&5), Err(Error::Empty));
    assert_eq!(set.require_ceiling(&5), Err(Error::Empty));
    assert_eq!(set.require_lower(&5), Err(Error::Empty));
    assert_eq!(set.require_higher(&5), Err(Error::Empty));
    assert_eq!(set.lowest(), Err(Error::Empty));
    assert_eq!(set.highest(), Err(Error::Empty));

    set.insert(10);
    set.insert(20);
    assert_eq!(set.require_floor(&15), Ok(&10));
    assert_eq!(set.require_ceiling(&15), Ok(&20));
    assert_eq!(set.require_lower(&10), Err(Error::NoSuchBound));
    assert_eq!(set.require_higher(&20), Err(Error::NoSuchBound));
    assert_eq!(set.lowest(), Ok(&10));
    assert_eq!(set.highest(), Ok(&20));
}

#[test]
fn test_min_max() {
    let mut set = OrderedSet::new();
    assert_eq!(set.min(), None);
    assert_eq!(set.max(), None);
    for value in [5, 3, 8, 1, 9] {
        set.insert(value);
    }
    assert_eq!(set.min(), Some(&1));
    assert_eq!(set.max(), Some(&9));
}

#[test]
fn test_range_slice_scenario() {
    let set: OrderedSet<i32> = [3, 5, 10, 14, 16, 20].into_iter().collect();
    let slice: Vec<i32> = set
        .range((Bound::Excluded(12), Bound::Excluded(18)))
        .unwrap()
        .copied()
        .collect();
    assert_eq!(slice, vec![14, 16]);
}

#[test]
fn test_range_matches_reference() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(2);
    let mut values: Vec<i32> = (0..300).map(|_| rng.gen_range(0..100)).collect();

    let mut set = OrderedSet::new();
    for value in &values {
        set.insert(*value);
    }
    values.sort_unstable();
    values.dedup();

    for _ in 0..100 {
        let a = rng.gen_range(0..100);
        let b = rng.gen_range(a..101);

        let got: Vec<i32> = set.range(a..b).unwrap().copied().collect();
        let want: Vec<i32> = values.iter().filter(|v| (a..b).contains(*v)).copied().collect();
        assert_eq!(got, want);

        let got: Vec<i32> = set.range(a..=b).unwrap().copied().collect();
        let want: Vec<i32> = values.iter().filter(|v| (a..=b).contains(*v)).copied().collect();
        assert_eq!(got, want);

        let got: Vec<i32> = set
            .range((Bound::Excluded(a), Bound::Included(b)))
            .unwrap()
            .copied()
            .collect();
        let want: Vec<i32> = values
            .iter()
            .filter(|v| **v > a && **v <= b)
            .copied()
            .collect();
        assert_eq!(got, want);
    }

    let all: Vec<i32> = set.range(..).unwrap().copied().collect();
    assert_eq!(all, values);
}

#[test]
fn test_range_invalid() {
    let set: OrderedSet<i32> = [1, 2, 3].into_iter().collect();
    assert!(matches!(set.range(5..2), Err(Error::InvalidRange)));
    assert!(matches!(
        set.range((Bound::Excluded(2), Bound::Excluded(2))),
        Err(Error::InvalidRange)
    ));

    // Equal bounds are fine as long as at least one side is inclusive.
    let single: Vec<i32> = set.range(2..=2).unwrap().copied().collect();
    assert_eq!(single, vec![2]);
    let none: Vec<i32> = set
        .range((Bound::Included(2), Bound::Excluded(2)))
        .unwrap()
        .copied()
        .collect();
    assert_eq!(none, Vec::<i32>::new());

    // Bounds outside the stored values yield empty slices, not errors.
    let none: Vec<i32> = set.range(7..9).unwrap().copied().collect();
    assert_eq!(none, Vec::<i32>::new());
}

#[test]
fn test_set_iter() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();

    let mut set = OrderedSet::new();
    for value in &values {
        set.insert(*value);
    }

    values.sort_unstable();
    values.dedup();

    let from_iter: Vec<i32> = set.iter().copied().collect();
    assert_eq!(from_iter, values);

    let mut value_iter = values.iter();
    for value_in_set in &set {
        assert_eq!(Some(value_in_set), value_iter.next());
    }
    assert!(value_iter.next().is_none());

    let owned: Vec<i32> = set.into_iter().collect();
    assert_eq!(owned, values);
}

#[test]
fn test_custom_comparator() {
    let mut set = OrderedSet::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    for value in [1, 5, 3, 4, 2] {
        assert!(set.insert(value));
        set.check_consistency();
    }
    assert!(!set.insert(3));

    let descending: Vec<i32> = set.iter().copied().collect();
    assert_eq!(descending, vec![5, 4, 3, 2, 1]);

    // "lower" is relative to the reversed order: the nearest value that
    // sorts before the probe, i.e. the next larger number.
    assert_eq!(set.lower(&3), Some(&4));
    assert_eq!(set.higher(&3), Some(&2));
    assert_eq!(set.min(), Some(&5));
    assert_eq!(set.max(), Some(&1));

    let slice: Vec<i32> = set.range(4..=2).unwrap().copied().collect();
    assert_eq!(slice, vec![4, 3, 2]);
    assert!(matches!(set.range(2..=4), Err(Error::InvalidRange)));
}

#[test]
fn test_map_set_get() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();

    let mut map = OrderedMap::new();
    assert!(map.get(&42).is_none());
    for value in &values {
        map.set(*value, value.wrapping_add(1));
    }
    map.check_consistency();

    for value in &values {
        assert_eq!(map.get(value), Some(&value.wrapping_add(1)));
        assert_eq!(
            map.get_key_value(value),
            Some((value, &value.wrapping_add(1)))
        );
        assert!(map.contains_key(value));
    }
    assert!(map.get(&-42).is_none());
}

#[test]
fn test_map_value_replace_in_place() {
    let mut map = OrderedMap::new();
    map.set("a", 1);
    map.set("b", 2);
    map.set("c", 3);
    let len = map.len();
    let height = map.height();

    // Replacing a value must not touch the tree shape.
    assert_eq!(map.set("a", 10), Some(1));
    assert_eq!(map.len(), len);
    assert_eq!(map.height(), height);
    assert_eq!(map.get(&"a"), Some(&10));
    map.check_consistency();

    if let Some(value) = map.get_mut(&"b") {
        *value = 20;
    }
    assert_eq!(map.get(&"b"), Some(&20));
    assert_eq!(map.len(), len);
}

#[test]
fn test_map_add() {
    let mut map = OrderedMap::new();
    assert_eq!(map.add(1, "one"), Ok(()));
    assert_eq!(map.add(2, "two"), Ok(()));
    assert_eq!(map.add(1, "uno"), Err(Error::DuplicateKey));
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&1), Some(&"one"));
    map.check_consistency();
}

#[test]
fn test_map_remove() {
    use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut keys: Vec<i32> = (0..N).map(|_| rng.gen()).collect();
    keys.sort_unstable();
    keys.dedup();

    let mut map = OrderedMap::new();
    for key in &keys {
        map.set(*key, 42);
    }

    keys.shuffle(&mut rng);
    for key in &keys {
        assert!(map.contains_key(key));
        assert_eq!(map.remove(key), Some(42));
        assert!(!map.contains_key(key));
        map.check_consistency();
    }
    assert!(map.is_empty());

    map.set(7, 8);
    assert_eq!(map.remove_entry(&7), Some((7, 8)));
    assert_eq!(map.remove_entry(&7), None);
}

#[test]
fn test_map_navigation() {
    let mut map = OrderedMap::new();
    for (key, value) in [(2, "two"), (4, "four"), (6, "six")] {
        map.set(key, value);
    }

    let around = map.search_around(&4);
    assert_eq!(around.lower, Some((&2, &"two")));
    assert_eq!(around.exact, Some((&4, &"four")));
    assert_eq!(around.higher, Some((&6, &"six")));

    assert_eq!(map.lower_key(&4), Some(&2));
    assert_eq!(map.floor_key(&5), Some(&4));
    assert_eq!(map.ceiling_key(&5), Some(&6));
    assert_eq!(map.higher_key(&6), None);

    assert_eq!(map.floor_entry(&3), Some((&2, &"two")));
    assert_eq!(map.ceiling_entry(&1), Some((&2, &"two")));
    assert_eq!(map.lower_entry(&2), None);
    assert_eq!(map.higher_entry(&5), Some((&6, &"six")));

    assert_eq!(map.require_floor_entry(&3), Ok((&2, &"two")));
    assert_eq!(map.require_lower_entry(&2), Err(Error::NoSuchBound));
    assert_eq!(map.require_higher_entry(&6), Err(Error::NoSuchBound));

    assert_eq!(map.first_key_value(), Some((&2, &"two")));
    assert_eq!(map.last_key_value(), Some((&6, &"six")));
    assert_eq!(map.lowest(), Ok((&2, &"two")));

    map.clear();
    assert_eq!(map.require_ceiling_entry(&1), Err(Error::Empty));
    assert_eq!(map.highest(), Err(Error::Empty));
}

#[test]
fn test_map_range() {
    let map: OrderedMap<i32, i32> = (0..10).map(|k| (k, k * k)).collect();

    let slice: Vec<(i32, i32)> = map
        .range(3..7)
        .unwrap()
        .map(|(k, v)| (*k, *v))
        .collect();
    assert_eq!(slice, vec![(3, 9), (4, 16), (5, 25), (6, 36)]);

    assert!(matches!(map.range(7..3), Err(Error::InvalidRange)));

    let all: Vec<i32> = map.range(..).unwrap().map(|(k, _)| *k).collect();
    assert_eq!(all, (0..10).collect::<Vec<i32>>());
}

#[test]
fn test_map_iter() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut keys: Vec<i32> = (0..N).map(|_| rng.gen()).collect();

    let mut map = OrderedMap::new();
    for key in &keys {
        map.set(*key, key.wrapping_add(42));
    }

    keys.sort_unstable();
    keys.dedup();

    let mut key_iter = keys.iter();
    for (key, value) in &map {
        let expected = key_iter.next().unwrap();
        assert_eq!(key, expected);
        assert_eq!(*value, expected.wrapping_add(42));
    }
    assert!(key_iter.next().is_none());

    let from_keys: Vec<i32> = map.keys().copied().collect();
    assert_eq!(from_keys, keys);

    let from_values: Vec<i32> = map.values().copied().collect();
    let expected: Vec<i32> = keys.iter().map(|k| k.wrapping_add(42)).collect();
    assert_eq!(from_values, expected);

    let owned: Vec<(i32, i32)> = map.into_iter().collect();
    let expected: Vec<(i32, i32)> = keys.iter().map(|k| (*k, k.wrapping_add(42))).collect();
    assert_eq!(owned, expected);
}

#[test]
fn test_map_custom_comparator() {
    let mut map = OrderedMap::with_comparator(|a: &String, b: &String| {
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    });
    map.set(String::from("ccc"), 3);
    map.set(String::from("a"), 1);
    map.set(String::from("bb"), 2);
    map.check_consistency();

    let keys: Vec<String> = map.keys().cloned().collect();
    assert_eq!(keys, vec!["a", "bb", "ccc"]);
    assert_eq!(map.floor_key(&String::from("zz")), Some(&String::from("bb")));
}

#[test]
fn test_error_display() {
    assert_eq!(Error::Empty.to_string(), "container is empty");
    assert_eq!(
        Error::NoSuchBound.to_string(),
        "no element satisfies the requested bound"
    );
    assert_eq!(
        Error::InvalidRange.to_string(),
        "range lower bound exceeds upper bound"
    );
    assert_eq!(Error::DuplicateKey.to_string(), "key is already present");
}

#[test]
fn test_eq_and_debug() {
    let a: OrderedSet<i32> = [1, 2, 3].into_iter().collect();
    let b: OrderedSet<i32> = [3, 2, 1].into_iter().collect();
    assert_eq!(a, b);
    assert_eq!(format!("{a:?}"), "{1, 2, 3}");

    let m: OrderedMap<i32, &str> = [(1, "one")].into_iter().collect();
    assert_eq!(format!("{m:?}"), "{1: \"one\"}");
}

#[test]
#[ignore]
fn test_large() {
    use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut values: Vec<i32> = (0..LARGE_N).map(|_| rng.gen_range(0..LARGE_N)).collect();

    let mut set = OrderedSet::new();
    for value in &values {
        set.insert(*value);
    }
    set.check_consistency();

    values.shuffle(&mut rng);
    values.resize(values.len() / 2, 0);
    for value in &values {
        set.remove(value);
    }
    set.check_consistency();
}
