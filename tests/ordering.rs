// SPDX-License-Identifier: MPL-2.0

use assert_matches::assert_matches;
use bst_set::{OrderedSet, OrderedSetError};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

fn sample_set() -> OrderedSet<i32> {
    [5, 3, 8, 1, 4, 7, 9].into_iter().collect()
}

fn assert_strictly_increasing(set: &OrderedSet<i32>) {
    let values = set.in_order();
    assert!(
        values.windows(2).all(|pair| pair[0] < pair[1]),
        "not strictly increasing: {values:?}"
    );
    assert_eq!(values.len(), set.size());
}

#[test]
fn ordering_of_sample_set() {
    let set = sample_set();
    assert_eq!(set.size(), 7);
    assert_eq!(set.minimum(), Ok(&1));
    assert_eq!(set.maximum(), Ok(&9));
    assert_eq!(set.successor(&5), Ok(&7));
    assert_eq!(set.successor(&3), Ok(&4));
}

#[test]
fn two_child_deletion() {
    let mut set = sample_set();
    assert!(set.remove(&5));
    assert!(!set.contains(&5));
    assert_strictly_increasing(&set);
    assert_eq!(set.in_order(), vec![&1, &3, &4, &7, &8, &9]);
    assert_eq!(set.successor(&4), Ok(&7));
}

#[test]
fn empty_set_guards() {
    let set = OrderedSet::<i32>::new();
    assert_matches!(set.minimum(), Err(OrderedSetError::EmptySet));
    assert_matches!(set.maximum(), Err(OrderedSetError::EmptySet));
    assert_eq!(set.minimum().unwrap_err().to_string(), "the set is empty");
}

#[test]
fn successor_preconditions() {
    let set = sample_set();
    assert_matches!(set.successor(&9), Err(OrderedSetError::NoSuccessor));
    assert_matches!(set.successor(&2), Err(OrderedSetError::NotFound));
}

#[test]
fn idempotent_insert_and_remove() {
    let mut set = sample_set();
    let before = set.clone();

    assert!(!set.insert(4));
    assert_eq!(set, before);
    assert_eq!(set.size(), 7);

    assert!(!set.remove(&6));
    assert_eq!(set, before);
}

#[test]
fn insert_then_remove_round_trip() {
    let mut set = sample_set();
    for value in [-3, 0, 6, 12] {
        set.insert(value);
        assert!(set.contains(&value));
        set.remove(&value);
        assert!(!set.contains(&value));
    }
    assert_eq!(set, sample_set());
}

#[test]
fn size_tracks_inserts_and_removes() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut values: Vec<i32> = (0..1_000).collect();
    values.shuffle(&mut rng);

    let mut set = OrderedSet::with_capacity(values.len());
    set.extend(values.iter().copied());
    // Duplicates do not count.
    set.extend(values.iter().copied().take(100));
    assert_eq!(set.size(), 1_000);
    assert_strictly_increasing(&set);

    values.shuffle(&mut rng);
    for (removed, value) in values.iter().take(600).enumerate() {
        assert!(set.remove(value));
        assert_eq!(set.size(), 1_000 - removed - 1);
    }
    assert_strictly_increasing(&set);

    let mut remaining: Vec<i32> = values[600..].to_vec();
    remaining.sort_unstable();
    assert_eq!(set.minimum(), Ok(&remaining[0]));
    assert_eq!(set.maximum(), Ok(&remaining[remaining.len() - 1]));
    for pair in remaining.windows(2) {
        assert_eq!(set.successor(&pair[0]), Ok(&pair[1]));
    }
}

#[test]
fn shape_follows_insertion_order() {
    let ascending: OrderedSet<i32> = (0..64).collect();
    assert_eq!(ascending.height(), 64);

    let balanced: OrderedSet<i32> = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();
    assert_eq!(balanced.height(), 3);
    assert_eq!(ascending.successor(&62), Ok(&63));
    assert_eq!(balanced.successor(&3), Ok(&4));
}

#[test]
fn display_renders_ascending() {
    let mut set = sample_set();
    set.remove(&5);
    assert_eq!(set.to_string(), "{1, 3, 4, 7, 8, 9}");
}

#[test]
fn serde_json_round_trip() {
    let set = sample_set();
    let json = serde_json::to_value(&set).unwrap();
    let decoded: OrderedSet<i32> = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, set);
    assert_eq!(decoded.height(), set.height());
}
