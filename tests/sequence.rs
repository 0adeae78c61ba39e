use std::collections::BTreeMap;

use avl_sequence::sequence;
use avl_sequence::{AvlSequence, Key};
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 5_000;

/// Keys drawn from a range smaller than TEST_SIZE so that collisions are common.
fn key_strategy() -> impl Strategy<Value = Key> {
    -2_000i64..2_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum SeqOp {
    Insert(Key, i64),
    Remove(Key),
    Get(Key),
    ContainsKey(Key),
    FirstKeyValue,
    LastKeyValue,
    RemoveFront,
    RemoveRear,
}

fn seq_op_strategy() -> impl Strategy<Value = SeqOp> {
    prop_oneof![
        5 => (key_strategy(), value_strategy()).prop_map(|(k, v)| SeqOp::Insert(k, v)),
        3 => key_strategy().prop_map(SeqOp::Remove),
        2 => key_strategy().prop_map(SeqOp::Get),
        1 => key_strategy().prop_map(SeqOp::ContainsKey),
        1 => Just(SeqOp::FirstKeyValue),
        1 => Just(SeqOp::LastKeyValue),
        1 => Just(SeqOp::RemoveFront),
        1 => Just(SeqOp::RemoveRear),
    ]
}

// ─── Core CRUD operations ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both AvlSequence and
    /// BTreeMap and asserts identical results at every step.
    #[test]
    fn ops_match_btreemap(ops in proptest::collection::vec(seq_op_strategy(), TEST_SIZE)) {
        let mut seq: AvlSequence<i64> = AvlSequence::new();
        let mut bt_map: BTreeMap<Key, i64> = BTreeMap::new();

        for op in &ops {
            match *op {
                SeqOp::Insert(k, v) => {
                    prop_assert_eq!(seq.insert(k, v), bt_map.insert(k, v), "insert({}, {})", k, v);
                }
                SeqOp::Remove(k) => {
                    prop_assert_eq!(seq.remove(k), bt_map.remove(&k), "remove({})", k);
                }
                SeqOp::Get(k) => {
                    prop_assert_eq!(seq.get(k), bt_map.get(&k), "get({})", k);
                }
                SeqOp::ContainsKey(k) => {
                    prop_assert_eq!(seq.contains_key(k), bt_map.contains_key(&k), "contains_key({})", k);
                }
                SeqOp::FirstKeyValue => {
                    let bt_result = bt_map.first_key_value().map(|(&k, v)| (k, v));
                    prop_assert_eq!(seq.first_key_value(), bt_result, "first_key_value");
                }
                SeqOp::LastKeyValue => {
                    let bt_result = bt_map.last_key_value().map(|(&k, v)| (k, v));
                    prop_assert_eq!(seq.last_key_value(), bt_result, "last_key_value");
                }
                SeqOp::RemoveFront => {
                    prop_assert_eq!(seq.remove_front(), bt_map.pop_first(), "remove_front");
                }
                SeqOp::RemoveRear => {
                    prop_assert_eq!(seq.remove_rear(), bt_map.pop_last(), "remove_rear");
                }
            }
            prop_assert_eq!(seq.len(), bt_map.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(seq.is_empty(), bt_map.is_empty(), "is_empty mismatch after {:?}", op);
        }

        let seq_items: Vec<_> = seq.iter().map(|(k, &v)| (k, v)).collect();
        let bt_items: Vec<_> = bt_map.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(seq_items, bt_items);
    }

    /// Iteration in both directions matches BTreeMap after random insertions.
    #[test]
    fn iter_matches_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..TEST_SIZE)) {
        let seq: AvlSequence<i64> = entries.iter().copied().collect();
        let bt_map: BTreeMap<Key, i64> = entries.iter().copied().collect();

        prop_assert_eq!(seq.iter().len(), bt_map.len());
        let forward: Vec<_> = seq.iter().map(|(k, &v)| (k, v)).collect();
        let bt_forward: Vec<_> = bt_map.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(&forward, &bt_forward);

        let backward: Vec<_> = seq.iter().rev().map(|(k, &v)| (k, v)).collect();
        let bt_backward: Vec<_> = bt_map.iter().rev().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(&backward, &bt_backward);

        prop_assert!(seq.keys().eq(bt_map.keys().copied()));
        prop_assert!(seq.values().eq(bt_map.values()));

        let owned: Vec<_> = seq.into_iter().collect();
        prop_assert_eq!(owned, bt_forward);
    }

    /// Alternating next/next_back never yields an element twice.
    #[test]
    fn double_ended_iteration_meets_in_the_middle(
        keys in proptest::collection::btree_set(key_strategy(), 0..500),
        pattern in proptest::collection::vec(any::<bool>(), 0..600),
    ) {
        let seq: AvlSequence<()> = keys.iter().map(|&k| (k, ())).collect();
        let mut iter = seq.iter();
        let mut seen = Vec::new();
        for front in pattern {
            let item = if front { iter.next() } else { iter.next_back() };
            if let Some((k, _)) = item {
                seen.push(k);
            }
        }
        seen.extend(iter.map(|(k, _)| k));
        seen.sort_unstable();
        prop_assert_eq!(seen, keys.into_iter().collect::<Vec<_>>());
    }

    /// Every inserted key can be found again with `element_at_key`.
    #[test]
    fn element_at_key_round_trip(entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE)) {
        let mut seq = AvlSequence::new();
        for &(k, v) in &entries {
            seq.insert(k, v);
            let cursor = seq.element_at_key(k);
            prop_assert!(cursor.is_dereferencable());
            prop_assert_eq!(cursor.entry(), Ok((k, &v)));
        }
    }

    /// Tests that clear produces an empty sequence that can be reused.
    #[test]
    fn clear_empties_sequence(entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..TEST_SIZE)) {
        let mut seq: AvlSequence<i64> = entries.iter().copied().collect();
        seq.clear();
        prop_assert!(seq.is_empty());
        prop_assert_eq!(seq.iter().count(), 0);
        prop_assert!(seq.front().is_past_rear());

        seq.insert(1, 1);
        prop_assert_eq!(seq.len(), 1);
    }

    /// A clone is equal to the original and independent of it.
    #[test]
    fn clone_is_independent(entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..500)) {
        let original: AvlSequence<i64> = entries.iter().copied().collect();
        let mut copy = original.clone();
        prop_assert_eq!(&copy, &original);

        let (k, _) = entries[0];
        copy.remove(k);
        prop_assert!(original.contains_key(k));
        prop_assert_ne!(&copy, &original);
    }
}

// ─── Deterministic behaviour ────────────────────────────────────────────────

#[test]
fn set_get_and_change() {
    let mut seq = AvlSequence::new();
    for (k, v) in [(1, 12), (5, 17), (2, 13), (4, 16)] {
        assert_eq!(seq.insert(k, v), None);
    }
    assert_eq!((seq[1], seq[2], seq[4], seq[5]), (12, 13, 16, 17));

    for k in [1, 2, 4, 5] {
        seq.insert(k, k);
    }
    assert_eq!((seq[1], seq[2], seq[4], seq[5]), (1, 2, 4, 5));
    assert_eq!(seq.len(), 4);
}

#[test]
fn remove_keeps_remaining_entries() {
    let mut seq = AvlSequence::from([(1, 12), (5, 17), (2, 13), (4, 16)]);
    assert_eq!(seq.remove(2), Some(13));
    assert_eq!(seq.len(), 3);
    assert_eq!(seq.get(1), Some(&12));
    assert_eq!(seq.get(4), Some(&16));
    assert_eq!(seq.get(5), Some(&17));
    assert_eq!(seq.get(2), None);
}

#[test]
fn remove_on_empty_is_noop() {
    let mut seq: AvlSequence<u8> = AvlSequence::new();
    assert_eq!(seq.remove(3), None);
    assert_eq!(seq.remove_front(), None);
    assert_eq!(seq.remove_rear(), None);
    assert_eq!(seq.len(), 0);
}

#[test]
fn remove_entry_returns_key() {
    let mut seq = AvlSequence::from([(-9, "x")]);
    assert_eq!(seq.remove_entry(-9), Some((-9, "x")));
    assert_eq!(seq.remove_entry(-9), None);
}

#[test]
fn get_mut_updates_in_place() {
    let mut seq = AvlSequence::from([(3, String::from("a"))]);
    seq.get_mut(3).unwrap().push('b');
    assert_eq!(seq[3], "ab");
    assert!(seq.get_mut(4).is_none());
}

#[test]
fn extend_overwrites_existing_keys() {
    let mut seq = AvlSequence::from([(1, 'a'), (2, 'b')]);
    seq.extend([(2, 'B'), (3, 'c')]);
    assert_eq!(seq.iter().collect::<Vec<_>>(), [(1, &'a'), (2, &'B'), (3, &'c')]);
}

#[test]
fn debug_formats_as_map() {
    let seq = AvlSequence::from([(2, "b"), (1, "a")]);
    assert_eq!(format!("{seq:?}"), r#"{1: "a", 2: "b"}"#);
    assert_eq!(format!("{:?}", seq.iter()), r#"[(1, "a"), (2, "b")]"#);
}

#[test]
fn default_is_empty() {
    let seq: AvlSequence<()> = AvlSequence::default();
    assert!(seq.is_empty());
    assert_eq!(seq, AvlSequence::new());
}

#[test]
fn iterator_types_are_exact_size() {
    let seq = AvlSequence::from([(1, ()), (2, ()), (3, ())]);
    let mut keys: sequence::Keys<'_, ()> = seq.keys();
    assert_eq!(keys.len(), 3);
    keys.next();
    assert_eq!(keys.len(), 2);
    let values: sequence::Values<'_, ()> = seq.values();
    assert_eq!(values.len(), 3);
    let into_iter: sequence::IntoIter<()> = seq.into_iter();
    assert_eq!(into_iter.len(), 3);
}

#[test]
fn sequential_keys_survive_mass_removal() {
    let mut seq: AvlSequence<Key> = (0..10_000).map(|k| (k, k)).collect();
    for k in (0..10_000).step_by(2) {
        assert_eq!(seq.remove(k), Some(k));
    }
    assert_eq!(seq.len(), 5_000);
    assert!(seq.keys().eq((1..10_000).step_by(2)));
}

/// Tests that indexing a missing key panics just like BTreeMap.
#[test]
#[should_panic(expected = "no entry found for key")]
fn index_missing_key_panics() {
    let seq = AvlSequence::from([(1, 1)]);
    let _ = seq[2];
}
