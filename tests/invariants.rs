//! Property-based tests for the ordering and lane invariants.

use std::collections::BTreeSet;

use proptest::prelude::*;
use skipset::{Config, MaxLevel, SkipList, SkipListError};

#[derive(Clone, Debug)]
enum Op {
    Insert(i32),
    Delete(i32),
    Replace(i32, i32),
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..200i32).prop_map(Op::Insert),
        2 => (0..200i32).prop_map(Op::Delete),
        1 => (0..200i32, 0..200i32).prop_map(|(a, b)| Op::Replace(a, b)),
    ]
}

fn arbitrary_max_level() -> impl Strategy<Value = MaxLevel> {
    prop_oneof![Just(MaxLevel::Logarithmic), (1..8usize).prop_map(MaxLevel::Fixed)]
}

fn seeded(max_level: MaxLevel, seed: u64) -> SkipList<i32> {
    let config = Config {
        max_level,
        ..Config::mock(seed)
    };
    SkipList::with_config(&config).unwrap()
}

/// Every lane is strictly ascending, and every value on lane `j` is also on lane `j - 1`.
fn assert_lanes(list: &SkipList<i32>) -> Result<(), TestCaseError> {
    let mut below: Vec<i32> = list.iter().cloned().collect();
    prop_assert_eq!(below.len(), list.count());
    for lvl in 0..list.height() {
        let lane: Vec<i32> = list.lane(lvl).cloned().collect();
        prop_assert!(!lane.is_empty(), "lane {} is empty", lvl);
        prop_assert!(lane.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(lane.iter().all(|v| below.contains(v)));
        below = lane;
    }
    prop_assert!(list.lane(list.height()).next().is_none());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The list behaves like an ordered set, whatever the operations.
    #[test]
    fn matches_ordered_set(
        ops in prop::collection::vec(arbitrary_op(), 1..200),
        max_level in arbitrary_max_level(),
        seed in any::<u64>(),
    ) {
        let mut list = seeded(max_level, seed);
        let mut model = BTreeSet::new();

        for op in &ops {
            match *op {
                Op::Insert(v) => {
                    let expected = if model.insert(v) { Ok(()) } else { Err(SkipListError::DuplicateValue) };
                    prop_assert_eq!(list.insert(v), expected);
                }
                Op::Delete(v) => {
                    let expected = if model.remove(&v) { Ok(v) } else { Err(SkipListError::ValueNotFound) };
                    prop_assert_eq!(list.delete(&v), expected);
                }
                Op::Replace(old, new) => {
                    let expected = if !model.contains(&old) {
                        Err(SkipListError::ValueNotFound)
                    } else if old != new && model.contains(&new) {
                        Err(SkipListError::DuplicateValue)
                    } else {
                        model.remove(&old);
                        model.insert(new);
                        Ok(old)
                    };
                    prop_assert_eq!(list.replace(&old, new), expected);
                }
            }
            assert_lanes(&list)?;
        }

        prop_assert_eq!(list.iter().cloned().collect::<Vec<_>>(), model.iter().cloned().collect::<Vec<_>>());
        for v in 0..200 {
            prop_assert_eq!(list.present(&v), model.contains(&v));
        }
    }

    /// Inserting then deleting a fresh value restores the count and the level-0 sequence.
    #[test]
    fn insert_delete_inverse(
        values in prop::collection::btree_set(0..1000i32, 0..100),
        extra in 1000..2000i32,
        seed in any::<u64>(),
    ) {
        let mut list = seeded(MaxLevel::Logarithmic, seed);
        list.bulk_load(values.iter().cloned(), false).unwrap();
        let before: Vec<i32> = list.iter().cloned().collect();

        list.insert(extra).unwrap();
        prop_assert!(list.present(&extra));
        prop_assert_eq!(list.delete(&extra), Ok(extra));

        prop_assert_eq!(list.count(), before.len());
        prop_assert_eq!(list.iter().cloned().collect::<Vec<_>>(), before);
        assert_lanes(&list)?;
    }

    /// Tree-like loading depends on the set of values only.
    #[test]
    fn tree_like_is_reproducible(
        values in prop::collection::btree_set(any::<i32>(), 1..300),
        seeds in (any::<u64>(), any::<u64>()),
    ) {
        let mut a = seeded(MaxLevel::Logarithmic, seeds.0);
        let mut b = seeded(MaxLevel::Logarithmic, seeds.1);
        a.bulk_load(values.iter().cloned(), true).unwrap();
        b.bulk_load(values.iter().rev().cloned(), true).unwrap();

        prop_assert_eq!(a.lanes().to_string(), b.lanes().to_string());
        let top = MaxLevel::Logarithmic.ceiling(values.len()).unwrap();
        prop_assert_eq!(a.height(), top + 1);
        assert_lanes(&a)?;
    }

    /// A clone has the same lanes, and later changes to either side stay on that side.
    #[test]
    fn clone_is_structural_and_independent(
        values in prop::collection::btree_set(0..500i32, 1..200),
        tree_like in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let mut original = seeded(MaxLevel::Logarithmic, seed);
        original.bulk_load(values.iter().cloned(), tree_like).unwrap();
        let mut copy = original.clone();

        prop_assert_eq!(copy.lanes().to_string(), original.lanes().to_string());
        assert_lanes(&copy)?;

        let first = *values.iter().next().unwrap();
        copy.delete(&first).unwrap();
        prop_assert!(original.present(&first));
        original.insert(1000).unwrap();
        prop_assert!(!copy.present(&1000));
        prop_assert_eq!(copy.count() + 2, original.count());
    }
}
