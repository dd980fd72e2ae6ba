use skipset::{tree_levels, Config, MaxLevel, SkipList, SkipListError};

fn lanes_of(list: &SkipList<i64>) -> Vec<Vec<i64>> {
    (0..list.height())
        .map(|lvl| list.lane(lvl).cloned().collect())
        .collect()
}

#[test]
fn tree_like_scenario() {
    let mut list: SkipList<i64> = SkipList::with_config(&Config::mock(1)).unwrap();
    list.bulk_load(vec![7, 1, 5, 3, 9, 2, 8], true).unwrap();
    assert_eq!(list.iter().cloned().collect::<Vec<_>>(), vec![1, 2, 3, 5, 7, 8, 9]);
    assert_eq!(list.height(), 3);
    assert_eq!(
        list.lanes().to_string(),
        "L2: - - - 5 - - -\nL1: - 2 - 5 - 8 -\nL0: 1 2 3 5 7 8 9"
    );
}

#[test]
fn tree_like_ignores_generator() {
    let mut lists: Vec<SkipList<i64>> = (0..4)
        .map(|seed| SkipList::with_config(&Config::mock(seed)).unwrap())
        .collect();
    for (i, list) in lists.iter_mut().enumerate() {
        // same set, different input order
        let step = [1, 3, 7, 11][i];
        let values: Vec<i64> = (0..500).map(|v| (v * step) % 500).collect();
        list.bulk_load(values, true).unwrap();
    }
    let first = lanes_of(&lists[0]);
    for list in &lists[1..] {
        assert_eq!(lanes_of(list), first);
    }
}

#[test]
fn tree_like_matches_planned_levels() {
    let mut list: SkipList<i64> = SkipList::with_config(&Config::mock(2)).unwrap();
    list.bulk_load(0..100, true).unwrap();
    let top = MaxLevel::Logarithmic.ceiling(100).unwrap();
    let planned = tree_levels(100, top);
    for v in 0..100 {
        assert_eq!(list.level_of(&v), Some(planned[v as usize]));
    }
    assert_eq!(list.height(), top + 1);
}

#[test]
fn tree_like_uses_fixed_ceiling() {
    let config = Config {
        max_level: MaxLevel::Fixed(1),
        ..Config::mock(3)
    };
    let mut list: SkipList<i64> = SkipList::with_config(&config).unwrap();
    list.bulk_load(0..15, true).unwrap();
    assert_eq!(list.height(), 2);
    assert_eq!(list.lane(1).cloned().collect::<Vec<_>>(), vec![7]);
}

#[test]
fn random_load_matches_inserts() {
    let mut loaded: SkipList<i64> = SkipList::with_config(&Config::mock(4)).unwrap();
    let mut inserted: SkipList<i64> = SkipList::with_config(&Config::mock(4)).unwrap();
    let values: Vec<i64> = (0..300).map(|v| (v * 7) % 300).collect();
    loaded.bulk_load(values.clone(), false).unwrap();
    for v in values {
        inserted.insert(v).unwrap();
    }
    assert_eq!(lanes_of(&loaded), lanes_of(&inserted));
}

#[test]
fn rejected_load_changes_nothing() {
    let mut list: SkipList<i64> = SkipList::with_config(&Config::mock(5)).unwrap();
    list.bulk_load(vec![1, 2, 3], false).unwrap();
    let before = lanes_of(&list);

    assert_eq!(list.bulk_load(vec![4, 5, 4], false), Err(SkipListError::DuplicateValue));
    assert_eq!(list.bulk_load(vec![6, 3], true), Err(SkipListError::DuplicateValue));
    assert_eq!(lanes_of(&list), before);
    assert_eq!(list.count(), 3);
}
