use skipset::{Config, MaxLevel, SkipList, SkipListError};

fn fixed(levels: usize, seed: u64) -> SkipList<i64> {
    let config = Config {
        max_level: MaxLevel::Fixed(levels),
        ..Config::mock(seed)
    };
    SkipList::with_config(&config).unwrap()
}

fn contents(list: &SkipList<i64>) -> Vec<i64> {
    list.iter().cloned().collect()
}

#[test]
fn insert_search_delete() {
    let mut list = fixed(3, 1);
    for &v in [5, 1, 9, 3].iter() {
        list.insert(v).unwrap();
    }
    assert_eq!(list.count(), 4);
    assert!(list.present(&3));
    assert!(!list.present(&4));
    assert_eq!(contents(&list), vec![1, 3, 5, 9]);

    assert_eq!(list.delete(&1), Ok(1));
    assert!(!list.present(&1));
    assert_eq!(list.count(), 3);
    assert_eq!(list.delete(&1), Err(SkipListError::ValueNotFound));
    assert_eq!(list.count(), 3);
}

#[test]
fn empty_list() {
    let mut list = fixed(3, 2);
    assert!(list.is_empty());
    assert_eq!(list.height(), 0);
    assert!(!list.present(&0));
    assert_eq!(list.first(), None);
    assert_eq!(list.last(), None);
    assert_eq!(list.delete(&0), Err(SkipListError::ValueNotFound));
    assert_eq!(list.lanes().to_string(), "");
}

#[test]
fn duplicates_leave_count_unchanged() {
    let mut list = fixed(4, 3);
    list.insert(10).unwrap();
    list.insert(20).unwrap();
    assert_eq!(list.insert(10), Err(SkipListError::DuplicateValue));
    assert_eq!(list.insert(20), Err(SkipListError::DuplicateValue));
    assert_eq!(list.count(), 2);
}

#[test]
fn fixed_ceiling_bounds_height() {
    let mut list = fixed(3, 4);
    for v in 0..2000 {
        list.insert(v).unwrap();
        assert!(list.height() <= 3);
    }
    for v in 0..2000 {
        assert!(list.level_of(&v).unwrap() <= 3);
    }
}

#[test]
fn logarithmic_ceiling_bounds_height() {
    let mut list: SkipList<i64> = SkipList::with_config(&Config::mock(5)).unwrap();
    for v in 0..4096 {
        let ceiling = MaxLevel::Logarithmic.ceiling(list.count()).unwrap();
        list.insert(v).unwrap();
        assert!(list.level_of(&v).unwrap() <= ceiling);
    }
    assert!(list.height() <= 12);
}

#[test]
fn replace_keeps_order() {
    let mut list = fixed(4, 6);
    list.bulk_load(vec![10, 20, 30, 40], false).unwrap();
    assert_eq!(list.replace(&20, 35), Ok(20));
    assert_eq!(contents(&list), vec![10, 30, 35, 40]);
    assert_eq!(list.replace(&20, 36), Err(SkipListError::ValueNotFound));
    assert_eq!(list.replace(&10, 40), Err(SkipListError::DuplicateValue));
    assert_eq!(contents(&list), vec![10, 30, 35, 40]);
}

#[test]
fn strings_are_ordered_lexicographically() {
    let mut list: SkipList<String> = SkipList::new();
    for word in ["pear", "apple", "fig", "banana"].iter() {
        list.insert(word.to_string()).unwrap();
    }
    assert_eq!(
        list.iter().map(|s| &s[..]).collect::<Vec<_>>(),
        vec!["apple", "banana", "fig", "pear"]
    );
    assert_eq!(list.find(&"fig".to_owned()).map(|s| &s[..]), Some("fig"));
}

#[test]
fn floats_reject_nan() {
    let mut list: SkipList<f64> = SkipList::new();
    list.insert(0.25).unwrap();
    assert_eq!(list.insert(f64::NAN), Err(SkipListError::Incomparable));
    assert_eq!(list.count(), 1);
}

#[test]
fn clear_then_reuse() {
    let mut list = fixed(4, 7);
    list.bulk_load(0..50, false).unwrap();
    list.clear();
    assert!(list.is_empty());
    list.insert(7).unwrap();
    assert_eq!(contents(&list), vec![7]);
}

#[test]
fn display_and_equality() {
    let mut a = fixed(4, 8);
    let mut b = fixed(2, 9);
    a.bulk_load(vec![3, 1, 2], false).unwrap();
    b.bulk_load(vec![1, 2, 3], true).unwrap();
    assert_eq!(format!("{}", a), "[1, 2, 3]");
    assert_eq!(a, b);
    b.delete(&2).unwrap();
    assert!(a != b);
}
