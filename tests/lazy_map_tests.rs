//! Scenario tests for LazyMap.
//!
//! These tests walk through copy, fork, detach and iteration sequences and
//! check both the logical content and the resulting layer depth.

use lazymap::{KeyNotFoundError, LazyMap};
use rstest::rstest;
use std::cell::Cell;
use std::collections::{BTreeSet, HashSet};
use std::rc::Rc;

fn keys(map: &LazyMap<i32, i32>) -> HashSet<i32> {
    map.keys().copied().collect()
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// =============================================================================
// Basic operations
// =============================================================================

#[rstest]
fn test_basic_operations() {
    let mut map = LazyMap::from([(1, 10), (2, 20), (3, 30)]);
    assert_eq!(map.len(), 3);

    assert!(map.insert(4, 40));
    assert_eq!(map.len(), 4);
    assert_eq!(map.at(&4), Ok(&40));

    map.insert_or_assign(3, 50);
    assert_eq!(map.at(&3), Ok(&50));
    assert_eq!(map.len(), 4);

    assert!(map.contains_key(&1));
    map.erase(&1);
    assert!(!map.contains_key(&1));
    assert_eq!(map.len(), 3);

    assert!(map.contains_key(&2));
    map.clear();
    assert!(!map.contains_key(&2));
    assert_eq!(map.len(), 0);

    map.insert(10, 20 + 30);
    assert_eq!(map.len(), 1);
    assert_eq!(map.find(&10), Some((&10, &50)));
}

#[rstest]
fn test_insert_keeps_existing_value() {
    let mut map = LazyMap::from([(1, 10)]);
    assert!(!map.insert(1, 11));
    assert_eq!(map.at(&1), Ok(&10));
    assert_eq!(map.len(), 1);
}

#[rstest]
fn test_erase_absent_key_is_noop() {
    let original = LazyMap::from([(1, 10)]);
    let mut copy = original.clone();

    assert!(!copy.erase(&2));
    assert!(copy.ptr_eq(&original));
    assert_eq!(copy.depth(), 0);
}

#[rstest]
fn test_at_on_missing_key() {
    let map: LazyMap<i32, i32> = LazyMap::new();
    assert_eq!(map.at(&1), Err(KeyNotFoundError));
    assert_eq!(map.find(&1), None);
}

#[rstest]
fn test_string_keys_borrowed_lookup() {
    let mut map = LazyMap::from([("alpha".to_string(), 1), ("beta".to_string(), 2)]);
    let copy = map.clone();

    assert!(map.erase("alpha"));
    assert_eq!(map.get("alpha"), None);
    assert_eq!(copy.get("alpha"), Some(&1));
    assert_eq!(map.at("beta"), Ok(&2));
}

// =============================================================================
// Value semantics
// =============================================================================

#[rstest]
fn test_preserve_value_semantics() {
    let mut first = LazyMap::from([(1, 10), (2, 20), (3, 30)]);
    let mut second = first.clone();
    assert_eq!(second.len(), 3);

    second.insert(4, 40);
    assert_eq!(second.len(), 4);
    assert_eq!(second.at(&4), Ok(&40));
    assert_eq!(first.len(), 3);
    assert!(!first.contains_key(&4));

    first.insert_or_assign(3, 50);
    assert_eq!(first.at(&3), Ok(&50));
    assert_eq!(first.len(), 3);
    assert_eq!(second.at(&3), Ok(&30));
    assert_eq!(second.len(), 4);

    let mut third = second.clone();
    assert_eq!(third.len(), 4);
    assert_eq!(third.at(&1), Ok(&10));
    assert!(third.contains_key(&4));
    assert!(!third.contains_key(&5));

    third.erase(&1);
    assert!(!third.contains_key(&1));
    assert!(first.contains_key(&1));
    assert!(second.contains_key(&1));
    assert_eq!(third.len(), 3);
    assert_eq!(first.len(), 3);
    assert_eq!(second.len(), 4);

    third.clear();
    assert_eq!(third.len(), 0);
    assert_eq!(first.len(), 3);
    assert_eq!(second.len(), 4);
}

#[rstest]
fn test_clear_isolation() {
    let original = LazyMap::from([(1, 10), (2, 20), (3, 30)]);
    let mut second = original.clone();
    second.insert(4, 40);

    let mut third = second.clone();
    third.clear();

    assert_eq!(third.len(), 0);
    assert_eq!(second.len(), 4);
    assert_eq!(keys(&second), HashSet::from([1, 2, 3, 4]));
}

#[rstest]
fn test_copy_reports_same_depth_and_keys() {
    let base = LazyMap::from([(1, 10)]);
    let mut layered = base.clone();
    layered.insert(2, 20);

    let copy = layered.clone();
    assert_eq!(copy.depth(), layered.depth());
    assert_eq!(keys(&copy), keys(&layered));
    assert!(copy.ptr_eq(&layered));
}

// =============================================================================
// Detach
// =============================================================================

#[rstest]
fn test_detachment() {
    init_logger();

    let first = LazyMap::from([(1, 10), (2, 20), (3, 30)]);
    let mut second = first.clone();
    second.insert(4, 40);
    let mut third = second.clone();
    third.insert(5, 50);
    third.erase(&3);

    assert_eq!(keys(&second), HashSet::from([1, 2, 3, 4]));
    assert_eq!(keys(&third), HashSet::from([1, 2, 4, 5]));

    assert!(second.detach());
    assert!(!second.detach());
    assert!(second.is_detached());
    assert!(third.detach());

    let mut fourth = third.clone();
    fourth.insert(6, 60);
    assert!(fourth.detach());

    assert_eq!(keys(&third), HashSet::from([1, 2, 4, 5]));
    assert_eq!(keys(&fourth), HashSet::from([1, 2, 4, 5, 6]));
    assert_eq!(first.len(), 3);
}

#[rstest]
fn test_detach_on_root_is_noop() {
    let mut map = LazyMap::from([(1, 10)]);
    assert!(map.is_detached());
    assert!(!map.detach());
    assert_eq!(map.depth(), 0);
}

#[rstest]
fn test_detach_bounds_long_chain() {
    init_logger();

    let mut map: LazyMap<i32, i32> = LazyMap::new();
    let mut snapshots = Vec::new();
    for index in 0..64 {
        snapshots.push(map.clone());
        map.insert(index, index * 10);
    }
    assert_eq!(map.depth(), 64);

    assert!(map.detach());
    assert_eq!(map.depth(), 0);
    assert_eq!(map.len(), 64);
    assert_eq!(map.at(&63), Ok(&630));

    for (length, snapshot) in snapshots.iter().enumerate() {
        assert_eq!(snapshot.len(), length);
    }
}

// =============================================================================
// Iteration
// =============================================================================

#[rstest]
fn test_iteration_and_depth() {
    let mut first = LazyMap::from([(1, 10), (2, 20), (3, 30)]);
    let mut second = first.clone();
    second.insert(4, 40);
    second.detach();

    let entries: BTreeSet<(i32, i32)> = second.iter().map(|(key, value)| (*key, *value)).collect();
    assert_eq!(
        entries,
        BTreeSet::from([(1, 10), (2, 20), (3, 30), (4, 40)])
    );
    assert!(!second.detach());
    assert!(!first.detach());

    let third = second.clone();
    second.insert(5, 50);
    let differences: HashSet<i32> = second.iter().map(|(key, value)| value - key).collect();
    assert_eq!(differences, HashSet::from([9, 18, 27, 36, 45]));

    let mut fourth = third.clone();
    fourth.erase(&3);
    fourth.insert_or_assign(2, 21);
    assert_eq!(keys(&fourth), HashSet::from([4, 1, 2]));

    let mut fifth = fourth.clone();
    fifth.clear();
    assert_eq!(keys(&fourth).len(), 3);

    fifth = fourth.clone();
    fifth.insert(12, 33);
    assert_eq!(keys(&fifth), HashSet::from([4, 1, 2, 12]));
    fifth.erase(&12);

    let mut sixth = fifth.clone();
    assert_eq!(sixth.depth(), 2);
    sixth.insert(13, 33);
    assert_eq!(keys(&sixth), HashSet::from([4, 1, 2, 13]));
    assert_eq!(sixth.depth(), 3);

    let mut seventh = LazyMap::from([(1, 10)]);
    let eighth = seventh.clone();
    seventh.erase(&1);
    assert_eq!(keys(&seventh), HashSet::new());
    assert_eq!(keys(&eighth), HashSet::from([1]));
}

#[rstest]
fn test_iteration_is_restartable() {
    let base = LazyMap::from([(1, 10), (2, 20)]);
    let mut map = base.clone();
    map.insert(3, 30);

    let first_pass: HashSet<_> = map.iter().collect();
    let second_pass: HashSet<_> = (&map).into_iter().collect();
    assert_eq!(first_pass, second_pass);
    assert_eq!(first_pass.len(), 3);
}

#[rstest]
fn test_extend_assigns_in_order() {
    let base = LazyMap::from([(1, 10)]);
    let mut map = base.clone();
    map.extend([(1, 11), (2, 20), (2, 21)]);

    assert_eq!(map.at(&1), Ok(&11));
    assert_eq!(map.at(&2), Ok(&21));
    assert_eq!(map.len(), 2);
    assert_eq!(map.depth(), 1);
    assert_eq!(base.at(&1), Ok(&10));
}

// =============================================================================
// Value construction
// =============================================================================

/// Counts how many times values are cloned.
#[derive(Debug)]
struct CloneCounter {
    clones: Rc<Cell<usize>>,
}

impl Clone for CloneCounter {
    fn clone(&self) -> Self {
        self.clones.set(self.clones.get() + 1);
        Self {
            clones: Rc::clone(&self.clones),
        }
    }
}

#[rstest]
fn test_writes_never_clone_values() {
    let clones = Rc::new(Cell::new(0));
    let counter = || CloneCounter {
        clones: Rc::clone(&clones),
    };

    let mut map = LazyMap::new();
    map.insert(10, counter());
    map.emplace(20, counter);
    map.insert_or_assign(10, counter());

    let mut copy = map.clone();
    copy.insert_or_assign(30, counter());
    copy.erase(&10);

    assert_eq!(clones.get(), 0);
    assert_eq!(map.len(), 2);
    assert_eq!(copy.len(), 2);
}

#[rstest]
fn test_emplace_constructs_only_when_absent() {
    let constructed = Cell::new(0);
    let mut map = LazyMap::from([(1, 10)]);
    let copy = map.clone();

    assert!(!map.emplace(1, || {
        constructed.set(constructed.get() + 1);
        11
    }));
    assert_eq!(constructed.get(), 0);
    assert!(map.ptr_eq(&copy));

    assert!(map.emplace(2, || {
        constructed.set(constructed.get() + 1);
        20
    }));
    assert_eq!(constructed.get(), 1);
    assert_eq!(copy.len(), 1);
}

#[rstest]
fn test_detach_clones_each_live_value_once() {
    let clones = Rc::new(Cell::new(0));
    let counter = || CloneCounter {
        clones: Rc::clone(&clones),
    };

    let base = LazyMap::from([(1, counter()), (2, counter())]);
    let mut copy = base.clone();
    copy.insert_or_assign(1, counter());
    copy.erase(&2);

    assert!(copy.detach());
    assert_eq!(clones.get(), 1);
}
