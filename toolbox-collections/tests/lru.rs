use proptest::prelude::*;
use std::collections::VecDeque;
use toolbox_collections::error::{DuplicateKey, KeyNotFound};
use toolbox_collections::{ConfigError, LruCache};

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn zero_capacity_is_rejected() {
    let err = LruCache::<u8, u8>::new(0).unwrap_err();
    assert_eq!(err, ConfigError::ZeroCapacity);
    assert_eq!(err.to_string(), "capacity must be at least 1");
}

#[test]
fn touched_key_outlives_untouched() {
    let mut cache = LruCache::new(2).unwrap();
    cache.try_insert("a", 1).unwrap();
    cache.try_insert("b", 2).unwrap();
    assert_eq!(cache.get("a"), Some(&1));
    cache.try_insert("c", 3).unwrap();

    assert!(!cache.contains_key("b"));
    assert!(cache.contains_key("a"));
    assert!(cache.contains_key("c"));
}

#[test]
fn first_added_is_first_evicted() {
    let capacity = 5;
    let mut cache = LruCache::new(capacity).unwrap();
    for k in 0..capacity {
        cache.try_insert(k, ()).unwrap();
    }
    cache.try_insert(capacity, ()).unwrap();

    assert!(!cache.contains_key(&0));
    assert!((1..=capacity).all(|k| cache.contains_key(&k)));
}

#[test]
fn get_on_oldest_evicts_second_oldest() {
    let capacity = 4;
    let mut cache = LruCache::new(capacity).unwrap();
    for k in 0..capacity {
        cache.set(k, k);
    }
    cache.get(&0);
    cache.set(capacity, capacity);

    assert!(cache.contains_key(&0));
    assert!(!cache.contains_key(&1));
}

#[test]
fn indexer_style_errors() {
    let mut cache = LruCache::new(2).unwrap();
    assert_eq!(cache.fetch(&1), Err(KeyNotFound));

    cache.try_insert(1, "one").unwrap();
    assert_eq!(
        cache.try_insert(1, "uno"),
        Err(DuplicateKey {
            key: 1,
            value: "uno"
        })
    );
    assert_eq!(cache.fetch(&1), Ok(&"one"));

    assert_eq!(cache.set(1, "uno"), Some("one"));
    assert_eq!(cache.fetch(&1), Ok(&"uno"));
}

#[test]
fn enumeration_is_restartable() {
    let mut cache = LruCache::new(3).unwrap();
    cache.extend([('x', 1), ('y', 2), ('z', 3)]);
    cache.get(&'x');

    let first: Vec<char> = cache.keys().copied().collect();
    let second: Vec<char> = cache.keys().copied().collect();
    assert_eq!(first, vec!['y', 'z', 'x']);
    assert_eq!(first, second);
    assert_eq!(cache.peek_lru(), Some((&'y', &2)));
    assert_eq!(cache.peek_mru(), Some((&'x', &1)));
}

// =============================================================================
// Properties
// =============================================================================

#[derive(Debug, Clone)]
enum Op {
    Set(u8, u32),
    Get(u8),
    Peek(u8),
    Remove(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..24, any::<u32>()).prop_map(|(k, v)| Op::Set(k, v)),
        (0u8..24).prop_map(Op::Get),
        (0u8..24).prop_map(Op::Peek),
        (0u8..24).prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn matches_recency_model(
        capacity in 1usize..10,
        ops in prop::collection::vec(op_strategy(), 0..300)
    ) {
        let mut cache = LruCache::new(capacity).unwrap();
        // Front is least recently used.
        let mut model: VecDeque<(u8, u32)> = VecDeque::new();

        for op in ops {
            match op {
                Op::Set(k, v) => {
                    let old = cache.set(k, v);
                    let expected = match model.iter().position(|e| e.0 == k) {
                        Some(at) => model.remove(at).map(|e| e.1),
                        None => {
                            if model.len() == capacity {
                                model.pop_front();
                            }
                            None
                        }
                    };
                    model.push_back((k, v));
                    prop_assert_eq!(old, expected);
                }
                Op::Get(k) => {
                    let got = cache.get(&k).copied();
                    let expected = model.iter().position(|e| e.0 == k).map(|at| {
                        let entry = model.remove(at).unwrap();
                        model.push_back(entry);
                        entry.1
                    });
                    prop_assert_eq!(got, expected);
                }
                Op::Peek(k) => {
                    let expected = model.iter().find(|e| e.0 == k).map(|e| e.1);
                    prop_assert_eq!(cache.peek(&k).copied(), expected);
                }
                Op::Remove(k) => {
                    let expected = model
                        .iter()
                        .position(|e| e.0 == k)
                        .and_then(|at| model.remove(at))
                        .map(|e| e.1);
                    prop_assert_eq!(cache.remove(&k), expected);
                }
            }
            prop_assert!(cache.len() <= capacity);
            prop_assert_eq!(cache.len(), model.len());
        }

        let actual: Vec<(u8, u32)> = cache.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(actual, model.into_iter().collect::<Vec<_>>());
    }
}
