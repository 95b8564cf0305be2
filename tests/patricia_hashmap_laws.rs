//! Property-based tests for PatriciaHashMap.
//!
//! This module verifies that PatriciaHashMap satisfies various laws
//! and invariants using proptest.

use patmap::persistent::PatriciaHashMap;
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

// =============================================================================
// Strategy for generating test data
// =============================================================================

fn arbitrary_key() -> impl Strategy<Value = String> {
    "[a-z]{1,10}".prop_map(|s| s)
}

fn arbitrary_value() -> impl Strategy<Value = i32> {
    any::<i32>()
}

fn arbitrary_entry() -> impl Strategy<Value = (String, i32)> {
    (arbitrary_key(), arbitrary_value())
}

fn arbitrary_entries() -> impl Strategy<Value = Vec<(String, i32)>> {
    prop::collection::vec(arbitrary_entry(), 0..50)
}

// =============================================================================
// Get-Insert Law: map.insert(k, v).get(&k) == Some(&v)
// =============================================================================

proptest! {
    #[test]
    fn prop_get_insert_law(
        entries in arbitrary_entries(),
        key in arbitrary_key(),
        value in arbitrary_value()
    ) {
        let map: PatriciaHashMap<String, i32> = entries.into_iter().collect();
        let inserted = map.insert(key.clone(), value);

        prop_assert_eq!(inserted.get(&key), Some(&value));
    }
}

// =============================================================================
// Get-Insert-Other Law: k1 != k2 => map.insert(k1, v).get(&k2) == map.get(&k2)
// =============================================================================

proptest! {
    #[test]
    fn prop_get_insert_other_law(
        entries in arbitrary_entries(),
        key1 in arbitrary_key(),
        key2 in arbitrary_key(),
        value in arbitrary_value()
    ) {
        prop_assume!(key1 != key2);

        let map: PatriciaHashMap<String, i32> = entries.into_iter().collect();
        let inserted = map.insert(key1, value);

        prop_assert_eq!(inserted.get(&key2), map.get(&key2));
    }
}

// =============================================================================
// Remove-Get Law: map.remove(&k).get(&k) == None
// =============================================================================

proptest! {
    #[test]
    fn prop_remove_get_law(
        entries in arbitrary_entries(),
        key in arbitrary_key()
    ) {
        let map: PatriciaHashMap<String, i32> = entries.into_iter().collect();
        let removed = map.remove(&key);

        prop_assert_eq!(removed.get(&key), None);
    }
}

// =============================================================================
// Remove Idempotence: map.remove(&k).remove(&k) == map.remove(&k)
// =============================================================================

proptest! {
    #[test]
    fn prop_remove_idempotent(
        entries in arbitrary_entries(),
        key in arbitrary_key()
    ) {
        let map: PatriciaHashMap<String, i32> = entries.into_iter().collect();
        let removed_once = map.remove(&key);
        let removed_twice = removed_once.remove(&key);

        prop_assert_eq!(removed_once, removed_twice);
    }
}

// =============================================================================
// Remove-Insert Law: !map.contains_key(&k) => map.insert(k, v).remove(&k) == map
// =============================================================================

proptest! {
    #[test]
    fn prop_remove_insert_law(
        entries in arbitrary_entries(),
        key in arbitrary_key(),
        value in arbitrary_value()
    ) {
        let map: PatriciaHashMap<String, i32> = entries.into_iter().collect();

        // Only test when key doesn't exist
        if !map.contains_key(&key) {
            let inserted_then_removed = map.insert(key.clone(), value).remove(&key);

            prop_assert_eq!(inserted_then_removed, map);
        }
    }
}

// =============================================================================
// Length Laws
// =============================================================================

proptest! {
    #[test]
    fn prop_insert_length_law(
        entries in arbitrary_entries(),
        key in arbitrary_key(),
        value in arbitrary_value()
    ) {
        let map: PatriciaHashMap<String, i32> = entries.into_iter().collect();
        let expected = map.len() + usize::from(!map.contains_key(&key));

        prop_assert_eq!(map.insert(key, value).len(), expected);
    }

    #[test]
    fn prop_remove_length_law(
        entries in arbitrary_entries(),
        key in arbitrary_key()
    ) {
        let map: PatriciaHashMap<String, i32> = entries.into_iter().collect();
        let expected = map.len() - usize::from(map.contains_key(&key));

        prop_assert_eq!(map.remove(&key).len(), expected);
    }
}

// =============================================================================
// to_list Laws: no duplicate keys, length equals len
// =============================================================================

proptest! {
    #[test]
    fn prop_to_list_has_unique_keys_and_matches_len(
        entries in arbitrary_entries()
    ) {
        let map: PatriciaHashMap<String, i32> = entries.into_iter().collect();
        let listed = map.to_list();

        prop_assert_eq!(listed.len(), map.len());

        let unique_keys: HashSet<_> = listed.iter().map(|(key, _)| key.clone()).collect();
        prop_assert_eq!(unique_keys.len(), listed.len());
    }
}

// =============================================================================
// Model comparison against std::collections::HashMap
// =============================================================================

proptest! {
    #[test]
    fn prop_matches_std_hashmap_model(
        entries in arbitrary_entries(),
        removals in prop::collection::vec(arbitrary_key(), 0..20)
    ) {
        let mut model: HashMap<String, i32> = HashMap::new();
        let mut map: PatriciaHashMap<String, i32> = PatriciaHashMap::new();

        for (key, value) in entries {
            model.insert(key.clone(), value);
            map = map.insert(key, value);
        }
        for key in removals {
            model.remove(&key);
            map = map.remove(&key);
        }

        prop_assert_eq!(map.len(), model.len());
        for (key, value) in &model {
            prop_assert_eq!(map.get(key), Some(value));
        }
        for (key, value) in map.iter() {
            prop_assert_eq!(model.get(key), Some(value));
        }
    }
}
