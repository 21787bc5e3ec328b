#![cfg(test)]

// Property tests for ChainMap kept inside the crate so they can assert
// structural invariants (capacity, load factor) alongside model parity.

use crate::chain_map::{ChainMap, MAX_LOAD_FACTOR, MIN_CAPACITY};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hasher;

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    ContainsValue(i32),
    Mutate(usize, i32),
    Clear,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            8 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            4 => idx.clone().prop_map(OpI::Remove),
            4 => idx.clone().prop_map(OpI::Get),
            2 => prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            2 => any::<i32>().prop_map(OpI::ContainsValue),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run_scenario<S>(sut: &mut ChainMap<Key, i32, S>, pool: &[String], ops: Vec<OpI>) -> Result<(), TestCaseError>
where
    S: std::hash::BuildHasher,
{
    let mut model: HashMap<Key, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Insert(i, v) => {
                let k = key_from(pool, i);
                let previous = sut.insert(k.clone(), v);
                let model_previous = model.insert(k, v);
                prop_assert_eq!(previous, model_previous, "replace must return prior value");
            }
            OpI::Remove(i) => {
                let k = key_from(pool, i);
                let removed = sut.remove(&k);
                let model_removed = model.remove(&k);
                prop_assert_eq!(removed, model_removed);
            }
            OpI::Get(i) => {
                let k = key_from(pool, i);
                prop_assert_eq!(sut.get(&k), model.get(&k));
            }
            OpI::Contains(s) => {
                // Borrowed lookup: query with &str against Key storage.
                let has = sut.contains_key(s.as_str());
                let has_model = model.keys().any(|k| k.0 == s);
                prop_assert_eq!(has, has_model);
            }
            OpI::ContainsValue(v) => {
                let has = sut.contains_value(&v);
                let has_model = model.values().any(|&mv| mv == v);
                prop_assert_eq!(has, has_model);
            }
            OpI::Mutate(i, d) => {
                let k = key_from(pool, i);
                match (sut.get_mut(&k), model.get_mut(&k)) {
                    (Some(sv), Some(mv)) => {
                        *sv = sv.saturating_add(d);
                        *mv = mv.saturating_add(d);
                    }
                    (None, None) => {}
                    _ => prop_assert!(false, "get_mut presence must match the model"),
                }
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
            }
        }

        // Structural invariants after each op.
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.capacity().is_power_of_two());
        prop_assert!(sut.capacity() >= MIN_CAPACITY);
        prop_assert!(sut.load_factor() <= MAX_LOAD_FACTOR);
    }

    // Final sweep: every model key resolves to the model value.
    for (k, v) in &model {
        prop_assert_eq!(sut.get(k), Some(v));
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - insert returns the replaced value exactly when the model does;
// - remove/get/contains_key/contains_value parity with the model;
// - len/is_empty parity, capacity a power of two, load factor bounded.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: ChainMap<Key, i32> = ChainMap::new();
        run_scenario(&mut sut, &pool, ops)?;
    }
}

// Collision variant using a constant hasher to chain every key into one
// bucket, stressing intra-bucket scans and shrink-heavy rehashing.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl std::hash::BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let mut sut: ChainMap<Key, i32, ConstBuildHasher> =
            ChainMap::with_hasher(ConstBuildHasher);
        run_scenario(&mut sut, &pool, ops)?;
    }
}
