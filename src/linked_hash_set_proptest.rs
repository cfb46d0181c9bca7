#![cfg(test)]

// Property tests for LinkedHashSet kept inside the crate so they can run
// the structural layer's invariant checker after every operation.

use crate::{AddError, LinkedHashSet, RemoveError, MIN_BUCKETS};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::hash::{BuildHasher, Hasher};

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// keys, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Add(usize),
    Remove(usize),
    Contains(usize),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            idx.clone().prop_map(OpI::Add),
            idx.clone().prop_map(OpI::Remove),
            idx.clone().prop_map(OpI::Contains),
            Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// State-machine equivalence against an ordered Vec model. Invariants
// exercised across random operation sequences:
// - Duplicate adds are rejected; successful adds append to the order.
// - `remove` returns the owned key, errors distinguish empty from absent,
//   and failures leave the set untouched.
// - Iteration parity: content AND order equal the model after every op,
//   regardless of how many resizes the sequence triggered.
// - `len`/`is_empty` parity, the bucket floor, `load_factor` consistency,
//   and the structural invariants hold after every op.
fn run_state_machine<S: BuildHasher>(
    pool: &[String],
    ops: Vec<OpI>,
    mut sut: LinkedHashSet<String, S>,
) -> Result<(), TestCaseError> {
    let mut model: Vec<String> = Vec::new();

    for op in ops {
        match op {
            OpI::Add(i) => {
                let k = pool[i].clone();
                let already = model.contains(&k);
                match sut.add(k.clone()) {
                    Ok(()) => {
                        prop_assert!(!already, "add must fail on duplicate");
                        model.push(k);
                    }
                    Err(AddError::DuplicateKey) => {
                        prop_assert!(already, "duplicate error only when key exists");
                    }
                }
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                let pos = model.iter().position(|m| m == k);
                match sut.remove(k.as_str()) {
                    Ok(returned) => {
                        prop_assert_eq!(&returned, k);
                        let p = pos.expect("removal succeeds only when the model holds the key");
                        model.remove(p);
                    }
                    Err(RemoveError::EmptyTable) => prop_assert!(model.is_empty()),
                    Err(RemoveError::KeyNotFound) => {
                        prop_assert!(!model.is_empty() && pos.is_none());
                    }
                }
            }
            OpI::Contains(i) => {
                prop_assert_eq!(sut.contains(pool[i].as_str()), model.contains(&pool[i]));
            }
            OpI::Iterate => {
                let got: Vec<&String> = sut.iter().collect();
                let want: Vec<&String> = model.iter().collect();
                prop_assert_eq!(got, want);
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.capacity() >= MIN_BUCKETS);
        prop_assert_eq!(sut.load_factor(), sut.len() as f64 / sut.capacity() as f64);
        sut.check_invariants();
    }

    // Final order parity
    let got: Vec<String> = sut.iter().cloned().collect();
    prop_assert_eq!(got, model);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        // A tight load limit over the floor bucket count so that realistic
        // op sequences cross both the doubling and the halving thresholds.
        let sut = LinkedHashSet::with_buckets_and_load_limit(MIN_BUCKETS, 0.6);
        run_state_machine(&pool, ops, sut)?;
    }
}

// Collision variant using a constant hasher to stress chain walking: every
// element lands in one bucket, so probing and unlinking always traverse a
// multi-node chain.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
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
        let sut = LinkedHashSet::with_buckets_load_limit_and_hasher(
            MIN_BUCKETS,
            0.6,
            ConstBuildHasher,
        );
        run_state_machine(&pool, ops, sut)?;
    }
}
