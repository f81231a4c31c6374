#![cfg(test)]

// Property tests for IdentityTable kept inside the crate so they do not
// require feature gates to access internal modules.

use crate::identity_table::{Handle, IdentityTable, InsertError};
use crate::value::Identity;
use proptest::prelude::*;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hasher};

// Pool-indexed operations to improve shrinking: indices shrink to earlier
// identities, pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i32),
    Upsert(usize, i32),
    Remove(usize),
    Find(usize),
    Iterate,
}

// Pool entries alternate between string and integer identities so both
// kinds share buckets under the colliding hasher.
fn identity_from(pool: &[String], i: usize) -> Identity {
    if i % 2 == 0 {
        Identity::Str(pool[i].clone())
    } else {
        Identity::Int(pool[i].len() as i64 * 31 + i as i64)
    }
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Upsert(i, v)),
            idx.clone().prop_map(Op::Remove),
            idx.clone().prop_map(Op::Find),
            Just(Op::Iterate),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Ordered model: identities in insertion order with their items.
#[derive(Default)]
struct Model {
    entries: Vec<(Identity, i32)>,
}

impl Model {
    fn position(&self, id: &Identity) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == id)
    }
}

fn run<S: BuildHasher>(
    mut sut: IdentityTable<i32, S>,
    pool: Vec<String>,
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let mut model = Model::default();
    let mut live: HashMap<Identity, Handle> = HashMap::new();
    let mut stale: Vec<Handle> = Vec::new();

    for op in ops {
        match op {
            Op::Insert(i, v) => {
                let id = identity_from(&pool, i);
                let already = model.position(&id).is_some();
                match sut.insert(id.clone(), v) {
                    Ok(h) => {
                        prop_assert!(!already, "insert must fail on duplicate");
                        prop_assert!(live.insert(id.clone(), h).is_none());
                        model.entries.push((id, v));
                    }
                    Err(InsertError::DuplicateIdentity(h)) => {
                        prop_assert!(already, "duplicate error only when identity exists");
                        prop_assert_eq!(Some(&h), live.get(&id));
                    }
                }
            }
            Op::Upsert(i, v) => {
                let id = identity_from(&pool, i);
                let (h, prev) = sut.upsert(id.clone(), v);
                match model.position(&id) {
                    Some(p) => {
                        prop_assert_eq!(prev, Some(model.entries[p].1));
                        prop_assert_eq!(Some(&h), live.get(&id), "upsert keeps the handle");
                        model.entries[p].1 = v;
                    }
                    None => {
                        prop_assert_eq!(prev, None);
                        live.insert(id.clone(), h);
                        model.entries.push((id, v));
                    }
                }
            }
            Op::Remove(i) => {
                let id = identity_from(&pool, i);
                if let Some(h) = live.remove(&id) {
                    let (rid, item) = sut.remove(h).expect("live handle removes");
                    prop_assert_eq!(&rid, &id);
                    let p = model.position(&id).expect("present in model");
                    prop_assert_eq!(item, model.entries.remove(p).1);
                    stale.push(h);
                } else {
                    prop_assert!(sut.find(&id).is_none());
                }
            }
            Op::Find(i) => {
                let id = identity_from(&pool, i);
                let found = sut.find(&id);
                prop_assert_eq!(found.is_some(), model.position(&id).is_some());
                prop_assert_eq!(found.is_some(), sut.contains(&id));
                if let Some(h) = found {
                    prop_assert_eq!(Some(&h), live.get(&id));
                    prop_assert_eq!(sut.identity(h), Some(&id));
                }
            }
            Op::Iterate => {
                let seen: Vec<(Identity, i32)> =
                    sut.iter().map(|(_, id, v)| (id.clone(), *v)).collect();
                prop_assert_eq!(&seen, &model.entries, "iteration follows insertion order");
            }
        }

        for &h in &stale {
            prop_assert!(sut.get(h).is_none());
        }
        prop_assert_eq!(sut.len(), model.entries.len());
        prop_assert_eq!(sut.is_empty(), model.entries.is_empty());
    }
    Ok(())
}

// Property: state-machine equivalence against an insertion-ordered model.
// - Duplicate identities are rejected with the live handle.
// - `upsert` replaces in place and keeps handle and position.
// - `remove(handle)` returns the owned `(Identity, T)` and invalidates the handle.
// - `iter` yields live entries exactly once, in insertion order.
// - Stale handles never resolve; `len`/`is_empty` parity after each op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run(IdentityTable::new(), pool, ops)?;
    }
}

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

// Property: the same invariants under worst-case collisions, stressing
// identity equality during probing.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run(IdentityTable::with_hasher(ConstBuildHasher), pool, ops)?;
    }
}
