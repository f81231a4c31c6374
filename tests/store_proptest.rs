// Property tests for the hash-indexed containers, each checked against a
// small ordered model after every operation.
//
// HashMap: a Vec of (key, value, binding time) in slot order.
//  - Rebinding a key keeps its slot and refreshes its binding time.
//  - key_of / last_key_of pick the earliest / latest binding of a value.
//  - remove(value) drops the latest binding.
//
// HashStore: a Vec of (key, value) pairs with no repeated value.
//  - set(k, v) evicts any other key holding v, then binds k in place.
//
// UniqueStore: a Vec of distinct values in insertion order.
use guarded_collections::{HashMap, HashStore, TypeSpec, UniqueStore, Value};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Set(u8, i64),
    RemoveKey(u8),
    RemoveValue(i64),
    KeyOf(i64),
    Get(u8),
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let k = 0u8..6;
    let v = 0i64..4;
    let op = prop_oneof![
        3 => (k.clone(), v.clone()).prop_map(|(k, v)| Op::Set(k, v)),
        1 => k.clone().prop_map(Op::RemoveKey),
        1 => v.clone().prop_map(Op::RemoveValue),
        1 => v.prop_map(Op::KeyOf),
        1 => k.prop_map(Op::Get),
    ];
    proptest::collection::vec(op, 1..80)
}

fn key(k: u8) -> Value {
    Value::from(format!("k{}", k))
}

fn pairs(entries: impl Iterator<Item = (Value, i64)>) -> Vec<(Value, Value)> {
    entries.map(|(k, v)| (k, Value::Int(v))).collect()
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_hash_map_matches_model(ops in arb_ops()) {
        let mut sut: HashMap = HashMap::new(TypeSpec::Int);
        let mut model: Vec<(Value, i64, u64)> = Vec::new();
        let mut clock = 0u64;

        for op in ops {
            match op {
                Op::Set(k, v) => {
                    sut.set(key(k), Value::Int(v)).unwrap();
                    clock += 1;
                    match model.iter_mut().find(|(mk, _, _)| *mk == key(k)) {
                        Some(entry) => {
                            entry.1 = v;
                            entry.2 = clock;
                        }
                        None => model.push((key(k), v, clock)),
                    }
                }
                Op::RemoveKey(k) => {
                    let removed = sut.remove_key(&key(k)).unwrap();
                    let before = model.len();
                    model.retain(|(mk, _, _)| *mk != key(k));
                    prop_assert_eq!(removed, model.len() < before);
                }
                Op::RemoveValue(v) => {
                    let removed = sut.remove(&Value::Int(v)).unwrap();
                    let latest = model
                        .iter()
                        .enumerate()
                        .filter(|(_, (_, mv, _))| *mv == v)
                        .max_by_key(|(_, (_, _, at))| *at)
                        .map(|(i, _)| i);
                    prop_assert_eq!(removed, latest.is_some());
                    if let Some(i) = latest {
                        model.remove(i);
                    }
                }
                Op::KeyOf(v) => {
                    let bound = model.iter().filter(|(_, mv, _)| *mv == v);
                    let first = bound.clone().min_by_key(|(_, _, at)| *at).map(|(k, _, _)| k);
                    let last = bound.max_by_key(|(_, _, at)| *at).map(|(k, _, _)| k);
                    prop_assert_eq!(sut.key_of(&Value::Int(v)).unwrap(), first);
                    prop_assert_eq!(sut.last_key_of(&Value::Int(v)).unwrap(), last);
                    prop_assert_eq!(sut.contains(&Value::Int(v)).unwrap(), first.is_some());
                }
                Op::Get(k) => {
                    let expected = model
                        .iter()
                        .find(|(mk, _, _)| *mk == key(k))
                        .map(|(_, v, _)| Value::Int(*v));
                    prop_assert_eq!(sut.get(&key(k)).unwrap().cloned(), expected);
                }
            }

            let expected = pairs(model.iter().map(|(k, v, _)| (k.clone(), *v)));
            prop_assert_eq!(sut.to_array().unwrap(), expected);
            prop_assert_eq!(sut.len(), model.len());
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_hash_store_matches_model(ops in arb_ops()) {
        let mut sut: HashStore = HashStore::new(TypeSpec::Int);
        let mut model: Vec<(Value, i64)> = Vec::new();

        for op in ops {
            match op {
                Op::Set(k, v) => {
                    sut.set(key(k), Value::Int(v)).unwrap();
                    model.retain(|(mk, mv)| *mv != v || *mk == key(k));
                    match model.iter_mut().find(|(mk, _)| *mk == key(k)) {
                        Some(entry) => entry.1 = v,
                        None => model.push((key(k), v)),
                    }
                }
                Op::RemoveKey(k) => {
                    let removed = sut.remove_key(&key(k)).unwrap();
                    let before = model.len();
                    model.retain(|(mk, _)| *mk != key(k));
                    prop_assert_eq!(removed, model.len() < before);
                }
                Op::RemoveValue(v) => {
                    let removed = sut.remove(&Value::Int(v)).unwrap();
                    let before = model.len();
                    model.retain(|(_, mv)| *mv != v);
                    prop_assert_eq!(removed, model.len() < before);
                }
                Op::KeyOf(v) => {
                    let expected = model.iter().find(|(_, mv)| *mv == v).map(|(k, _)| k);
                    prop_assert_eq!(sut.key_of(&Value::Int(v)).unwrap(), expected);
                    prop_assert_eq!(sut.last_key_of(&Value::Int(v)).unwrap(), expected);
                }
                Op::Get(k) => {
                    let expected = model
                        .iter()
                        .find(|(mk, _)| *mk == key(k))
                        .map(|(_, v)| Value::Int(*v));
                    prop_assert_eq!(sut.get(&key(k)).unwrap().cloned(), expected);
                }
            }

            let expected = pairs(model.iter().cloned());
            prop_assert_eq!(sut.to_array().unwrap(), expected);
            for (_, v) in &model {
                prop_assert_eq!(model.iter().filter(|(_, mv)| mv == v).count(), 1);
            }
        }
    }
}

proptest! {
    #[test]
    fn prop_unique_store_matches_model(values in proptest::collection::vec(0i64..8, 0..40), drops in proptest::collection::vec(0i64..8, 0..10)) {
        let mut sut: UniqueStore = UniqueStore::new(TypeSpec::Int);
        let mut model: Vec<i64> = Vec::new();

        for v in values {
            let added = sut.add(Value::Int(v)).unwrap();
            prop_assert_eq!(added, !model.contains(&v));
            if added {
                model.push(v);
            }
        }
        for v in drops {
            let removed = sut.remove(&Value::Int(v)).unwrap();
            prop_assert_eq!(removed, model.contains(&v));
            model.retain(|&m| m != v);
        }
        let expected: Vec<Value> = model.iter().copied().map(Value::Int).collect();
        prop_assert_eq!(sut.to_array(), expected);
        prop_assert_eq!(sut.len(), model.len());
    }
}
