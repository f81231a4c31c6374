use guarded_collections::{
    Collection, CollectionError, GuardOptions, Set, TypeSpec, UniqueStore, Value,
};
use std::collections::hash_map::DefaultHasher;
use std::hash::BuildHasherDefault;
use std::ops::ControlFlow;

#[test]
fn adding_twice_counts_once() {
    let mut set: UniqueStore = UniqueStore::new(TypeSpec::Int);
    assert!(set.add(Value::Int(7)).unwrap());
    assert!(!set.add(Value::Int(7)).unwrap());
    assert_eq!(set.len(), 1);
}

#[test]
fn arrays_are_identified_by_content() {
    let mut set: UniqueStore = UniqueStore::new(TypeSpec::Array);
    let a = Value::Array(vec![Value::Int(1), Value::from("x")]);
    let same = Value::Array(vec![Value::Int(1), Value::from("x")]);
    let other = Value::Array(vec![Value::from("x"), Value::Int(1)]);
    assert!(set.add(a).unwrap());
    assert!(!set.add(same).unwrap());
    assert!(set.add(other).unwrap());
    assert_eq!(set.len(), 2);
}

#[test]
fn callables_are_identified_by_reference() {
    let mut set: UniqueStore = UniqueStore::new(TypeSpec::Callable);
    let f = Value::callable(|_| Value::Null);
    assert!(set.add(f.clone()).unwrap());
    assert!(!set.add(f.clone()).unwrap());
    assert!(set.add(Value::callable(|_| Value::Null)).unwrap());
    assert!(set.contains(&f).unwrap());
    assert_eq!(Set::identity_of(&set, &f), Set::identity_of(&set, &f.clone()));
}

#[test]
fn export_keeps_insertion_order() {
    let set = UniqueStore::from_values(
        TypeSpec::String,
        ["b", "a", "b", "c"].map(Value::from),
    )
    .unwrap();
    assert_eq!(set.to_array(), ["b", "a", "c"].map(Value::from).to_vec());
    assert_eq!(
        Collection::to_array(&set).unwrap(),
        ["b", "a", "c"].map(Value::from).to_vec()
    );
}

#[test]
fn each_can_stop_early() {
    let set = UniqueStore::from_values(TypeSpec::Int, (0..10).map(Value::Int)).unwrap();
    let mut visited = 0;
    set.each(|v, _| {
        visited += 1;
        if v == &Value::Int(4) {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    assert_eq!(visited, 5);
}

#[test]
fn float_set_distinguishes_bit_patterns() {
    let mut set: UniqueStore<f64> = UniqueStore::new(TypeSpec::Float);
    assert!(set.add(0.5).unwrap());
    assert!(!set.add(0.5).unwrap());
    assert!(set.add(1.5).unwrap());
    assert!(set.remove(&0.5).unwrap());
    assert_eq!(set.to_array(), vec![1.5]);
}

#[test]
fn custom_options_and_hasher() {
    let mut set: UniqueStore<Value, BuildHasherDefault<DefaultHasher>> = UniqueStore::with_options(
        TypeSpec::Int,
        GuardOptions::new("ids are integers", 7),
        BuildHasherDefault::default(),
    );
    assert!(set.add(Value::Int(1)).unwrap());
    assert!(!set.add(Value::Int(1)).unwrap());
    assert!(set.add(Value::Int(2)).unwrap());
    assert_eq!(set.to_array(), vec![Value::Int(1), Value::Int(2)]);

    match set.add(Value::from("3")) {
        Err(CollectionError::TypeMismatch { message, code, .. }) => {
            assert_eq!(message, "ids are integers");
            assert_eq!(code, 7);
        }
        other => panic!("expected a type mismatch, got {:?}", other),
    }
    assert_eq!(set.len(), 2);
}
