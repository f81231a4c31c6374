use guarded_collections::{
    ArrayList, Collection, CollectionError, Deque, LinkedList, Queue, SequentialList, TypeSpec,
    Value,
};

fn ints(list: &LinkedList) -> Vec<i64> {
    list.iter().filter_map(Value::as_int).collect()
}

#[test]
fn deque_operations_at_both_ends() {
    let mut list: LinkedList = LinkedList::new(TypeSpec::Int);
    for i in 0..3 {
        list.add_last(Value::Int(i)).unwrap();
        list.add_first(Value::Int(-i - 1)).unwrap();
    }
    assert_eq!(ints(&list), vec![-3, -2, -1, 0, 1, 2]);
    assert_eq!(list.remove_first(), Some(Value::Int(-3)));
    assert_eq!(list.remove_last(), Some(Value::Int(2)));
    assert_eq!(list.get_first(), Some(&Value::Int(-2)));
    assert_eq!(list.get_last(), Some(&Value::Int(1)));
    assert_eq!(list.len(), 4);
}

#[test]
fn empty_reads_are_absent_not_errors() {
    let mut list: LinkedList = LinkedList::new(TypeSpec::String);
    assert!(list.get_first().is_none());
    assert!(list.get_last().is_none());
    assert!(list.remove_first().is_none());
    assert!(list.remove_last().is_none());
}

#[test]
fn positional_surface_is_shared_with_array_list() {
    let mut list =
        LinkedList::from_values(TypeSpec::String, ["A", "B", "C"].map(Value::from)).unwrap();
    list.add(1, Value::from("D")).unwrap();
    assert_eq!(
        list.to_array(),
        ["A", "D", "B", "C"].map(Value::from).to_vec()
    );
    assert!(matches!(
        list.add(10, Value::from("X")),
        Err(CollectionError::OutOfRange { .. })
    ));

    let range: LinkedList = SequentialList::get_range(&list, 0, 1).unwrap();
    assert_eq!(range.to_array(), ["A", "D"].map(Value::from).to_vec());

    let inner: ArrayList = list.clone().into_inner();
    assert_eq!(inner.to_array(), list.to_array());
    assert_eq!(LinkedList::from(inner), list);
}

#[test]
fn deque_is_usable_generically() {
    fn rotate<D: Deque<Value>>(d: &mut D) {
        if let Some(v) = d.remove_last() {
            d.add_first(v).unwrap();
        }
    }
    fn peek<Q: Queue<Value>>(q: &Q) -> Option<Value> {
        q.get_first().cloned()
    }

    let mut list = LinkedList::from_values(TypeSpec::Int, (1..=3).map(Value::Int)).unwrap();
    rotate(&mut list);
    assert_eq!(peek(&list), Some(Value::Int(3)));
    assert_eq!(ints(&list), vec![3, 1, 2]);
}

#[test]
fn type_redeclaration_needs_an_empty_list() {
    let mut list: LinkedList = LinkedList::new(TypeSpec::Int);
    list.add_last(Value::Int(1)).unwrap();
    assert!(matches!(
        Collection::set_value_type(&mut list, TypeSpec::Float),
        Err(CollectionError::StateConflict { .. })
    ));
    Collection::clear(&mut list);
    Collection::set_value_type(&mut list, TypeSpec::Float).unwrap();
    list.add_last(Value::Float(0.5)).unwrap();
    assert_eq!(Collection::value_type(&list), &TypeSpec::Float);
}

mod without_list_traits {
    use guarded_collections::{LinkedList, TypeSpec, Value};
    use std::ops::ControlFlow;

    #[test]
    fn range_and_walks_stay_linked_lists() {
        let list = LinkedList::from_values(TypeSpec::Int, (0..5).map(Value::Int)).unwrap();

        let mut range: LinkedList = list.get_range(1, 3).unwrap();
        assert_eq!(range.remove_first(), Some(Value::Int(1)));
        assert_eq!(range.get_last(), Some(&Value::Int(3)));

        let mut forward = Vec::new();
        list.each(|v, i, l: &LinkedList| {
            assert_eq!(l.get_first(), Some(&Value::Int(0)));
            assert_eq!(l.get(i).unwrap(), v);
            forward.push(i);
            if i == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(forward, vec![0, 1, 2]);

        let mut backward = Vec::new();
        list.reverse_each(|_, i, l: &LinkedList| {
            assert_eq!(l.get_last(), Some(&Value::Int(4)));
            backward.push(i);
            ControlFlow::Continue(())
        });
        assert_eq!(backward, vec![4, 3, 2, 1, 0]);
    }
}
