//! Queue and Deque contracts, and `LinkedList`, the list that provides them.
//!
//! `LinkedList` wraps an `ArrayList`, whose ring buffer makes the head and
//! tail operations O(1). Range and walk operations are inherent so they hand
//! back a `LinkedList`; the remaining positional operations are reachable
//! through `Deref` to the wrapped list or through the `SequentialList` impl.

use crate::array_list::ArrayList;
use crate::collection::Collection;
use crate::error::Result;
use crate::sequential_list::{Position, SequentialList};
use crate::type_guard::{GuardOptions, TypeSpec};
use crate::value::{Element, Value};
use core::ops::{ControlFlow, Deref, DerefMut};
use std::collections::vec_deque;

/// First-in, first-out access.
pub trait Queue<V: Element>: Collection<V> {
    /// Front value, or `None` when empty.
    fn get_first(&self) -> Option<&V>;

    fn remove_first(&mut self) -> Option<V>;

    fn add_last(&mut self, value: V) -> Result<()>;
}

/// Access at both ends.
pub trait Deque<V: Element>: Queue<V> {
    fn get_last(&self) -> Option<&V>;

    fn remove_last(&mut self) -> Option<V>;

    fn add_first(&mut self, value: V) -> Result<()>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinkedList<V: Element = Value> {
    list: ArrayList<V>,
}

impl<V: Element> LinkedList<V> {
    pub fn new(value_type: TypeSpec) -> Self {
        Self {
            list: ArrayList::new(value_type),
        }
    }

    pub fn with_options(value_type: TypeSpec, options: GuardOptions) -> Self {
        Self {
            list: ArrayList::with_options(value_type, options),
        }
    }

    pub fn from_values<I>(value_type: TypeSpec, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
    {
        ArrayList::from_values(value_type, values).map(Self::from)
    }

    pub fn get_first(&self) -> Option<&V> {
        self.list.get(0).ok()
    }

    pub fn get_last(&self) -> Option<&V> {
        match self.list.len() {
            0 => None,
            n => self.list.get(n - 1).ok(),
        }
    }

    pub fn add_first(&mut self, value: V) -> Result<()> {
        self.list.add(0, value)
    }

    pub fn add_last(&mut self, value: V) -> Result<()> {
        self.list.push(value)
    }

    pub fn remove_first(&mut self) -> Option<V> {
        if self.list.is_empty() {
            return None;
        }
        self.list.remove_index(0).ok()
    }

    pub fn remove_last(&mut self) -> Option<V> {
        match self.list.len() {
            0 => None,
            n => self.list.remove_index(n - 1).ok(),
        }
    }

    /// Inclusive sub-sequence, still usable as a deque.
    pub fn get_range<I: Position, J: Position>(&self, from: I, to: J) -> Result<Self> {
        self.list.get_range(from, to).map(Self::from)
    }

    pub fn each<F>(&self, mut f: F)
    where
        F: FnMut(&V, usize, &Self) -> ControlFlow<()>,
    {
        self.list.each(|value, i, _| f(value, i, self))
    }

    pub fn reverse_each<F>(&self, mut f: F)
    where
        F: FnMut(&V, usize, &Self) -> ControlFlow<()>,
    {
        self.list.reverse_each(|value, i, _| f(value, i, self))
    }

    pub fn to_array(&self) -> Vec<V> {
        self.list.to_array()
    }

    pub fn into_inner(self) -> ArrayList<V> {
        self.list
    }
}

impl<V: Element> From<ArrayList<V>> for LinkedList<V> {
    fn from(list: ArrayList<V>) -> Self {
        Self { list }
    }
}

impl<V: Element> Deref for LinkedList<V> {
    type Target = ArrayList<V>;

    fn deref(&self) -> &ArrayList<V> {
        &self.list
    }
}

impl<V: Element> DerefMut for LinkedList<V> {
    fn deref_mut(&mut self) -> &mut ArrayList<V> {
        &mut self.list
    }
}

impl<V: Element> Collection<V> for LinkedList<V> {
    type Values<'a>
        = vec_deque::Iter<'a, V>
    where
        Self: 'a,
        V: 'a;
    type Exported = Vec<V>;

    fn value_type(&self) -> &TypeSpec {
        self.list.value_type()
    }

    fn set_value_type(&mut self, spec: TypeSpec) -> Result<()> {
        self.list.set_value_type(spec)
    }

    fn len(&self) -> usize {
        self.list.len()
    }

    fn clear(&mut self) {
        self.list.clear()
    }

    fn contains(&self, value: &V) -> Result<bool> {
        self.list.contains(value)
    }

    fn remove(&mut self, value: &V) -> Result<bool> {
        self.list.remove(value)
    }

    fn values(&self) -> Self::Values<'_> {
        self.list.iter()
    }

    fn to_array(&self) -> Result<Vec<V>> {
        Ok(self.list.to_array())
    }
}

impl<V: Element> SequentialList<V> for LinkedList<V> {
    fn get<I: Position>(&self, index: I) -> Result<&V> {
        self.list.get(index)
    }

    fn get_range<I: Position, J: Position>(&self, from: I, to: J) -> Result<Self> {
        LinkedList::get_range(self, from, to)
    }

    fn add<I: Position>(&mut self, index: I, value: V) -> Result<()> {
        self.list.add(index, value)
    }

    fn add_list<I, L>(&mut self, index: I, list: &L) -> Result<()>
    where
        I: Position,
        L: SequentialList<V> + ?Sized,
    {
        self.list.add_list(index, list)
    }

    fn set<I: Position>(&mut self, index: I, value: V) -> Result<V> {
        self.list.set(index, value)
    }

    fn merge<L>(&mut self, list: &L) -> Result<()>
    where
        L: SequentialList<V> + ?Sized,
    {
        self.list.merge(list)
    }

    fn index_of(&self, value: &V) -> Result<Option<usize>> {
        self.list.index_of(value)
    }

    fn last_index_of(&self, value: &V) -> Result<Option<usize>> {
        self.list.last_index_of(value)
    }

    fn contains_index<I: Position>(&self, index: I) -> Result<bool> {
        self.list.contains_index(index)
    }

    fn contains_range<I: Position, J: Position>(&self, from: I, to: J) -> Result<bool> {
        self.list.contains_range(from, to)
    }

    fn remove_index<I: Position>(&mut self, index: I) -> Result<V> {
        self.list.remove_index(index)
    }

    fn remove_range<I: Position, J: Position>(&mut self, from: I, to: J) -> Result<Vec<V>> {
        self.list.remove_range(from, to)
    }

    fn reverse_each<F>(&self, f: F)
    where
        F: FnMut(&V, usize, &Self) -> ControlFlow<()>,
    {
        LinkedList::reverse_each(self, f)
    }
}

impl<V: Element> Queue<V> for LinkedList<V> {
    fn get_first(&self) -> Option<&V> {
        LinkedList::get_first(self)
    }

    fn remove_first(&mut self) -> Option<V> {
        LinkedList::remove_first(self)
    }

    fn add_last(&mut self, value: V) -> Result<()> {
        LinkedList::add_last(self, value)
    }
}

impl<V: Element> Deque<V> for LinkedList<V> {
    fn get_last(&self) -> Option<&V> {
        LinkedList::get_last(self)
    }

    fn remove_last(&mut self) -> Option<V> {
        LinkedList::remove_last(self)
    }

    fn add_first(&mut self, value: V) -> Result<()> {
        LinkedList::add_first(self, value)
    }
}
