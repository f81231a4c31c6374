//! ArrayList: a dense, index-addressed list over a ring buffer.
//!
//! Every positional argument is converted and bounds-checked, and every
//! value is type-checked, before the buffer is touched, so a failing call
//! never leaves a partial shift behind.

use crate::collection::Collection;
use crate::error::{CollectionError, Result, Role};
use crate::sequential_list::{ensure_range, last_index, Position, SequentialList};
use crate::type_guard::{GuardOptions, TypeGuard, TypeSpec};
use crate::value::{Element, Value};
use core::ops::ControlFlow;
use std::collections::vec_deque::{self, VecDeque};

#[derive(Clone, Debug)]
pub struct ArrayList<V = Value> {
    guard: TypeGuard,
    items: VecDeque<V>,
}

impl<V: Element> ArrayList<V> {
    pub fn new(value_type: TypeSpec) -> Self {
        Self::from_guard(TypeGuard::new(value_type, Role::Value))
    }

    pub fn with_options(value_type: TypeSpec, options: GuardOptions) -> Self {
        Self::from_guard(TypeGuard::with_options(value_type, Role::Value, options))
    }

    fn from_guard(guard: TypeGuard) -> Self {
        Self {
            guard,
            items: VecDeque::new(),
        }
    }

    /// Empty list sharing this list's declaration and guard options.
    fn empty_like(&self) -> Self {
        Self::from_guard(self.guard.clone())
    }

    /// Build a list from `values`, checking each against `value_type`.
    pub fn from_values<I>(value_type: TypeSpec, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
    {
        let mut list = Self::new(value_type);
        for value in values {
            list.push(value)?;
        }
        Ok(list)
    }

    pub fn value_type(&self) -> &TypeSpec {
        self.guard.spec()
    }

    pub fn set_value_type(&mut self, spec: TypeSpec) -> Result<()> {
        self.guard.redeclare(spec, self.items.len())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, value: &V) -> Result<bool> {
        self.guard.ensure(value)?;
        Ok(self.items.contains(value))
    }

    /// Remove the first occurrence of `value`, closing the gap.
    pub fn remove(&mut self, value: &V) -> Result<bool> {
        match self.index_of(value)? {
            Some(i) => {
                self.items.remove(i);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Append at the end; equivalent to `add(len, value)`.
    pub fn push(&mut self, value: V) -> Result<()> {
        self.guard.ensure(&value)?;
        self.items.push_back(value);
        Ok(())
    }

    pub fn get<I: Position>(&self, index: I) -> Result<&V> {
        let i = ensure_range(index, 0, last_index(self.len()))?;
        self.items.get(i).ok_or_else(|| self.out_of_range(i))
    }

    pub fn get_range<I: Position, J: Position>(&self, from: I, to: J) -> Result<Self> {
        let (from, to) = self.ensure_span(from, to)?;
        let mut list = self.empty_like();
        list.items.extend(self.items.range(from..=to).cloned());
        Ok(list)
    }

    pub fn add<I: Position>(&mut self, index: I, value: V) -> Result<()> {
        let i = ensure_range(index, 0, self.len() as i64)?;
        self.guard.ensure(&value)?;
        self.items.insert(i, value);
        Ok(())
    }

    pub fn add_list<I, L>(&mut self, index: I, list: &L) -> Result<()>
    where
        I: Position,
        L: SequentialList<V> + ?Sized,
    {
        let i = ensure_range(index, 0, self.len() as i64)?;
        self.ensure_same_type(list.value_type())?;
        let mut tail = self.items.split_off(i);
        self.items.extend(list.values().cloned());
        self.items.append(&mut tail);
        Ok(())
    }

    pub fn set<I: Position>(&mut self, index: I, value: V) -> Result<V> {
        let i = ensure_range(index, 0, last_index(self.len()))?;
        self.guard.ensure(&value)?;
        match self.items.get_mut(i) {
            Some(slot) => Ok(core::mem::replace(slot, value)),
            None => Err(self.out_of_range(i)),
        }
    }

    /// Overlay `list` positionally: shared positions take the incoming
    /// value, positions past our end are appended.
    pub fn merge<L>(&mut self, list: &L) -> Result<()>
    where
        L: SequentialList<V> + ?Sized,
    {
        self.ensure_same_type(list.value_type())?;
        for (i, value) in list.values().enumerate() {
            match self.items.get_mut(i) {
                Some(slot) => *slot = value.clone(),
                None => self.items.push_back(value.clone()),
            }
        }
        Ok(())
    }

    pub fn index_of(&self, value: &V) -> Result<Option<usize>> {
        self.guard.ensure(value)?;
        Ok(self.items.iter().position(|v| v == value))
    }

    pub fn last_index_of(&self, value: &V) -> Result<Option<usize>> {
        self.guard.ensure(value)?;
        Ok(self.items.iter().rposition(|v| v == value))
    }

    pub fn contains_index<I: Position>(&self, index: I) -> Result<bool> {
        let i = index.position()?;
        Ok(i >= 0 && i <= last_index(self.len()))
    }

    pub fn contains_range<I: Position, J: Position>(&self, from: I, to: J) -> Result<bool> {
        let (from, to) = (from.position()?, to.position()?);
        Ok(from >= 0 && from <= to && to <= last_index(self.len()))
    }

    pub fn remove_index<I: Position>(&mut self, index: I) -> Result<V> {
        let i = ensure_range(index, 0, last_index(self.len()))?;
        self.items.remove(i).ok_or_else(|| self.out_of_range(i))
    }

    pub fn remove_range<I: Position, J: Position>(&mut self, from: I, to: J) -> Result<Vec<V>> {
        let (from, to) = self.ensure_span(from, to)?;
        Ok(self.items.drain(from..=to).collect())
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, V> {
        self.items.iter()
    }

    /// Visit values front to back with their index; `Break` stops the walk.
    pub fn each<F>(&self, mut f: F)
    where
        F: FnMut(&V, usize, &Self) -> ControlFlow<()>,
    {
        for (i, value) in self.items.iter().enumerate() {
            if f(value, i, self).is_break() {
                break;
            }
        }
    }

    pub fn reverse_each<F>(&self, mut f: F)
    where
        F: FnMut(&V, usize, &Self) -> ControlFlow<()>,
    {
        for (i, value) in self.items.iter().enumerate().rev() {
            if f(value, i, self).is_break() {
                break;
            }
        }
    }

    pub fn to_array(&self) -> Vec<V> {
        self.items.iter().cloned().collect()
    }

    fn ensure_span<I: Position, J: Position>(&self, from: I, to: J) -> Result<(usize, usize)> {
        let upper = last_index(self.len());
        let from = ensure_range(from, 0, upper)?;
        let to = ensure_range(to, 0, upper)?;
        if from > to {
            return Err(CollectionError::InvalidRange { from, to });
        }
        Ok((from, to))
    }

    fn out_of_range(&self, index: usize) -> CollectionError {
        CollectionError::OutOfRange {
            index: index as i64,
            lower: 0,
            upper: last_index(self.len()),
        }
    }

    fn ensure_same_type(&self, other: &TypeSpec) -> Result<()> {
        if self.value_type() != other {
            return Err(CollectionError::IncompatibleTypes {
                expected: self.value_type().clone(),
                found: other.clone(),
            });
        }
        Ok(())
    }
}

impl<V: Element> PartialEq for ArrayList<V> {
    fn eq(&self, other: &Self) -> bool {
        self.value_type() == other.value_type() && self.items == other.items
    }
}

impl<'a, V: Element> IntoIterator for &'a ArrayList<V> {
    type Item = &'a V;
    type IntoIter = vec_deque::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: Element> Collection<V> for ArrayList<V> {
    type Values<'a>
        = vec_deque::Iter<'a, V>
    where
        Self: 'a,
        V: 'a;
    type Exported = Vec<V>;

    fn value_type(&self) -> &TypeSpec {
        ArrayList::value_type(self)
    }

    fn set_value_type(&mut self, spec: TypeSpec) -> Result<()> {
        ArrayList::set_value_type(self, spec)
    }

    fn len(&self) -> usize {
        ArrayList::len(self)
    }

    fn clear(&mut self) {
        ArrayList::clear(self)
    }

    fn contains(&self, value: &V) -> Result<bool> {
        ArrayList::contains(self, value)
    }

    fn remove(&mut self, value: &V) -> Result<bool> {
        ArrayList::remove(self, value)
    }

    fn values(&self) -> Self::Values<'_> {
        self.items.iter()
    }

    fn to_array(&self) -> Result<Vec<V>> {
        Ok(ArrayList::to_array(self))
    }
}

impl<V: Element> SequentialList<V> for ArrayList<V> {
    fn get<I: Position>(&self, index: I) -> Result<&V> {
        ArrayList::get(self, index)
    }

    fn get_range<I: Position, J: Position>(&self, from: I, to: J) -> Result<Self> {
        ArrayList::get_range(self, from, to)
    }

    fn add<I: Position>(&mut self, index: I, value: V) -> Result<()> {
        ArrayList::add(self, index, value)
    }

    fn add_list<I, L>(&mut self, index: I, list: &L) -> Result<()>
    where
        I: Position,
        L: SequentialList<V> + ?Sized,
    {
        ArrayList::add_list(self, index, list)
    }

    fn set<I: Position>(&mut self, index: I, value: V) -> Result<V> {
        ArrayList::set(self, index, value)
    }

    fn merge<L>(&mut self, list: &L) -> Result<()>
    where
        L: SequentialList<V> + ?Sized,
    {
        ArrayList::merge(self, list)
    }

    fn index_of(&self, value: &V) -> Result<Option<usize>> {
        ArrayList::index_of(self, value)
    }

    fn last_index_of(&self, value: &V) -> Result<Option<usize>> {
        ArrayList::last_index_of(self, value)
    }

    fn contains_index<I: Position>(&self, index: I) -> Result<bool> {
        ArrayList::contains_index(self, index)
    }

    fn contains_range<I: Position, J: Position>(&self, from: I, to: J) -> Result<bool> {
        ArrayList::contains_range(self, from, to)
    }

    fn remove_index<I: Position>(&mut self, index: I) -> Result<V> {
        ArrayList::remove_index(self, index)
    }

    fn remove_range<I: Position, J: Position>(&mut self, from: I, to: J) -> Result<Vec<V>> {
        ArrayList::remove_range(self, from, to)
    }

    fn reverse_each<F>(&self, f: F)
    where
        F: FnMut(&V, usize, &Self) -> ControlFlow<()>,
    {
        ArrayList::reverse_each(self, f)
    }
}
