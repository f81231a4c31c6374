//! UniqueStore: a set of values keyed by their identity, iterated in
//! insertion order.

use crate::collection::Collection;
use crate::error::{Result, Role};
use crate::identity_table::{self, IdentityTable, InsertError};
use crate::type_guard::{GuardOptions, TypeGuard, TypeSpec};
use crate::value::{Element, Identity, Value};
use core::fmt;
use core::hash::BuildHasher;
use core::ops::ControlFlow;
use std::collections::hash_map::RandomState;

/// Collection without duplicates.
pub trait Set<V: Element>: Collection<V> {
    /// Insert `value` unless its identity is present. Returns whether it
    /// was added; a duplicate is not an error.
    fn add(&mut self, value: V) -> Result<bool>;

    /// Identity the set indexes `value` under.
    fn identity_of(&self, value: &V) -> Identity {
        value.identity()
    }
}

pub struct UniqueStore<V = Value, S = RandomState> {
    guard: TypeGuard,
    items: IdentityTable<V, S>,
}

impl<V: Element> UniqueStore<V> {
    pub fn new(value_type: TypeSpec) -> Self {
        Self::with_hasher(value_type, RandomState::new())
    }

    /// Build a set from `values`; duplicates collapse to their first occurrence.
    pub fn from_values<I>(value_type: TypeSpec, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
    {
        let mut set = Self::new(value_type);
        for value in values {
            set.add(value)?;
        }
        Ok(set)
    }
}

impl<V: Element, S: BuildHasher> UniqueStore<V, S> {
    pub fn with_hasher(value_type: TypeSpec, hasher: S) -> Self {
        Self::with_options(value_type, GuardOptions::for_role(Role::Value), hasher)
    }

    /// Set with a custom mismatch message for its value guard.
    pub fn with_options(value_type: TypeSpec, options: GuardOptions, hasher: S) -> Self {
        Self {
            guard: TypeGuard::with_options(value_type, Role::Value, options),
            items: IdentityTable::with_hasher(hasher),
        }
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

    pub fn add(&mut self, value: V) -> Result<bool> {
        self.guard.ensure(&value)?;
        match self.items.insert(value.identity(), value) {
            Ok(_) => Ok(true),
            Err(InsertError::DuplicateIdentity(_)) => Ok(false),
        }
    }

    pub fn contains(&self, value: &V) -> Result<bool> {
        self.guard.ensure(value)?;
        Ok(self.items.contains(&value.identity()))
    }

    pub fn remove(&mut self, value: &V) -> Result<bool> {
        self.guard.ensure(value)?;
        Ok(match self.items.find(&value.identity()) {
            Some(handle) => self.items.remove(handle).is_some(),
            None => false,
        })
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter(self.items.iter())
    }

    /// Visit values in insertion order; `Break` stops the walk.
    pub fn each<F>(&self, mut f: F)
    where
        F: FnMut(&V, &Self) -> ControlFlow<()>,
    {
        for value in self.iter() {
            if f(value, self).is_break() {
                break;
            }
        }
    }

    pub fn to_array(&self) -> Vec<V> {
        self.iter().cloned().collect()
    }
}

/// Iterator over the values of a `UniqueStore` in insertion order.
pub struct Iter<'a, V>(identity_table::Iter<'a, V>);

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.0.next().map(|(_, _, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, V> DoubleEndedIterator for Iter<'a, V> {
    fn next_back(&mut self) -> Option<&'a V> {
        self.0.next_back().map(|(_, _, v)| v)
    }
}

impl<V: Element, S: BuildHasher> fmt::Debug for UniqueStore<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, V: Element, S: BuildHasher> IntoIterator for &'a UniqueStore<V, S> {
    type Item = &'a V;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: Element, S: BuildHasher> Collection<V> for UniqueStore<V, S> {
    type Values<'a>
        = Iter<'a, V>
    where
        Self: 'a,
        V: 'a;
    type Exported = Vec<V>;

    fn value_type(&self) -> &TypeSpec {
        UniqueStore::value_type(self)
    }

    fn set_value_type(&mut self, spec: TypeSpec) -> Result<()> {
        UniqueStore::set_value_type(self, spec)
    }

    fn len(&self) -> usize {
        UniqueStore::len(self)
    }

    fn clear(&mut self) {
        UniqueStore::clear(self)
    }

    fn contains(&self, value: &V) -> Result<bool> {
        UniqueStore::contains(self, value)
    }

    fn remove(&mut self, value: &V) -> Result<bool> {
        UniqueStore::remove(self, value)
    }

    fn values(&self) -> Self::Values<'_> {
        self.iter()
    }

    fn to_array(&self) -> Result<Vec<V>> {
        Ok(UniqueStore::to_array(self))
    }
}

impl<V: Element, S: BuildHasher> Set<V> for UniqueStore<V, S> {
    fn add(&mut self, value: V) -> Result<bool> {
        UniqueStore::add(self, value)
    }
}
