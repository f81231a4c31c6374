//! HashMap: a non-bijective key -> value store with a value index.
//!
//! Entries live in an `IdentityTable` keyed by key identity, which fixes
//! their slot order. A second index maps each value identity to the keys
//! currently bound to it, ordered by when each binding was made, so
//! `key_of`, `last_key_of` and `remove(value)` never depend on hash order.

use crate::collection::Collection;
use crate::error::{CollectionError, Result, Role};
use crate::identity_table::{self, Handle, IdentityTable};
use crate::map::Map;
use crate::type_guard::{GuardOptions, TypeGuard, TypeSpec};
use crate::value::{Element, Identity, Value};
use core::fmt;
use core::hash::BuildHasher;
use core::ops::ControlFlow;
use std::collections::hash_map::RandomState;
use std::collections::BTreeMap;

/// A bound key/value pair.
#[derive(Debug)]
pub(crate) struct Slot<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) value_id: Identity,
    /// When this binding was made; orders the value index.
    pub(crate) bound_at: u64,
}

pub struct HashMap<K = Value, V = Value, S = RandomState> {
    key_guard: TypeGuard,
    value_guard: TypeGuard,
    slots: IdentityTable<Slot<K, V>, S>,
    by_value: hashbrown::HashMap<Identity, BTreeMap<u64, Handle>, S>,
    next_bind: u64,
}

impl<K: Element, V: Element> HashMap<K, V> {
    /// Map with string keys.
    pub fn new(value_type: TypeSpec) -> Self {
        Self::with_key_type(value_type, TypeSpec::String)
    }

    pub fn with_key_type(value_type: TypeSpec, key_type: TypeSpec) -> Self {
        Self::with_hasher(value_type, key_type, RandomState::new())
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Element,
    V: Element,
    S: BuildHasher + Clone,
{
    pub fn with_hasher(value_type: TypeSpec, key_type: TypeSpec, hasher: S) -> Self {
        Self::with_options(
            value_type,
            key_type,
            GuardOptions::for_role(Role::Value),
            GuardOptions::for_role(Role::Key),
            hasher,
        )
    }

    /// Map with custom mismatch messages for its value and key guards.
    pub fn with_options(
        value_type: TypeSpec,
        key_type: TypeSpec,
        value_options: GuardOptions,
        key_options: GuardOptions,
        hasher: S,
    ) -> Self {
        Self {
            key_guard: TypeGuard::with_options(key_type, Role::Key, key_options),
            value_guard: TypeGuard::with_options(value_type, Role::Value, value_options),
            slots: IdentityTable::with_hasher(hasher.clone()),
            by_value: hashbrown::HashMap::with_hasher(hasher),
            next_bind: 0,
        }
    }

    pub fn value_type(&self) -> &TypeSpec {
        self.value_guard.spec()
    }

    pub fn key_type(&self) -> &TypeSpec {
        self.key_guard.spec()
    }

    pub fn set_value_type(&mut self, spec: TypeSpec) -> Result<()> {
        self.value_guard.redeclare(spec, self.slots.len())
    }

    pub fn set_key_type(&mut self, spec: TypeSpec) -> Result<()> {
        self.key_guard.redeclare(spec, self.slots.len())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.by_value.clear();
    }

    pub fn contains_key(&self, key: &K) -> Result<bool> {
        self.key_guard.ensure(key)?;
        Ok(self.slots.contains(&key.identity()))
    }

    pub fn contains(&self, value: &V) -> Result<bool> {
        self.value_guard.ensure(value)?;
        Ok(self.by_value.contains_key(&value.identity()))
    }

    pub fn get(&self, key: &K) -> Result<Option<&V>> {
        self.key_guard.ensure(key)?;
        Ok(self
            .slots
            .find(&key.identity())
            .and_then(|h| self.slots.get(h))
            .map(|slot| &slot.value))
    }

    /// Bind `key` to `value`. An existing key keeps its slot and becomes
    /// the most recent association of the new value.
    pub fn set(&mut self, key: K, value: V) -> Result<()> {
        self.key_guard.ensure(&key)?;
        self.value_guard.ensure(&value)?;

        let key_id = key.identity();
        let value_id = value.identity();
        let bound_at = self.next_bind;
        self.next_bind += 1;

        let slot = Slot {
            key,
            value,
            value_id: value_id.clone(),
            bound_at,
        };
        let (handle, previous) = self.slots.upsert(key_id, slot);
        if let Some(old) = previous {
            self.unbind(&old.value_id, old.bound_at);
        }
        self.by_value
            .entry(value_id)
            .or_default()
            .insert(bound_at, handle);
        Ok(())
    }

    /// Key of the earliest binding of `value` still present.
    pub fn key_of(&self, value: &V) -> Result<Option<&K>> {
        self.value_guard.ensure(value)?;
        let handle = self
            .by_value
            .get(&value.identity())
            .and_then(|bucket| bucket.values().next().copied());
        Ok(self.key_at(handle))
    }

    /// Key of the latest binding of `value` still present.
    pub fn last_key_of(&self, value: &V) -> Result<Option<&K>> {
        self.value_guard.ensure(value)?;
        Ok(self.key_at(self.latest_binding(&value.identity())))
    }

    pub fn remove_key(&mut self, key: &K) -> Result<bool> {
        self.key_guard.ensure(key)?;
        Ok(match self.slots.find(&key.identity()) {
            Some(handle) => self.detach(handle).is_some(),
            None => false,
        })
    }

    /// Remove the most recently bound key holding `value`.
    pub fn remove(&mut self, value: &V) -> Result<bool> {
        self.value_guard.ensure(value)?;
        Ok(match self.latest_binding(&value.identity()) {
            Some(handle) => self.detach(handle).is_some(),
            None => false,
        })
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.slots.iter())
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.iter())
    }

    /// Visit `(value, key)` pairs in slot order; `Break` stops the walk.
    pub fn each<F>(&self, mut f: F)
    where
        F: FnMut(&V, &K, &Self) -> ControlFlow<()>,
    {
        for (key, value) in self.iter() {
            if f(value, key, self).is_break() {
                break;
            }
        }
    }

    /// `set` every entry of `other` in its order.
    pub fn merge<M>(&mut self, other: &M) -> Result<()>
    where
        M: Map<K, V> + ?Sized,
    {
        Map::merge(self, other)
    }

    /// `(key, value)` pairs in slot order. Only primitive key types can be
    /// exported.
    pub fn to_array(&self) -> Result<Vec<(K, V)>> {
        export(&self.key_guard, self.iter())
    }

    fn key_at(&self, handle: Option<Handle>) -> Option<&K> {
        handle
            .and_then(|h| self.slots.get(h))
            .map(|slot| &slot.key)
    }

    fn latest_binding(&self, value_id: &Identity) -> Option<Handle> {
        self.by_value
            .get(value_id)
            .and_then(|bucket| bucket.values().next_back().copied())
    }

    fn detach(&mut self, handle: Handle) -> Option<Slot<K, V>> {
        let (_, slot) = self.slots.remove(handle)?;
        self.unbind(&slot.value_id, slot.bound_at);
        Some(slot)
    }

    fn unbind(&mut self, value_id: &Identity, bound_at: u64) {
        if let Some(bucket) = self.by_value.get_mut(value_id) {
            bucket.remove(&bound_at);
            if bucket.is_empty() {
                self.by_value.remove(value_id);
            }
        }
    }
}

/// Shared by both associative stores.
pub(crate) fn export<'a, K, V, I>(key_guard: &TypeGuard, entries: I) -> Result<Vec<(K, V)>>
where
    K: Element + 'a,
    V: Element + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    if !key_guard.is_simple() {
        tracing::debug!(key_type = %key_guard.spec(), "refusing to export non-primitive keys");
        return Err(CollectionError::Representation {
            key_type: key_guard.spec().clone(),
        });
    }
    Ok(entries.map(|(k, v)| (k.clone(), v.clone())).collect())
}

/// Iterator over `(key, value)` pairs in slot order.
pub struct Iter<'a, K, V> {
    inner: identity_table::Iter<'a, Slot<K, V>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(inner: identity_table::Iter<'a, Slot<K, V>>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, _, s)| (&s.key, &s.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, _, s)| (&s.key, &s.value))
    }
}

/// Iterator over values in slot order.
pub struct Values<'a, K, V>(pub(crate) Iter<'a, K, V>);

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.0.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a V> {
        self.0.next_back().map(|(_, v)| v)
    }
}

impl<K: Element, V: Element, S> fmt::Debug for HashMap<K, V, S>
where
    S: BuildHasher + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K: Element, V: Element, S> IntoIterator for &'a HashMap<K, V, S>
where
    S: BuildHasher + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> Collection<V> for HashMap<K, V, S>
where
    K: Element,
    V: Element,
    S: BuildHasher + Clone,
{
    type Values<'a>
        = Values<'a, K, V>
    where
        Self: 'a,
        V: 'a;
    type Exported = Vec<(K, V)>;

    fn value_type(&self) -> &TypeSpec {
        HashMap::value_type(self)
    }

    fn set_value_type(&mut self, spec: TypeSpec) -> Result<()> {
        HashMap::set_value_type(self, spec)
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn clear(&mut self) {
        HashMap::clear(self)
    }

    fn contains(&self, value: &V) -> Result<bool> {
        HashMap::contains(self, value)
    }

    fn remove(&mut self, value: &V) -> Result<bool> {
        HashMap::remove(self, value)
    }

    fn values(&self) -> Self::Values<'_> {
        HashMap::values(self)
    }

    fn to_array(&self) -> Result<Vec<(K, V)>> {
        HashMap::to_array(self)
    }
}

impl<K, V, S> Map<K, V> for HashMap<K, V, S>
where
    K: Element,
    V: Element,
    S: BuildHasher + Clone,
{
    type Entries<'a>
        = Iter<'a, K, V>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn key_type(&self) -> &TypeSpec {
        HashMap::key_type(self)
    }

    fn set_key_type(&mut self, spec: TypeSpec) -> Result<()> {
        HashMap::set_key_type(self, spec)
    }

    fn contains_key(&self, key: &K) -> Result<bool> {
        HashMap::contains_key(self, key)
    }

    fn get(&self, key: &K) -> Result<Option<&V>> {
        HashMap::get(self, key)
    }

    fn set(&mut self, key: K, value: V) -> Result<()> {
        HashMap::set(self, key, value)
    }

    fn key_of(&self, value: &V) -> Result<Option<&K>> {
        HashMap::key_of(self, value)
    }

    fn last_key_of(&self, value: &V) -> Result<Option<&K>> {
        HashMap::last_key_of(self, value)
    }

    fn remove_key(&mut self, key: &K) -> Result<bool> {
        HashMap::remove_key(self, key)
    }

    fn entries(&self) -> Self::Entries<'_> {
        self.iter()
    }
}
