//! HashStore: a bijective key <-> value store.
//!
//! Keys and values are both unique. Binding a value that another key holds
//! detaches that key first, so every value index entry points at exactly
//! one slot.

use crate::collection::Collection;
use crate::error::{Result, Role};
use crate::hash_map::{export, Iter, Slot, Values};
use crate::identity_table::{Handle, IdentityTable};
use crate::map::Map;
use crate::type_guard::{GuardOptions, TypeGuard, TypeSpec};
use crate::value::{Element, Identity, Value};
use core::fmt;
use core::hash::BuildHasher;
use core::ops::ControlFlow;
use std::collections::hash_map::RandomState;

pub struct HashStore<K = Value, V = Value, S = RandomState> {
    key_guard: TypeGuard,
    value_guard: TypeGuard,
    pairs: IdentityTable<Slot<K, V>, S>,
    by_value: hashbrown::HashMap<Identity, Handle, S>,
    next_bind: u64,
}

impl<K: Element, V: Element> HashStore<K, V> {
    /// Store with string keys.
    pub fn new(value_type: TypeSpec) -> Self {
        Self::with_key_type(value_type, TypeSpec::String)
    }

    pub fn with_key_type(value_type: TypeSpec, key_type: TypeSpec) -> Self {
        Self::with_hasher(value_type, key_type, RandomState::new())
    }
}

impl<K, V, S> HashStore<K, V, S>
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
            pairs: IdentityTable::with_hasher(hasher.clone()),
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
        self.value_guard.redeclare(spec, self.pairs.len())
    }

    pub fn set_key_type(&mut self, spec: TypeSpec) -> Result<()> {
        self.key_guard.redeclare(spec, self.pairs.len())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
        self.by_value.clear();
    }

    pub fn contains_key(&self, key: &K) -> Result<bool> {
        self.key_guard.ensure(key)?;
        Ok(self.pairs.contains(&key.identity()))
    }

    pub fn contains(&self, value: &V) -> Result<bool> {
        self.value_guard.ensure(value)?;
        Ok(self.by_value.contains_key(&value.identity()))
    }

    pub fn get(&self, key: &K) -> Result<Option<&V>> {
        self.key_guard.ensure(key)?;
        Ok(self
            .pairs
            .find(&key.identity())
            .and_then(|h| self.pairs.get(h))
            .map(|pair| &pair.value))
    }

    /// Bind `key <-> value`, detaching `value` from any other key and `key`
    /// from its previous value. A present key keeps its slot.
    pub fn set(&mut self, key: K, value: V) -> Result<()> {
        self.key_guard.ensure(&key)?;
        self.value_guard.ensure(&value)?;

        let key_id = key.identity();
        let value_id = value.identity();

        if let Some(&holder) = self.by_value.get(&value_id) {
            if self.pairs.identity(holder) != Some(&key_id) {
                if let Some((_, evicted)) = self.pairs.remove(holder) {
                    tracing::trace!(key = ?evicted.key, "value rebound, evicting its previous key");
                }
                self.by_value.remove(&value_id);
            }
        }

        let bound_at = self.next_bind;
        self.next_bind += 1;
        let pair = Slot {
            key,
            value,
            value_id: value_id.clone(),
            bound_at,
        };
        let (handle, previous) = self.pairs.upsert(key_id, pair);
        if let Some(old) = previous {
            self.by_value.remove(&old.value_id);
        }
        self.by_value.insert(value_id, handle);
        Ok(())
    }

    /// The one key bound to `value`.
    pub fn key_of(&self, value: &V) -> Result<Option<&K>> {
        self.value_guard.ensure(value)?;
        Ok(self
            .by_value
            .get(&value.identity())
            .and_then(|&h| self.pairs.get(h))
            .map(|pair| &pair.key))
    }

    /// Same as `key_of`: a value has at most one key.
    pub fn last_key_of(&self, value: &V) -> Result<Option<&K>> {
        self.key_of(value)
    }

    pub fn remove_key(&mut self, key: &K) -> Result<bool> {
        self.key_guard.ensure(key)?;
        let Some(handle) = self.pairs.find(&key.identity()) else {
            return Ok(false);
        };
        Ok(self.detach(handle))
    }

    pub fn remove(&mut self, value: &V) -> Result<bool> {
        self.value_guard.ensure(value)?;
        let Some(&handle) = self.by_value.get(&value.identity()) else {
            return Ok(false);
        };
        Ok(self.detach(handle))
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.pairs.iter())
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

    /// `set` every entry of `other` in its order. Values shared by several
    /// keys of `other` end up bound to the last of them.
    pub fn merge<M>(&mut self, other: &M) -> Result<()>
    where
        M: Map<K, V> + ?Sized,
    {
        Map::merge(self, other)
    }

    pub fn to_array(&self) -> Result<Vec<(K, V)>> {
        export(&self.key_guard, self.iter())
    }

    fn detach(&mut self, handle: Handle) -> bool {
        match self.pairs.remove(handle) {
            Some((_, pair)) => {
                self.by_value.remove(&pair.value_id);
                true
            }
            None => false,
        }
    }
}

impl<K: Element, V: Element, S> fmt::Debug for HashStore<K, V, S>
where
    S: BuildHasher + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K: Element, V: Element, S> IntoIterator for &'a HashStore<K, V, S>
where
    S: BuildHasher + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> Collection<V> for HashStore<K, V, S>
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
        HashStore::value_type(self)
    }

    fn set_value_type(&mut self, spec: TypeSpec) -> Result<()> {
        HashStore::set_value_type(self, spec)
    }

    fn len(&self) -> usize {
        HashStore::len(self)
    }

    fn clear(&mut self) {
        HashStore::clear(self)
    }

    fn contains(&self, value: &V) -> Result<bool> {
        HashStore::contains(self, value)
    }

    fn remove(&mut self, value: &V) -> Result<bool> {
        HashStore::remove(self, value)
    }

    fn values(&self) -> Self::Values<'_> {
        HashStore::values(self)
    }

    fn to_array(&self) -> Result<Vec<(K, V)>> {
        HashStore::to_array(self)
    }
}

impl<K, V, S> Map<K, V> for HashStore<K, V, S>
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
        HashStore::key_type(self)
    }

    fn set_key_type(&mut self, spec: TypeSpec) -> Result<()> {
        HashStore::set_key_type(self, spec)
    }

    fn contains_key(&self, key: &K) -> Result<bool> {
        HashStore::contains_key(self, key)
    }

    fn get(&self, key: &K) -> Result<Option<&V>> {
        HashStore::get(self, key)
    }

    fn set(&mut self, key: K, value: V) -> Result<()> {
        HashStore::set(self, key, value)
    }

    fn key_of(&self, value: &V) -> Result<Option<&K>> {
        HashStore::key_of(self, value)
    }

    fn last_key_of(&self, value: &V) -> Result<Option<&K>> {
        HashStore::last_key_of(self, value)
    }

    fn remove_key(&mut self, key: &K) -> Result<bool> {
        HashStore::remove_key(self, key)
    }

    fn entries(&self) -> Self::Entries<'_> {
        self.iter()
    }
}
