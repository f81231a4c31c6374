//! IdentityTable: structural layer mapping value identities to slots with
//! stable handles, iterated in insertion order.
//!
//! Every hash-indexed container is built on this table. An entry stores its
//! `Identity`, the precomputed `u64` hash of that identity, a monotonically
//! increasing sequence number fixing its position in iteration order, and
//! the container-specific payload.

use crate::value::Identity;
use core::hash::BuildHasher;
use hashbrown::HashTable;
use slotmap::{DefaultKey, SlotMap};
use std::collections::btree_map::{self, BTreeMap};
use std::collections::hash_map::RandomState;

/// Stable, generational reference to a slot.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle(DefaultKey);

impl Handle {
    pub(crate) fn new(k: DefaultKey) -> Self {
        Handle(k)
    }
    pub(crate) fn raw_handle(&self) -> DefaultKey {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Entry<T> {
    id: Identity,
    hash: u64,
    seq: u64,
    item: T,
}

#[derive(Debug, Eq, PartialEq)]
pub enum InsertError {
    DuplicateIdentity(Handle),
}

pub struct IdentityTable<T, S = RandomState> {
    hasher: S,
    index: HashTable<DefaultKey>,
    slots: SlotMap<DefaultKey, Entry<T>>,
    order: BTreeMap<u64, DefaultKey>,
    next_seq: u64,
}

impl<T> IdentityTable<T> {
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<T> Default for IdentityTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over entries in insertion order.
pub struct Iter<'a, T> {
    order: btree_map::Values<'a, u64, DefaultKey>,
    slots: &'a SlotMap<DefaultKey, Entry<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Handle, &'a Identity, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let &k = self.order.next()?;
            if let Some(e) = self.slots.get(k) {
                return Some((Handle::new(k), &e.id, &e.item));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        loop {
            let &k = self.order.next_back()?;
            if let Some(e) = self.slots.get(k) {
                return Some((Handle::new(k), &e.id, &e.item));
            }
        }
    }
}

impl<T, S> IdentityTable<T, S>
where
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            hasher,
            index: HashTable::new(),
            slots: SlotMap::with_key(),
            order: BTreeMap::new(),
            next_seq: 0,
        }
    }

    fn make_hash(&self, id: &Identity) -> u64 {
        self.hasher.hash_one(id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.order.clear();
    }

    pub fn find(&self, id: &Identity) -> Option<Handle> {
        let hash = self.make_hash(id);
        self.index
            .find(hash, |&k| self.slots.get(k).map(|e| e.id == *id).unwrap_or(false))
            .map(|&k| Handle::new(k))
    }

    pub fn contains(&self, id: &Identity) -> bool {
        self.find(id).is_some()
    }

    /// Insert a new identity at the end of the iteration order. Duplicates
    /// are rejected and the table is left unchanged.
    pub fn insert(&mut self, id: Identity, item: T) -> Result<Handle, InsertError> {
        let hash = self.make_hash(&id);
        let slots = &mut self.slots;
        match self.index.entry(
            hash,
            |&kk| slots.get(kk).map(|e| e.id == id).unwrap_or(false),
            |&kk| slots.get(kk).map(|e| e.hash).unwrap_or(0),
        ) {
            hashbrown::hash_table::Entry::Occupied(o) => {
                Err(InsertError::DuplicateIdentity(Handle::new(*o.get())))
            }
            hashbrown::hash_table::Entry::Vacant(v) => {
                let seq = self.next_seq;
                self.next_seq += 1;
                let k = slots.insert(Entry {
                    id,
                    hash,
                    seq,
                    item,
                });
                let _ = v.insert(k);
                self.order.insert(seq, k);
                Ok(Handle::new(k))
            }
        }
    }

    /// Insert, or replace the item of an existing identity in place. The
    /// slot keeps its handle and position; the previous item is returned.
    pub fn upsert(&mut self, id: Identity, item: T) -> (Handle, Option<T>) {
        match self.find(&id) {
            Some(h) => {
                let previous = self
                    .slots
                    .get_mut(h.raw_handle())
                    .map(|e| core::mem::replace(&mut e.item, item));
                (h, previous)
            }
            None => match self.insert(id, item) {
                Ok(h) => (h, None),
                // `find` just missed, so the identity cannot be present.
                Err(InsertError::DuplicateIdentity(h)) => (h, None),
            },
        }
    }

    pub fn remove(&mut self, handle: Handle) -> Option<(Identity, T)> {
        let k = handle.raw_handle();

        let entry = self.slots.remove(k)?;

        if let Ok(occupied) = self.index.find_entry(entry.hash, |&kk| kk == k) {
            let _ = occupied.remove();
        }
        self.order.remove(&entry.seq);

        Some((entry.id, entry.item))
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.slots.get(handle.raw_handle()).map(|e| &e.item)
    }

    pub fn identity(&self, handle: Handle) -> Option<&Identity> {
        self.slots.get(handle.raw_handle()).map(|e| &e.id)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            order: self.order.values(),
            slots: &self.slots,
        }
    }
}
