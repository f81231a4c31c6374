//! Map: the contract of key -> value containers.

use crate::collection::Collection;
use crate::error::Result;
use crate::type_guard::TypeSpec;
use crate::value::Element;
use core::ops::ControlFlow;

/// Key -> value association with a declared key type.
///
/// Lookups of absent keys or values return `None`; only type mismatches
/// are errors.
pub trait Map<K: Element, V: Element>: Collection<V> {
    /// Iterator over `(key, value)` pairs in slot order.
    type Entries<'a>: Iterator<Item = (&'a K, &'a V)>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn key_type(&self) -> &TypeSpec;

    /// Change the declared key type; `StateConflict` unless empty.
    fn set_key_type(&mut self, spec: TypeSpec) -> Result<()>;

    fn contains_key(&self, key: &K) -> Result<bool>;

    fn get(&self, key: &K) -> Result<Option<&V>>;

    fn set(&mut self, key: K, value: V) -> Result<()>;

    /// Earliest current association of `value`.
    fn key_of(&self, value: &V) -> Result<Option<&K>>;

    /// Latest current association of `value`.
    fn last_key_of(&self, value: &V) -> Result<Option<&K>>;

    fn remove_key(&mut self, key: &K) -> Result<bool>;

    fn entries(&self) -> Self::Entries<'_>;

    /// `set` every entry of `other`, in its order; later entries win.
    fn merge<M>(&mut self, other: &M) -> Result<()>
    where
        M: Map<K, V> + ?Sized,
    {
        tracing::trace!(entries = other.len(), "merging map");
        for (key, value) in other.entries() {
            self.set(key.clone(), value.clone())?;
        }
        Ok(())
    }

    /// Visit `(value, key)` pairs in slot order; `Break` stops the walk.
    fn each<F>(&self, mut f: F)
    where
        F: FnMut(&V, &K, &Self) -> ControlFlow<()>,
    {
        for (key, value) in self.entries() {
            if f(value, key, self).is_break() {
                break;
            }
        }
    }
}
