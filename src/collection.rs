//! The contract shared by every guarded container.

use crate::error::Result;
use crate::type_guard::TypeSpec;
use crate::value::Element;

/// Common shape of lists, maps and sets holding values of type `V`.
///
/// Methods that receive a value check it against the declared value type
/// first, so `contains` and `remove` can fail with `TypeMismatch`.
pub trait Collection<V: Element> {
    /// Iterator over stored values in the container's natural order.
    type Values<'a>: Iterator<Item = &'a V>
    where
        Self: 'a,
        V: 'a;

    /// Result of `to_array`.
    type Exported;

    fn value_type(&self) -> &TypeSpec;

    /// Change the declared value type; `StateConflict` unless empty.
    fn set_value_type(&mut self, spec: TypeSpec) -> Result<()>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);

    fn contains(&self, value: &V) -> Result<bool>;

    /// Remove one occurrence of `value`; reports whether one was removed.
    fn remove(&mut self, value: &V) -> Result<bool>;

    fn values(&self) -> Self::Values<'_>;

    fn to_array(&self) -> Result<Self::Exported>;

    /// True if `other` is this very instance, or every value of `other` is
    /// contained here. Stops at the first missing value.
    fn contains_collection<C>(&self, other: &C) -> Result<bool>
    where
        C: Collection<V> + ?Sized,
    {
        if same_instance(self, other) {
            return Ok(true);
        }
        for value in other.values() {
            if !self.contains(value)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Mutual containment.
    fn equals<C>(&self, other: &C) -> Result<bool>
    where
        C: Collection<V> + ?Sized,
    {
        if same_instance(self, other) {
            return Ok(true);
        }
        Ok(self.contains_collection(other)? && other.contains_collection(self)?)
    }

    /// Remove every value of `other`; values not present are ignored.
    fn remove_collection<C>(&mut self, other: &C) -> Result<()>
    where
        C: Collection<V> + ?Sized,
    {
        for value in other.values() {
            self.remove(value)?;
        }
        Ok(())
    }
}

fn same_instance<A: ?Sized, B: ?Sized>(a: &A, b: &B) -> bool {
    core::ptr::eq(a as *const A as *const (), b as *const B as *const ())
}
