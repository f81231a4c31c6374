//! SequentialList: the contract of dense, index-addressed containers, and
//! the `Position` conversion used by every positional operation.

use crate::collection::Collection;
use crate::error::{CollectionError, Result};
use crate::value::{Element, Value};
use core::ops::ControlFlow;

/// Anything that can name a list position.
///
/// Rust integers always convert; a `Value` converts only when it holds an
/// `Int`, and raises `InvalidIndexKind` otherwise. Negative positions are
/// rejected later by the bounds check.
pub trait Position {
    fn position(&self) -> Result<i64>;
}

impl Position for i32 {
    fn position(&self) -> Result<i64> {
        Ok(i64::from(*self))
    }
}

impl Position for i64 {
    fn position(&self) -> Result<i64> {
        Ok(*self)
    }
}

impl Position for u32 {
    fn position(&self) -> Result<i64> {
        Ok(i64::from(*self))
    }
}

impl Position for usize {
    fn position(&self) -> Result<i64> {
        Ok(i64::try_from(*self).unwrap_or(i64::MAX))
    }
}

impl Position for isize {
    fn position(&self) -> Result<i64> {
        Ok(*self as i64)
    }
}

impl Position for Value {
    fn position(&self) -> Result<i64> {
        match self {
            Value::Int(i) => Ok(*i),
            other => Err(CollectionError::InvalidIndexKind {
                found: other.describe(),
            }),
        }
    }
}

impl<P: Position + ?Sized> Position for &P {
    fn position(&self) -> Result<i64> {
        (**self).position()
    }
}

/// Resolve `index` against the inclusive bounds `[lower, upper]`.
///
/// `upper` may be `-1` (an empty list), in which case every index fails.
pub(crate) fn ensure_range<I: Position>(index: I, lower: i64, upper: i64) -> Result<usize> {
    let index = index.position()?;
    if index < lower || index > upper {
        return Err(CollectionError::OutOfRange {
            index,
            lower,
            upper,
        });
    }
    Ok(index as usize)
}

/// Upper bound for read/update/remove positions of a list of `len` items.
pub(crate) fn last_index(len: usize) -> i64 {
    len as i64 - 1
}

/// Ordered, gap-free container addressed by zero-based positions.
pub trait SequentialList<V: Element>: Collection<V> {
    /// Value at `index`, which must lie in `[0, len-1]`.
    fn get<I: Position>(&self, index: I) -> Result<&V>;

    /// Inclusive sub-sequence as a new list of the same declared type.
    fn get_range<I: Position, J: Position>(&self, from: I, to: J) -> Result<Self>
    where
        Self: Sized;

    /// Insert at `index` in `[0, len]`, shifting later values up by one.
    fn add<I: Position>(&mut self, index: I, value: V) -> Result<()>;

    /// Insert every value of `list` as one block at `index`.
    fn add_list<I, L>(&mut self, index: I, list: &L) -> Result<()>
    where
        I: Position,
        L: SequentialList<V> + ?Sized;

    /// Overwrite the value at `index`, returning the previous one.
    fn set<I: Position>(&mut self, index: I, value: V) -> Result<V>;

    /// Positional overlay of `list` onto this list.
    fn merge<L>(&mut self, list: &L) -> Result<()>
    where
        L: SequentialList<V> + ?Sized;

    fn index_of(&self, value: &V) -> Result<Option<usize>>;

    fn last_index_of(&self, value: &V) -> Result<Option<usize>>;

    fn contains_index<I: Position>(&self, index: I) -> Result<bool>;

    fn contains_range<I: Position, J: Position>(&self, from: I, to: J) -> Result<bool>;

    fn remove_index<I: Position>(&mut self, index: I) -> Result<V>;

    /// Remove the inclusive span `[from, to]`, returning the removed values.
    fn remove_range<I: Position, J: Position>(&mut self, from: I, to: J) -> Result<Vec<V>>;

    /// Visit values back to front; `Break` stops the walk.
    fn reverse_each<F>(&self, f: F)
    where
        F: FnMut(&V, usize, &Self) -> ControlFlow<()>;
}
