//! guarded-collections: lists, maps and sets that check every stored value
//! (and key) against a type declared when the container is built.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: containers over dynamically typed values whose contents are
//!   guaranteed to satisfy a declared `TypeSpec`, with hash indexes keyed
//!   by an explicit `Identity` rather than by `Hash` on the values.
//! - Layers:
//!   - TypeGuard: validates one value against a declaration and builds
//!     the `TypeMismatch` error from its `GuardOptions`.
//!   - IdentityTable<T, S>: structural table mapping identities to slots
//!     behind stable generational handles, iterated in insertion order.
//!   - ArrayList / LinkedList: dense positional lists over a ring buffer.
//!   - HashMap / HashStore / UniqueStore: the associative containers,
//!     each an `IdentityTable` plus whatever reverse index it needs.
//! - Contracts: `Collection` is shared by all containers;
//!   `SequentialList`, `Queue`/`Deque`, `Map` and `Set` refine it.
//!
//! Constraints
//! - Single-threaded: `Value` holds `Rc`, so containers of `Value` are
//!   `!Send`/`!Sync`.
//! - Fail fast: positions, ranges and types are validated before any
//!   internal structure is touched, so a failed call changes nothing.
//! - Absent lookups return `None`; only misuse is an error.
//! - A populated container cannot change its declared types.
//!
//! Identity
//! - Primitives, strings and arrays are identified by content, objects
//!   and callables by reference. Identities carry their kind, so `1` and
//!   `"1"` never share a slot.
//! - Each table entry stores its precomputed `u64` hash; the index is
//!   never rehashed through user code.
//!
//! Ordering
//! - Associative containers iterate in slot order: a new key appends, an
//!   existing key keeps its slot when rebound.
//! - HashMap orders the keys bound to one value by when each binding was
//!   made, so `key_of` is the earliest and `last_key_of` the latest.
//!
//! Notes and non-goals
//! - No persistence, serialization or concurrent access.
//! - Iteration borrows the container, so callbacks cannot mutate it.
//! - Lower layers (`IdentityTable`) are implementation details; the
//!   `bench_internal` feature exposes them to benchmarks only.

pub mod array_list;
pub mod collection;
pub mod error;
pub mod hash_map;
pub mod hash_store;
mod identity_table;
mod identity_table_proptest;
pub mod linked_list;
pub mod map;
pub mod sequential_list;
pub mod type_guard;
pub mod unique_store;
pub mod value;

// Public surface
pub use array_list::ArrayList;
pub use collection::Collection;
pub use error::{CollectionError, Result, Role};
pub use hash_map::HashMap;
pub use hash_store::HashStore;
pub use linked_list::{Deque, LinkedList, Queue};
pub use map::Map;
pub use sequential_list::{Position, SequentialList};
pub use type_guard::{GuardOptions, TypeGuard, TypeSpec};
pub use unique_store::{Set, UniqueStore};
pub use value::{Callable, Element, Identity, Instance, Kind, Object, Value};

#[cfg(feature = "bench_internal")]
pub use identity_table::{Handle, IdentityTable, InsertError};
