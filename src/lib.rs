//! linked-hashset: A single-threaded hash set that recalls the insertion
//! order of its elements and resizes its bucket array with its load.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: build LinkedHashSet in safe, verifiable layers so the chain
//!   bookkeeping, the order bookkeeping and the resize policy can be
//!   reasoned about independently.
//! - Layers:
//!   - ChainedTable<T>: structural layer — a bucket array of chain heads,
//!     per-bucket singly-linked collision chains, and a doubly-linked
//!     insertion-order list, all threading nodes held in a slotmap arena.
//!     Pure bookkeeping over precomputed hashes; never fails.
//!   - LinkedHashSet<T, S>: public policy layer — owns the hasher and the
//!     load limit, enforces the duplicate/absence error contract, and
//!     drives the double/halve resize procedure through the structural
//!     layer's non-resizing append path.
//!
//! Constraints
//! - Single-threaded: `!Send`/`!Sync` enforcement rides on the debug
//!   reentrancy check's marker (no atomics, no locks); callers needing
//!   sharing serialize externally.
//! - A node participates in exactly one bucket chain and exactly one
//!   position in the order list; both memberships mutate together.
//! - Nodes are addressed by slotmap keys from both structures, so there
//!   are no owning reference cycles and unlinking is plain bookkeeping.
//! - Bucket count never drops below MIN_BUCKETS (10); construction clamps
//!   up to it and the shrink path stops at it.
//! - Duplicate `add` fails with an error rather than no-op-ing; `remove`
//!   distinguishes an empty table from an absent key.
//!
//! Resize policy
//! - After each successful add: load_factor >= load_limit doubles the
//!   bucket array. After each successful remove: load_factor < 1 -
//!   load_limit halves it, if above the floor.
//! - A rebuild drains the old table in insertion order and re-appends into
//!   a fresh one at the already-fixed new bucket count; the append path
//!   carries no load policy, so a rebuild can never re-trigger itself, and
//!   the rebuilt order list reproduces the original order exactly.
//! - Observability: an optional caller-installed hook receives old/new
//!   bucket counts after each rebuild; without one, resizing is silent.
//!
//! Hasher and rehashing invariants
//! - Each node stores its precomputed `u64` hash and re-bucketing always
//!   uses the stored hash; `T: Hash` is never invoked after insertion, so
//!   rebuilds make no calls into user code beyond the optional hook.
//!
//! Reentrancy policy
//! - User code runs inside the set's critical sections in two places:
//!   `Hash`/`Eq` during chain probing and the resize hook after a rebuild.
//!   A debug-only check panics on nested entry while a mutation is on the
//!   stack; release builds compile it away.
//!
//! Notes and non-goals
//! - A set, not a map: keys only, no associated values.
//! - Iteration order is insertion order, never hash order; the sequence is
//!   lazy, restartable, and borrows the set (mutation mid-iteration does
//!   not compile).
//! - `capacity()` reports the bucket count, not element capacity.
//! - No `PartialEq` between sets: whether equality should be
//!   order-sensitive is caller policy, so it is left to the caller.
//! - No `FromIterator`/`Extend`: bulk insertion would have to pick a
//!   policy for duplicates, which `add` deliberately surfaces as errors.
//! - Public API surface is `LinkedHashSet` and its iterators; the
//!   structural layer is an implementation detail (exposed to benches
//!   behind the `bench_internal` feature).

#[cfg(feature = "bench_internal")]
pub mod chained_table;
#[cfg(not(feature = "bench_internal"))]
mod chained_table;
mod linked_hash_set;
mod linked_hash_set_proptest;
mod reentrancy;

// Public surface
pub use linked_hash_set::{
    AddError, IntoIter, Iter, LinkedHashSet, RemoveError, ResizeEvent, DEFAULT_LOAD_LIMIT,
    MIN_BUCKETS,
};
