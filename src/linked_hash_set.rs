//! LinkedHashSet: policy layer — hashing, errors, load-driven resizing.

use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash, Hasher};
use core::iter::FusedIterator;
use core::mem;
use std::collections::hash_map::RandomState;

use crate::chained_table::{ChainedTable, DrainOrdered, OrderedIter};
use crate::reentrancy::ReentrancyCheck;

/// Minimum bucket count. Construction clamps up to it and shrinking never
/// goes below it.
pub const MIN_BUCKETS: usize = 10;

/// Load limit used by the constructors that do not take one.
pub const DEFAULT_LOAD_LIMIT: f64 = 0.75;

/// Error returned by [`LinkedHashSet::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddError {
    /// An equal key is already in the set. Re-adding is a usage error, not
    /// a no-op; see the notes on [`LinkedHashSet::add`].
    DuplicateKey,
}

impl fmt::Display for AddError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddError::DuplicateKey => f.write_str("key already present"),
        }
    }
}

impl std::error::Error for AddError {}

/// Error returned by [`LinkedHashSet::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveError {
    /// The set holds no elements at all.
    EmptyTable,
    /// The set is non-empty but holds no key equal to the argument.
    KeyNotFound,
}

impl fmt::Display for RemoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoveError::EmptyTable => f.write_str("table empty"),
            RemoveError::KeyNotFound => f.write_str("key absent"),
        }
    }
}

impl std::error::Error for RemoveError {}

/// Snapshot delivered to the resize hook after each completed rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeEvent {
    /// Bucket count before the rebuild.
    pub old_buckets: usize,
    /// Bucket count after the rebuild.
    pub new_buckets: usize,
    /// Element count, unchanged by the rebuild.
    pub len: usize,
}

/// A hash set that remembers global insertion order and keeps its bucket
/// array sized to its load.
///
/// Membership is resolved through per-bucket collision chains; iteration
/// order is resolved through an independent doubly-linked list over the
/// same nodes, appended to on every successful [`add`](Self::add). When the
/// load factor reaches the configured load limit the bucket array doubles,
/// and when it falls under `1 - load_limit` the bucket array halves (never
/// below [`MIN_BUCKETS`]); neither changes iteration content or order.
///
/// Two deliberate departures from `std::collections::HashSet` semantics:
/// adding a key that is already present is an error, not a no-op, and
/// [`capacity`](Self::capacity) reports the bucket count, not how many
/// elements fit.
///
/// # Examples
///
/// ```
/// use linked_hashset::LinkedHashSet;
///
/// let mut set = LinkedHashSet::new();
/// set.add("to")?;
/// set.add("do")?;
/// set.add("is")?;
/// assert!(set.add("to").is_err());
/// set.add("be")?;
///
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), ["to", "do", "is", "be"]);
///
/// set.remove(&"to")?;
/// assert!(!set.contains(&"to"));
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), ["do", "is", "be"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct LinkedHashSet<T, S = RandomState> {
    table: ChainedTable<T>,
    hasher: S,
    load_limit: f64,
    resize_hook: Option<Box<dyn FnMut(ResizeEvent)>>,
    reentrancy: ReentrancyCheck,
}

impl<T> LinkedHashSet<T>
where
    T: Eq + Hash,
{
    /// Create an empty set with [`MIN_BUCKETS`] buckets and the default
    /// load limit.
    pub fn new() -> Self {
        Self::with_buckets_and_load_limit(MIN_BUCKETS, DEFAULT_LOAD_LIMIT)
    }

    /// Create an empty set with `initial_buckets` buckets (clamped up to
    /// [`MIN_BUCKETS`]) and the default load limit.
    pub fn with_buckets(initial_buckets: usize) -> Self {
        Self::with_buckets_and_load_limit(initial_buckets, DEFAULT_LOAD_LIMIT)
    }

    /// Create an empty set with `initial_buckets` buckets (clamped up to
    /// [`MIN_BUCKETS`]) and the given load limit.
    ///
    /// # Panics
    ///
    /// Panics unless `load_limit` lies in the open interval (0, 1).
    pub fn with_buckets_and_load_limit(initial_buckets: usize, load_limit: f64) -> Self {
        Self::with_buckets_load_limit_and_hasher(initial_buckets, load_limit, RandomState::new())
    }
}

impl<T, S> LinkedHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Create an empty set with a caller-supplied hasher, [`MIN_BUCKETS`]
    /// buckets and the default load limit.
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_buckets_load_limit_and_hasher(MIN_BUCKETS, DEFAULT_LOAD_LIMIT, hasher)
    }

    /// Create an empty set, choosing every parameter. The other
    /// constructors delegate here.
    ///
    /// # Panics
    ///
    /// Panics unless `load_limit` lies in the open interval (0, 1).
    pub fn with_buckets_load_limit_and_hasher(
        initial_buckets: usize,
        load_limit: f64,
        hasher: S,
    ) -> Self {
        assert!(
            load_limit > 0.0 && load_limit < 1.0,
            "load_limit must lie in the open interval (0, 1)"
        );
        Self {
            table: ChainedTable::with_buckets(initial_buckets.max(MIN_BUCKETS)),
            hasher,
            load_limit,
            resize_hook: None,
            reentrancy: ReentrancyCheck::new(),
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        let mut h = self.hasher.build_hasher();
        q.hash(&mut h);
        h.finish()
    }

    /// Is an equal key in the set?
    ///
    /// Walks the key's collision chain comparing by equality. No side
    /// effects; absence is a normal result, not an error.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.reentrancy.assert_quiescent();
        let hash = self.make_hash(key);
        self.table.find(hash, key).is_some()
    }

    /// Add a key, remembering when it was added relative to every other
    /// successful `add`.
    ///
    /// The new key lands at the tail of its bucket's collision chain and at
    /// the tail of the insertion order. If the resulting load factor
    /// reaches the load limit, the bucket array doubles.
    ///
    /// # Errors
    ///
    /// Fails with [`AddError::DuplicateKey`] if an equal key is already
    /// present, leaving the set untouched. Re-adding is deliberately an
    /// error rather than a silent no-op, so callers that treat repeated
    /// insertion as a bug hear about it; callers that do not can check
    /// [`contains`](Self::contains) first.
    pub fn add(&mut self, key: T) -> Result<(), AddError> {
        let _m = self.reentrancy.start_mutation();
        let hash = self.make_hash(&key);
        if self.table.find(hash, &key).is_some() {
            return Err(AddError::DuplicateKey);
        }
        self.table.append(hash, key);

        if self.load_factor() >= self.load_limit {
            let target = self.table.bucket_count() * 2;
            Self::rebuild(&mut self.table, &mut self.resize_hook, target);
        }
        Ok(())
    }

    /// Remove an equal key from the set and from the insertion order, and
    /// return it.
    ///
    /// If the resulting load factor falls under `1 - load_limit` and the
    /// bucket count is above the floor, the bucket array halves (never
    /// below [`MIN_BUCKETS`]).
    ///
    /// # Errors
    ///
    /// Fails with [`RemoveError::EmptyTable`] when the set has no elements,
    /// and with [`RemoveError::KeyNotFound`] when it has elements but none
    /// equal to `key`. Either way the set is left untouched.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<T, RemoveError>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _m = self.reentrancy.start_mutation();
        if self.table.is_empty() {
            return Err(RemoveError::EmptyTable);
        }
        let hash = self.make_hash(key);
        let node = self.table.find(hash, key).ok_or(RemoveError::KeyNotFound)?;
        let removed = self.table.remove(node);

        if self.table.bucket_count() > MIN_BUCKETS && self.load_factor() < 1.0 - self.load_limit {
            let target = (self.table.bucket_count() / 2).max(MIN_BUCKETS);
            Self::rebuild(&mut self.table, &mut self.resize_hook, target);
        }
        Ok(removed)
    }

    /// Replace the bucket array at `new_buckets` and re-append every
    /// element in insertion order, re-bucketing by stored hash (`T: Hash`
    /// is never re-invoked). The new bucket count is fixed before
    /// re-insertion begins and the structural append path carries no
    /// load-factor policy, so a rebuild cannot trigger another rebuild.
    fn rebuild(
        table: &mut ChainedTable<T>,
        resize_hook: &mut Option<Box<dyn FnMut(ResizeEvent)>>,
        new_buckets: usize,
    ) {
        let old_buckets = table.bucket_count();
        let old = mem::replace(table, ChainedTable::with_buckets(new_buckets));
        for (key, hash) in old.drain_ordered() {
            table.append(hash, key);
        }

        let event = ResizeEvent {
            old_buckets,
            new_buckets,
            len: table.len(),
        };
        if let Some(hook) = resize_hook.as_mut() {
            hook(event);
        }
    }
}

impl<T, S> LinkedHashSet<T, S> {
    /// Number of elements in the set.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Current bucket count — not the number of elements, and not how many
    /// elements fit. Grows and shrinks with the resize policy and never
    /// drops below [`MIN_BUCKETS`].
    pub fn capacity(&self) -> usize {
        self.table.bucket_count()
    }

    /// `len / capacity`, the quantity the resize policy watches.
    pub fn load_factor(&self) -> f64 {
        self.table.len() as f64 / self.table.bucket_count() as f64
    }

    /// The configured upper load threshold; `1 - load_limit` is the implied
    /// lower threshold.
    pub fn load_limit(&self) -> f64 {
        self.load_limit
    }

    /// First key in insertion order, or `None` when empty.
    pub fn first(&self) -> Option<&T> {
        self.table.first()
    }

    /// Most recently added key, or `None` when empty.
    pub fn last(&self) -> Option<&T> {
        self.table.last()
    }

    /// Iterate over the keys in insertion order.
    ///
    /// The iterator is lazy and restartable, and its length equals
    /// [`len`](Self::len) at the time it is created. It borrows the set, so
    /// mutating mid-iteration does not compile.
    pub fn iter(&self) -> Iter<'_, T> {
        self.reentrancy.assert_quiescent();
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Install a hook delivered a [`ResizeEvent`] after each completed
    /// rebuild. Replaces the original console diagnostics of this
    /// structure's lineage: with no hook installed, resizing is silent and
    /// side-effect-free.
    pub fn set_resize_hook<F>(&mut self, hook: F)
    where
        F: FnMut(ResizeEvent) + 'static,
    {
        self.resize_hook = Some(Box::new(hook));
    }

    /// Remove an installed resize hook, if any.
    pub fn clear_resize_hook(&mut self) {
        self.resize_hook = None;
    }

    /// Validate every structural invariant plus the bucket floor. Test-only.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        self.table.assert_invariants();
        assert!(self.capacity() >= MIN_BUCKETS, "bucket floor violated");
    }
}

impl<T, S> Default for LinkedHashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_buckets_load_limit_and_hasher(MIN_BUCKETS, DEFAULT_LOAD_LIMIT, S::default())
    }
}

impl<T, S> fmt::Debug for LinkedHashSet<T, S>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Immutable iterator over a set's keys in insertion order.
pub struct Iter<'a, T> {
    inner: OrderedIter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T, S> IntoIterator for &'a LinkedHashSet<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Consuming iterator yielding owned keys in insertion order.
pub struct IntoIter<T> {
    inner: DrainOrdered<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next().map(|(key, _hash)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T, S> IntoIterator for LinkedHashSet<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.table.drain_ordered(),
        }
    }
}
