use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::iter::FusedIterator;

use crate::tally_table::HasherOps;
use crate::tally_table::IntoEntries;
use crate::tally_table::Metrics;
use crate::tally_table::TallyTable;

/// The capacity schedule a [`Counter`] uses unless one is supplied.
///
/// A doubling sequence of primes; prime bucket counts keep the modulo
/// reduction well distributed even for hashes with poor low bits.
pub const DEFAULT_SCHEDULE: &[usize] = &[
    53,
    97,
    193,
    389,
    769,
    1543,
    3079,
    6151,
    12289,
    24593,
    49157,
    98317,
    196613,
    393241,
    786433,
    1572869,
    3145739,
    6291469,
    12582917,
    25165843,
    50331653,
    100663319,
    201326611,
    402653189,
    805306457,
    1610612741,
];

/// The growth threshold a [`Counter`] uses unless one is supplied.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// A frequency multiset implemented over [`TallyTable`].
///
/// `Counter<T, S>` counts how many times each value of `T: Hash + Eq` has
/// been inserted, keeping one owned copy per distinct value and using a
/// configurable hasher builder `S` — the same pairing of raw table and
/// build hasher as the standard collections, with the table's staged
/// capacity schedule underneath.
///
/// Values can only be inserted, never removed; the counter is emptied by
/// dropping or consuming it.
///
/// # Examples
///
/// ```rust
/// # #[cfg(any(feature = "std", feature = "foldhash"))]
/// # {
/// use tally_hash::Counter;
///
/// let mut words: Counter<&str> = Counter::new();
/// words.insert("the");
/// words.insert("quick");
/// words.insert("the");
///
/// assert_eq!(words.count(&"the"), 2);
/// assert_eq!(words.count(&"quick"), 1);
/// assert_eq!(words.len(), 2);
/// assert_eq!(words.total(), 3);
/// # }
/// ```
pub struct Counter<T, S = crate::DefaultHashBuilder> {
    table: TallyTable<T, HasherOps<S>>,
}

impl<T, S> Debug for Counter<T, S>
where
    T: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (value, count) in self.iter() {
            map.entry(value, &count);
        }
        map.finish()
    }
}

impl<T, S> PartialEq for Counter<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() || self.total() != other.total() {
            return false;
        }
        self.iter().all(|(value, count)| other.count(value) == count)
    }
}

impl<T, S> Eq for Counter<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
}

impl<T, S> Counter<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a counter with the given hasher builder and the default
    /// schedule and growth threshold.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "std")]
    /// # {
    /// use std::collections::hash_map::RandomState;
    ///
    /// use tally_hash::Counter;
    ///
    /// let counter: Counter<i32, _> = Counter::with_hasher(RandomState::new());
    /// assert!(counter.is_empty());
    /// # }
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_schedule_and_hasher(DEFAULT_SCHEDULE, DEFAULT_LOAD_FACTOR, hash_builder)
    }

    /// Creates a counter with an explicit capacity schedule, growth
    /// threshold, and hasher builder.
    ///
    /// # Panics
    ///
    /// Panics on the same contract violations as [`TallyTable::new`]: an
    /// empty or non-increasing schedule, sizes not greater than 1, or a
    /// threshold outside `(0, 1]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "std")]
    /// # {
    /// use std::collections::hash_map::RandomState;
    ///
    /// use tally_hash::Counter;
    ///
    /// let counter: Counter<i32, _> =
    ///     Counter::with_schedule_and_hasher(&[11, 23, 47], 0.5, RandomState::new());
    /// assert_eq!(counter.capacity(), 11);
    /// # }
    /// ```
    pub fn with_schedule_and_hasher(
        schedule: &[usize],
        load_factor: f64,
        hash_builder: S,
    ) -> Self {
        Self {
            table: TallyTable::new(HasherOps::new(hash_builder), schedule, load_factor),
        }
    }

    /// Inserts a value and returns its post-insert count.
    ///
    /// A result of 1 means the value was new. For a repeat the counter
    /// keeps the copy it already owns and drops the one just passed; use
    /// [`TallyTable::add`] directly to get the rejected copy back instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use tally_hash::Counter;
    ///
    /// let mut tally: Counter<&str> = Counter::new();
    /// assert_eq!(tally.insert("a"), 1);
    /// assert_eq!(tally.insert("a"), 2);
    /// assert_eq!(tally.insert("b"), 1);
    /// # }
    /// ```
    pub fn insert(&mut self, value: T) -> u64 {
        self.table.add(value).frequency()
    }

    /// The number of times `value` has been inserted, or 0 if never.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use tally_hash::Counter;
    ///
    /// let mut tally: Counter<&str> = Counter::new();
    /// tally.insert("seen");
    ///
    /// assert_eq!(tally.count(&"seen"), 1);
    /// assert_eq!(tally.count(&"unseen"), 0);
    /// # }
    /// ```
    pub fn count(&self, value: &T) -> u64 {
        self.table.frequency(value)
    }

    /// Returns `true` if `value` has been inserted at least once.
    pub fn contains(&self, value: &T) -> bool {
        self.table.lookup(value).is_some()
    }
}

impl<T, S> Counter<T, S> {
    /// The number of distinct values. O(1).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use tally_hash::Counter;
    ///
    /// let mut tally: Counter<&str> = Counter::new();
    /// tally.insert("x");
    /// tally.insert("x");
    /// assert_eq!(tally.len(), 1);
    /// # }
    /// ```
    pub fn len(&self) -> usize {
        self.table.unique_entries()
    }

    /// Returns `true` if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The total number of insertions, duplicates included. O(1).
    pub fn total(&self) -> u64 {
        self.table.total_entries()
    }

    /// The active bucket capacity of the underlying table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Chain-occupancy statistics of the underlying table.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use tally_hash::Counter;
    ///
    /// let mut tally: Counter<i32> = Counter::new();
    /// for v in 0..10 {
    ///     tally.insert(v);
    /// }
    ///
    /// let metrics = tally.metrics();
    /// assert!(metrics.num_chains <= 10);
    /// assert!(metrics.avg_chain_len >= 1.0);
    /// # }
    /// ```
    pub fn metrics(&self) -> Metrics {
        self.table.metrics()
    }

    /// Returns an iterator over `(value, count)` pairs in arbitrary order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use tally_hash::Counter;
    ///
    /// let mut tally: Counter<&str> = Counter::new();
    /// tally.insert("a");
    /// tally.insert("a");
    /// tally.insert("b");
    ///
    /// let mut pairs: Vec<_> = tally.iter().collect();
    /// pairs.sort();
    /// assert_eq!(pairs, [(&"a", 2), (&"b", 1)]);
    /// # }
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }
}

impl<T, S> Counter<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates an empty counter with the default hasher builder, schedule,
    /// and growth threshold.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use tally_hash::Counter;
    ///
    /// let tally: Counter<u32> = Counter::new();
    /// assert!(tally.is_empty());
    /// # }
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates a counter with an explicit schedule and growth threshold,
    /// using the default hasher builder.
    ///
    /// # Panics
    ///
    /// Panics on the same contract violations as [`TallyTable::new`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(any(feature = "std", feature = "foldhash"))]
    /// # {
    /// use tally_hash::Counter;
    ///
    /// let tally: Counter<u32> = Counter::with_schedule(&[11, 23], 0.5);
    /// assert_eq!(tally.capacity(), 11);
    /// # }
    /// ```
    pub fn with_schedule(schedule: &[usize], load_factor: f64) -> Self {
        Self::with_schedule_and_hasher(schedule, load_factor, S::default())
    }
}

impl<T, S> Default for Counter<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> FromIterator<T> for Counter<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut counter = Self::new();
        counter.extend(iter);
        counter
    }
}

impl<T, S> Extend<T> for Counter<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, S> IntoIterator for Counter<T, S> {
    type Item = (T, u64);
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_entries(),
        }
    }
}

impl<'a, T, S> IntoIterator for &'a Counter<T, S> {
    type Item = (&'a T, u64);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over a counter's `(value, count)` pairs.
///
/// Created by [`Counter::iter`].
pub struct Iter<'a, T> {
    inner: crate::tally_table::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a T, u64);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|entry| (entry.value(), entry.frequency()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Consuming iterator over a counter's `(value, count)` pairs.
///
/// Created by [`Counter::into_iter`](IntoIterator::into_iter).
pub struct IntoIter<T> {
    inner: IntoEntries<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = (T, u64);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|entry| (entry.value, entry.frequency))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}
