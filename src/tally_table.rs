use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::iter::Flatten;
use core::iter::FusedIterator;
use core::mem;

/// Per-instance hashing and equivalence capability for a [`TallyTable`].
///
/// The table never hashes or compares values itself; it defers both to the
/// ops value it was constructed with. `hash_value` must return a full-width
/// hash — the table reduces it modulo the active capacity, so implementations
/// must not pre-reduce. `equivalent` decides whether two values belong to the
/// same equivalence class; values judged equivalent must hash identically or
/// lookups will miss after a capacity change.
///
/// For values that already implement `Hash + Eq`, [`HasherOps`] adapts any
/// `BuildHasher` into a `TallyOps`.
///
/// # Examples
///
/// ```rust
/// use tally_hash::TallyOps;
///
/// /// Case-insensitive ASCII ops: "Rust" and "rust" share a tally.
/// struct CaseFold;
///
/// impl TallyOps<String> for CaseFold {
///     fn hash_value(&self, value: &String) -> u64 {
///         value
///             .bytes()
///             .map(|b| b.to_ascii_lowercase())
///             .fold(0, |h, b| h.wrapping_mul(31).wrapping_add(b as u64))
///     }
///
///     fn equivalent(&self, a: &String, b: &String) -> bool {
///         a.eq_ignore_ascii_case(b)
///     }
/// }
/// ```
pub trait TallyOps<V: ?Sized> {
    /// Computes the full-width hash of a value.
    ///
    /// The table performs the modulo; returning pre-reduced hashes degrades
    /// bucket distribution after the first capacity step.
    fn hash_value(&self, value: &V) -> u64;

    /// Returns `true` if `a` and `b` belong to the same equivalence class.
    fn equivalent(&self, a: &V, b: &V) -> bool;
}

/// Adapts a [`BuildHasher`] into a [`TallyOps`] for values that implement
/// `Hash + Eq`.
///
/// This is the bridge used by [`Counter`](crate::Counter); it is public so a
/// [`TallyTable`] can be driven by an ordinary build hasher without writing a
/// dedicated ops type.
///
/// # Examples
///
/// ```rust
/// # #[cfg(feature = "std")]
/// # {
/// use std::collections::hash_map::RandomState;
///
/// use tally_hash::HasherOps;
/// use tally_hash::TallyTable;
///
/// let ops = HasherOps::new(RandomState::new());
/// let mut table: TallyTable<String, _> = TallyTable::new(ops, &[11, 23, 47], 0.75);
/// table.add("hello".to_string());
/// assert_eq!(table.frequency(&"hello".to_string()), 1);
/// # }
/// ```
pub struct HasherOps<S> {
    hash_builder: S,
}

impl<S> HasherOps<S> {
    /// Wraps a build hasher.
    pub fn new(hash_builder: S) -> Self {
        Self { hash_builder }
    }
}

impl<V, S> TallyOps<V> for HasherOps<S>
where
    V: Hash + Eq,
    S: BuildHasher,
{
    fn hash_value(&self, value: &V) -> u64 {
        self.hash_builder.hash_one(value)
    }

    fn equivalent(&self, a: &V, b: &V) -> bool {
        a == b
    }
}

/// One stored value together with its insertion frequency.
///
/// Owned entries are produced by [`TallyTable::into_entries`]; while inside
/// the table the same pairing is visible through [`EntryRef`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyEntry<V> {
    /// The stored value. The table took ownership of it on its first
    /// insertion.
    pub value: V,
    /// How many times an equivalent value has been added.
    pub frequency: u64,
}

type Chain<V> = Vec<TallyEntry<V>>;

/// A borrowed view of one entry: the stored value and its current frequency.
///
/// Returned by [`TallyTable::lookup`], [`TallyTable::iter`], and
/// [`TallyTable::entries`]. The view borrows the table, so it cannot outlive
/// the stored values it aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryRef<'a, V> {
    value: &'a V,
    frequency: u64,
}

impl<'a, V> EntryRef<'a, V> {
    /// The stored value.
    pub fn value(&self) -> &'a V {
        self.value
    }

    /// The number of times an equivalent value has been added.
    pub fn frequency(&self) -> u64 {
        self.frequency
    }
}

/// The outcome of [`TallyTable::add`].
///
/// On the first insertion of an equivalence class the table takes ownership
/// of the value and reports `New`. On every later insertion the table keeps
/// the copy it already stores and hands the just-passed value back in
/// `Duplicate` — the caller decides whether to reuse or drop it. The table
/// never holds two owned copies of one class.
#[derive(Debug, PartialEq, Eq)]
pub enum Added<V> {
    /// First occurrence of this equivalence class; frequency is 1.
    New,
    /// An equivalent value was already stored. `frequency` is the
    /// post-insert count and `value` is the rejected input, returned to the
    /// caller.
    Duplicate {
        /// Post-insert frequency of the equivalence class.
        frequency: u64,
        /// The value passed to `add`, which the table did not keep.
        value: V,
    },
}

impl<V> Added<V> {
    /// The post-insert frequency of the affected equivalence class.
    ///
    /// `1` means the value was newly added; anything greater means it was a
    /// duplicate with the indicated count.
    pub fn frequency(&self) -> u64 {
        match self {
            Added::New => 1,
            Added::Duplicate { frequency, .. } => *frequency,
        }
    }

    /// Returns `true` if the table took ownership of the value.
    pub fn is_new(&self) -> bool {
        matches!(self, Added::New)
    }

    /// Extracts the rejected value of a duplicate insert, if any.
    pub fn into_rejected(self) -> Option<V> {
        match self {
            Added::New => None,
            Added::Duplicate { value, .. } => Some(value),
        }
    }
}

/// Chain-occupancy statistics, produced on demand by [`TallyTable::metrics`].
///
/// An empty table reports `avg_chain_len` as `0.0`; there is no chain to
/// average over, and propagating the division by zero would yield NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Number of non-empty chains.
    pub num_chains: usize,
    /// Length of the longest chain.
    pub max_chain_len: usize,
    /// Sum of all chain lengths divided by the number of non-empty chains,
    /// or `0.0` when every chain is empty.
    pub avg_chain_len: f64,
}

/// A chained hash table that deduplicates values and counts insertion
/// frequencies, growing through a fixed capacity schedule.
///
/// `TallyTable<V, O>` stores one owned copy of each equivalence class of `V`
/// alongside the number of times an equivalent value has been [`add`]ed.
/// Hashing and equivalence are supplied per instance by `O:`[`TallyOps`],
/// resolved statically.
///
/// The bucket array always has exactly as many slots as the active entry of
/// the capacity schedule fixed at construction. When an insertion finds the
/// ratio of unique entries to capacity above the configured threshold and a
/// larger schedule entry remains, the table rebuilds itself at the next size
/// — one step at a time, never skipping, never shrinking, and never growing
/// past the last entry. A growth step is a blocking whole-table rebuild;
/// latency-sensitive callers should expect a stall proportional to the
/// number of stored entries when a schedule boundary is crossed.
///
/// There is no removal operation. Entries leave the table only when it is
/// dropped or consumed by [`into_entries`].
///
/// [`add`]: TallyTable::add
/// [`into_entries`]: TallyTable::into_entries
///
/// # Examples
///
/// ```rust
/// # use tally_hash::TallyOps;
/// # use tally_hash::TallyTable;
/// #
/// # struct ByteOps;
/// # impl TallyOps<String> for ByteOps {
/// #     fn hash_value(&self, value: &String) -> u64 {
/// #         value.bytes().fold(0, |h, b| h.wrapping_mul(31).wrapping_add(b as u64))
/// #     }
/// #     fn equivalent(&self, a: &String, b: &String) -> bool {
/// #         a == b
/// #     }
/// # }
/// #
/// let mut table = TallyTable::new(ByteOps, &[11, 23, 47], 0.75);
///
/// table.add("apple".to_string());
/// table.add("banana".to_string());
/// let outcome = table.add("apple".to_string());
///
/// assert_eq!(outcome.frequency(), 2);
/// assert_eq!(table.unique_entries(), 2);
/// assert_eq!(table.total_entries(), 3);
/// ```
pub struct TallyTable<V, O> {
    ops: O,
    schedule: Box<[usize]>,
    index: usize,
    load_factor: f64,
    buckets: Box<[Chain<V>]>,
    unique: usize,
    total: u64,
}

impl<V, O> Debug for TallyTable<V, O>
where
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for entry in self.iter() {
            map.entry(entry.value, &entry.frequency);
        }
        map.finish()
    }
}

fn empty_buckets<V>(capacity: usize) -> Box<[Chain<V>]> {
    core::iter::repeat_with(Vec::new).take(capacity).collect()
}

impl<V, O> TallyTable<V, O>
where
    O: TallyOps<V>,
{
    /// Creates a table with the given ops, capacity schedule, and growth
    /// threshold.
    ///
    /// The schedule is copied into the table; the caller's slice may be
    /// transient. The table starts at `schedule[0]` buckets and advances
    /// through the remaining entries as the threshold is crossed. A
    /// `load_factor` of exactly `1.0` disables growth.
    ///
    /// # Panics
    ///
    /// These are contract violations, not recoverable conditions:
    ///
    /// - `schedule` is empty,
    /// - any size is not greater than 1,
    /// - any size is not strictly greater than its predecessor,
    /// - `load_factor` is outside `(0, 1]`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tally_hash::TallyOps;
    /// # use tally_hash::TallyTable;
    /// #
    /// # struct ByteOps;
    /// # impl TallyOps<String> for ByteOps {
    /// #     fn hash_value(&self, value: &String) -> u64 {
    /// #         value.bytes().fold(0, |h, b| h.wrapping_mul(31).wrapping_add(b as u64))
    /// #     }
    /// #     fn equivalent(&self, a: &String, b: &String) -> bool {
    /// #         a == b
    /// #     }
    /// # }
    /// #
    /// let table: TallyTable<String, _> = TallyTable::new(ByteOps, &[11, 23, 47], 0.75);
    /// assert_eq!(table.capacity(), 11);
    /// assert!(table.is_empty());
    /// ```
    pub fn new(ops: O, schedule: &[usize], load_factor: f64) -> Self {
        assert!(!schedule.is_empty(), "capacity schedule is empty");
        let mut prev = 1;
        for &size in schedule {
            assert!(size > 1, "schedule sizes must be greater than 1");
            assert!(size > prev, "schedule sizes must be strictly increasing");
            prev = size;
        }
        assert!(
            load_factor > 0.0 && load_factor <= 1.0,
            "load factor must be in (0, 1]"
        );

        Self {
            ops,
            schedule: schedule.into(),
            index: 0,
            load_factor,
            buckets: empty_buckets(schedule[0]),
            unique: 0,
            total: 0,
        }
    }

    /// Adds a value, tallying it against any equivalent value already stored.
    ///
    /// If an equivalent value is present, its frequency is incremented and
    /// the passed value is handed back in [`Added::Duplicate`] — the table
    /// keeps the copy it took on the first insertion. Otherwise the table
    /// takes ownership and the class starts at frequency 1.
    ///
    /// The growth check runs before the insertion, comparing the pre-insert
    /// unique count against the current capacity, so a table sitting exactly
    /// on the threshold grows on the *next* add rather than this one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tally_hash::Added;
    /// # use tally_hash::TallyOps;
    /// # use tally_hash::TallyTable;
    /// #
    /// # struct ByteOps;
    /// # impl TallyOps<String> for ByteOps {
    /// #     fn hash_value(&self, value: &String) -> u64 {
    /// #         value.bytes().fold(0, |h, b| h.wrapping_mul(31).wrapping_add(b as u64))
    /// #     }
    /// #     fn equivalent(&self, a: &String, b: &String) -> bool {
    /// #         a == b
    /// #     }
    /// # }
    /// #
    /// let mut table = TallyTable::new(ByteOps, &[11, 23, 47], 0.75);
    ///
    /// assert!(table.add("once".to_string()).is_new());
    ///
    /// match table.add("once".to_string()) {
    ///     Added::Duplicate { frequency, value } => {
    ///         assert_eq!(frequency, 2);
    ///         // The rejected copy is ours again; the table kept the first.
    ///         assert_eq!(value, "once");
    ///     }
    ///     Added::New => unreachable!(),
    /// }
    /// ```
    pub fn add(&mut self, value: V) -> Added<V> {
        self.maybe_grow();

        let slot = self.bucket_index(&value);
        let Self {
            ops,
            buckets,
            unique,
            total,
            ..
        } = self;

        let chain = &mut buckets[slot];
        if let Some(entry) = chain
            .iter_mut()
            .find(|entry| ops.equivalent(&entry.value, &value))
        {
            entry.frequency += 1;
            *total += 1;
            return Added::Duplicate {
                frequency: entry.frequency,
                value,
            };
        }

        chain.push(TallyEntry {
            value,
            frequency: 1,
        });
        *unique += 1;
        *total += 1;
        Added::New
    }

    /// Looks up the entry equivalent to `probe`.
    ///
    /// Returns a borrowed view of the stored value and its current
    /// frequency, or `None` if no equivalent value has been added. A miss is
    /// a normal outcome, not an error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tally_hash::TallyOps;
    /// # use tally_hash::TallyTable;
    /// #
    /// # struct ByteOps;
    /// # impl TallyOps<String> for ByteOps {
    /// #     fn hash_value(&self, value: &String) -> u64 {
    /// #         value.bytes().fold(0, |h, b| h.wrapping_mul(31).wrapping_add(b as u64))
    /// #     }
    /// #     fn equivalent(&self, a: &String, b: &String) -> bool {
    /// #         a == b
    /// #     }
    /// # }
    /// #
    /// let mut table = TallyTable::new(ByteOps, &[11, 23, 47], 0.75);
    /// table.add("seen".to_string());
    ///
    /// let entry = table.lookup(&"seen".to_string()).unwrap();
    /// assert_eq!(entry.value(), "seen");
    /// assert_eq!(entry.frequency(), 1);
    ///
    /// assert!(table.lookup(&"unseen".to_string()).is_none());
    /// ```
    pub fn lookup(&self, probe: &V) -> Option<EntryRef<'_, V>> {
        let slot = self.bucket_index(probe);
        self.buckets[slot]
            .iter()
            .find(|entry| self.ops.equivalent(&entry.value, probe))
            .map(|entry| EntryRef {
                value: &entry.value,
                frequency: entry.frequency,
            })
    }

    /// The frequency of the class equivalent to `probe`, or 0 if absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tally_hash::TallyOps;
    /// # use tally_hash::TallyTable;
    /// #
    /// # struct ByteOps;
    /// # impl TallyOps<String> for ByteOps {
    /// #     fn hash_value(&self, value: &String) -> u64 {
    /// #         value.bytes().fold(0, |h, b| h.wrapping_mul(31).wrapping_add(b as u64))
    /// #     }
    /// #     fn equivalent(&self, a: &String, b: &String) -> bool {
    /// #         a == b
    /// #     }
    /// # }
    /// #
    /// let mut table = TallyTable::new(ByteOps, &[11, 23, 47], 0.75);
    /// table.add("x".to_string());
    /// table.add("x".to_string());
    ///
    /// assert_eq!(table.frequency(&"x".to_string()), 2);
    /// assert_eq!(table.frequency(&"y".to_string()), 0);
    /// ```
    pub fn frequency(&self, probe: &V) -> u64 {
        self.lookup(probe).map_or(0, |entry| entry.frequency)
    }

    #[inline]
    fn bucket_index(&self, value: &V) -> usize {
        (self.ops.hash_value(value) % self.capacity() as u64) as usize
    }

    #[inline]
    fn maybe_grow(&mut self) {
        // The threshold is validated to (0, 1], so < 1.0 is exactly the
        // "growth enabled" case.
        if self.load_factor < 1.0
            && self.index + 1 < self.schedule.len()
            && self.unique as f64 / self.capacity() as f64 > self.load_factor
        {
            self.grow();
        }
    }

    /// Rebuilds the table at the next schedule size.
    ///
    /// Every entry is moved, never cloned: the old bucket array is taken
    /// apart and each entry is re-slotted under the new capacity. Advances
    /// the cursor by exactly one step even if the ratio would justify more.
    #[cold]
    fn grow(&mut self) {
        self.index += 1;
        let new_capacity = self.schedule[self.index];
        let old = mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for chain in old.into_vec() {
            for entry in chain {
                let slot = (self.ops.hash_value(&entry.value) % new_capacity as u64) as usize;
                self.buckets[slot].push(entry);
            }
        }
    }
}

impl<V, O> TallyTable<V, O> {
    /// The active capacity: the number of bucket slots.
    ///
    /// Always equal to one of the schedule sizes passed at construction, and
    /// never decreases.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tally_hash::TallyOps;
    /// # use tally_hash::TallyTable;
    /// #
    /// # struct ByteOps;
    /// # impl TallyOps<String> for ByteOps {
    /// #     fn hash_value(&self, value: &String) -> u64 {
    /// #         value.bytes().fold(0, |h, b| h.wrapping_mul(31).wrapping_add(b as u64))
    /// #     }
    /// #     fn equivalent(&self, a: &String, b: &String) -> bool {
    /// #         a == b
    /// #     }
    /// # }
    /// #
    /// let table: TallyTable<String, _> = TallyTable::new(ByteOps, &[11, 23], 0.75);
    /// assert_eq!(table.capacity(), 11);
    /// ```
    pub fn capacity(&self) -> usize {
        self.schedule[self.index]
    }

    /// The number of unique entries — one per equivalence class. O(1).
    pub fn unique_entries(&self) -> usize {
        self.unique
    }

    /// The sum of all frequencies: the number of successful `add` calls,
    /// duplicates included. O(1).
    pub fn total_entries(&self) -> u64 {
        self.total
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.unique == 0
    }

    /// Returns an iterator over all entries in arbitrary order.
    ///
    /// The order is stable only while the table is unmodified; an insertion
    /// that triggers growth reshuffles it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tally_hash::TallyOps;
    /// # use tally_hash::TallyTable;
    /// #
    /// # struct ByteOps;
    /// # impl TallyOps<String> for ByteOps {
    /// #     fn hash_value(&self, value: &String) -> u64 {
    /// #         value.bytes().fold(0, |h, b| h.wrapping_mul(31).wrapping_add(b as u64))
    /// #     }
    /// #     fn equivalent(&self, a: &String, b: &String) -> bool {
    /// #         a == b
    /// #     }
    /// # }
    /// #
    /// let mut table = TallyTable::new(ByteOps, &[11, 23, 47], 0.75);
    /// table.add("a".to_string());
    /// table.add("b".to_string());
    /// table.add("a".to_string());
    ///
    /// let total: u64 = table.iter().map(|entry| entry.frequency()).sum();
    /// assert_eq!(total, 3);
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: &self.buckets,
            bucket: 0,
            pos: 0,
            remaining: self.unique,
        }
    }

    /// Produces a flat snapshot of every entry, or `None` if the table is
    /// empty.
    ///
    /// The snapshot borrows the table's stored values; its length equals
    /// [`unique_entries`](TallyTable::unique_entries) at the time of the
    /// call, and its order is arbitrary. Multiple snapshots may coexist.
    /// An empty table yields an explicit `None` rather than an empty
    /// allocation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tally_hash::TallyOps;
    /// # use tally_hash::TallyTable;
    /// #
    /// # struct ByteOps;
    /// # impl TallyOps<String> for ByteOps {
    /// #     fn hash_value(&self, value: &String) -> u64 {
    /// #         value.bytes().fold(0, |h, b| h.wrapping_mul(31).wrapping_add(b as u64))
    /// #     }
    /// #     fn equivalent(&self, a: &String, b: &String) -> bool {
    /// #         a == b
    /// #     }
    /// # }
    /// #
    /// let mut table = TallyTable::new(ByteOps, &[11, 23, 47], 0.75);
    /// assert!(table.entries().is_none());
    ///
    /// table.add("solo".to_string());
    /// let snapshot = table.entries().unwrap();
    /// assert_eq!(snapshot.len(), 1);
    /// assert_eq!(snapshot[0].value(), "solo");
    /// ```
    pub fn entries(&self) -> Option<Vec<EntryRef<'_, V>>> {
        if self.unique == 0 {
            return None;
        }
        Some(self.iter().collect())
    }

    /// Scans every bucket once and reports chain-occupancy statistics.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tally_hash::TallyOps;
    /// # use tally_hash::TallyTable;
    /// #
    /// # struct ByteOps;
    /// # impl TallyOps<String> for ByteOps {
    /// #     fn hash_value(&self, value: &String) -> u64 {
    /// #         value.bytes().fold(0, |h, b| h.wrapping_mul(31).wrapping_add(b as u64))
    /// #     }
    /// #     fn equivalent(&self, a: &String, b: &String) -> bool {
    /// #         a == b
    /// #     }
    /// # }
    /// #
    /// let mut table = TallyTable::new(ByteOps, &[11, 23, 47], 0.75);
    /// let empty = table.metrics();
    /// assert_eq!(empty.num_chains, 0);
    /// assert_eq!(empty.avg_chain_len, 0.0);
    ///
    /// table.add("a".to_string());
    /// let metrics = table.metrics();
    /// assert_eq!(metrics.num_chains, 1);
    /// assert_eq!(metrics.max_chain_len, 1);
    /// assert_eq!(metrics.avg_chain_len, 1.0);
    /// ```
    pub fn metrics(&self) -> Metrics {
        let mut num_chains = 0;
        let mut max_chain_len = 0;
        let mut total_len = 0;
        for chain in &self.buckets {
            if chain.is_empty() {
                continue;
            }
            num_chains += 1;
            total_len += chain.len();
            max_chain_len = max_chain_len.max(chain.len());
        }

        Metrics {
            num_chains,
            max_chain_len,
            avg_chain_len: if num_chains == 0 {
                0.0
            } else {
                total_len as f64 / num_chains as f64
            },
        }
    }

    /// Consumes the table, yielding every entry with its frequency.
    ///
    /// This is the teardown path that hands the stored values back to the
    /// caller instead of dropping them; plain `drop` releases everything,
    /// running each value's own destructor exactly once.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use tally_hash::TallyOps;
    /// # use tally_hash::TallyTable;
    /// #
    /// # struct ByteOps;
    /// # impl TallyOps<String> for ByteOps {
    /// #     fn hash_value(&self, value: &String) -> u64 {
    /// #         value.bytes().fold(0, |h, b| h.wrapping_mul(31).wrapping_add(b as u64))
    /// #     }
    /// #     fn equivalent(&self, a: &String, b: &String) -> bool {
    /// #         a == b
    /// #     }
    /// # }
    /// #
    /// let mut table = TallyTable::new(ByteOps, &[11, 23, 47], 0.75);
    /// table.add("kept".to_string());
    /// table.add("kept".to_string());
    ///
    /// let mut entries: Vec<_> = table.into_entries().collect();
    /// assert_eq!(entries.len(), 1);
    /// let entry = entries.pop().unwrap();
    /// assert_eq!(entry.value, "kept");
    /// assert_eq!(entry.frequency, 2);
    /// ```
    pub fn into_entries(self) -> IntoEntries<V> {
        IntoEntries {
            inner: self.buckets.into_vec().into_iter().flatten(),
            remaining: self.unique,
        }
    }
}

impl<V, O> IntoIterator for TallyTable<V, O> {
    type Item = TallyEntry<V>;
    type IntoIter = IntoEntries<V>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_entries()
    }
}

impl<'a, V, O> IntoIterator for &'a TallyTable<V, O> {
    type Item = EntryRef<'a, V>;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over a table's entries.
///
/// Created by [`TallyTable::iter`]. Yields [`EntryRef`]s in arbitrary order.
pub struct Iter<'a, V> {
    buckets: &'a [Chain<V>],
    bucket: usize,
    pos: usize,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = EntryRef<'a, V>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.bucket < self.buckets.len() {
            let chain = &self.buckets[self.bucket];
            if self.pos < chain.len() {
                let entry = &chain[self.pos];
                self.pos += 1;
                self.remaining -= 1;
                return Some(EntryRef {
                    value: &entry.value,
                    frequency: entry.frequency,
                });
            }
            self.bucket += 1;
            self.pos = 0;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
impl<V> FusedIterator for Iter<'_, V> {}

/// Consuming iterator over a table's entries.
///
/// Created by [`TallyTable::into_entries`]. Yields owned [`TallyEntry`]s in
/// arbitrary order.
pub struct IntoEntries<V> {
    inner: Flatten<alloc::vec::IntoIter<Chain<V>>>,
    remaining: usize,
}

impl<V> Iterator for IntoEntries<V> {
    type Item = TallyEntry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.inner.next()?;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IntoEntries<V> {}
impl<V> FusedIterator for IntoEntries<V> {}
