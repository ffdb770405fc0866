#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// A frequency multiset for `Hash + Eq` values.
///
/// This module provides a `Counter` that wraps the `TallyTable` and counts
/// insertions of each distinct value with a configurable hasher.
pub mod counter;

/// The core chained tally table.
///
/// This module provides a `TallyTable` that deduplicates values, counts
/// insertion frequencies, and grows through a fixed capacity schedule, with
/// hashing and equivalence supplied per instance via `TallyOps`.
pub mod tally_table;

pub use counter::Counter;
pub use tally_table::Added;
pub use tally_table::EntryRef;
pub use tally_table::HasherOps;
pub use tally_table::Metrics;
pub use tally_table::TallyEntry;
pub use tally_table::TallyOps;
pub use tally_table::TallyTable;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder a [`Counter`] uses unless one is supplied.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The hasher builder a [`Counter`] uses unless one is supplied.
        pub type DefaultHashBuilder = std::collections::hash_map::RandomState;
    } else {
        /// Stand-in hasher builder when neither `std` nor `foldhash` is
        /// enabled; it does not implement `BuildHasher`, so a `Counter`
        /// must be given one explicitly via `with_hasher`.
        pub type DefaultHashBuilder = ();
    }
}
