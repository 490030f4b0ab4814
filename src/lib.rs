//! probe-set: an open-addressing hash set of `i64` keys with linear probing,
//! doubling growth on a configurable load-factor threshold, and a pluggable
//! hash strategy.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, fully observable open-addressing table whose structural
//!   behavior (growths, probe steps) can be measured per hash strategy and
//!   load-factor threshold.
//! - Layers:
//!   - `hashing`: closed set of `HashKind`s, resolved once per table into a
//!     `KeyHasher` behind the `HashKey` trait.
//!   - `table`: `OpenAddressingHashSet`, the slot array, probing and growth.
//!   - `experiment`: sweeps thresholds x strategies over a key sequence and
//!     hands timing and counters to a `ReportSink`.
//!
//! Constraints
//! - Single-threaded; mutation takes `&mut self`, nothing is shared.
//! - Capacity starts at 8 and only ever doubles; no deletion, no shrink.
//! - Set semantics: inserting a present key is a no-op returning `false`.
//!
//! Growth
//! - Triggered before placement when `(len + 1) / capacity` would exceed the
//!   threshold. The target is the smallest doubling that takes one more key,
//!   reached with a single rehash even when it spans several doublings.
//! - Always a full rehash into a new array, which replaces the old one only
//!   once populated. Allocation failure returns `OutOfMemory` and leaves the
//!   table as it was.
//! - Resets `collision_count`; `total_collisions` keeps the lifetime sum.
//!
//! Determinism
//! - `Modulo`, `Mix64`, `Xxh64`, `Murmur3` and `Digest64` give identical
//!   layouts for the same insertion order on every build. `Default` is
//!   whatever `hashbrown` provides: implementation-defined and not
//!   guaranteed stable across versions or builds.
//!
//! Logging goes through the `log` facade; the crate never installs a logger.

pub mod config;
pub mod error;
pub mod experiment;
pub mod hashing;
pub mod table;
mod table_proptest;

// Public surface
pub use config::TableConfig;
pub use error::{Result, TableError};
pub use experiment::{run_experiment, ExperimentConfig, LogSink, ReportSink, RunReport};
pub use hashing::{DigestAlgorithm, HashKey, HashKind, KeyHasher};
pub use table::{OpenAddressingHashSet, TableStats, INITIAL_CAPACITY};
