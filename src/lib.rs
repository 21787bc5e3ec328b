//! chainmap: a single-threaded separate-chaining hash map whose table and
//! buckets both resize under an explicit, named load-factor policy.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the resize policy a first-class, testable design choice
//!   instead of delegating growth to the standard containers.
//! - Layers:
//!   - DynVec<T>: structural buffer with amortized O(1) append and
//!     order-preserving removal; capacity moves only when an operation
//!     pushes the load factor outside `[MIN_LOAD_FACTOR, MAX_LOAD_FACTOR]`,
//!     always by `GROWTH_FACTOR`.
//!   - ChainMap<K, V, S>: power-of-two array of DynVec buckets; colliding
//!     entries chain inside their bucket, and inserts/removals rehash the
//!     whole table when the global load factor leaves the same band.
//!
//! Constraints
//! - Single-threaded: no interior mutability, no atomics; concurrent use
//!   must be serialized by the caller.
//! - Ownership is tree-shaped: the map owns its buckets, buckets own their
//!   entries. Dropping the map drops everything.
//! - Absent is `None`, never a sentinel value: out-of-bounds access,
//!   missing keys, and failed removals all surface as `Option`.
//! - Iteration order is unspecified and changes across rehashes.
//!
//! Hasher and rehashing invariants
//! - Generic over `S: BuildHasher`; the default state is `ahash`. Each
//!   entry stores the `u64` hash computed at insertion and indexing always
//!   uses the stored hash, so `K: Hash` is never invoked after insert and
//!   rehashing never calls user code.
//! - The bucket count is a power of two, so the bucket index is
//!   `hash & (capacity - 1)`.
//! - Rehash builds a fresh bucket array and drains the old one into it.
//!   The old array is consumed bucket by bucket, which makes "no entry
//!   skipped, none processed twice" structural rather than a property of
//!   index arithmetic, and the caller never observes a half-migrated table.
//!
//! Notes and non-goals
//! - No thread-safety, no persistence, no deletion-stable indices.
//! - Removal shifts later bucket entries left; positions inside a bucket
//!   are an implementation detail and never exposed.
//! - Policy knobs (initial capacity, growth factor, load thresholds) are
//!   named constants in each module, not runtime configuration.

pub mod chain_map;
pub mod dyn_vec;

mod chain_map_proptest;

// Public surface
pub use chain_map::ChainMap;
pub use dyn_vec::DynVec;
