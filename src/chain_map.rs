//! ChainMap: separate-chaining table layered over `DynVec` buckets.

use crate::dyn_vec::DynVec;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::mem;

/// Bucket count of a freshly created `ChainMap`; a power of two.
pub const INITIAL_CAPACITY: usize = 16;
/// Floor for shrinking; the bucket count never drops below this.
pub const MIN_CAPACITY: usize = 1;
/// Factor by which the bucket count doubles on grow and halves on shrink.
pub const GROWTH_FACTOR: usize = 2;
/// Global load factor above which an insert triggers a growing rehash.
pub const MAX_LOAD_FACTOR: f64 = 0.75;
/// Global load factor below which a removal triggers a shrinking rehash.
pub const MIN_LOAD_FACTOR: f64 = 0.25;

// Each entry keeps the full 64-bit hash computed at insertion. Indexing and
// rehashing always use the stored hash, so `K: Hash` is never re-invoked
// after insert and rehash never calls user code.
#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
    hash: u64,
}

/// A hash map that chains colliding entries into per-bucket `DynVec`s.
///
/// The bucket count is always a power of two, so the bucket index is the
/// stored hash masked by `capacity - 1`. Inserts double the bucket count
/// when the global load factor (`len / capacity`) exceeds
/// `MAX_LOAD_FACTOR`; removals halve it when the load factor drops below
/// `MIN_LOAD_FACTOR`. Rehashing builds a fresh bucket array and drains the
/// old one into it, so a caller never observes a partially migrated table.
pub struct ChainMap<K, V, S = ahash::RandomState> {
    buckets: Vec<DynVec<Entry<K, V>>>,
    len: usize,
    hasher: S,
}

impl<K, V> ChainMap<K, V>
where
    K: Eq + Hash,
{
    /// Create an empty map with `INITIAL_CAPACITY` buckets and the default
    /// hasher state.
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<K, V> Default for ChainMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ChainMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Create an empty map with `INITIAL_CAPACITY` buckets and the given
    /// hasher state.
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            buckets: empty_buckets(INITIAL_CAPACITY),
            len: 0,
            hasher,
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current bucket count; always a power of two `>= MIN_CAPACITY`.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// `len / capacity` as a real number.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    // Valid array index because the bucket count is a power of two.
    fn bucket_index(&self, hash: u64) -> usize {
        (hash as usize) & (self.buckets.len() - 1)
    }

    // Bucket index and in-bucket slot of the entry for `q`, if present.
    fn locate<Q>(&self, q: &Q) -> Option<(usize, usize)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        let index = self.bucket_index(hash);
        let slot = self.buckets[index]
            .iter()
            .position(|entry| entry.hash == hash && entry.key.borrow() == q)?;
        Some((index, slot))
    }

    /// Insert a key/value pair. When the key is already present, the value is
    /// replaced in place and the previous value returned; `len` is unchanged.
    /// Otherwise the entry joins its bucket and `len` grows by one. Either
    /// way, the table rehashes to double the bucket count if the load factor
    /// ends up above `MAX_LOAD_FACTOR`.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.make_hash(&key);
        let index = self.bucket_index(hash);
        let bucket = &mut self.buckets[index];
        let slot = bucket
            .iter()
            .position(|entry| entry.hash == hash && entry.key == key);
        let previous = match slot {
            Some(slot) => {
                let entry = bucket.get_mut(slot).expect("slot from position is in bounds");
                Some(mem::replace(&mut entry.value, value))
            }
            None => {
                bucket.push(Entry { key, value, hash });
                self.len += 1;
                None
            }
        };
        if self.load_factor() > MAX_LOAD_FACTOR {
            self.rehash(self.buckets.len() * GROWTH_FACTOR);
        }
        previous
    }

    /// Value for `q`, scanning only the target bucket.
    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (index, slot) = self.locate(q)?;
        self.buckets[index].get(slot).map(|entry| &entry.value)
    }

    /// Mutable value for `q`.
    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (index, slot) = self.locate(q)?;
        self.buckets[index].get_mut(slot).map(|entry| &mut entry.value)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.locate(q).is_some()
    }

    /// Whether any entry holds a value equal to `value`. Scans buckets in
    /// index order, stopping once `len` entries have been examined or a
    /// match is found. O(len) worst case.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        let mut examined = 0;
        for bucket in &self.buckets {
            if examined >= self.len {
                break;
            }
            for entry in bucket {
                if entry.value == *value {
                    return true;
                }
                examined += 1;
            }
        }
        false
    }

    /// Remove the entry for `q` and return its value, or `None` when the key
    /// is absent. On success the table rehashes to halve the bucket count if
    /// the load factor drops below `MIN_LOAD_FACTOR` (respecting
    /// `MIN_CAPACITY`).
    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (index, slot) = self.locate(q)?;
        let entry = self.buckets[index]
            .erase(slot)
            .expect("located slot is in bounds");
        self.len -= 1;
        if self.load_factor() < MIN_LOAD_FACTOR && self.buckets.len() > MIN_CAPACITY {
            self.rehash(self.buckets.len() / GROWTH_FACTOR);
        }
        Some(entry.value)
    }

    /// Drain every bucket until the map is empty, shrinking opportunistically
    /// as the load factor drops. A shrink mid-drain moves the end of the
    /// table below the scan position; the outer loop restarts the scan, and
    /// the drain terminates because `len` strictly decreases across any full
    /// pass over a non-empty table.
    pub fn clear(&mut self) {
        while self.len > 0 {
            for index in 0..self.buckets.len() {
                let Some(bucket) = self.buckets.get_mut(index) else {
                    break;
                };
                let drained = bucket.len();
                bucket.clear();
                self.len -= drained;
                if self.load_factor() < MIN_LOAD_FACTOR && self.buckets.len() > MIN_CAPACITY {
                    self.rehash(self.buckets.len() / GROWTH_FACTOR);
                }
                if self.len == 0 {
                    return;
                }
            }
        }
    }

    /// Redistribute every entry into a fresh bucket array of `new_capacity`
    /// slots, then swap it in. Entries land at `stored_hash & (new_capacity
    /// - 1)`; the old array is consumed bucket by bucket, so no entry can be
    /// skipped or processed twice, and the caller-visible table is never
    /// partially migrated.
    fn rehash(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity.is_power_of_two());
        debug_assert!(new_capacity >= MIN_CAPACITY);
        let old = mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        let mask = new_capacity - 1;
        for bucket in old {
            for entry in bucket {
                self.buckets[(entry.hash as usize) & mask].push(entry);
            }
        }
    }
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<DynVec<Entry<K, V>>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, DynVec::new);
    buckets
}
