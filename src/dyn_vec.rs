//! DynVec: structural layer. A contiguous buffer whose capacity is driven
//! by explicit load-factor thresholds instead of `Vec`'s growth heuristic.

/// Capacity of a freshly created `DynVec`.
pub const INITIAL_CAPACITY: usize = 16;
/// Multiplicative factor applied when growing, and divided out when shrinking.
pub const GROWTH_FACTOR: usize = 2;
/// Load factor above which a push triggers a grow.
pub const MAX_LOAD_FACTOR: f64 = 0.75;
/// Load factor below which an erase triggers a shrink.
pub const MIN_LOAD_FACTOR: f64 = 0.25;

/// A growable buffer with amortized O(1) append and order-preserving removal.
///
/// Capacity moves only when an operation pushes the load factor
/// (`len / capacity`) outside `[MIN_LOAD_FACTOR, MAX_LOAD_FACTOR]`, and then
/// always by `GROWTH_FACTOR`. The backing allocation is sized to the policy
/// capacity up front, so a push within policy capacity never reallocates;
/// `ChainMap`'s rehash depends on buckets not moving storage mid-scan.
#[derive(Debug, Clone)]
pub struct DynVec<T> {
    buf: Vec<T>,
    // Policy capacity. The backing `Vec` may round its own allocation up,
    // so `buf.capacity()` is a lower bound witness, not the policy value.
    cap: usize,
}

impl<T> DynVec<T> {
    /// Create an empty buffer at `INITIAL_CAPACITY`.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(INITIAL_CAPACITY),
            cap: INITIAL_CAPACITY,
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Policy capacity; always `>= 1` and `>= len`.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// `len / capacity` as a real number.
    pub fn load_factor(&self) -> f64 {
        self.buf.len() as f64 / self.cap as f64
    }

    /// Element at `index`, or `None` when `index >= len`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.buf.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.buf.get_mut(index)
    }

    /// Index of the first element equal to `value`; linear scan.
    pub fn find(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.buf.iter().position(|elem| elem == value)
    }

    /// Append `value`, growing capacity by `GROWTH_FACTOR` when the load
    /// factor exceeds `MAX_LOAD_FACTOR` afterwards.
    pub fn push(&mut self, value: T) {
        debug_assert!(self.buf.len() < self.cap, "push must fit policy capacity");
        self.buf.push(value);
        if self.load_factor() > MAX_LOAD_FACTOR {
            self.rebuffer(self.cap * GROWTH_FACTOR);
        }
    }

    /// Remove and return the element at `index`, shifting later elements left
    /// (relative order preserved). Shrinks capacity by `GROWTH_FACTOR` when
    /// the load factor drops below `MIN_LOAD_FACTOR`, never below 1.
    /// Returns `None` when `index >= len`, leaving the buffer untouched.
    pub fn erase(&mut self, index: usize) -> Option<T> {
        if index >= self.buf.len() {
            return None;
        }
        let value = self.buf.remove(index);
        if self.load_factor() < MIN_LOAD_FACTOR && self.cap > 1 {
            self.rebuffer(self.cap / GROWTH_FACTOR);
        }
        Some(value)
    }

    /// Erase the last element until empty, applying the shrink policy at
    /// every step exactly as the element-at-a-time drain would.
    pub fn clear(&mut self) {
        while !self.buf.is_empty() {
            let _ = self.erase(self.buf.len() - 1);
        }
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.buf.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.buf.iter_mut()
    }

    /// Move the contents into a buffer allocated for exactly the new policy
    /// capacity. Callers guarantee `new_cap >= len`.
    fn rebuffer(&mut self, new_cap: usize) {
        debug_assert!(new_cap >= self.buf.len());
        let mut next = Vec::with_capacity(new_cap);
        next.append(&mut self.buf);
        self.buf = next;
        self.cap = new_cap;
    }
}

impl<T> Default for DynVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntoIterator for DynVec<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        self.buf.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a DynVec<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: a fresh buffer is empty at `INITIAL_CAPACITY` and reports a
    /// zero load factor.
    #[test]
    fn new_is_empty_at_initial_capacity() {
        let v: DynVec<i32> = DynVec::new();
        assert_eq!(v.len(), 0);
        assert!(v.is_empty());
        assert_eq!(v.capacity(), INITIAL_CAPACITY);
        assert_eq!(v.load_factor(), 0.0);
    }

    /// Invariant: capacity doubles exactly when a push takes the load factor
    /// past `MAX_LOAD_FACTOR`, and the load factor is back in bounds after.
    #[test]
    fn push_grows_past_max_load() {
        let mut v = DynVec::new();
        let threshold = (INITIAL_CAPACITY as f64 * MAX_LOAD_FACTOR) as usize;
        for i in 0..threshold {
            v.push(i);
            assert_eq!(v.capacity(), INITIAL_CAPACITY);
        }
        // One more crosses the threshold.
        v.push(threshold);
        assert_eq!(v.capacity(), INITIAL_CAPACITY * GROWTH_FACTOR);
        assert!(v.load_factor() <= MAX_LOAD_FACTOR);
        for i in 0..=threshold {
            assert_eq!(v.get(i), Some(&i));
        }
    }

    /// Invariant: erase shifts later elements left preserving relative order,
    /// and a push followed by an erase at the same index restores the prior
    /// size with all other elements in place.
    #[test]
    fn erase_preserves_order() {
        let mut v = DynVec::new();
        for i in 0..8 {
            v.push(i);
        }
        assert_eq!(v.erase(3), Some(3));
        let after: Vec<i32> = v.iter().copied().collect();
        assert_eq!(after, [0, 1, 2, 4, 5, 6, 7]);

        let before_len = v.len();
        v.push(99);
        assert_eq!(v.erase(before_len), Some(99));
        assert_eq!(v.len(), before_len);
        let restored: Vec<i32> = v.iter().copied().collect();
        assert_eq!(restored, after);
    }

    /// Invariant: erase out of bounds is a `None` no-op; the buffer is
    /// unchanged.
    #[test]
    fn erase_out_of_bounds_is_noop() {
        let mut v = DynVec::new();
        v.push("a");
        assert_eq!(v.erase(1), None);
        assert_eq!(v.erase(usize::MAX), None);
        assert_eq!(v.len(), 1);
        assert_eq!(v.get(0), Some(&"a"));
    }

    /// Invariant: capacity halves when the load factor drops below
    /// `MIN_LOAD_FACTOR`, and never drops below 1.
    #[test]
    fn erase_shrinks_below_min_load() {
        let mut v = DynVec::new();
        // Grow to capacity 32 first.
        for i in 0..13 {
            v.push(i);
        }
        assert_eq!(v.capacity(), 32);
        // Drain until load dips under 0.25: at len 7, 7/32 < 0.25.
        while v.len() > 7 {
            v.erase(v.len() - 1);
        }
        assert_eq!(v.capacity(), 16);

        let mut w: DynVec<i32> = DynVec::new();
        w.push(1);
        w.erase(0);
        // Shrinks on the way down but bottoms out at 1.
        while w.capacity() > 1 {
            w.push(0);
            w.erase(0);
        }
        assert_eq!(w.capacity(), 1);
        w.push(5);
        assert_eq!(w.get(0), Some(&5));
    }

    /// Invariant: `find` returns the first matching index; `get` past the end
    /// returns `None`.
    #[test]
    fn find_and_get_bounds() {
        let mut v = DynVec::new();
        for x in ["a", "b", "b", "c"] {
            v.push(x);
        }
        assert_eq!(v.find(&"b"), Some(1));
        assert_eq!(v.find(&"z"), None);
        assert_eq!(v.get(3), Some(&"c"));
        assert_eq!(v.get(4), None);
    }

    /// Invariant: `clear` empties the buffer and applies the same shrink
    /// policy as erasing elements one by one.
    #[test]
    fn clear_empties_and_shrinks() {
        let mut v = DynVec::new();
        for i in 0..10 {
            v.push(i);
        }
        v.clear();
        assert!(v.is_empty());
        assert!(v.capacity() < INITIAL_CAPACITY);
        assert!(v.capacity() >= 1);
        // The buffer stays usable after clearing.
        v.push(42);
        assert_eq!(v.get(0), Some(&42));
    }

    /// Invariant: the load factor stays within `(0, MAX_LOAD_FACTOR]` after
    /// every push and within `[MIN_LOAD_FACTOR, 1]` after every erase on a
    /// non-trivial buffer.
    #[test]
    fn load_factor_bounded_after_every_mutation() {
        let mut v = DynVec::new();
        for i in 0..200 {
            v.push(i);
            assert!(v.load_factor() <= MAX_LOAD_FACTOR);
        }
        while v.len() > 1 {
            v.erase(0);
            assert!(v.load_factor() >= MIN_LOAD_FACTOR);
        }
    }
}
