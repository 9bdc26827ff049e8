//! Positional insertion and removal.
//!
//! Positions are indices. Insertion accepts `pos <= len` (so `pos == len`
//! appends); removal accepts `pos < len`. Anything outside those ranges is
//! a contract violation and panics.
//!
//! Shifts are explicit per-slot loops: rightward shifts walk backward from
//! the end so no value is overwritten before it is read, leftward shifts
//! walk forward.

use std::ptr;

use vessel_raw::RawStorage;

use crate::vector::{Vector, GROWTH};

impl<T> Vector<T> {
    /// Insert `value` at `pos`, shifting `[pos, len)` one slot right.
    ///
    /// Returns the index of the inserted value (always `pos`).
    ///
    /// # Panics
    ///
    /// Panics if `pos > len()`.
    pub fn insert(&mut self, pos: usize, value: T) -> usize {
        self.emplace(pos, || value)
    }

    /// Insert the value built by `make` at `pos`.
    ///
    /// With spare capacity the value is built first, then the tail is
    /// shifted right in place and the value is moved into `pos`. Without
    /// it, a block of `max(1, capacity * 2)` slots is allocated, the value
    /// is constructed into its final slot there, and the prefix and suffix
    /// are relocated around it. Either way, if `make` panics the array is
    /// untouched.
    ///
    /// # Panics
    ///
    /// Panics if `pos > len()`.
    pub fn emplace<F>(&mut self, pos: usize, make: F) -> usize
    where
        F: FnOnce() -> T,
    {
        assert!(
            pos <= self.len,
            "insertion position {pos} out of range for length {}",
            self.len
        );

        if self.len < self.capacity() {
            let value = make();
            let base = self.storage.as_mut_ptr();
            // SAFETY: len < capacity, so slot len is free. Each iteration
            // moves the live value at i - 1 into slot i, which is either the
            // free end slot or a slot whose value was already moved on.
            // Slot pos is vacated last and receives the new value.
            unsafe {
                let mut i = self.len;
                while i > pos {
                    ptr::copy_nonoverlapping(base.add(i - 1), base.add(i), 1);
                    i -= 1;
                }
                base.add(pos).write(value);
            }
            self.len += 1;
            return pos;
        }

        let mut fresh = RawStorage::<T>::allocate(GROWTH.grow(self.capacity()));
        let value = make();
        log::debug!(
            "vector: inserting at {pos} with relocation, capacity {} -> {}",
            self.capacity(),
            fresh.capacity()
        );
        let src = self.storage.as_ptr();
        let dst = fresh.as_mut_ptr();
        // SAFETY: fresh holds at least len + 1 slots and is a distinct block.
        // The prefix [0, pos) keeps its indices, the suffix [pos, len) moves
        // up by one, and slot pos receives the new value. The old block is
        // released below without dropping the moved-out values.
        unsafe {
            dst.add(pos).write(value);
            ptr::copy_nonoverlapping(src, dst, pos);
            ptr::copy_nonoverlapping(src.add(pos), dst.add(pos + 1), self.len - pos);
        }
        self.storage.swap(&mut fresh);
        self.len += 1;
        pos
    }

    /// Remove and drop the value at `pos`, shifting `(pos, len)` one slot
    /// left.
    ///
    /// Returns `pos`, which now indexes the value that followed the erased
    /// one, or equals `len()` if the erased value was last.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len()`.
    pub fn erase(&mut self, pos: usize) -> usize {
        drop(self.remove(pos));
        pos
    }

    /// Remove and return the value at `pos`, shifting `(pos, len)` one slot
    /// left.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len()`.
    pub fn remove(&mut self, pos: usize) -> T {
        assert!(
            pos < self.len,
            "removal position {pos} out of range for length {}",
            self.len
        );
        let base = self.storage.as_mut_ptr();
        // SAFETY: pos < len, so slot pos is live and is read out exactly once.
        // Each iteration moves the live value at i + 1 into slot i, which
        // was vacated by the previous step. The last slot ends up vacated
        // and falls outside the live range once len is decremented.
        let removed = unsafe {
            let removed = base.add(pos).read();
            for i in pos..self.len - 1 {
                ptr::copy_nonoverlapping(base.add(i + 1), base.add(i), 1);
            }
            removed
        };
        self.len -= 1;
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use vessel_test_utils::{Ledger, Tracked};

    #[test]
    fn insert_at_end_matches_push_back() {
        let mut a: Vector<i32> = (0..5).collect();
        let mut b = a.clone();
        a.insert(a.len(), 99);
        b.push_back(99);
        assert_eq!(a, b);
        assert_eq!(a.capacity(), b.capacity());
    }

    #[test]
    fn insert_at_front_shifts_right() {
        let mut v: Vector<i32> = (1..=4).collect();
        v.reserve(8);
        let at = v.insert(0, 0);
        assert_eq!(at, 0);
        assert_eq!(v, [0, 1, 2, 3, 4]);
        assert_eq!(v.capacity(), 8);
    }

    #[test]
    fn insert_in_place_keeps_block() {
        let mut v = Vector::with_capacity(4);
        v.push_back("a");
        v.push_back("c");
        let block = v.begin();
        v.insert(1, "b");
        assert_eq!(v, ["a", "b", "c"]);
        assert_eq!(v.begin(), block);
    }

    #[test]
    fn insert_with_growth_doubles() {
        let mut v: Vector<i32> = (0..4).collect();
        assert_eq!(v.capacity(), 4);
        v.insert(2, 100);
        assert_eq!(v, [0, 1, 100, 2, 3]);
        assert_eq!(v.capacity(), 8);
    }

    #[test]
    fn insert_into_empty() {
        let mut v = Vector::new();
        v.insert(0, 'x');
        assert_eq!(v, ['x']);
        assert_eq!(v.capacity(), 1);
    }

    #[test]
    #[should_panic(expected = "insertion position 3 out of range for length 2")]
    fn insert_past_end_panics() {
        let mut v: Vector<i32> = (0..2).collect();
        v.insert(3, 0);
    }

    #[test]
    fn emplace_panic_in_place_leaves_vector_untouched() {
        let mut v = Vector::with_capacity(8);
        v.push_back(1);
        v.push_back(2);
        let result = catch_unwind(AssertUnwindSafe(|| {
            v.emplace(1, || panic!("constructor failed"));
        }));
        assert!(result.is_err());
        assert_eq!(v, [1, 2]);
    }

    #[test]
    fn emplace_panic_with_growth_leaves_vector_untouched() {
        let mut v: Vector<i32> = (0..3).collect();
        let block = v.begin();
        let result = catch_unwind(AssertUnwindSafe(|| {
            v.emplace(0, || panic!("constructor failed"));
        }));
        assert!(result.is_err());
        assert_eq!(v, [0, 1, 2]);
        assert_eq!(v.capacity(), 3);
        assert_eq!(v.begin(), block);
    }

    #[test]
    fn erase_shifts_left_and_returns_position() {
        let ledger = Ledger::new();
        let mut v: Vector<Tracked> = (1..=4).map(|x| Tracked::new(x, &ledger)).collect();
        let next = v.erase(1);
        assert_eq!(next, 1);
        assert_eq!(v[next].value(), 3);
        assert_eq!(v.iter().map(Tracked::value).collect::<Vec<_>>(), [1, 3, 4]);
        assert_eq!(ledger.dropped(), 1);
        assert_eq!(v.capacity(), 4);
    }

    #[test]
    fn erase_last_returns_end() {
        let mut v: Vector<i32> = (0..3).collect();
        let next = v.erase(2);
        assert_eq!(next, v.len());
        assert_eq!(v, [0, 1]);
    }

    #[test]
    #[should_panic(expected = "removal position 2 out of range for length 2")]
    fn erase_at_end_panics() {
        let mut v: Vector<i32> = (0..2).collect();
        v.erase(2);
    }

    #[test]
    fn remove_returns_value() {
        let mut v: Vector<String> = ["x", "y", "z"].iter().map(|s| s.to_string()).collect();
        assert_eq!(v.remove(0), "x");
        assert_eq!(v, ["y", "z"]);
    }

    #[test]
    fn insert_and_erase_never_clone() {
        let ledger = Ledger::new();
        let mut v = Vector::new();
        for i in 0..10 {
            v.insert(i / 2, Tracked::new(i as i32, &ledger));
        }
        for _ in 0..5 {
            v.erase(0);
        }
        assert_eq!(ledger.cloned(), 0);
        assert_eq!(ledger.live(), 5);
        drop(v);
        assert_eq!(ledger.live(), 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn insert_matches_model(
                start in proptest::collection::vec(any::<u8>(), 0..30),
                inserts in proptest::collection::vec((any::<usize>(), any::<u8>()), 1..30),
            ) {
                let mut v: Vector<u8> = start.iter().copied().collect();
                let mut model = start.clone();
                for (raw_pos, value) in inserts {
                    let pos = raw_pos % (model.len() + 1);
                    prop_assert_eq!(v.insert(pos, value), pos);
                    model.insert(pos, value);
                }
                prop_assert_eq!(v.as_slice(), model.as_slice());
            }

            #[test]
            fn erase_then_insert_restores(
                start in proptest::collection::vec(any::<i32>(), 1..50),
                raw_pos in any::<usize>(),
            ) {
                let mut v: Vector<i32> = start.iter().copied().collect();
                let pos = raw_pos % start.len();
                let value = v[pos];
                v.erase(pos);
                v.insert(pos, value);
                prop_assert_eq!(v.as_slice(), start.as_slice());
            }
        }
    }
}
