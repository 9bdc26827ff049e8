//! The dynamic array: construction, assignment, growth, access.
//!
//! Positional insertion and removal live in a separate `impl` block in
//! `positional.rs`; std trait impls live in `traits.rs`.

use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use vessel_core::{AllocError, GrowthPolicy};
use vessel_raw::RawStorage;

/// Growth applied by every append and resize.
pub(crate) const GROWTH: GrowthPolicy = GrowthPolicy::DOUBLING;

/// A growable, contiguous array of `T`.
///
/// Invariant: `len <= storage.capacity()`. Slots below `len` are live,
/// slots at or above it are uninitialised.
///
/// # Example
///
/// ```
/// use vessel_vec::Vector;
///
/// let mut v = Vector::new();
/// v.push_back('a');
/// v.push_back('c');
/// v.insert(1, 'b');
/// assert_eq!(v, ['a', 'b', 'c']);
/// assert_eq!(v.capacity(), 4);
///
/// v.erase(0);
/// assert_eq!(v, ['b', 'c']);
/// ```
pub struct Vector<T> {
    pub(crate) storage: RawStorage<T>,
    pub(crate) len: usize,
}

impl<T> Vector<T> {
    /// An empty array. Does not allocate.
    pub const fn new() -> Self {
        Self {
            storage: RawStorage::new(),
            len: 0,
        }
    }

    /// An empty array with room for exactly `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: RawStorage::allocate(capacity),
            len: 0,
        }
    }

    /// An array of `len` default values, with capacity exactly `len`.
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        let mut v = Self::with_capacity(len);
        for _ in 0..len {
            v.push_within_capacity(T::default());
        }
        v
    }

    /// An array of `len` clones of `elem`, with capacity exactly `len`.
    pub fn from_elem(elem: T, len: usize) -> Self
    where
        T: Clone,
    {
        let mut v = Self::with_capacity(len);
        if len > 0 {
            for _ in 1..len {
                v.push_within_capacity(elem.clone());
            }
            v.push_within_capacity(elem);
        }
        v
    }

    /// Move the contents out, leaving `self` empty with no storage.
    pub fn take(&mut self) -> Self {
        Self {
            storage: self.storage.take(),
            len: mem::replace(&mut self.len, 0),
        }
    }

    /// Replace the contents with `source`'s, leaving `source` empty.
    ///
    /// The previous contents of `self` are dropped.
    pub fn move_assign(&mut self, source: &mut Self) {
        let incoming = source.take();
        *self = incoming;
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of live values. Alias of [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.len
    }

    /// Whether there are no live values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in the current storage.
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Address of the first live value (or of slot 0 when empty).
    pub fn begin(&self) -> *const T {
        self.storage.as_ptr()
    }

    /// One-past-the-end address of the live range. Never dereference it.
    pub fn end(&self) -> *const T {
        self.storage.slot(self.len)
    }

    /// The live values as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots [0, len) are live and the base is aligned and non-null.
        unsafe { slice::from_raw_parts(self.storage.as_ptr(), self.len) }
    }

    /// The live values as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: see as_slice; &mut self guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.storage.as_mut_ptr(), self.len) }
    }

    /// Grow the storage to exactly `new_capacity` slots.
    ///
    /// No-op when `new_capacity <= capacity()`: nothing is relocated and
    /// every address stays valid. Otherwise live values are moved into a
    /// fresh block and the old one is released.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; aborts on allocator failure.
    pub fn reserve(&mut self, new_capacity: usize) {
        if new_capacity <= self.capacity() {
            return;
        }
        let fresh = RawStorage::allocate(new_capacity);
        self.relocate_into(fresh);
    }

    /// Fallible variant of [`reserve`](Self::reserve).
    ///
    /// On error the array is unchanged.
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<(), AllocError> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }
        let fresh = RawStorage::try_allocate(new_capacity)?;
        self.relocate_into(fresh);
        Ok(())
    }

    /// Reallocate to exactly `len()` slots. No-op when already tight.
    pub fn shrink_to_fit(&mut self) {
        if self.capacity() == self.len {
            return;
        }
        let fresh = RawStorage::allocate(self.len);
        self.relocate_into(fresh);
    }

    /// Set the length to `new_len`.
    ///
    /// Shrinking drops `[new_len, len)`. Growing first reserves
    /// `max(capacity * 2, new_len)` if needed, then fills the new slots
    /// with `make()` in index order.
    pub fn resize_with<F>(&mut self, new_len: usize, mut make: F)
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }
        if new_len > self.capacity() {
            self.reserve(GROWTH.grow_to(self.capacity(), new_len));
        }
        while self.len < new_len {
            self.push_within_capacity(make());
        }
    }

    /// [`resize_with`](Self::resize_with) using `T::default()`.
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default);
    }

    /// Append `value`, growing to `max(1, capacity * 2)` when full.
    pub fn push_back(&mut self, value: T) -> &mut T {
        self.emplace_back(|| value)
    }

    /// Append the value built by `make`.
    ///
    /// When the array is full, the new block is allocated and the value is
    /// constructed into its final slot before any existing value is
    /// relocated. If `make` panics the array is untouched.
    pub fn emplace_back<F>(&mut self, make: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        if self.len < self.capacity() {
            return self.push_within_capacity(make());
        }

        let mut fresh = RawStorage::<T>::allocate(GROWTH.grow(self.capacity()));
        let value = make();
        // SAFETY: fresh capacity > len, and the slot is not live.
        unsafe { fresh.slot_mut(self.len).write(value) };
        self.relocate_into(fresh);

        let slot = self.storage.slot_mut(self.len);
        self.len += 1;
        // SAFETY: the slot was written above and is now inside [0, len).
        unsafe { &mut *slot }
    }

    /// Drop the last value.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    pub fn pop_back(&mut self) {
        assert!(self.len > 0, "pop_back on an empty vector");
        self.len -= 1;
        // SAFETY: the slot at the old len - 1 was live and is now outside
        // the live range, so it is dropped exactly once.
        unsafe { ptr::drop_in_place(self.storage.slot_mut(self.len)) };
    }

    /// Remove and return the last value, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: as in pop_back; ownership moves to the caller instead.
        Some(unsafe { self.storage.slot(self.len).read() })
    }

    /// Drop every value at index `new_len` and above.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let tail =
            ptr::slice_from_raw_parts_mut(self.storage.slot_mut(new_len), self.len - new_len);
        // Shrink first so a panicking destructor cannot cause a double drop.
        self.len = new_len;
        // SAFETY: tail covers the previously live slots [new_len, old len).
        unsafe { ptr::drop_in_place(tail) };
    }

    /// Drop every value, keeping the storage.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Exchange contents and storage with `other`. O(1).
    ///
    /// This shadows the slice method of the same name; swap two elements
    /// with `as_mut_slice().swap(a, b)`.
    pub fn swap(&mut self, other: &mut Self) {
        self.storage.swap(&mut other.storage);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Write `value` into the first free slot.
    ///
    /// Callers guarantee `len < capacity`.
    pub(crate) fn push_within_capacity(&mut self, value: T) -> &mut T {
        debug_assert!(self.len < self.capacity());
        let slot = self.storage.slot_mut(self.len);
        // SAFETY: len < capacity, so the slot is inside the block and not live.
        unsafe { slot.write(value) };
        self.len += 1;
        // SAFETY: the slot was just written.
        unsafe { &mut *slot }
    }

    /// Move every live value into `fresh` and adopt it as the storage.
    ///
    /// The old block is released without running destructors; its values
    /// now live in `fresh`. `fresh.capacity()` must be at least `len`.
    pub(crate) fn relocate_into(&mut self, mut fresh: RawStorage<T>) {
        debug_assert!(fresh.capacity() >= self.len);
        log::debug!(
            "vector: relocating {} values, capacity {} -> {}",
            self.len,
            self.capacity(),
            fresh.capacity()
        );
        // SAFETY: the blocks are distinct allocations (or the values are
        // zero-sized), fresh has room for len values, and the source
        // values are never touched again after the swap.
        unsafe {
            ptr::copy_nonoverlapping(self.storage.as_ptr(), fresh.as_mut_ptr(), self.len);
        }
        self.storage.swap(&mut fresh);
    }
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        let live = ptr::slice_from_raw_parts_mut(self.storage.as_mut_ptr(), self.len);
        // SAFETY: slots [0, len) are live; drop_in_place drops them in index
        // order. The storage then releases the block on its own.
        unsafe { ptr::drop_in_place(live) };
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Vector<T> {
    /// Deep copy with capacity exactly `self.len()`.
    ///
    /// If a clone panics, the values cloned so far are dropped and `self`
    /// is untouched.
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.len);
        for item in self.as_slice() {
            copy.push_within_capacity(item.clone());
        }
        copy
    }

    /// Copy assignment.
    ///
    /// When `source` fits in the current capacity the block is reused: the
    /// overlapping prefix is assigned element-wise with `clone_from`, the
    /// remaining source values are cloned into free slots, and any excess
    /// values are dropped. A panic on this path may leave a partially
    /// assigned prefix.
    ///
    /// Otherwise a full copy of `source` is built first and swapped in, so
    /// a panic leaves `self` unchanged.
    fn clone_from(&mut self, source: &Self) {
        if source.len > self.capacity() {
            let mut copy = source.clone();
            self.swap(&mut copy);
            return;
        }

        let shared = self.len.min(source.len);
        for (dst, src) in self.as_mut_slice()[..shared]
            .iter_mut()
            .zip(&source.as_slice()[..shared])
        {
            dst.clone_from(src);
        }
        if source.len > self.len {
            for item in &source.as_slice()[self.len..] {
                self.push_within_capacity(item.clone());
            }
        } else {
            self.truncate(source.len);
        }
    }
}

impl<T> Deref for Vector<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for Vector<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}
