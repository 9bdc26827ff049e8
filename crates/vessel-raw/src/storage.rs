//! The raw block owner.

use std::alloc::{self, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use vessel_core::AllocError;

/// An owned, uninitialised block of memory sized for `capacity` values of `T`.
///
/// The block holds zero live values by construction. Capacity is fixed for
/// the lifetime of an instance; the only way to change it is to allocate a
/// new instance and [`swap`](RawStorage::swap) or [`take`](RawStorage::take)
/// ownership across.
///
/// `RawStorage` is move-only. Duplicating the block would duplicate
/// ownership of memory without duplicating its contents, so there is no
/// `Clone` impl:
///
/// ```compile_fail
/// use vessel_raw::RawStorage;
///
/// let a = RawStorage::<u32>::allocate(4);
/// let b = a.clone();
/// ```
///
/// Dropping a `RawStorage` frees the block without running any element
/// destructor.
pub struct RawStorage<T> {
    /// Base of the owned block. `None` when nothing is allocated: capacity 0,
    /// or a zero-sized `T`.
    block: Option<NonNull<T>>,
    /// Number of element slots, not bytes.
    capacity: usize,
    _owns: PhantomData<T>,
}

// SAFETY: RawStorage owns its block exactly like Box<[MaybeUninit<T>]> would,
// so it is as thread-safe as the values it may hold.
unsafe impl<T: Send> Send for RawStorage<T> {}
// SAFETY: shared access only hands out raw pointers; see the Send impl.
unsafe impl<T: Sync> Sync for RawStorage<T> {}

impl<T> RawStorage<T> {
    /// An empty storage: no block, capacity 0.
    pub const fn new() -> Self {
        Self {
            block: None,
            capacity: 0,
            _owns: PhantomData,
        }
    }

    /// Allocate an uninitialised block for `capacity` values.
    ///
    /// A capacity of 0 never touches the allocator and yields an empty
    /// storage. Zero-sized `T` never allocates either, but the requested
    /// capacity is still recorded.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` slots do not fit in a valid layout. Allocator
    /// failure aborts through [`std::alloc::handle_alloc_error`]; use
    /// [`try_allocate`](Self::try_allocate) to observe it instead.
    pub fn allocate(capacity: usize) -> Self {
        let layout = match Self::layout_for(capacity) {
            Ok(layout) => layout,
            Err(err) => panic!("{err}"),
        };
        match Self::acquire(capacity, layout) {
            Some(storage) => storage,
            None => alloc::handle_alloc_error(layout),
        }
    }

    /// Fallible variant of [`allocate`](Self::allocate).
    ///
    /// Returns [`AllocError::CapacityOverflow`] if the layout cannot be
    /// formed, or [`AllocError::AllocFailed`] if the allocator refuses it.
    pub fn try_allocate(capacity: usize) -> Result<Self, AllocError> {
        let layout = Self::layout_for(capacity)?;
        Self::acquire(capacity, layout).ok_or(AllocError::AllocFailed {
            bytes: layout.size(),
            align: layout.align(),
        })
    }

    fn layout_for(capacity: usize) -> Result<Layout, AllocError> {
        Layout::array::<T>(capacity).map_err(|_| AllocError::CapacityOverflow { capacity })
    }

    /// Returns `None` only when the allocator refused a non-empty layout.
    fn acquire(capacity: usize, layout: Layout) -> Option<Self> {
        if layout.size() == 0 {
            return Some(Self {
                block: None,
                capacity,
                _owns: PhantomData,
            });
        }
        // SAFETY: layout has a non-zero size.
        let raw = unsafe { alloc::alloc(layout) };
        let block = NonNull::new(raw.cast::<T>())?;
        log::trace!(
            "raw storage: allocated {capacity} slots ({} bytes)",
            layout.size()
        );
        Some(Self {
            block: Some(block),
            capacity,
            _owns: PhantomData,
        })
    }

    /// Number of element slots the block can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether a real heap block is owned.
    pub fn is_allocated(&self) -> bool {
        self.block.is_some()
    }

    /// Size of the owned heap block in bytes.
    pub fn memory_bytes(&self) -> usize {
        if self.block.is_some() {
            self.capacity * mem::size_of::<T>()
        } else {
            0
        }
    }

    /// Base address of the block.
    ///
    /// When no block is owned this is a well-aligned dangling pointer, valid
    /// for forming empty slices but never for reads or writes.
    pub fn as_ptr(&self) -> *const T {
        self.base().as_ptr()
    }

    /// Mutable base address of the block. See [`as_ptr`](Self::as_ptr).
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.base().as_ptr()
    }

    /// Address of slot `offset`.
    ///
    /// `offset == capacity` is valid for computing an end marker and must
    /// never be dereferenced. Nothing is known about whether the slot holds
    /// a live value.
    pub fn slot(&self, offset: usize) -> *const T {
        debug_assert!(
            offset <= self.capacity,
            "slot {offset} out of range for capacity {}",
            self.capacity
        );
        self.as_ptr().wrapping_add(offset)
    }

    /// Mutable address of slot `offset`. See [`slot`](Self::slot).
    pub fn slot_mut(&mut self, offset: usize) -> *mut T {
        debug_assert!(
            offset <= self.capacity,
            "slot {offset} out of range for capacity {}",
            self.capacity
        );
        self.as_mut_ptr().wrapping_add(offset)
    }

    /// Exchange blocks and capacities with `other`. O(1), touches no slot.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.block, &mut other.block);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }

    /// Move the block out, leaving `self` empty with capacity 0.
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::new())
    }

    fn base(&self) -> NonNull<T> {
        self.block.unwrap_or(NonNull::dangling())
    }
}

impl<T> Default for RawStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawStorage<T> {
    fn drop(&mut self) {
        let Some(block) = self.block else {
            return;
        };
        // The layout was validated when the block was acquired.
        if let Ok(layout) = Layout::array::<T>(self.capacity) {
            log::trace!(
                "raw storage: released {} slots ({} bytes)",
                self.capacity,
                layout.size()
            );
            // SAFETY: block was returned by alloc::alloc with this exact layout
            // and ownership was never duplicated.
            unsafe { alloc::dealloc(block.as_ptr().cast::<u8>(), layout) };
        }
    }
}

impl<T> fmt::Debug for RawStorage<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawStorage")
            .field("capacity", &self.capacity)
            .field("allocated", &self.is_allocated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn zero_capacity_is_unallocated() {
        let storage = RawStorage::<u64>::allocate(0);
        assert_eq!(storage.capacity(), 0);
        assert!(!storage.is_allocated());
        assert_eq!(storage.memory_bytes(), 0);
        assert!(!storage.as_ptr().is_null());
    }

    #[test]
    fn allocate_reports_capacity_and_bytes() {
        let storage = RawStorage::<u32>::allocate(16);
        assert_eq!(storage.capacity(), 16);
        assert!(storage.is_allocated());
        assert_eq!(storage.memory_bytes(), 64);
        assert_eq!(storage.as_ptr() as usize % mem::align_of::<u32>(), 0);
    }

    #[test]
    fn slots_are_contiguous() {
        let storage = RawStorage::<u64>::allocate(4);
        let base = storage.slot(0) as usize;
        for i in 0..=4 {
            assert_eq!(storage.slot(i) as usize, base + i * mem::size_of::<u64>());
        }
    }

    #[test]
    fn write_then_read_slot() {
        let mut storage = RawStorage::<u32>::allocate(3);
        for i in 0..3 {
            // SAFETY: i < capacity; u32 needs no drop.
            unsafe { storage.slot_mut(i).write(i as u32 * 10) };
        }
        // SAFETY: all three slots were written above.
        let read = unsafe { std::slice::from_raw_parts(storage.as_ptr(), 3) };
        assert_eq!(read, &[0, 10, 20]);
    }

    #[test]
    fn swap_exchanges_blocks() {
        let mut a = RawStorage::<u8>::allocate(8);
        let mut b = RawStorage::<u8>::allocate(2);
        let a_ptr = a.as_ptr();
        let b_ptr = b.as_ptr();
        a.swap(&mut b);
        assert_eq!(a.capacity(), 2);
        assert_eq!(b.capacity(), 8);
        assert_eq!(a.as_ptr(), b_ptr);
        assert_eq!(b.as_ptr(), a_ptr);
    }

    #[test]
    fn take_leaves_source_empty() {
        let mut a = RawStorage::<u16>::allocate(5);
        let ptr = a.as_ptr();
        let b = a.take();
        assert_eq!(b.capacity(), 5);
        assert_eq!(b.as_ptr(), ptr);
        assert_eq!(a.capacity(), 0);
        assert!(!a.is_allocated());
    }

    #[test]
    fn zero_sized_type_never_allocates() {
        let storage = RawStorage::<()>::allocate(1000);
        assert_eq!(storage.capacity(), 1000);
        assert!(!storage.is_allocated());
        assert_eq!(storage.memory_bytes(), 0);
    }

    #[test]
    fn drop_does_not_run_element_destructors() {
        let shared = Rc::new(7);
        {
            let mut storage = RawStorage::<Rc<i32>>::allocate(2);
            // SAFETY: slot 0 is in range; the clone is intentionally leaked.
            unsafe { storage.slot_mut(0).write(Rc::clone(&shared)) };
        }
        assert_eq!(Rc::strong_count(&shared), 2);
    }

    #[test]
    fn try_allocate_reports_overflow() {
        let result = RawStorage::<u64>::try_allocate(usize::MAX);
        assert_eq!(
            result.map(|s| s.capacity()),
            Err(AllocError::CapacityOverflow { capacity: usize::MAX })
        );
    }

    #[test]
    fn try_allocate_rejects_blocks_past_isize_max() {
        let capacity = isize::MAX as usize + 1;
        let result = RawStorage::<u8>::try_allocate(capacity);
        assert!(matches!(result, Err(AllocError::CapacityOverflow { .. })));
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn allocate_panics_on_overflow() {
        let _ = RawStorage::<u32>::allocate(usize::MAX);
    }

    #[test]
    fn try_allocate_succeeds_for_small_blocks() {
        let storage = RawStorage::<u32>::try_allocate(10).unwrap();
        assert_eq!(storage.capacity(), 10);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn capacity_is_exactly_requested(cap in 0usize..4096) {
                let storage = RawStorage::<u64>::allocate(cap);
                prop_assert_eq!(storage.capacity(), cap);
                prop_assert_eq!(storage.is_allocated(), cap > 0);
            }

            #[test]
            fn swap_twice_is_identity(a in 0usize..256, b in 0usize..256) {
                let mut x = RawStorage::<u32>::allocate(a);
                let mut y = RawStorage::<u32>::allocate(b);
                let (px, py) = (x.as_ptr(), y.as_ptr());
                x.swap(&mut y);
                x.swap(&mut y);
                prop_assert_eq!(x.capacity(), a);
                prop_assert_eq!(y.capacity(), b);
                prop_assert_eq!(x.as_ptr(), px);
                prop_assert_eq!(y.as_ptr(), py);
            }
        }
    }
}
