//! Owning iteration.

use std::fmt;
use std::iter::FusedIterator;
use std::ptr;
use std::slice;

use vessel_raw::RawStorage;

use crate::vector::Vector;

/// An iterator that moves values out of a [`Vector`].
///
/// Created by `Vector::into_iter`. Slots `[front, back)` of the adopted
/// storage are live; values not yielded are dropped with the iterator.
pub struct IntoIter<T> {
    storage: RawStorage<T>,
    front: usize,
    back: usize,
}

impl<T> IntoIter<T> {
    /// The values not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots [front, back) are live.
        unsafe { slice::from_raw_parts(self.storage.slot(self.front), self.back - self.front) }
    }
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        let back = self.len;
        // Leave self empty so its Drop releases nothing.
        self.len = 0;
        IntoIter {
            storage: self.storage.take(),
            front: 0,
            back,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        let slot = self.storage.slot(self.front);
        self.front += 1;
        // SAFETY: the slot was live and is now outside [front, back).
        Some(unsafe { slot.read() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: the slot was live and is now outside [front, back).
        Some(unsafe { self.storage.slot(self.back).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let rest = ptr::slice_from_raw_parts_mut(
            self.storage.slot_mut(self.front),
            self.back - self.front,
        );
        // SAFETY: slots [front, back) are the values never yielded.
        unsafe { ptr::drop_in_place(rest) };
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
