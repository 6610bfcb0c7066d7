use super::{RingRef, SpscRing};
use crate::{storage::Storage, utils::write_slice};
use core::mem::MaybeUninit;

/// Producer half of an [`SpscRing`].
///
/// Move it to the writer thread. It cannot be cloned, which is what pins
/// the ring to a single producer. The half keeps its own copy of the write
/// cursor and a cached copy of the consumer's read cursor; the cache is
/// reloaded only when it cannot rule out fullness on its own, so the
/// common push touches one foreign cache line instead of two.
pub struct Prod<R: RingRef> {
    ring: R,
    /// Own write cursor. The atomic is only ever written through this value.
    write: usize,
    /// Cached read cursor, refreshed on apparent fullness.
    read: usize,
}

impl<S: Storage, R: RingRef<Ring = SpscRing<S>>> Prod<R> {
    /// Wraps a ring reference into a producer half.
    ///
    /// # Safety
    ///
    /// At most one producer half may exist per ring at any time.
    pub unsafe fn new(ring: R) -> Self {
        Self {
            write: ring.write_cursor(),
            read: ring.read_cursor(),
            ring,
        }
    }

    /// The underlying ring.
    #[inline]
    pub fn ring(&self) -> &SpscRing<S> {
        &self.ring
    }

    /// See [`SpscRing::capacity`].
    #[inline]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    /// See [`SpscRing::occupied_len`].
    #[inline]
    pub fn occupied_len(&self) -> usize {
        self.ring.occupied_len()
    }

    /// See [`SpscRing::vacant_len`].
    #[inline]
    pub fn vacant_len(&self) -> usize {
        self.ring.vacant_len()
    }

    /// See [`SpscRing::is_empty`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// See [`SpscRing::is_full`].
    #[inline]
    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    /// Fullness by the producer's own books. Reloads the read cursor only
    /// when the cached copy is inconclusive: apparent fullness, or a stale
    /// value left more than a capacity behind by a raw cursor advance.
    fn is_full_cached(&mut self) -> bool {
        if self.write.wrapping_sub(self.read) >= self.capacity() {
            self.read = self.ring().read_cursor();
        }
        self.write.wrapping_sub(self.read) == self.capacity()
    }

    /// Appends an item to the ring.
    ///
    /// If the ring is full returns an `Err` containing the item that has
    /// not been appended.
    pub fn try_push(&mut self, elem: S::Item) -> Result<(), S::Item> {
        if self.is_full_cached() {
            return Err(elem);
        }
        unsafe { self.push_unchecked(elem) };
        Ok(())
    }

    /// Appends an item without the occupancy check.
    ///
    /// # Safety
    ///
    /// The ring must not be full; the caller has to have established spare
    /// capacity beforehand, e.g. through [`vacant_len`](Self::vacant_len).
    /// Pushing into a full ring overwrites a slot the consumer still owns.
    pub unsafe fn push_unchecked(&mut self, elem: S::Item) {
        debug_assert!(
            self.write.wrapping_sub(self.ring().read_cursor()) < self.capacity(),
            "push into a full ring",
        );
        self.ring().slot(self.write).write(elem);
        self.write = self.write.wrapping_add(1);
        self.ring().set_write_cursor(self.write);
    }

    /// Vacant slots as mutable uninitialized slices.
    ///
    /// Fill them from the start of the first slice, then the second, and
    /// commit with [`advance_write`](Self::advance_write). The read cursor
    /// is reloaded, so the slices reflect everything consumed so far.
    pub fn vacant_slices_mut<'a>(
        &'a mut self,
    ) -> (&'a mut [MaybeUninit<S::Item>], &'a mut [MaybeUninit<S::Item>])
    where
        S: 'a,
    {
        self.read = self.ring().read_cursor();
        unsafe { self.ring().vacant_slices_mut(self.read, self.write) }
    }

    /// Moves the write cursor forward after a direct slice fill.
    ///
    /// # Safety
    ///
    /// The first `count` vacant slots must have been initialized and must
    /// not be touched afterwards.
    pub unsafe fn advance_write(&mut self, count: usize) {
        // Resync the cache; a bulk advance could leave the write cursor
        // more than a capacity past it otherwise.
        self.read = self.ring().read_cursor();
        debug_assert!(count <= self.vacant_len());
        self.write = self.write.wrapping_add(count);
        self.ring().set_write_cursor(self.write);
    }

    /// Appends items from a slice until the ring is full.
    ///
    /// Returns the number of items appended.
    pub fn push_slice(&mut self, elems: &[S::Item]) -> usize
    where
        S::Item: Copy,
    {
        let (left, right) = self.vacant_slices_mut();
        let count = if elems.len() < left.len() {
            write_slice(&mut left[..elems.len()], elems);
            elems.len()
        } else {
            let (left_elems, elems) = elems.split_at(left.len());
            write_slice(left, left_elems);
            left.len()
                + if elems.len() < right.len() {
                    write_slice(&mut right[..elems.len()], elems);
                    elems.len()
                } else {
                    write_slice(right, &elems[..right.len()]);
                    right.len()
                }
        };
        unsafe { self.advance_write(count) };
        count
    }

    /// Appends items from an iterator until the ring is full or the
    /// iterator ends.
    ///
    /// Returns the number of items appended.
    pub fn push_iter<I: Iterator<Item = S::Item>>(&mut self, mut iter: I) -> usize {
        let (left, right) = self.vacant_slices_mut();
        let mut count = 0;
        for place in left.iter_mut().chain(right.iter_mut()) {
            match iter.next() {
                Some(elem) => {
                    place.write(elem);
                }
                None => break,
            }
            count += 1;
        }
        unsafe { self.advance_write(count) };
        count
    }
}
