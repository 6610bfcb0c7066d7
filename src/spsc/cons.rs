use super::{RingRef, SpscRing};
use crate::{
    storage::Storage,
    utils::{slice_assume_init_mut, slice_assume_init_ref, write_uninit_slice},
};
use core::mem::MaybeUninit;

/// Consumer half of an [`SpscRing`].
///
/// Move it to the reader thread. The half keeps its own copy of the read
/// cursor and a cached copy of the producer's write cursor; the cache is
/// reloaded only when it cannot rule out emptiness on its own.
pub struct Cons<R: RingRef> {
    ring: R,
    /// Own read cursor. The atomic is only ever written through this value.
    read: usize,
    /// Cached write cursor, refreshed on apparent emptiness.
    write: usize,
}

impl<S: Storage, R: RingRef<Ring = SpscRing<S>>> Cons<R> {
    /// Wraps a ring reference into a consumer half.
    ///
    /// # Safety
    ///
    /// At most one consumer half may exist per ring at any time.
    pub unsafe fn new(ring: R) -> Self {
        Self {
            read: ring.read_cursor(),
            write: ring.write_cursor(),
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

    /// Emptiness by the consumer's own books. Reloads the write cursor only
    /// when the cached copy is inconclusive: apparent emptiness, or a stale
    /// value the read cursor has passed after a raw cursor advance.
    fn is_empty_cached(&mut self) -> bool {
        let cached = self.write.wrapping_sub(self.read);
        if cached == 0 || cached > self.capacity() {
            self.write = self.ring().write_cursor();
        }
        self.read == self.write
    }

    /// Removes the oldest item from the ring.
    ///
    /// Returns `None` if the ring is empty.
    pub fn try_pop(&mut self) -> Option<S::Item> {
        if self.is_empty_cached() {
            return None;
        }
        Some(unsafe { self.pop_unchecked() })
    }

    /// Removes the oldest item without the occupancy check.
    ///
    /// # Safety
    ///
    /// The ring must not be empty; the caller has to have established
    /// occupancy beforehand, e.g. through
    /// [`occupied_len`](Self::occupied_len). Popping an empty ring reads a
    /// slot the producer has not published.
    pub unsafe fn pop_unchecked(&mut self) -> S::Item {
        debug_assert!(
            self.ring().write_cursor().wrapping_sub(self.read) > 0,
            "pop from an empty ring",
        );
        let elem = self.ring().slot(self.read).assume_init_read();
        self.read = self.read.wrapping_add(1);
        self.ring().set_read_cursor(self.read);
        elem
    }

    /// A reference to the oldest item, or `None` if the ring is empty.
    ///
    /// The item stays in the ring; a subsequent
    /// [`try_pop`](Self::try_pop) returns the same value.
    pub fn try_peek<'a>(&'a mut self) -> Option<&'a S::Item>
    where
        S: 'a,
    {
        if self.is_empty_cached() {
            return None;
        }
        Some(unsafe { self.ring().slot(self.read).assume_init_ref() })
    }

    /// Occupied slots as uninitialized slices, oldest items first.
    ///
    /// Items may be moved out of the slices when followed by an
    /// [`advance_read`](Self::advance_read) for the number taken.
    pub fn occupied_slices<'a>(
        &'a self,
    ) -> (&'a [MaybeUninit<S::Item>], &'a [MaybeUninit<S::Item>])
    where
        S: 'a,
    {
        unsafe { self.ring().occupied_slices(self.read, self.ring().write_cursor()) }
    }

    /// Occupied slots as initialized slices, oldest items first.
    pub fn as_slices<'a>(&'a self) -> (&'a [S::Item], &'a [S::Item])
    where
        S: 'a,
    {
        let (left, right) = self.occupied_slices();
        unsafe { (slice_assume_init_ref(left), slice_assume_init_ref(right)) }
    }

    /// Mutable variant of [`as_slices`](Self::as_slices).
    pub fn as_mut_slices<'a>(&'a mut self) -> (&'a mut [S::Item], &'a mut [S::Item])
    where
        S: 'a,
    {
        let read = self.read;
        let write = self.ring().write_cursor();
        unsafe {
            let (left, right) = self.ring().occupied_slices_mut(read, write);
            (slice_assume_init_mut(left), slice_assume_init_mut(right))
        }
    }

    /// Moves the read cursor forward, releasing consumed slots for reuse.
    ///
    /// # Safety
    ///
    /// The first `count` occupied items must have been moved out or
    /// dropped.
    pub unsafe fn advance_read(&mut self, count: usize) {
        // Resync the cache; a bulk advance could move the read cursor past
        // it otherwise.
        self.write = self.ring().write_cursor();
        debug_assert!(count <= self.write.wrapping_sub(self.read));
        self.read = self.read.wrapping_add(count);
        self.ring().set_read_cursor(self.read);
    }

    /// Removes items into the beginning of `elems` until the ring is empty
    /// or the slice is full.
    ///
    /// Returns the number of items removed.
    pub fn pop_slice(&mut self, elems: &mut [S::Item]) -> usize
    where
        S::Item: Copy,
    {
        let (left, right) = self.occupied_slices();
        let count = if elems.len() < left.len() {
            unsafe { write_uninit_slice(elems, &left[..elems.len()]) };
            elems.len()
        } else {
            let (left_elems, elems) = elems.split_at_mut(left.len());
            unsafe { write_uninit_slice(left_elems, left) };
            left.len()
                + if elems.len() < right.len() {
                    unsafe { write_uninit_slice(elems, &right[..elems.len()]) };
                    elems.len()
                } else {
                    unsafe { write_uninit_slice(&mut elems[..right.len()], right) };
                    right.len()
                }
        };
        unsafe { self.advance_read(count) };
        count
    }

    /// Removes at most `count` items, dropping them in place.
    ///
    /// Returns the number of items dropped.
    pub fn skip(&mut self, count: usize) -> usize {
        let read = self.read;
        let write = self.ring().write_cursor();
        unsafe {
            let (left, right) = self.ring().occupied_slices_mut(read, write);
            let actual = usize::min(count, left.len() + right.len());
            for slot in left.iter_mut().chain(right.iter_mut()).take(count) {
                slot.assume_init_drop();
            }
            self.advance_read(actual);
            actual
        }
    }

    /// Removes and drops everything currently in the ring.
    ///
    /// Returns the number of items dropped.
    pub fn clear(&mut self) -> usize {
        self.skip(usize::MAX)
    }

    /// Iterator removing items one by one.
    pub fn pop_iter(&mut self) -> PopIter<'_, R> {
        PopIter { cons: self }
    }

    /// Front-to-back iterator over the items without removing them.
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = &'a S::Item> + 'a
    where
        S: 'a,
    {
        let (left, right) = self.as_slices();
        left.iter().chain(right.iter())
    }

    /// Mutable variant of [`iter`](Self::iter).
    pub fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = &'a mut S::Item> + 'a
    where
        S: 'a,
    {
        let (left, right) = self.as_mut_slices();
        left.iter_mut().chain(right.iter_mut())
    }
}

/// Iterator created by [`Cons::pop_iter`].
pub struct PopIter<'a, R: RingRef> {
    cons: &'a mut Cons<R>,
}

impl<S: Storage, R: RingRef<Ring = SpscRing<S>>> Iterator for PopIter<'_, R> {
    type Item = S::Item;

    #[inline]
    fn next(&mut self) -> Option<S::Item> {
        self.cons.try_pop()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.cons.occupied_len(), None)
    }
}

/// Owning iterator created by [`Cons::into_iter`].
pub struct IntoIter<R: RingRef>(Cons<R>);

impl<S: Storage, R: RingRef<Ring = SpscRing<S>>> Iterator for IntoIter<R> {
    type Item = S::Item;

    #[inline]
    fn next(&mut self) -> Option<S::Item> {
        self.0.try_pop()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.occupied_len(), None)
    }
}

impl<S: Storage, R: RingRef<Ring = SpscRing<S>>> IntoIterator for Cons<R> {
    type Item = S::Item;
    type IntoIter = IntoIter<R>;

    fn into_iter(self) -> IntoIter<R> {
        IntoIter(self)
    }
}
