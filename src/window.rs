//! Single-threaded ring for sliding-window bookkeeping.

#[cfg(feature = "alloc")]
use crate::storage::Heap;
use crate::{
    storage::{Array, Storage},
    utils::{slice_assume_init_mut, slice_assume_init_ref},
};
#[cfg(feature = "alloc")]
use alloc::vec::Vec;
use core::{
    mem::{ManuallyDrop, MaybeUninit},
    ops::{Index, IndexMut, Range},
    ptr,
};

/// Sequential ring over the logical window `[start, end)` with wrap-around
/// indexing. Capacity is arbitrary, slot lookup is a modulo.
///
/// Every slot stays initialized for the whole ring lifetime, so each
/// operation is plain memory access with no occupancy check: reading
/// outside the window yields whatever the slot last held instead of
/// invoking undefined behavior, and pushing past capacity wraps the window
/// onto itself. Callers that stream data through the ring keep occupancy
/// below capacity; a window grown to exactly `capacity` items is
/// indistinguishable from an empty one, so [`len`](Self::len) and
/// [`is_empty`](Self::is_empty) treat it as empty.
///
/// ```
/// use ringpair::StaticWindow;
///
/// let mut win = StaticWindow::<i32, 8>::default();
/// win.push(10);
/// win.push(20);
/// win.push(30);
/// assert_eq!((win[0], win[1], win[2]), (10, 20, 30));
/// win.pop();
/// assert_eq!(win[0], 20);
/// assert_eq!(win.len(), 2);
/// ```
pub struct WindowRing<S: Storage> {
    storage: S,
    /// Physical index of the logical front. Always below capacity.
    start: usize,
    /// Physical index one past the logical back. Always below capacity.
    end: usize,
}

impl<S: Storage> WindowRing<S> {
    /// Assembles a window ring from storage and indices.
    ///
    /// # Safety
    ///
    /// Every slot of `storage` must be initialized.
    ///
    /// *Panics if the storage is empty or an index is not below capacity.*
    pub unsafe fn from_raw_parts(storage: S, start: usize, end: usize) -> Self {
        assert!(!storage.is_empty(), "capacity must be positive");
        assert!(
            start < storage.len() && end < storage.len(),
            "indices must lie within the storage",
        );
        Self { storage, start, end }
    }

    /// Destructures the ring into storage and indices.
    ///
    /// # Safety
    ///
    /// Every slot of the returned storage is initialized and must be
    /// properly dropped.
    pub unsafe fn into_raw_parts(self) -> (S, usize, usize) {
        let this = ManuallyDrop::new(self);
        (ptr::read(&this.storage), this.start, this.end)
    }

    /// Capacity of the ring. Constant over its lifetime.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Physical index of the logical front.
    #[inline]
    pub fn start_index(&self) -> usize {
        self.start
    }

    /// Physical index one past the logical back.
    #[inline]
    pub fn end_index(&self) -> usize {
        self.end
    }

    /// Number of items in the window, `(end - start) mod capacity`.
    ///
    /// A window pushed to exactly `capacity` items reports 0 here; see the
    /// type docs.
    #[inline]
    pub fn len(&self) -> usize {
        (self.end + self.capacity() - self.start) % self.capacity()
    }

    /// Whether `start == end`. Also true for a window pushed to exactly
    /// `capacity` items; see the type docs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The physical index after `index`. Capacity is arbitrary here, so no
    /// mask shortcut.
    #[inline]
    fn advance(&self, index: usize) -> usize {
        let next = index + 1;
        if next == self.capacity() {
            0
        } else {
            next
        }
    }

    /// Physical slot of logical offset `i` from the front.
    #[inline]
    fn slot_of(&self, i: usize) -> usize {
        debug_assert!(i < self.capacity(), "offset outside the physical ring");
        (self.start + i) % self.capacity()
    }

    #[inline]
    fn slot(&self, index: usize) -> &S::Item {
        // Every slot is initialized, see the type invariant.
        unsafe { self.storage.slice(index..index + 1)[0].assume_init_ref() }
    }

    #[inline]
    fn slot_mut(&mut self, index: usize) -> &mut S::Item {
        unsafe { self.storage.slice_mut(index..index + 1)[0].assume_init_mut() }
    }

    /// Writes `value` at the logical back and advances `end`.
    ///
    /// There is no collision check: pushing more than `capacity` items
    /// without popping wraps `end` onto `start` and the window silently
    /// loses its front, the same contract as the unchecked queue path. The
    /// displaced value is dropped in place.
    pub fn push(&mut self, value: S::Item) {
        let end = self.end;
        *self.slot_mut(end) = value;
        self.end = self.advance(end);
    }

    /// The item at the logical front.
    ///
    /// On an empty window this is a stale slot, not an error.
    #[inline]
    pub fn front(&self) -> &S::Item {
        self.slot(self.start)
    }

    /// Mutable access to the item at the logical front.
    #[inline]
    pub fn front_mut(&mut self) -> &mut S::Item {
        let start = self.start;
        self.slot_mut(start)
    }

    /// Advances `start` past the front item, shrinking the window.
    ///
    /// The slot is not cleared; it keeps its value until overwritten.
    /// Popping an empty window rotates the indices, nothing more.
    #[inline]
    pub fn pop(&mut self) {
        self.start = self.advance(self.start);
    }

    /// Overwrites every slot of the logical window `[start, end)` with
    /// clones of `value`. The indices stay put.
    ///
    /// A wrapped window (`start > end`) is written as two physical spans.
    /// When `start == end` the window is the empty interval, not the full
    /// ring, and nothing is written.
    pub fn fill(&mut self, value: S::Item)
    where
        S::Item: Clone,
    {
        if self.start <= self.end {
            self.fill_span(self.start..self.end, &value);
        } else {
            let (start, end, capacity) = (self.start, self.end, self.capacity());
            self.fill_span(start..capacity, &value);
            self.fill_span(0..end, &value);
        }
    }

    fn fill_span(&mut self, range: Range<usize>, value: &S::Item)
    where
        S::Item: Clone,
    {
        // Plain assignment, so the old values are dropped.
        unsafe {
            for slot in self.storage.slice_mut(range) {
                *slot.assume_init_mut() = value.clone();
            }
        }
    }

    /// The window as at most two slices, front first.
    pub fn as_slices(&self) -> (&[S::Item], &[S::Item]) {
        unsafe {
            if self.start <= self.end {
                (
                    slice_assume_init_ref(self.storage.slice(self.start..self.end)),
                    &[],
                )
            } else {
                (
                    slice_assume_init_ref(self.storage.slice(self.start..self.capacity())),
                    slice_assume_init_ref(self.storage.slice(0..self.end)),
                )
            }
        }
    }

    /// Mutable variant of [`as_slices`](Self::as_slices).
    pub fn as_mut_slices(&mut self) -> (&mut [S::Item], &mut [S::Item]) {
        unsafe {
            if self.start <= self.end {
                (
                    slice_assume_init_mut(self.storage.slice_mut(self.start..self.end)),
                    &mut [],
                )
            } else {
                (
                    slice_assume_init_mut(self.storage.slice_mut(self.start..self.capacity())),
                    slice_assume_init_mut(self.storage.slice_mut(0..self.end)),
                )
            }
        }
    }

    /// Front-to-back iterator over the window.
    pub fn iter(&self) -> impl Iterator<Item = &S::Item> {
        let (left, right) = self.as_slices();
        left.iter().chain(right.iter())
    }

    /// Mutable variant of [`iter`](Self::iter).
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut S::Item> {
        let (left, right) = self.as_mut_slices();
        left.iter_mut().chain(right.iter_mut())
    }
}

/// Logical offset access, `ring[0]` being the front.
///
/// Offsets at or past [`len`](WindowRing::len) read stale slots, the same
/// contract as [`front`](WindowRing::front) on an empty window.
impl<S: Storage> Index<usize> for WindowRing<S> {
    type Output = S::Item;

    #[inline]
    fn index(&self, i: usize) -> &S::Item {
        self.slot(self.slot_of(i))
    }
}

impl<S: Storage> IndexMut<usize> for WindowRing<S> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut S::Item {
        let index = self.slot_of(i);
        self.slot_mut(index)
    }
}

impl<S: Storage> Drop for WindowRing<S> {
    fn drop(&mut self) {
        // Every slot is initialized, not only the window.
        unsafe {
            let capacity = self.capacity();
            for slot in self.storage.slice_mut(0..capacity) {
                slot.assume_init_drop();
            }
        }
    }
}

#[cfg(feature = "alloc")]
impl<T: Default> WindowRing<Heap<T>> {
    /// Creates a heap-backed ring of `capacity` slots, all holding
    /// `T::default()`. One allocation, fixed forever.
    ///
    /// *Panics if `capacity` is zero.*
    pub fn new(capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|_| MaybeUninit::new(T::default()))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        unsafe { Self::from_raw_parts(Heap::from(slots), 0, 0) }
    }
}

impl<T: Default, const N: usize> Default for WindowRing<Array<T, N>> {
    /// All `N` slots start at `T::default()`.
    ///
    /// *Panics if `N` is zero.*
    fn default() -> Self {
        let slots: [MaybeUninit<T>; N] = core::array::from_fn(|_| MaybeUninit::new(T::default()));
        unsafe { Self::from_raw_parts(Array::from(slots), 0, 0) }
    }
}
