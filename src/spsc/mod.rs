//! Lock-free single-producer single-consumer ring.
//!
//! The ring owns the storage and two monotonically increasing cursors.
//! Cross-thread use goes through the [`Prod`] and [`Cons`] halves obtained
//! from [`SpscRing::split`] or [`SpscRing::split_ref`]; a ring that was
//! never split can also be driven directly through its `&mut` methods.

pub mod cons;
pub mod prod;

pub use cons::{Cons, IntoIter, PopIter};
pub use prod::Prod;

#[cfg(feature = "alloc")]
use crate::storage::Heap;
use crate::{
    storage::{Array, Storage},
    sync::{AtomicUsize, Ordering},
    utils::cursor_ranges,
};
#[cfg(feature = "alloc")]
use crate::sync::Arc;
use core::{
    mem::{ManuallyDrop, MaybeUninit},
    ops::Deref,
    ptr,
};
use crossbeam_utils::CachePadded;

/// Reference to an [`SpscRing`] that a producer or consumer half hangs onto.
///
/// # Safety
///
/// `deref` must return the same ring for the whole lifetime of the value.
/// Halves carry cursor copies that are only meaningful for that one ring.
pub unsafe trait RingRef: Deref<Target = Self::Ring> {
    type Ring;
}

unsafe impl<'a, S: Storage> RingRef for &'a SpscRing<S> {
    type Ring = SpscRing<S>;
}

#[cfg(feature = "alloc")]
unsafe impl<S: Storage> RingRef for Arc<SpscRing<S>> {
    type Ring = SpscRing<S>;
}

/// Lock-free ring moving items from exactly one producer thread to exactly
/// one consumer thread.
///
/// The capacity is fixed at construction and must be a power of two: slot
/// lookup is then a bitwise mask and stays consistent when the monotonic
/// cursors wrap around the integer range. The producer publishes each slot
/// with a release store of its cursor and the consumer picks it up with an
/// acquire load, so an item is fully written before it can be observed.
///
/// Waiting is the caller's business. Both ends are non-blocking; a full or
/// empty ring is reported through the return value and the usual strategy
/// in a latency-bound pipeline is to poll.
#[cfg_attr(
    feature = "std",
    doc = r##"
```
use ringpair::{storage::Heap, SpscRing};
use std::thread;

let rb = SpscRing::<Heap<i32>>::new(2);
let (mut prod, mut cons) = rb.split();
thread::spawn(move || {
    prod.try_push(123).unwrap();
})
.join()
.unwrap();
thread::spawn(move || {
    assert_eq!(cons.try_pop(), Some(123));
})
.join()
.unwrap();
```
"##
)]
pub struct SpscRing<S: Storage> {
    storage: S,
    read: CachePadded<AtomicUsize>,
    write: CachePadded<AtomicUsize>,
}

unsafe impl<S: Storage> Sync for SpscRing<S> where S::Item: Send {}

impl<S: Storage> SpscRing<S> {
    /// Assembles a ring from storage and cursor values.
    ///
    /// # Safety
    ///
    /// The slots in the cyclic range `read..write` must be initialized and
    /// all others uninitialized; `write.wrapping_sub(read)` must not exceed
    /// the storage length.
    ///
    /// *Panics if the storage length is not a power of two.*
    pub unsafe fn from_raw_parts(storage: S, read: usize, write: usize) -> Self {
        assert!(
            storage.len().is_power_of_two(),
            "capacity must be a power of two",
        );
        Self {
            storage,
            read: CachePadded::new(AtomicUsize::new(read)),
            write: CachePadded::new(AtomicUsize::new(write)),
        }
    }

    /// Destructures the ring into storage and cursor values.
    ///
    /// # Safety
    ///
    /// Initialized slots of the returned storage must be properly dropped.
    pub unsafe fn into_raw_parts(self) -> (S, usize, usize) {
        let this = ManuallyDrop::new(self);
        (ptr::read(&this.storage), this.read_cursor(), this.write_cursor())
    }

    /// Capacity of the ring. Constant over its lifetime.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    fn mask(&self) -> usize {
        self.capacity() - 1
    }

    /// Current consumer cursor. Monotonic, wraps with the integer range.
    #[inline]
    pub fn read_cursor(&self) -> usize {
        self.read.load(Ordering::Acquire)
    }

    /// Current producer cursor. Monotonic, wraps with the integer range.
    #[inline]
    pub fn write_cursor(&self) -> usize {
        self.write.load(Ordering::Acquire)
    }

    /// The number of items in the ring.
    ///
    /// Usable from either thread: the cursor difference is modular, so the
    /// count stays exact even after the cursors pass the integer maximum.
    /// *Under concurrency the value may be stale by the time it is acted
    /// upon.*
    #[inline]
    pub fn occupied_len(&self) -> usize {
        // Read cursor first: the later write value can only be ahead of
        // it, so the difference never underflows.
        let read = self.read_cursor();
        self.write_cursor().wrapping_sub(read)
    }

    /// The number of free slots in the ring. As racy as
    /// [`occupied_len`](Self::occupied_len).
    #[inline]
    pub fn vacant_len(&self) -> usize {
        self.capacity() - self.occupied_len()
    }

    /// Whether the ring holds no items. Under concurrency a push may land
    /// right after the check.
    #[inline]
    pub fn is_empty(&self) -> bool {
        let read = self.read_cursor();
        self.write_cursor() == read
    }

    /// Whether the ring is at capacity. As racy as
    /// [`is_empty`](Self::is_empty).
    #[inline]
    pub fn is_full(&self) -> bool {
        self.occupied_len() == self.capacity()
    }

    /// The slot a cursor value maps to.
    ///
    /// # Safety
    ///
    /// Access must follow the cursor protocol: the producer side may touch
    /// slots of the cyclic range `write..read + capacity`, the consumer
    /// side slots of `read..write`.
    #[inline]
    pub(crate) unsafe fn slot(&self, cursor: usize) -> &mut MaybeUninit<S::Item> {
        let index = cursor & self.mask();
        &mut self.storage.slice_mut(index..index + 1)[0]
    }

    /// Publishes a new producer cursor.
    ///
    /// # Safety
    ///
    /// Only the producer side may call this. Slots entering the occupied
    /// range must be initialized and `value` must move forward.
    #[inline]
    pub(crate) unsafe fn set_write_cursor(&self, value: usize) {
        self.write.store(value, Ordering::Release);
    }

    /// Publishes a new consumer cursor.
    ///
    /// # Safety
    ///
    /// Only the consumer side may call this. Slots leaving the occupied
    /// range must already be moved out or dropped and `value` must move
    /// forward.
    #[inline]
    pub(crate) unsafe fn set_read_cursor(&self, value: usize) {
        self.read.store(value, Ordering::Release);
    }

    /// Occupied slots as at most two slices, oldest items first.
    ///
    /// # Safety
    ///
    /// `read..write` must be (a subrange of) the occupied range and must not
    /// be released while the slices are alive.
    pub(crate) unsafe fn occupied_slices(
        &self,
        read: usize,
        write: usize,
    ) -> (&[MaybeUninit<S::Item>], &[MaybeUninit<S::Item>]) {
        let (first, second) = cursor_ranges(self.capacity(), read, write);
        (self.storage.slice(first), self.storage.slice(second))
    }

    /// Mutable variant of [`occupied_slices`](Self::occupied_slices).
    ///
    /// # Safety
    ///
    /// Same as [`occupied_slices`](Self::occupied_slices), and the slices
    /// must not overlap with any other live view of the storage.
    pub(crate) unsafe fn occupied_slices_mut(
        &self,
        read: usize,
        write: usize,
    ) -> (&mut [MaybeUninit<S::Item>], &mut [MaybeUninit<S::Item>]) {
        let (first, second) = cursor_ranges(self.capacity(), read, write);
        (self.storage.slice_mut(first), self.storage.slice_mut(second))
    }

    /// Vacant slots as at most two slices.
    ///
    /// The vacant range `write..read + capacity` is the occupied range of
    /// the inverted cursor pair, which is what the shifted arguments below
    /// express.
    ///
    /// # Safety
    ///
    /// `read` and `write` must be (conservative copies of) the ring cursors
    /// and the slices must not outlive a release of the vacant range.
    pub(crate) unsafe fn vacant_slices_mut(
        &self,
        read: usize,
        write: usize,
    ) -> (&mut [MaybeUninit<S::Item>], &mut [MaybeUninit<S::Item>]) {
        let capacity = self.capacity();
        let (first, second) = cursor_ranges(capacity, write, read.wrapping_add(capacity));
        (self.storage.slice_mut(first), self.storage.slice_mut(second))
    }

    /// Appends an item to an unsplit ring.
    ///
    /// If the ring is full returns an `Err` containing the item that has
    /// not been appended.
    pub fn try_push(&mut self, elem: S::Item) -> Result<(), S::Item> {
        if self.is_full() {
            return Err(elem);
        }
        let write = self.write_cursor();
        unsafe {
            self.slot(write).write(elem);
            self.set_write_cursor(write.wrapping_add(1));
        }
        Ok(())
    }

    /// Removes the oldest item from an unsplit ring, or `None` if it is
    /// empty.
    pub fn try_pop(&mut self) -> Option<S::Item> {
        if self.is_empty() {
            return None;
        }
        let read = self.read_cursor();
        let elem = unsafe { self.slot(read).assume_init_read() };
        unsafe { self.set_read_cursor(read.wrapping_add(1)) };
        Some(elem)
    }

    /// Pushes an item, evicting the oldest one when the ring is full.
    ///
    /// Returns the evicted item if eviction took place. Needs both ends of
    /// the ring, so it lives here and not on a half.
    pub fn push_overwrite(&mut self, elem: S::Item) -> Option<S::Item> {
        let ret = if self.is_full() { self.try_pop() } else { None };
        let _ = self.try_push(elem);
        ret
    }

    /// Splits the ring into producer and consumer halves sharing it
    /// atomically.
    #[cfg(feature = "alloc")]
    pub fn split(self) -> (Prod<Arc<Self>>, Cons<Arc<Self>>) {
        let rc = Arc::new(self);
        unsafe { (Prod::new(rc.clone()), Cons::new(rc)) }
    }

    /// Splits the ring into borrowed halves without allocating.
    pub fn split_ref(&mut self) -> (Prod<&Self>, Cons<&Self>) {
        let this = &*self;
        unsafe { (Prod::new(this), Cons::new(this)) }
    }
}

impl<S: Storage> Drop for SpscRing<S> {
    fn drop(&mut self) {
        let read = *self.read.get_mut();
        let write = *self.write.get_mut();
        unsafe {
            let (first, second) = self.occupied_slices_mut(read, write);
            for slot in first.iter_mut().chain(second.iter_mut()) {
                slot.assume_init_drop();
            }
        }
    }
}

#[cfg(feature = "alloc")]
impl<T> SpscRing<Heap<T>> {
    /// Creates a heap-backed ring. One allocation, fixed forever.
    ///
    /// *Panics if `capacity` is not a power of two (zero included).*
    pub fn new(capacity: usize) -> Self {
        unsafe { Self::from_raw_parts(Heap::new(capacity), 0, 0) }
    }
}

impl<T, const N: usize> SpscRing<Array<T, N>> {
    const CAPACITY_IS_POWER_OF_TWO: () =
        assert!(N.is_power_of_two(), "capacity must be a power of two");
}

impl<T, const N: usize> Default for SpscRing<Array<T, N>> {
    fn default() -> Self {
        let () = Self::CAPACITY_IS_POWER_OF_TWO;
        unsafe { Self::from_raw_parts(Array::default(), 0, 0) }
    }
}
