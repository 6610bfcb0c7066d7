//! Storage of ring contents.

use core::{cell::UnsafeCell, mem::MaybeUninit, ops::Range};

#[cfg(feature = "alloc")]
use alloc::{boxed::Box, vec::Vec};

/// Abstraction over a fixed, contiguous block of item slots.
///
/// The slot count is frozen at construction; implementations never move or
/// resize the block. Slots are [`MaybeUninit`] because which of them hold
/// live items is tracked by the ring that owns the storage, not by the
/// storage itself.
///
/// # Safety
///
/// Implementations must hand out views of one stable block: `len` must stay
/// constant and `slice`/`slice_mut` must address the same memory for the
/// same range every time. The rings rely on this to keep producer and
/// consumer views disjoint.
pub unsafe trait Storage {
    type Item: Sized;

    /// Number of slots. Constant over the storage lifetime.
    fn len(&self) -> usize;

    /// Whether the storage has no slots at all.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// View of the slots in `range`.
    ///
    /// # Safety
    ///
    /// `range` must lie within `0..len`. The viewed slots must not overlap
    /// with any live mutable view of the same storage.
    unsafe fn slice(&self, range: Range<usize>) -> &[MaybeUninit<Self::Item>];

    /// Mutable view of the slots in `range`.
    ///
    /// # Safety
    ///
    /// `range` must lie within `0..len`. The viewed slots must not overlap
    /// with any other live view of the same storage.
    #[allow(clippy::mut_from_ref)]
    unsafe fn slice_mut(&self, range: Range<usize>) -> &mut [MaybeUninit<Self::Item>];
}

/// Owned array storage. Allocation-free, capacity in the type.
pub struct Array<T, const N: usize> {
    slots: UnsafeCell<[MaybeUninit<T>; N]>,
}

impl<T, const N: usize> Default for Array<T, N> {
    fn default() -> Self {
        Self {
            slots: UnsafeCell::new(crate::utils::uninit_array()),
        }
    }
}

impl<T, const N: usize> From<[MaybeUninit<T>; N]> for Array<T, N> {
    fn from(slots: [MaybeUninit<T>; N]) -> Self {
        Self {
            slots: UnsafeCell::new(slots),
        }
    }
}

unsafe impl<T, const N: usize> Storage for Array<T, N> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        N
    }

    unsafe fn slice(&self, range: Range<usize>) -> &[MaybeUninit<T>] {
        (&*self.slots.get()).get_unchecked(range)
    }

    #[allow(clippy::mut_from_ref)]
    unsafe fn slice_mut(&self, range: Range<usize>) -> &mut [MaybeUninit<T>] {
        (&mut *self.slots.get()).get_unchecked_mut(range)
    }
}

/// Boxed-slice storage. Allocates once at construction, never again.
#[cfg(feature = "alloc")]
pub struct Heap<T> {
    slots: UnsafeCell<Box<[MaybeUninit<T>]>>,
    len: usize,
}

#[cfg(feature = "alloc")]
impl<T> Heap<T> {
    /// Allocates `len` uninitialized slots.
    pub fn new(len: usize) -> Self {
        (0..len)
            .map(|_| MaybeUninit::uninit())
            .collect::<Vec<_>>()
            .into_boxed_slice()
            .into()
    }
}

#[cfg(feature = "alloc")]
impl<T> From<Box<[MaybeUninit<T>]>> for Heap<T> {
    fn from(slots: Box<[MaybeUninit<T>]>) -> Self {
        Self {
            len: slots.len(),
            slots: UnsafeCell::new(slots),
        }
    }
}

#[cfg(feature = "alloc")]
unsafe impl<T> Storage for Heap<T> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    unsafe fn slice(&self, range: Range<usize>) -> &[MaybeUninit<T>] {
        (&*self.slots.get()).get_unchecked(range)
    }

    #[allow(clippy::mut_from_ref)]
    unsafe fn slice_mut(&self, range: Range<usize>) -> &mut [MaybeUninit<T>] {
        (&mut *self.slots.get()).get_unchecked_mut(range)
    }
}
