use core::{
    mem::{self, MaybeUninit},
    ops::Range,
};

// TODO: Replace with inline-const array init when MSRV reaches 1.79.
pub fn uninit_array<T, const N: usize>() -> [MaybeUninit<T>; N] {
    unsafe { MaybeUninit::<[MaybeUninit<T>; N]>::uninit().assume_init() }
}

// TODO: Remove on `maybe_uninit_slice` stabilization.
pub unsafe fn slice_assume_init_ref<T>(slice: &[MaybeUninit<T>]) -> &[T] {
    &*(slice as *const [MaybeUninit<T>] as *const [T])
}

// TODO: Remove on `maybe_uninit_slice` stabilization.
pub unsafe fn slice_assume_init_mut<T>(slice: &mut [MaybeUninit<T>]) -> &mut [T] {
    &mut *(slice as *mut [MaybeUninit<T>] as *mut [T])
}

// TODO: Remove on `maybe_uninit_write_slice` stabilization.
pub fn write_slice<'a, T: Copy>(dst: &'a mut [MaybeUninit<T>], src: &[T]) -> &'a mut [T] {
    let uninit_src: &[MaybeUninit<T>] = unsafe { mem::transmute(src) };
    dst.copy_from_slice(uninit_src);
    unsafe { slice_assume_init_mut(dst) }
}

/// Copies initialized slots over an initialized slice.
///
/// # Safety
///
/// All slots of `src` must be initialized.
pub unsafe fn write_uninit_slice<'a, T: Copy>(dst: &'a mut [T], src: &[MaybeUninit<T>]) -> &'a mut [T] {
    dst.copy_from_slice(slice_assume_init_ref(src));
    dst
}

/// Splits the cyclic cursor range `[read, write)` of a ring with `capacity`
/// slots into at most two physical spans, the first one never empty unless
/// the range is.
///
/// Cursors are monotonic and wrap with the integer range; `capacity` must be
/// a power of two so that it divides the cursor modulus and the slot mapping
/// stays consistent across the numeric wrap.
pub fn cursor_ranges(capacity: usize, read: usize, write: usize) -> (Range<usize>, Range<usize>) {
    let len = write.wrapping_sub(read);
    debug_assert!(len <= capacity);
    let head = read & (capacity - 1);
    if head + len <= capacity {
        (head..head + len, 0..0)
    } else {
        (head..capacity, 0..head + len - capacity)
    }
}
