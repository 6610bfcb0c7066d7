//! Atomic and shared-pointer primitives, switchable to the `portable-atomic`
//! crates for targets without native atomic support.

#[cfg(not(feature = "portable-atomic"))]
pub(crate) use core::sync::atomic::AtomicUsize;
#[cfg(feature = "portable-atomic")]
pub(crate) use portable_atomic::AtomicUsize;

pub(crate) use core::sync::atomic::Ordering;

#[cfg(all(feature = "alloc", not(feature = "portable-atomic")))]
pub(crate) use alloc::sync::Arc;
#[cfg(all(feature = "alloc", feature = "portable-atomic"))]
pub(crate) use portable_atomic_util::Arc;
