//! Fixed-capacity ring buffers in two shapes: a lock-free single-producer
//! single-consumer handoff ring ([`SpscRing`]) and a single-threaded
//! sliding-window ring ([`WindowRing`]).
//!
//! Both own one storage block sized at construction ([`storage::Heap`] or
//! the allocation-free [`storage::Array`]) and never reallocate or move
//! items around. The SPSC ring synchronizes exclusively through two
//! monotonic cursors with acquire/release pairing, no locks and no
//! compare-and-swap; a full or empty ring is reported through return
//! values and polling is the intended waiting strategy. The window ring is
//! plain sequential state for streaming transforms that index into their
//! last `n` samples.
//!
//! # Features
//!
//! - `std` (default), implies `alloc`.
//! - `alloc`: heap storage and the `Arc`-backed [`SpscRing::split`].
//! - `portable-atomic`: atomics and `Arc` from the `portable-atomic`
//!   crates for targets without native atomic support.

#![no_std]
#![allow(clippy::type_complexity)]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod alias;
pub mod spsc;
pub mod storage;
mod sync;
mod utils;
pub mod window;

pub use alias::*;
pub use spsc::{Cons, Prod, RingRef, SpscRing};
pub use window::WindowRing;

#[cfg(test)]
mod tests;
