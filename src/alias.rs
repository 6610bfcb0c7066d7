#[cfg(feature = "alloc")]
use crate::storage::Heap;
#[cfg(feature = "alloc")]
use crate::sync::Arc;
use crate::{
    spsc::{Cons, Prod, SpscRing},
    storage::Array,
    window::WindowRing,
};

/// Stack-allocated SPSC ring with capacity in the type.
///
/// *`N` must be a power of two.*
pub type StaticSpsc<T, const N: usize> = SpscRing<Array<T, N>>;

/// Alias for a [`StaticSpsc`] producer.
pub type StaticProd<'a, T, const N: usize> = Prod<&'a StaticSpsc<T, N>>;

/// Alias for a [`StaticSpsc`] consumer.
pub type StaticCons<'a, T, const N: usize> = Cons<&'a StaticSpsc<T, N>>;

/// Heap-allocated SPSC ring.
#[cfg(feature = "alloc")]
pub type HeapSpsc<T> = SpscRing<Heap<T>>;

/// Alias for a [`HeapSpsc`] producer.
#[cfg(feature = "alloc")]
pub type HeapProd<T> = Prod<Arc<HeapSpsc<T>>>;

/// Alias for a [`HeapSpsc`] consumer.
#[cfg(feature = "alloc")]
pub type HeapCons<T> = Cons<Arc<HeapSpsc<T>>>;

/// Stack-allocated window ring with capacity in the type.
pub type StaticWindow<T, const N: usize> = WindowRing<Array<T, N>>;

/// Heap-allocated window ring.
#[cfg(feature = "alloc")]
pub type HeapWindow<T> = WindowRing<Heap<T>>;
