#[cfg(feature = "alloc")]
mod access;
mod basic;
