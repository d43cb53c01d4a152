//! Memory addressing module
//!
//! Addresses, their byte encoding, the allocator contract and the volatile
//! backing store that implements it.

pub mod address;
pub mod allocator;
pub mod bytes;
pub mod volatile;

#[cfg(test)]
mod tests;

pub use address::Address;
pub use allocator::{Allocator, SharedAllocator};
pub use bytes::{FixedBytes, as_bytes, read_from, write_into};
pub use volatile::{MemoryStats, VolatileMemory};
