//! SimpleDB core - memory addressing layer
//!
//! Names byte regions with fixed-size addresses and backs them with a
//! pluggable store. Higher layers (pages, records, a disk-backed store)
//! build on the [`Allocator`] contract defined here.

pub mod config;
pub mod error;
pub mod logging;
pub mod memory;

pub use config::AllocatorConfig;
pub use error::{MemoryError, MemoryResult};
pub use memory::{Address, Allocator, MemoryStats, SharedAllocator, VolatileMemory};
