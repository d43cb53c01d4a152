//! Allocator contract shared by every backing store.
//!
//! A store hands out addresses from [`Allocator::alloc`] and is the only
//! authority on which addresses are valid. Callers treat an address as an
//! opaque key for later reads and writes against the same store instance.

use std::sync::Arc;

use super::Address;
use crate::error::{MemoryError, MemoryResult};

pub trait Allocator: Send + Sync {
    /// Reserve a zeroed region of exactly `size` bytes.
    ///
    /// The returned address is never null and never returned twice by the
    /// same store.
    fn alloc(&self, size: u32) -> MemoryResult<Address>;

    /// Copy out the full contents of the region at `address`.
    fn read(&self, address: Address) -> MemoryResult<Vec<u8>>;

    /// Copy `data` into the region at `address` starting at `offset`.
    ///
    /// Either all of `data` is written or the region is left unchanged.
    fn write(&self, address: Address, offset: u32, data: &[u8]) -> MemoryResult<()>;

    /// Fixed label identifying the implementation, for diagnostics.
    fn describe(&self) -> &'static str;

    /// Allocate a region sized to `data` and fill it.
    fn alloc_with(&self, data: &[u8]) -> MemoryResult<Address> {
        let size = u32::try_from(data.len()).map_err(|_| {
            MemoryError::AllocationFailed(format!(
                "region of {} bytes exceeds the u32 size limit",
                data.len()
            ))
        })?;
        let address = self.alloc(size)?;
        self.write(address, 0, data)?;
        Ok(address)
    }
}

/// Thread-safe handle to any backing store.
pub type SharedAllocator = Arc<dyn Allocator>;
