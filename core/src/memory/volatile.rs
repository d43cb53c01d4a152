//! Volatile backing store
//!
//! Keeps every region in process memory, keyed by address. Nothing survives
//! the store instance and regions are never reclaimed.

use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;

use super::{Address, Allocator};
use crate::config::AllocatorConfig;
use crate::error::{MemoryError, MemoryResult};

/// Allocator backed by a process-local map of zero-initialised buffers.
pub struct VolatileMemory {
    inner: RwLock<Inner>,
    block_id: u32,
    max_bytes: Option<u64>,
}

struct Inner {
    regions: HashMap<Address, Box<[u8]>>,
    // Widened so that handing out u32::MAX can still be followed by a clean failure.
    next_offset: u64,
    bytes_allocated: u64,
}

impl VolatileMemory {
    const LABEL: &'static str = "physical_memory";

    /// Create a store with the default configuration.
    pub fn new() -> Self {
        Self::build(AllocatorConfig::default())
    }

    /// Create a store from a validated configuration.
    pub fn with_config(config: AllocatorConfig) -> MemoryResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: AllocatorConfig) -> Self {
        tracing::info!(
            "Created {} store: block {}, first offset {}, capacity {:?}",
            Self::LABEL,
            config.block_id,
            config.initial_offset,
            config.max_bytes
        );

        Self {
            inner: RwLock::new(Inner {
                regions: HashMap::new(),
                next_offset: config.initial_offset as u64,
                bytes_allocated: 0,
            }),
            block_id: config.block_id,
            max_bytes: config.max_bytes,
        }
    }

    /// Block assigned to every address from this store.
    pub fn block_id(&self) -> u32 {
        self.block_id
    }

    /// Whether `address` was handed out by this store.
    pub fn contains(&self, address: Address) -> bool {
        self.inner.read().regions.contains_key(&address)
    }

    /// Fixed length of the region at `address`.
    pub fn region_size(&self, address: Address) -> MemoryResult<u32> {
        let inner = self.inner.read();
        inner
            .regions
            .get(&address)
            .map(|region| region.len() as u32)
            .ok_or(MemoryError::InvalidAddress(address))
    }

    /// Get current memory usage statistics
    pub fn stats(&self) -> MemoryStats {
        let inner = self.inner.read();
        MemoryStats {
            block_id: self.block_id,
            allocations: inner.regions.len(),
            bytes_allocated: inner.bytes_allocated,
            next_offset: inner.next_offset,
            max_bytes: self.max_bytes,
        }
    }
}

impl Default for VolatileMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl Allocator for VolatileMemory {
    fn alloc(&self, size: u32) -> MemoryResult<Address> {
        let mut inner = self.inner.write();

        if inner.next_offset > u32::MAX as u64 {
            tracing::warn!("Block {} has no offsets left", self.block_id);
            return Err(MemoryError::AllocationFailed(format!(
                "block {} has no offsets left",
                self.block_id
            )));
        }

        let requested = inner.bytes_allocated + size as u64;
        if let Some(max) = self.max_bytes
            && requested > max
        {
            tracing::warn!(
                "Allocation of {size} bytes rejected: {} of {max} bytes in use",
                inner.bytes_allocated
            );
            return Err(MemoryError::AllocationFailed(format!(
                "{size} bytes requested with {} of {max} bytes in use",
                inner.bytes_allocated
            )));
        }

        let address = Address::new(self.block_id, inner.next_offset as u32);
        inner.next_offset += 1;
        inner.bytes_allocated = requested;
        inner
            .regions
            .insert(address, vec![0u8; size as usize].into_boxed_slice());

        tracing::debug!("Allocated {size} bytes at {address}");
        Ok(address)
    }

    fn read(&self, address: Address) -> MemoryResult<Vec<u8>> {
        let inner = self.inner.read();
        match inner.regions.get(&address) {
            Some(region) => {
                tracing::trace!("Read {} bytes from {address}", region.len());
                Ok(region.to_vec())
            }
            None => {
                tracing::warn!("Read from unknown address {address}");
                Err(MemoryError::InvalidAddress(address))
            }
        }
    }

    fn write(&self, address: Address, offset: u32, data: &[u8]) -> MemoryResult<()> {
        let mut inner = self.inner.write();
        let Some(region) = inner.regions.get_mut(&address) else {
            tracing::warn!("Write to unknown address {address}");
            return Err(MemoryError::InvalidAddress(address));
        };

        let start = offset as usize;
        let end = offset as u64 + data.len() as u64;
        if end > region.len() as u64 {
            tracing::warn!(
                "Write of {} bytes at offset {offset} overruns {address} ({} bytes)",
                data.len(),
                region.len()
            );
            return Err(MemoryError::OutOfBounds {
                address,
                offset,
                len: data.len(),
                size: region.len() as u32,
            });
        }

        region[start..start + data.len()].copy_from_slice(data);
        tracing::trace!("Wrote {} bytes at {address}+{offset}", data.len());
        Ok(())
    }

    fn describe(&self) -> &'static str {
        Self::LABEL
    }
}

impl fmt::Display for VolatileMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::LABEL)
    }
}

/// Memory usage statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryStats {
    pub block_id: u32,
    pub allocations: usize,
    pub bytes_allocated: u64,
    pub next_offset: u64,
    pub max_bytes: Option<u64>,
}

impl MemoryStats {
    /// Get the memory utilization as a percentage, 0 when unbounded
    pub fn utilization_percent(&self) -> f64 {
        match self.max_bytes {
            Some(max) if max > 0 => (self.bytes_allocated as f64 / max as f64) * 100.0,
            _ => 0.0,
        }
    }
}
