use thiserror::Error;

use crate::memory::Address;

pub type MemoryResult<T> = Result<T, MemoryError>;

/// Errors returned by the addressing layer and its backing stores.
///
/// # Example
/// ```rust
/// use simpledb_core::{Address, Allocator, MemoryError, VolatileMemory};
///
/// let memory = VolatileMemory::new();
/// match memory.read(Address::new(0, 42)) {
///     Err(MemoryError::InvalidAddress(addr)) => println!("unknown address {addr}"),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("invalid pointer {0}")]
    InvalidAddress(Address),

    #[error("write of {len} bytes at offset {offset} exceeds region {address} of {size} bytes")]
    OutOfBounds {
        address: Address,
        offset: u32,
        len: usize,
        size: u32,
    },

    #[error("Allocation failed: {0}")]
    AllocationFailed(String),

    #[error("Buffer too small: needed {needed} bytes, got {available}")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl MemoryError {
    /// Get a short error kind name
    pub fn kind(&self) -> &'static str {
        match self {
            MemoryError::InvalidAddress(_) => "invalid_address",
            MemoryError::OutOfBounds { .. } => "out_of_bounds",
            MemoryError::AllocationFailed(_) => "allocation_failed",
            MemoryError::BufferTooSmall { .. } => "buffer_too_small",
            MemoryError::Config(_) => "config_error",
            MemoryError::Io(_) => "io_error",
        }
    }
}

impl From<std::io::Error> for MemoryError {
    fn from(err: std::io::Error) -> Self {
        MemoryError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for MemoryError {
    fn from(err: toml::de::Error) -> Self {
        MemoryError::Config(err.to_string())
    }
}
