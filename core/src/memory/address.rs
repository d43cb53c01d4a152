//! Address encoding
//!
//! An address names a byte region by the block holding it and the offset
//! inside that block. Backing stores are the only source of valid addresses.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::bytes::{FixedBytes, read_from};
use crate::error::MemoryResult;

/// Identifies a region in a backing store.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address {
    /// Logical container of regions, comparable to a file.
    pub block_id: u32,
    /// Position inside the block.
    pub block_offset: u32,
}

impl Address {
    /// The null sentinel. Never returned by a successful allocation.
    pub const NULL: Address = Address {
        block_id: 0,
        block_offset: 0,
    };

    /// Serialized size in bytes.
    pub const SIZE: usize = 8;

    pub const fn new(block_id: u32, block_offset: u32) -> Self {
        Self {
            block_id,
            block_offset,
        }
    }

    pub const fn is_null(&self) -> bool {
        self.block_id == 0 && self.block_offset == 0
    }

    /// Encode as `block_id` then `block_offset`, each 4 bytes little-endian.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        self.encode_into(&mut bytes);
        bytes
    }

    /// Decode an address from the front of `bytes`. Trailing bytes are ignored.
    pub fn from_bytes(bytes: &[u8]) -> MemoryResult<Self> {
        let (address, _) = read_from::<Address>(bytes)?;
        Ok(address)
    }
}

impl FixedBytes for Address {
    const SIZE: usize = Address::SIZE;

    fn encode_into(&self, buf: &mut [u8]) {
        self.block_id.encode_into(&mut buf[..4]);
        self.block_offset.encode_into(&mut buf[4..8]);
    }

    fn decode_from(buf: &[u8]) -> Self {
        Self {
            block_id: u32::decode_from(&buf[..4]),
            block_offset: u32::decode_from(&buf[4..8]),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("nullptr");
        }

        if self.block_id != 0 {
            write!(f, "{:X}X", self.block_id)?;
        }
        write!(f, "{:X}", self.block_offset)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Address")
            .field("block_id", &self.block_id)
            .field("block_offset", &self.block_offset)
            .finish()
    }
}
