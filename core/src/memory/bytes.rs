//! Fixed-size byte encoding helpers.
//!
//! Values are written field by field in little-endian order instead of
//! reinterpreting their in-memory layout.

use crate::error::{MemoryError, MemoryResult};

/// Types with a fixed-length byte encoding.
pub trait FixedBytes: Sized {
    /// Encoded length in bytes.
    const SIZE: usize;

    /// Encode into `buf`. `buf` is exactly `SIZE` bytes long.
    fn encode_into(&self, buf: &mut [u8]);

    /// Decode from `buf`. `buf` is exactly `SIZE` bytes long.
    fn decode_from(buf: &[u8]) -> Self;
}

impl FixedBytes for u32 {
    const SIZE: usize = 4;

    #[inline]
    fn encode_into(&self, buf: &mut [u8]) {
        buf.copy_from_slice(&self.to_le_bytes());
    }

    #[inline]
    fn decode_from(buf: &[u8]) -> Self {
        u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]])
    }
}

impl FixedBytes for u64 {
    const SIZE: usize = 8;

    #[inline]
    fn encode_into(&self, buf: &mut [u8]) {
        buf.copy_from_slice(&self.to_le_bytes());
    }

    #[inline]
    fn decode_from(buf: &[u8]) -> Self {
        u64::from_le_bytes([
            buf[0], buf[1], buf[2], buf[3], buf[4], buf[5], buf[6], buf[7],
        ])
    }
}

/// Encode `value` into a freshly allocated buffer.
pub fn as_bytes<T: FixedBytes>(value: &T) -> Vec<u8> {
    let mut buf = vec![0u8; T::SIZE];
    value.encode_into(&mut buf);
    buf
}

/// Write `value` to the front of `dest` and return the unused remainder.
///
/// Fails without touching `dest` if it is shorter than `T::SIZE`.
pub fn write_into<'a, T: FixedBytes>(
    value: &T,
    dest: &'a mut [u8],
) -> MemoryResult<&'a mut [u8]> {
    if dest.len() < T::SIZE {
        return Err(MemoryError::BufferTooSmall {
            needed: T::SIZE,
            available: dest.len(),
        });
    }

    let (head, rest) = dest.split_at_mut(T::SIZE);
    value.encode_into(head);
    Ok(rest)
}

/// Read a value from the front of `src`, returning it with the remaining bytes.
pub fn read_from<T: FixedBytes>(src: &[u8]) -> MemoryResult<(T, &[u8])> {
    if src.len() < T::SIZE {
        return Err(MemoryError::BufferTooSmall {
            needed: T::SIZE,
            available: src.len(),
        });
    }

    let (head, rest) = src.split_at(T::SIZE);
    Ok((T::decode_from(head), rest))
}
