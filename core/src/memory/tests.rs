//! Contract tests run against the allocator trait object.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use pretty_assertions::assert_eq;

use super::{Address, Allocator, SharedAllocator, VolatileMemory};
use crate::error::MemoryError;

fn shared() -> SharedAllocator {
    crate::logging::init();
    Arc::new(VolatileMemory::new())
}

#[test]
fn test_fresh_regions_are_unique_and_zeroed() {
    let memory = shared();
    let mut seen = HashSet::new();

    for size in [0u32, 1, 4, 7, 64, 4096] {
        let addr = memory.alloc(size).unwrap();
        assert!(!addr.is_null());
        assert!(seen.insert(addr), "address {addr} returned twice");
        assert_eq!(memory.read(addr).unwrap(), vec![0u8; size as usize]);
    }
}

#[test]
fn test_write_overlays_data() {
    let memory = shared();
    let size = 16u32;

    let cases: [(u32, &[u8]); 4] = [
        (0, &b"abc"[..]),
        (13, &b"xyz"[..]),
        (5, &b""[..]),
        (0, &[0xAA; 16][..]),
    ];

    for (offset, data) in cases {
        let addr = memory.alloc(size).unwrap();
        memory.write(addr, 0, &[0x11; 16]).unwrap();
        let before = memory.read(addr).unwrap();

        memory.write(addr, offset, data).unwrap();

        let mut expected = before.clone();
        let start = offset as usize;
        expected[start..start + data.len()].copy_from_slice(data);
        assert_eq!(memory.read(addr).unwrap(), expected);
    }
}

#[test]
fn test_foreign_addresses_are_invalid() {
    let memory = shared();
    let other = shared();

    let mine = memory.alloc(4).unwrap();
    let theirs = other.alloc(4).unwrap();
    let unseen = Address::new(9, 9);

    // Same shape, different store: only the issuing store knows it
    other.alloc(4).unwrap();
    let second = other.alloc(4).unwrap();
    assert!(matches!(
        memory.read(second),
        Err(MemoryError::InvalidAddress(a)) if a == second
    ));

    for addr in [unseen, Address::NULL] {
        assert_eq!(
            memory.read(addr).unwrap_err(),
            MemoryError::InvalidAddress(addr)
        );
        assert_eq!(
            memory.write(addr, 0, b"x").unwrap_err(),
            MemoryError::InvalidAddress(addr)
        );
    }

    assert_eq!(mine, theirs);
    assert!(memory.read(mine).is_ok());
}

#[test]
fn test_out_of_bounds_leaves_region_unchanged() {
    let memory = shared();
    let addr = memory.alloc(6).unwrap();
    memory.write(addr, 0, b"simple").unwrap();

    for (offset, data) in [
        (0u32, &b"toolong"[..]),
        (5, &b"ab"[..]),
        (6, &b"a"[..]),
        (100, &b""[..]),
    ] {
        let err = memory.write(addr, offset, data).unwrap_err();
        assert_eq!(err.kind(), "out_of_bounds");
        assert_eq!(memory.read(addr).unwrap(), b"simple".to_vec());
    }
}

#[test]
fn test_addresses_embed_in_records() {
    let memory = shared();
    let target = memory.alloc_with(b"leaf").unwrap();

    // A record holding a pointer to another region
    let mut record = target.to_bytes().to_vec();
    record.extend_from_slice(b"node");
    let node = memory.alloc_with(&record).unwrap();

    let stored = memory.read(node).unwrap();
    let next = Address::from_bytes(&stored).unwrap();
    assert_eq!(next, target);
    assert_eq!(memory.read(next).unwrap(), b"leaf".to_vec());
}

#[test]
fn test_concurrent_allocations_are_distinct() {
    const THREADS: usize = 16;

    crate::logging::init();
    let memory = Arc::new(VolatileMemory::new());
    let start = memory.stats().next_offset;

    let addresses: Vec<Address> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let memory = Arc::clone(&memory);
                s.spawn(move || memory.alloc(4).unwrap())
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let unique: HashSet<_> = addresses.iter().copied().collect();
    assert_eq!(unique.len(), THREADS);
    assert_eq!(memory.stats().next_offset, start + THREADS as u64);
    assert_eq!(memory.stats().allocations, THREADS);
}

#[test]
fn test_concurrent_writes_are_not_torn() {
    const WRITERS: u8 = 8;
    const ROUNDS: usize = 200;

    let memory: SharedAllocator = shared();
    let addr = memory.alloc(64).unwrap();

    thread::scope(|s| {
        for id in 1..=WRITERS {
            let memory = Arc::clone(&memory);
            s.spawn(move || {
                for _ in 0..ROUNDS {
                    memory.write(addr, 0, &[id; 64]).unwrap();
                }
            });
        }

        let memory = Arc::clone(&memory);
        s.spawn(move || {
            for _ in 0..ROUNDS {
                let snapshot = memory.read(addr).unwrap();
                assert!(snapshot.iter().all(|&b| b == snapshot[0]));
            }
        });
    });
}
