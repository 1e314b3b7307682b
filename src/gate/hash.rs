//! FNV-1a hashing for category paths.
//!
//! # Design Decisions
//! - 64-bit FNV-1a: deterministic across runs and platforms, no random seed
//! - Applied to the exact bytes of the dot-joined path, nothing appended
//! - The table keys its map on that hash directly; the map's own hasher
//!   passes the key through unchanged

use std::hash::{BuildHasherDefault, Hasher};

const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const PRIME: u64 = 0x0100_0000_01b3;

/// Hash a byte sequence with 64-bit FNV-1a.
pub fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = OFFSET_BASIS;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

/// Hash of a dot-joined category path.
pub fn path_hash(path: &str) -> u64 {
    fnv1a(path.as_bytes())
}

/// Hasher for maps whose `u64` keys are already FNV-1a digests.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrehashedHasher(u64);

impl Hasher for PrehashedHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.0 = (self.0 << 8) | u64::from(*byte);
        }
    }

    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }
}

/// `BuildHasher` for maps keyed by [`path_hash`].
pub type BuildPrehashed = BuildHasherDefault<PrehashedHasher>;
