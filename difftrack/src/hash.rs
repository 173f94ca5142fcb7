//! FNV-1a 64-bit content fingerprinting (§4.6, §6.1 "hex-fingerprint").
//!
//! none of the dependency crates carry this exact variant (`rustc-hash` and
//! friends are different, faster but non-standard hashes not meant for
//! cross-run persistence), and the constants are small enough that pulling
//! in a crate just for them isn't worth the dependency.

const FNV_OFFSET_BASIS: u64 = 14695981039346656037;
const FNV_PRIME: u64 = 1099511628211;

pub fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// lowercase hex form used for persistence (§6.1 `tracked_hashes`).
pub fn fnv1a_hex(bytes: &[u8]) -> String {
    format!("{:016x}", fnv1a(bytes))
}
