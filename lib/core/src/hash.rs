//! Stable seeded hashing for q-gram bit placement.
//!
//! Encoded filters are persisted and compared across processes and
//! platforms, so the hash must be bit-stable forever; `std`'s
//! `DefaultHasher` makes no such guarantee. MurmurHash3 (x86 32-bit
//! variant) is the function the stored filters were built with.

/// MurmurHash3 x86_32 of `data` under `seed`.
#[must_use]
pub fn murmur3_32(data: &[u8], seed: u32) -> u32 {
    const C1: u32 = 0xcc9e_2d51;
    const C2: u32 = 0x1b87_3593;

    let mut h = seed;
    let mut chunks = data.chunks_exact(4);
    for chunk in chunks.by_ref() {
        let mut k = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        k = k.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2);
        h ^= k;
        h = h.rotate_left(13).wrapping_mul(5).wrapping_add(0xe654_6b64);
    }

    let tail = chunks.remainder();
    if !tail.is_empty() {
        let mut k = 0u32;
        for (i, &b) in tail.iter().enumerate() {
            k |= u32::from(b) << (8 * i);
        }
        k = k.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2);
        h ^= k;
    }

    h ^= data.len() as u32;
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

/// Bit index for a token under a given seed and vector width.
#[inline]
#[must_use]
pub fn bit_index(token: &str, seed: u32, bit_width: usize) -> usize {
    murmur3_32(token.as_bytes(), seed) as usize % bit_width
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference vectors from the canonical MurmurHash3 test suite.
    #[test]
    fn test_reference_vectors() {
        assert_eq!(murmur3_32(b"", 0), 0);
        assert_eq!(murmur3_32(b"", 1), 0x514e_28b7);
        assert_eq!(murmur3_32(b"", 0xffff_ffff), 0x81f1_6f39);
        assert_eq!(murmur3_32(b"Hello, world!", 0x9747_b28c), 0x2488_4cba);
    }

    #[test]
    fn test_seed_sensitivity() {
        let a = murmur3_32(b"_to", 92607);
        let b = murmur3_32(b"_to", 52434);
        assert_ne!(a, b);
    }

    #[test]
    fn test_determinism() {
        for seed in [0u32, 42, 92607, 88036] {
            assert_eq!(murmur3_32(b"om_", seed), murmur3_32(b"om_", seed));
        }
    }

    #[test]
    fn test_bit_index_in_range() {
        for seed in 0..64u32 {
            assert!(bit_index("ab", seed, 208) < 208);
        }
    }
}
