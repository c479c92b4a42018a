use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A fixed-length bit vector packed most-significant-bit-first per byte.
///
/// This is the storage unit for encoded record filters. The packed byte
/// layout matches what the storage collaborator persists as a BLOB: bit 0
/// is the high bit of byte 0, length is fixed at construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BitVector {
    bytes: Vec<u8>,
    len: usize,
}

impl BitVector {
    /// Create an all-zero bit vector of `len` bits.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self {
            bytes: vec![0u8; len.div_ceil(8)],
            len,
        }
    }

    /// Number of bits.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Set the bit at `index` to 1. Idempotent.
    ///
    /// # Panics
    /// Panics if `index >= len`. Callers that derive indices from external
    /// input must bounds-check first (see [`crate::salt::add_salt`]).
    #[inline]
    pub fn set(&mut self, index: usize) {
        assert!(index < self.len, "bit index {index} out of range for vector of length {}", self.len);
        self.bytes[index / 8] |= 0x80 >> (index % 8);
    }

    /// Read the bit at `index`.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> bool {
        assert!(index < self.len, "bit index {index} out of range for vector of length {}", self.len);
        self.bytes[index / 8] & (0x80 >> (index % 8)) != 0
    }

    /// Population count (number of set bits).
    ///
    /// Trailing bits past `len` in the last byte are guaranteed zero by
    /// construction, so a straight per-byte count is exact.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Bitwise AND with another vector of the same length.
    pub fn and(&self, other: &BitVector) -> Result<BitVector> {
        if self.len != other.len {
            return Err(Error::LengthMismatch {
                left: self.len,
                right: other.len,
            });
        }
        let bytes = self
            .bytes
            .iter()
            .zip(other.bytes.iter())
            .map(|(a, b)| a & b)
            .collect();
        Ok(BitVector { bytes, len: self.len })
    }

    /// Copy the bits in `[start, end)` into a new vector.
    ///
    /// # Panics
    /// Panics if `start > end` or `end > len`.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> BitVector {
        assert!(start <= end && end <= self.len, "slice {start}..{end} out of range for length {}", self.len);
        if start % 8 == 0 {
            // Byte-aligned fast path; record segments are always 8-aligned.
            let mut bytes = self.bytes[start / 8..end.div_ceil(8)].to_vec();
            let len = end - start;
            if len % 8 != 0 {
                if let Some(last) = bytes.last_mut() {
                    *last &= 0xff << (8 - len % 8);
                }
            }
            return BitVector { bytes, len };
        }
        let mut out = BitVector::zeros(end - start);
        for i in start..end {
            if self.get(i) {
                out.set(i - start);
            }
        }
        out
    }

    /// Append all bits of `other` after the bits of `self`.
    pub fn extend_from(&mut self, other: &BitVector) {
        if self.len % 8 == 0 {
            self.bytes.extend_from_slice(&other.bytes);
            self.len += other.len;
            return;
        }
        for i in 0..other.len {
            self.push(other.get(i));
        }
    }

    /// Append a single bit.
    pub fn push(&mut self, bit: bool) {
        if self.len % 8 == 0 {
            self.bytes.push(0);
        }
        if bit {
            self.bytes[self.len / 8] |= 0x80 >> (self.len % 8);
        }
        self.len += 1;
    }

    /// Packed byte form, MSB-first within each byte.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Rebuild a vector from its packed byte form. Length is taken as
    /// `8 * bytes.len()`; record filters always use whole bytes.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            len: bytes.len() * 8,
        }
    }

    /// Render as a `0`/`1` string, the exchange form used for file export.
    #[must_use]
    pub fn to_bitstring(&self) -> String {
        (0..self.len).map(|i| if self.get(i) { '1' } else { '0' }).collect()
    }

    /// Parse a `0`/`1` string produced by [`BitVector::to_bitstring`].
    pub fn from_bitstring(s: &str) -> Result<Self> {
        let mut out = BitVector::zeros(s.len());
        for (i, c) in s.chars().enumerate() {
            match c {
                '1' => out.set(i),
                '0' => {}
                other => {
                    return Err(Error::InvalidFilter(format!(
                        "unexpected character '{other}' at position {i} in bit string"
                    )))
                }
            }
        }
        Ok(out)
    }
}
