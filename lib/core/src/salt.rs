//! Query-time salting of encoded filters.
//!
//! Before a filter leaves the trust boundary (e.g. into a pseudonym
//! table) additional bits are forced to 1, blunting frequency and
//! linkage attacks while leaving the similarity structure mostly intact.
//! Salting never mutates the stored filter; it always returns a copy.

use crate::bitvec::BitVector;
use rand::Rng;

/// Return a salted copy of `filter`.
///
/// Fixed indices take precedence: when `salt_fixed` is non-empty every
/// in-range index in it is set and `salt_amount` is ignored; out-of-range
/// indices are silently skipped. Otherwise `min(salt_amount, len)`
/// distinct random indices are drawn without replacement from `rng`.
/// The rng is injectable so exports can be reproduced under a seeded
/// generator in tests.
#[must_use]
pub fn add_salt<R: Rng + ?Sized>(
    filter: &BitVector,
    salt_amount: usize,
    salt_fixed: &[usize],
    rng: &mut R,
) -> BitVector {
    let mut salted = filter.clone();

    if !salt_fixed.is_empty() {
        for &index in salt_fixed {
            if index < salted.len() {
                salted.set(index);
            }
        }
    } else if salt_amount > 0 && !salted.is_empty() {
        let amount = salt_amount.min(salted.len());
        for index in rand::seq::index::sample(rng, salted.len(), amount) {
            salted.set(index);
        }
    }

    salted
}

/// Byte-buffer form of [`add_salt`]: unpack, salt, repack. This is the
/// derivation used when exporting filters to an external pseudonym table.
#[must_use]
pub fn add_salt_bytes<R: Rng + ?Sized>(
    filter: &[u8],
    salt_amount: usize,
    salt_fixed: &[usize],
    rng: &mut R,
) -> Vec<u8> {
    add_salt(&BitVector::from_bytes(filter), salt_amount, salt_fixed, rng).to_bytes()
}
