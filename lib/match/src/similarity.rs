//! Sorenson-Dice similarity over encoded bit vectors.

use crate::error::Result;
use bloomlink_core::BitVector;

/// Sorenson-Dice coefficient of two equal-length bit vectors:
/// `2 * |A ∧ B| / (|A| + |B|)`, in `[0.0, 1.0]`.
///
/// Two all-zero vectors compare as `1.0` (two empty sets are trivially
/// identical). Mismatched lengths are an invalid argument, never a
/// silent zero.
pub fn sorenson_dice(a: &BitVector, b: &BitVector) -> Result<f64> {
    let intersection = a.and(b)?.count_ones();

    let ones_a = a.count_ones();
    let ones_b = b.count_ones();
    if ones_a + ones_b == 0 {
        return Ok(1.0);
    }

    Ok(2.0 * intersection as f64 / (ones_a + ones_b) as f64)
}
