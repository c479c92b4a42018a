//! Batch matching of one candidate filter against stored rows.
//!
//! The storage collaborator hands over `(id, bytes)` rows; every row is
//! scored independently against the query filter, so the scan runs in
//! parallel with no shared state. Output preserves input row order.

use crate::compare::{compare, CompareMode, SegmentLayout};
use crate::error::{Error, Result};
use crate::rating::{Rating, Thresholds};
use crate::similarity::sorenson_dice;
use bloomlink_core::BitVector;
use rayon::prelude::*;
use serde::Serialize;

/// A stored row that cleared the plain similarity floor.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RelinkMatch<I> {
    pub id: I,
    pub score: f64,
}

/// A stored row scored with the segmented comparator.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SegmentedMatch<I> {
    pub id: I,
    pub score: f64,
    pub rating: Rating,
    pub swap_detected: bool,
}

/// Whole-filter Dice scan: keep rows whose similarity to `query`
/// strictly exceeds `min_similarity`.
pub fn relink<I>(
    query: &BitVector,
    rows: &[(I, Vec<u8>)],
    min_similarity: f64,
) -> Result<Vec<RelinkMatch<I>>>
where
    I: Clone + Send + Sync,
{
    let scored: Vec<Option<RelinkMatch<I>>> = rows
        .par_iter()
        .map(|(id, bytes)| {
            let stored = decode_row(bytes, query.len())?;
            let score = sorenson_dice(query, &stored)?;
            Ok(if score > min_similarity {
                Some(RelinkMatch { id: id.clone(), score })
            } else {
                None
            })
        })
        .collect::<Result<_>>()?;

    Ok(scored.into_iter().flatten().collect())
}

/// Segmented total-mode scan carrying rating and swap flag per row.
///
/// Rows rated not-alike are dropped unless `include_not_alike` is set.
pub fn relink_segmented<I>(
    query: &BitVector,
    rows: &[(I, Vec<u8>)],
    layout: &SegmentLayout,
    thresholds: &Thresholds,
    allow_swap_correction: bool,
    include_not_alike: bool,
) -> Result<Vec<SegmentedMatch<I>>>
where
    I: Clone + Send + Sync,
{
    let scored: Vec<Option<SegmentedMatch<I>>> = rows
        .par_iter()
        .map(|(id, bytes)| {
            let stored = decode_row(bytes, layout.total_bits())?;
            let outcome = compare(
                query,
                &stored,
                layout,
                CompareMode::Total,
                thresholds,
                allow_swap_correction,
            )?;
            let total = outcome
                .total()
                .expect("total mode always yields an aggregate segment");
            Ok(
                if include_not_alike || total.rating.is_match() {
                    Some(SegmentedMatch {
                        id: id.clone(),
                        score: total.score,
                        rating: total.rating,
                        swap_detected: outcome.swap_detected,
                    })
                } else {
                    None
                },
            )
        })
        .collect::<Result<_>>()?;

    Ok(scored.into_iter().flatten().collect())
}

fn decode_row(bytes: &[u8], expected_bits: usize) -> Result<BitVector> {
    let stored = BitVector::from_bytes(bytes);
    if stored.len() != expected_bits {
        return Err(Error::Core(bloomlink_core::Error::LengthMismatch {
            left: expected_bits,
            right: stored.len(),
        }));
    }
    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(len: usize, set: &[usize]) -> BitVector {
        let mut bv = BitVector::zeros(len);
        for &i in set {
            bv.set(i);
        }
        bv
    }

    fn layout4() -> SegmentLayout {
        SegmentLayout::new(
            vec![
                "first_name".to_string(),
                "last_name".to_string(),
                "birthdate".to_string(),
                "gender".to_string(),
            ],
            vec![16, 16, 8, 8],
        )
        .unwrap()
    }

    #[test]
    fn test_relink_filters_and_preserves_order() {
        let query = filter(48, &[0, 1, 2, 3]);
        let rows = vec![
            (10u64, filter(48, &[0, 1, 2, 3]).to_bytes()),     // identical
            (11, filter(48, &[40, 41, 42, 43]).to_bytes()),    // disjoint
            (12, filter(48, &[0, 1, 2, 8]).to_bytes()),        // partial
        ];

        let matches = relink(&query, &rows, 0.5).unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].id, 10);
        assert_eq!(matches[0].score, 1.0);
        assert_eq!(matches[1].id, 12);
        assert!(matches[1].score > 0.5 && matches[1].score < 1.0);
    }

    #[test]
    fn test_relink_floor_is_strict() {
        let query = filter(48, &[0, 1]);
        let rows = vec![(1u64, filter(48, &[0, 1]).to_bytes())];
        assert!(relink(&query, &rows, 1.0).unwrap().is_empty());
        assert_eq!(relink(&query, &rows, 0.99).unwrap().len(), 1);
    }

    #[test]
    fn test_relink_rejects_missized_row() {
        let query = filter(48, &[0]);
        let rows = vec![(1u64, vec![0u8; 5])];
        assert!(relink(&query, &rows, 0.0).is_err());
    }

    #[test]
    fn test_segmented_relink() {
        let layout = layout4();
        let thresholds = Thresholds::default();
        let query = filter(48, &[0, 1, 2, 3, 20, 21, 22, 23, 33, 41]);
        let rows = vec![
            // Same person.
            (1u64, filter(48, &[0, 1, 2, 3, 20, 21, 22, 23, 33, 41]).to_bytes()),
            // Names transposed, rest identical.
            (2, filter(48, &[4, 5, 6, 7, 16, 17, 18, 19, 33, 41]).to_bytes()),
            // Unrelated record.
            (3, filter(48, &[8, 9, 10, 11, 24, 25, 26, 27, 35, 43]).to_bytes()),
        ];

        let matches =
            relink_segmented(&query, &rows, &layout, &thresholds, true, false).unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].id, 1);
        assert_eq!(matches[0].rating, Rating::Strong);
        assert!(!matches[0].swap_detected);
        assert_eq!(matches[1].id, 2);
        assert!(matches[1].swap_detected);

        let with_rejects =
            relink_segmented(&query, &rows, &layout, &thresholds, true, true).unwrap();
        assert_eq!(with_rejects.len(), 3);
        assert_eq!(with_rejects[2].rating, Rating::NotAlike);
    }
}
