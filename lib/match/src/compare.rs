//! Segmented comparison of record filters.
//!
//! A record filter is the concatenation of per-field Bloom segments, so
//! two filters are compared segment by segment under a shared layout.
//! On top of the per-segment scores sits a transposition heuristic:
//! intake errors swap first and last name far more often than any other
//! field, and cross-comparing the two name segments recovers those pairs
//! without weakening the metric for true non-matches.

use crate::error::{Error, Result};
use crate::rating::{Rating, Thresholds};
use crate::similarity::sorenson_dice;
use bloomlink_core::BitVector;
use serde::{Deserialize, Serialize};

/// Named segment boundaries of a record filter, in encode order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SegmentLayout {
    names: Vec<String>,
    sizes: Vec<usize>,
}

impl SegmentLayout {
    /// Build a layout from parallel name/size lists.
    pub fn new(names: Vec<String>, sizes: Vec<usize>) -> Result<Self> {
        if names.len() != sizes.len() {
            return Err(Error::InvalidLayout(format!(
                "{} names but {} sizes",
                names.len(),
                sizes.len()
            )));
        }
        if names.is_empty() {
            return Err(Error::InvalidLayout("layout has no segments".to_string()));
        }
        if let Some(zero) = names.iter().zip(&sizes).find(|(_, s)| **s == 0) {
            return Err(Error::InvalidLayout(format!("segment '{}' has zero width", zero.0)));
        }
        Ok(Self { names, sizes })
    }

    /// Derive the layout from the schema the filters were encoded with.
    pub fn from_schema(schema: &bloomlink_core::RecordSchema) -> Result<Self> {
        Self::new(schema.field_names(), schema.field_sizes())
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Sum of segment widths; must equal the filter length on both sides.
    #[must_use]
    pub fn total_bits(&self) -> usize {
        self.sizes.iter().sum()
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.names.len()
    }

    /// Split a filter into its segments, in layout order.
    fn split(&self, filter: &BitVector) -> Vec<BitVector> {
        let mut segments = Vec::with_capacity(self.sizes.len());
        let mut start = 0;
        for &size in &self.sizes {
            segments.push(filter.slice(start, start + size));
            start += size;
        }
        segments
    }
}

/// Output shape selection for [`compare`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompareMode {
    /// One [`SegmentScore`] per field segment.
    PerSegment,
    /// A single aggregate score labeled `total`.
    Total,
}

/// Score and rating for one segment (or the aggregate).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SegmentScore {
    pub field_name: String,
    pub score: f64,
    pub rating: Rating,
}

/// Result of a segmented comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompareOutcome {
    pub segments: Vec<SegmentScore>,
    pub swap_detected: bool,
}

impl CompareOutcome {
    /// The aggregate score when produced with [`CompareMode::Total`].
    #[must_use]
    pub fn total(&self) -> Option<&SegmentScore> {
        self.segments.iter().find(|s| s.field_name == "total")
    }
}

/// Compare two record filters segment by segment.
///
/// Both filters must have length `layout.total_bits()`. With at least
/// four segments (conventionally first name, last name, birthdate,
/// gender) the swap heuristic runs: if both name segments rate weak or
/// worse while the rest of the record still looks like the same person,
/// the name segments are cross-compared, and when both cross scores
/// strictly beat their direct scores and the lowest threshold the pair
/// is flagged as transposed. With `allow_swap_correction` the two
/// segment results are replaced by the cross scores under
/// [`Rating::Swapped`].
///
/// The heuristic only runs when the first two segments have equal
/// widths; cross-comparing unequal segments has no defined score, so
/// such layouts always report `swap_detected == false`.
pub fn compare(
    a: &BitVector,
    b: &BitVector,
    layout: &SegmentLayout,
    mode: CompareMode,
    thresholds: &Thresholds,
    allow_swap_correction: bool,
) -> Result<CompareOutcome> {
    let expected = layout.total_bits();
    for filter in [a, b] {
        if filter.len() != expected {
            return Err(Error::InvalidLayout(format!(
                "filter length {} does not match layout total {expected}",
                filter.len()
            )));
        }
    }

    let segments_a = layout.split(a);
    let segments_b = layout.split(b);

    let mut scores = Vec::with_capacity(layout.segment_count());
    for ((name, seg_a), seg_b) in layout.names.iter().zip(&segments_a).zip(&segments_b) {
        let score = sorenson_dice(seg_a, seg_b)?;
        scores.push(SegmentScore {
            field_name: name.clone(),
            score,
            rating: thresholds.rate(score),
        });
    }

    let mut swap_detected = false;
    if layout.segment_count() >= 4 && layout.sizes[0] == layout.sizes[1] {
        let names_doubtful = scores[..2]
            .iter()
            .all(|s| matches!(s.rating, Rating::Weak | Rating::NotAlike));
        let rest_alive = !scores[2..].iter().all(|s| s.rating == Rating::NotAlike);

        if names_doubtful && rest_alive {
            let cross_first = sorenson_dice(&segments_a[0], &segments_b[1])?;
            let cross_last = sorenson_dice(&segments_a[1], &segments_b[0])?;
            let floor = thresholds.lowest();
            if cross_first > scores[0].score
                && cross_first > floor
                && cross_last > scores[1].score
                && cross_last > floor
            {
                swap_detected = true;
                if allow_swap_correction {
                    scores[0].score = cross_first;
                    scores[0].rating = Rating::Swapped;
                    scores[1].score = cross_last;
                    scores[1].rating = Rating::Swapped;
                }
            }
        }
    }

    let segments = match mode {
        CompareMode::PerSegment => scores,
        CompareMode::Total => {
            let mean = compensated_mean(scores.iter().map(|s| s.score));
            vec![SegmentScore {
                field_name: "total".to_string(),
                score: mean,
                rating: thresholds.rate(mean),
            }]
        }
    };

    Ok(CompareOutcome { segments, swap_detected })
}

/// Kahan-compensated mean; segment counts are tiny but the aggregate
/// feeds threshold comparisons, so summation order must not matter.
fn compensated_mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut compensation = 0.0;
    let mut count = 0usize;
    for v in values {
        let y = v - compensation;
        let t = sum + y;
        compensation = (t - sum) - y;
        sum = t;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
