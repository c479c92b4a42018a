//! Classification of similarity scores into rating bands.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rating band for one comparison.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Strong,
    Medium,
    Weak,
    NotAlike,
    /// Assigned to the first/last name segments when the swap heuristic
    /// fired and correction was requested; the score is the cross score.
    Swapped,
}

impl Rating {
    /// True for any band a caller would consider a candidate match.
    #[must_use]
    pub fn is_match(self) -> bool {
        !matches!(self, Rating::NotAlike)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Rating::Strong => "strong",
            Rating::Medium => "medium",
            Rating::Weak => "weak",
            Rating::NotAlike => "not_alike",
            Rating::Swapped => "swapped",
        };
        f.write_str(label)
    }
}

/// Three band boundaries in `(0, 1]`, held sorted descending.
///
/// Bands: `s > t0` strong, `t1 <= s <= t0` medium, `t2 <= s < t1` weak,
/// below `t2` not alike. Lower boundaries are inclusive except at the
/// top.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Thresholds([f64; 3]);

impl Thresholds {
    /// Build from three values in `(0, 1]`, in any order.
    pub fn new(values: [f64; 3]) -> Result<Self> {
        for v in values {
            if !(v > 0.0 && v <= 1.0) {
                return Err(Error::InvalidThresholds(format!(
                    "each threshold must lie in (0, 1], got {v}"
                )));
            }
        }
        let mut sorted = values;
        sorted.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        Ok(Self(sorted))
    }

    /// Build from a slice; exactly three values are required.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        let arr: [f64; 3] = values.try_into().map_err(|_| {
            Error::InvalidThresholds(format!("expected exactly 3 thresholds, got {}", values.len()))
        })?;
        Self::new(arr)
    }

    /// Boundaries, descending.
    #[must_use]
    pub fn values(&self) -> [f64; 3] {
        self.0
    }

    /// The weak/not-alike boundary, also the floor the swap heuristic's
    /// cross scores must clear.
    #[must_use]
    pub fn lowest(&self) -> f64 {
        self.0[2]
    }

    /// Classify a similarity score.
    #[must_use]
    pub fn rate(&self, similarity: f64) -> Rating {
        let [t0, t1, t2] = self.0;
        if similarity > t0 {
            Rating::Strong
        } else if similarity >= t1 {
            Rating::Medium
        } else if similarity >= t2 {
            Rating::Weak
        } else {
            Rating::NotAlike
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self([0.95, 0.87, 0.6])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands() {
        let t = Thresholds::new([0.95, 0.87, 0.6]).unwrap();
        assert_eq!(t.rate(0.96), Rating::Strong);
        assert_eq!(t.rate(0.90), Rating::Medium);
        assert_eq!(t.rate(0.70), Rating::Weak);
        assert_eq!(t.rate(0.30), Rating::NotAlike);
    }

    #[test]
    fn test_boundary_inclusivity() {
        let t = Thresholds::new([0.95, 0.87, 0.6]).unwrap();
        // Top boundary is exclusive, lower band boundaries inclusive.
        assert_eq!(t.rate(0.95), Rating::Medium);
        assert_eq!(t.rate(0.87), Rating::Medium);
        assert_eq!(t.rate(0.6), Rating::Weak);
    }

    #[test]
    fn test_sorted_on_construction() {
        let t = Thresholds::new([0.6, 0.95, 0.87]).unwrap();
        assert_eq!(t.values(), [0.95, 0.87, 0.6]);
        assert_eq!(t.lowest(), 0.6);
    }

    #[test]
    fn test_range_validation() {
        assert!(Thresholds::new([0.0, 0.5, 0.6]).is_err());
        assert!(Thresholds::new([1.1, 0.5, 0.6]).is_err());
        assert!(Thresholds::new([1.0, 0.5, 0.1]).is_ok());
    }

    #[test]
    fn test_count_validation() {
        assert!(Thresholds::from_slice(&[0.9, 0.8]).is_err());
        assert!(Thresholds::from_slice(&[0.9, 0.8, 0.7, 0.6]).is_err());
        assert!(Thresholds::from_slice(&[0.9, 0.8, 0.7]).is_ok());
    }

    #[test]
    fn test_serde_labels() {
        assert_eq!(serde_json::to_string(&Rating::NotAlike).unwrap(), "\"not_alike\"");
        assert_eq!(serde_json::to_string(&Rating::Swapped).unwrap(), "\"swapped\"");
    }
}
