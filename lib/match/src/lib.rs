//! # bloomlink Match
//!
//! Similarity matching over Bloom-encoded record filters.
//!
//! Two filters produced by `bloomlink-core` are compared without ever
//! touching the plaintext attributes:
//!
//! - [`sorenson_dice`] - set similarity of two equal-length bit vectors
//! - [`Thresholds`] / [`Rating`] - banding of scores into
//!   strong/medium/weak/not-alike
//! - [`compare`] - segment-wise comparison with first/last name swap
//!   detection
//! - [`relink`] / [`relink_segmented`] - parallel scan of a candidate
//!   against stored `(id, bytes)` rows
//!
//! ## Example
//!
//! ```rust
//! use bloomlink_core::BitVector;
//! use bloomlink_match::{compare, CompareMode, SegmentLayout, Thresholds};
//!
//! let layout = SegmentLayout::new(
//!     vec!["first_name".into(), "last_name".into(), "birthdate".into(), "gender".into()],
//!     vec![16, 16, 8, 8],
//! ).unwrap();
//!
//! let mut a = BitVector::zeros(48);
//! a.set(3);
//! let outcome = compare(&a, &a, &layout, CompareMode::Total, &Thresholds::default(), false).unwrap();
//! assert_eq!(outcome.total().unwrap().score, 1.0);
//! ```

pub mod batch;
pub mod compare;
pub mod error;
pub mod rating;
pub mod similarity;

pub use batch::{relink, relink_segmented, RelinkMatch, SegmentedMatch};
pub use compare::{compare, CompareMode, CompareOutcome, SegmentLayout, SegmentScore};
pub use error::{Error, Result};
pub use rating::{Rating, Thresholds};
pub use similarity::sorenson_dice;
