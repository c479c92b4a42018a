//! # bloomlink
//!
//! Privacy-preserving record linkage (PPRL) with Bloom-filter encodings.
//!
//! Identifying attributes of a person - first name, last name, date of
//! birth, gender - are normalized, split into q-grams, and hashed into
//! fixed-width bit vectors. Two encoded records can then be compared
//! approximately (Sorenson-Dice per field segment, with first/last name
//! swap detection) without either side ever exchanging plaintext values.
//!
//! ## Quick Start
//!
//! ```rust
//! use bloomlink::prelude::*;
//!
//! let schema = bloomlink::config::default_schema();
//! let thresholds = bloomlink::config::default_thresholds();
//! let layout = SegmentLayout::from_schema(&schema).unwrap();
//!
//! // Encode two records that transposed first and last name at intake.
//! let a = schema.encode_record(&["Anna", "Maier", "12.05.1990", "f"]).unwrap();
//! let b = schema.encode_record(&["Maier", "Anna", "1990-05-12", "f"]).unwrap();
//!
//! let outcome = compare(&a, &b, &layout, CompareMode::PerSegment, &thresholds, true).unwrap();
//! assert!(outcome.swap_detected);
//! ```
//!
//! ## Crate Structure
//!
//! - [`bloomlink-core`](https://docs.rs/bloomlink-core) - bit vectors,
//!   normalization, q-gram Bloom encoding, salting
//! - [`bloomlink-match`](https://docs.rs/bloomlink-match) - Dice
//!   similarity, rating bands, segmented comparison, batch relinkage
//!
//! Storage of encoded filters (SQLite tables, file import/export) is a
//! collaborator concern: this library exchanges packed byte buffers and
//! `(id, bytes)` rows with it and nothing more.

// Re-export core types
pub use bloomlink_core::{
    add_salt, add_salt_bytes, encode_field, normalize_date, normalize_string, qgrams,
    BitVector, Error as CoreError, FieldSpec, NormMode, RecordSchema,
};

// Re-export matching
pub use bloomlink_match::{
    compare, relink, relink_segmented, sorenson_dice, CompareMode, CompareOutcome,
    Error as MatchError, Rating, RelinkMatch, SegmentLayout, SegmentScore, SegmentedMatch,
    Thresholds,
};

/// Default four-field person schema, seed lists, and thresholds.
pub mod config;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        add_salt, add_salt_bytes, compare, relink, relink_segmented, sorenson_dice,
        BitVector, CompareMode, CompareOutcome, FieldSpec, NormMode, Rating, RecordSchema,
        RelinkMatch, SegmentLayout, SegmentScore, SegmentedMatch, Thresholds,
    };
}
