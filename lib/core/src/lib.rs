//! # bloomlink Core
//!
//! Core encoding primitives for the bloomlink record-linkage engine.
//!
//! This crate turns identifying attributes (names, birth dates, gender)
//! into fixed-width Bloom-filter bit vectors that can later be compared
//! approximately without ever touching the plaintext again:
//!
//! - [`BitVector`] - fixed-length packed bit vector with byte round-trip
//! - [`normalize`] - title stripping, diacritic folding, permissive dates
//! - [`qgram`] - sliding-window q-gram tokenization
//! - [`encoder`] - per-field Bloom encoding and record concatenation
//! - [`salt`] - copy-then-set salting for pseudonym export
//!
//! ## Example
//!
//! ```rust
//! use bloomlink_core::{FieldSpec, NormMode, RecordSchema};
//!
//! let schema = RecordSchema::new(vec![FieldSpec {
//!     name: "first_name".to_string(),
//!     bit_width: 128,
//!     q_gram_size: 2,
//!     padding: true,
//!     hash_run_count: 4,
//!     hash_seeds: vec![92607, 52434, 47751, 48121],
//!     norm_mode: NormMode::Word,
//! }]);
//! schema.validate().unwrap();
//!
//! let filter = schema.encode_record(&["Anna"]).unwrap();
//! assert_eq!(filter.len(), 128);
//! // Identical input, identical filter - the encoding is deterministic.
//! assert_eq!(filter, schema.encode_record(&["Anna"]).unwrap());
//! ```

pub mod bitvec;
pub mod encoder;
pub mod error;
pub mod hash;
pub mod normalize;
pub mod qgram;
pub mod salt;

pub use bitvec::BitVector;
pub use encoder::{encode_field, FieldSpec, NormMode, RecordSchema};
pub use error::{Error, Result};
pub use normalize::{normalize_date, normalize_string};
pub use qgram::qgrams;
pub use salt::{add_salt, add_salt_bytes};
