//! Bloom-filter encoding of attribute fields and whole records.
//!
//! Each field is normalized, split into q-grams, and hashed under several
//! seeds into a fixed-width bit vector. A record filter is the ordered
//! concatenation of its field vectors; encoder and comparator must agree
//! on that order and the widths, since the packed form carries no header.

use crate::bitvec::BitVector;
use crate::error::{Error, Result};
use crate::hash::bit_index;
use crate::normalize::{normalize_date, normalize_string};
use crate::qgram::qgrams;
use serde::{Deserialize, Serialize};

/// How raw field text is normalized into hashable tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NormMode {
    /// Single token via [`normalize_date`] (canonical `YYYYMMDD`, or the
    /// raw input when unparseable).
    Date,
    /// Split on whitespace, each token via [`normalize_string`].
    Word,
}

/// Encoding configuration for one attribute field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    /// Width of this field's bit vector; must be a multiple of 8 so the
    /// record filter packs cleanly into bytes.
    pub bit_width: usize,
    pub q_gram_size: usize,
    pub padding: bool,
    /// Configured number of hash runs. Only the first
    /// `hash_run_count - 1` seeds are ever used; see [`encode_field`].
    pub hash_run_count: usize,
    pub hash_seeds: Vec<u32>,
    pub norm_mode: NormMode,
}

impl FieldSpec {
    /// Check the spec for internally consistent values.
    pub fn validate(&self) -> Result<()> {
        let fail = |reason: &str| Error::InvalidFieldSpec {
            name: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.bit_width == 0 {
            return Err(fail("bit_width must be non-zero"));
        }
        if self.bit_width % 8 != 0 {
            return Err(fail("bit_width must be a multiple of 8"));
        }
        if self.q_gram_size < 1 {
            return Err(fail("q_gram_size must be at least 1"));
        }
        if self.hash_run_count < 1 {
            return Err(fail("hash_run_count must be at least 1"));
        }
        if self.hash_seeds.len() < self.hash_run_count.saturating_sub(1) {
            return Err(fail("hash_seeds must provide at least hash_run_count - 1 seeds"));
        }
        Ok(())
    }
}

/// Normalize `text` per `mode` into the token list fed to the hasher.
fn tokenize(text: &str, mode: NormMode) -> Vec<String> {
    match mode {
        NormMode::Date => vec![normalize_date(text)],
        NormMode::Word => text
            .split_whitespace()
            .map(|token| normalize_string(token, true))
            .collect(),
    }
}

/// Encode one field value into a `spec.bit_width`-bit vector.
///
/// The run loop deliberately stops at `hash_run_count - 1`, leaving the
/// final configured seed unused. That looks like an off-by-one and very
/// probably started as one, but filters already persisted by deployments
/// carry exactly this bit pattern, so the bound is part of the stored-data
/// contract and must not be "fixed" here.
pub fn encode_field(text: &str, spec: &FieldSpec, mode: NormMode) -> Result<BitVector> {
    spec.validate()?;

    let mut filter = BitVector::zeros(spec.bit_width);
    for token in tokenize(text, mode) {
        let grams = qgrams(&token, spec.q_gram_size, spec.padding)?;
        for seed in &spec.hash_seeds[..spec.hash_run_count - 1] {
            for gram in &grams {
                filter.set(bit_index(gram, *seed, spec.bit_width));
            }
        }
    }
    Ok(filter)
}

/// Ordered set of field specs describing a whole record filter.
///
/// The order is a cross-cutting invariant: the same schema (or a
/// versioned copy stored alongside the filters) must be used at both
/// encode and compare time, or segment boundaries misalign silently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordSchema {
    pub fields: Vec<FieldSpec>,
}

impl RecordSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Validate every field spec.
    pub fn validate(&self) -> Result<()> {
        for field in &self.fields {
            field.validate()?;
        }
        Ok(())
    }

    /// Total filter width in bits.
    #[must_use]
    pub fn total_bits(&self) -> usize {
        self.fields.iter().map(|f| f.bit_width).sum()
    }

    /// Field names in schema order.
    #[must_use]
    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    /// Field widths in schema order.
    #[must_use]
    pub fn field_sizes(&self) -> Vec<usize> {
        self.fields.iter().map(|f| f.bit_width).collect()
    }

    /// Encode one value per field and concatenate in schema order.
    pub fn encode_record(&self, values: &[&str]) -> Result<BitVector> {
        if values.len() != self.fields.len() {
            return Err(Error::FieldCountMismatch {
                expected: self.fields.len(),
                actual: values.len(),
            });
        }
        let mut record = BitVector::zeros(0);
        for (value, spec) in values.iter().zip(self.fields.iter()) {
            let field = encode_field(value, spec, spec.norm_mode)?;
            record.extend_from(&field);
        }
        Ok(record)
    }

    /// Packed byte form of [`RecordSchema::encode_record`], the shape
    /// handed to the storage collaborator.
    pub fn encode_record_bytes(&self, values: &[&str]) -> Result<Vec<u8>> {
        Ok(self.encode_record(values)?.to_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_spec(name: &str, bit_width: usize) -> FieldSpec {
        FieldSpec {
            name: name.to_string(),
            bit_width,
            q_gram_size: 2,
            padding: true,
            hash_run_count: 4,
            hash_seeds: vec![92607, 52434, 47751, 48121],
            norm_mode: NormMode::Word,
        }
    }

    fn date_spec(bit_width: usize) -> FieldSpec {
        FieldSpec {
            name: "birthdate".to_string(),
            bit_width,
            q_gram_size: 2,
            padding: false,
            hash_run_count: 3,
            hash_seeds: vec![88036, 17196, 37991],
            norm_mode: NormMode::Date,
        }
    }

    #[test]
    fn test_encoding_deterministic() {
        let spec = word_spec("name", 128);
        let a = encode_field("Maximilian", &spec, NormMode::Word).unwrap();
        let b = encode_field("Maximilian", &spec, NormMode::Word).unwrap();
        assert_eq!(a, b);
        assert!(a.count_ones() > 0);
    }

    #[test]
    fn test_normalized_variants_converge() {
        let spec = word_spec("name", 128);
        let plain = encode_field("Muller", &spec, NormMode::Word).unwrap();
        let umlaut = encode_field("Müller", &spec, NormMode::Word).unwrap();
        let upper = encode_field("MULLER", &spec, NormMode::Word).unwrap();
        assert_eq!(plain, umlaut);
        assert_eq!(plain, upper);
    }

    #[test]
    fn test_final_seed_unused() {
        let mut spec = word_spec("name", 128);
        let base = encode_field("Tom", &spec, NormMode::Word).unwrap();
        // Changing the last seed must not change the filter.
        *spec.hash_seeds.last_mut().unwrap() = 1;
        let changed_tail = encode_field("Tom", &spec, NormMode::Word).unwrap();
        assert_eq!(base, changed_tail);
        // Changing an active seed must.
        spec.hash_seeds[0] = 1;
        let changed_head = encode_field("Tom", &spec, NormMode::Word).unwrap();
        assert_ne!(base, changed_head);
    }

    #[test]
    fn test_date_mode_uses_canonical_form() {
        let spec = date_spec(64);
        let iso = encode_field("2001-12-24", &spec, NormMode::Date).unwrap();
        let dotted = encode_field("24.12.2001", &spec, NormMode::Date).unwrap();
        assert_eq!(iso, dotted);
    }

    #[test]
    fn test_spec_validation() {
        let mut spec = word_spec("name", 100);
        assert!(spec.validate().is_err()); // not a multiple of 8
        spec.bit_width = 128;
        assert!(spec.validate().is_ok());
        spec.hash_run_count = 6; // only 4 seeds configured, needs 5
        assert!(spec.validate().is_err());
        spec.hash_run_count = 5; // needs 4, exactly available
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_record_concatenation_order() {
        let schema = RecordSchema::new(vec![word_spec("first_name", 64), word_spec("last_name", 64)]);
        let record = schema.encode_record(&["Anna", "Maier"]).unwrap();
        assert_eq!(record.len(), 128);

        let first = encode_field("Anna", &schema.fields[0], NormMode::Word).unwrap();
        let last = encode_field("Maier", &schema.fields[1], NormMode::Word).unwrap();
        assert_eq!(record.slice(0, 64), first);
        assert_eq!(record.slice(64, 128), last);
    }

    #[test]
    fn test_record_value_count_checked() {
        let schema = RecordSchema::new(vec![word_spec("first_name", 64)]);
        assert!(matches!(
            schema.encode_record(&["Anna", "Maier"]),
            Err(Error::FieldCountMismatch { expected: 1, actual: 2 })
        ));
    }

    #[test]
    fn test_schema_serde_round_trip() {
        let schema = RecordSchema::new(vec![word_spec("first_name", 64), date_spec(64)]);
        let json = serde_json::to_string(&schema).unwrap();
        let parsed: RecordSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(schema, parsed);
    }
}
