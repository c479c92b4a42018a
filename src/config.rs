//! Default encoding configuration.
//!
//! The engine crates never hardcode widths, seeds, or thresholds; this
//! module is the one place the conventional four-field person layout
//! lives. Callers persisting filters should serialize the schema next to
//! them (the packed wire format carries no self-describing header) and
//! treat it as versioned configuration.

use bloomlink_core::{FieldSpec, NormMode, RecordSchema};
use bloomlink_match::Thresholds;

/// Seed list for the name fields (40 runs configured).
pub const NAME_SEEDS: [u32; 40] = [
    92607, 52434, 47751, 48121, 85922, 41346, 94666, 69197, 70631, 55028,
    54016, 34796, 13109, 16195, 19751, 96272, 73586, 40463, 63191, 46483,
    13355, 99604, 95695, 57705, 37429, 36962, 13566, 11983, 91392, 97360,
    12860, 12034, 78921, 61329, 47746, 84304, 62186, 26965, 15924, 59290,
];

/// Seed list for the birthdate and gender fields (20 runs configured).
pub const OTHER_SEEDS: [u32; 20] = [
    88036, 17196, 37991, 66185, 82094, 19288, 94058, 70969, 93056, 19427,
    67473, 81898, 40778, 20010, 64626, 90518, 20943, 17182, 39574, 37951,
];

/// Bit width of each name segment.
pub const NAME_BITS: usize = 800;
/// Bit width of the birthdate and gender segments.
pub const OTHER_BITS: usize = 208;

fn name_field(name: &str) -> FieldSpec {
    FieldSpec {
        name: name.to_string(),
        bit_width: NAME_BITS,
        q_gram_size: 3,
        padding: true,
        hash_run_count: NAME_SEEDS.len(),
        hash_seeds: NAME_SEEDS.to_vec(),
        norm_mode: NormMode::Word,
    }
}

fn other_field(name: &str, norm_mode: NormMode) -> FieldSpec {
    FieldSpec {
        name: name.to_string(),
        bit_width: OTHER_BITS,
        q_gram_size: 2,
        padding: false,
        hash_run_count: OTHER_SEEDS.len(),
        hash_seeds: OTHER_SEEDS.to_vec(),
        norm_mode,
    }
}

/// The conventional person schema: first name, last name, birthdate,
/// gender - 2016 bits / 252 bytes per record filter. Field order is
/// part of the wire contract.
#[must_use]
pub fn default_schema() -> RecordSchema {
    RecordSchema::new(vec![
        name_field("first_name"),
        name_field("last_name"),
        other_field("birthdate", NormMode::Date),
        other_field("gender", NormMode::Word),
    ])
}

/// Default rating bands: strong above 0.95, medium from 0.87, weak from
/// 0.6.
#[must_use]
pub fn default_thresholds() -> Thresholds {
    Thresholds::default()
}
