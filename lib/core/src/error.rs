use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Invalid-argument failures surfaced by the encoding core.
///
/// Everything here is deterministic given bad input and is reported
/// synchronously; nothing is retried. Unparseable dates and out-of-range
/// salt indices are deliberately *not* errors (see the normalize and salt
/// modules).
#[derive(Error, Debug)]
pub enum Error {
    #[error("q-gram size must be at least 1 (given: {0})")]
    InvalidQGramSize(usize),

    #[error("bit vector length mismatch: left {left}, right {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("invalid field spec '{name}': {reason}")]
    InvalidFieldSpec { name: String, reason: String },

    #[error("record has {actual} values but schema defines {expected} fields")]
    FieldCountMismatch { expected: usize, actual: usize },

    #[error("invalid filter buffer: {0}")]
    InvalidFilter(String),
}
