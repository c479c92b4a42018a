use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] bloomlink_core::Error),

    #[error("invalid thresholds: {0}")]
    InvalidThresholds(String),

    #[error("invalid segment layout: {0}")]
    InvalidLayout(String),
}
