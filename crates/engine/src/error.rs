//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidArgument`] thrown when a caller supplied value is rejected.
//! - [`CorruptRecord`] thrown when a stored row cannot be decoded.
//! - [`Overflow`] thrown when stored amounts add up past the decimal range.
//!
//!  [`InvalidArgument`]: EngineError::InvalidArgument
//!  [`CorruptRecord`]: EngineError::CorruptRecord
//!  [`Overflow`]: EngineError::Overflow
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),
    #[error("{0} overflowed")]
    Overflow(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidArgument(a), Self::InvalidArgument(b)) => a == b,
            (Self::CorruptRecord(a), Self::CorruptRecord(b)) => a == b,
            (Self::Overflow(a), Self::Overflow(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
