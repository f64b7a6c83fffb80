//! Internal helpers for decoding stored rows.
//!
//! These utilities are **not** part of the public API. They turn the string
//! columns back into typed values and label failures with the collection.

use std::str::FromStr;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| EngineError::CorruptRecord(format!("invalid {label} id: {value}")))
}

/// Parse a decimal amount stored as text.
pub(crate) fn parse_amount(value: &str, label: &str) -> ResultEngine<Decimal> {
    Decimal::from_str(value)
        .map_err(|_| EngineError::CorruptRecord(format!("invalid {label} amount: {value}")))
}
