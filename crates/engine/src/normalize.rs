//! Canonicalization applied to incoming records before they are stored.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Classification of a transaction.
///
/// Only `INCOME` and `EXPENSE` carry sign rules. Any other label is kept
/// uppercased and stored without touching the amount.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Direction {
    Income,
    #[default]
    Expense,
    Other(String),
}

impl Direction {
    pub fn parse(raw: &str) -> Self {
        match raw.to_uppercase().as_str() {
            "INCOME" => Self::Income,
            "EXPENSE" => Self::Expense,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for Direction {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Direction> for String {
    fn from(value: Direction) -> Self {
        value.as_str().to_string()
    }
}

/// Force the sign of `amount` to agree with `direction`.
pub fn normalize_amount(amount: Decimal, direction: &Direction) -> Decimal {
    match direction {
        Direction::Expense if amount > Decimal::ZERO => -amount,
        Direction::Income if amount < Decimal::ZERO => -amount,
        _ => amount,
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> ResultEngine<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| EngineError::InvalidArgument(format!("invalid date: {raw}")))
}

/// Use the supplied date when present, `today` otherwise. Empty counts as absent.
pub fn default_date(input: Option<&str>, today: NaiveDate) -> ResultEngine<NaiveDate> {
    match input {
        Some(raw) if !raw.is_empty() => parse_date(raw),
        _ => Ok(today),
    }
}

/// Zero-padded `YYYY-MM-DD` form used for month prefix matching.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
