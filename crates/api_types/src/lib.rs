use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Successful response carrying a payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub ok: bool,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}

/// Successful response without a payload (deletes).
#[derive(Debug, Serialize, Deserialize)]
pub struct Ack {
    pub ok: bool,
}

impl Default for Ack {
    fn default() -> Self {
        Self { ok: true }
    }
}

/// Body of every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub ok: bool,
    pub error: String,
}

/// `?ym=YYYY-MM` month filter.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MonthQuery {
    pub ym: Option<String>,
}

impl MonthQuery {
    /// The filter, with an empty value treated as absent.
    pub fn ym(&self) -> Option<&str> {
        self.ym.as_deref().filter(|ym| !ym.is_empty())
    }
}

pub mod transaction {
    use super::*;

    /// Request body for `POST /transactions`. Every field is optional.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionNew {
        /// Number or numeric string; the sign is fixed by `direction`.
        pub amount: Option<Decimal>,
        /// `INCOME` or `EXPENSE` (any case). Defaults to `EXPENSE`.
        pub direction: Option<String>,
        pub category: Option<String>,
        pub note: Option<String>,
        /// `YYYY-MM-DD`, defaults to today.
        pub date: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub user_id: String,
        #[serde(with = "rust_decimal::serde::float")]
        pub amount: Decimal,
        pub direction: String,
        pub category: String,
        pub note: String,
        pub date: NaiveDate,
        pub created_at: DateTime<Utc>,
    }
}

pub mod saving {
    use super::*;

    /// Request body for `POST /savings`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct SavingNew {
        pub amount: Option<Decimal>,
        pub note: Option<String>,
        pub date: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SavingView {
        pub id: Uuid,
        pub user_id: String,
        #[serde(with = "rust_decimal::serde::float")]
        pub amount: Decimal,
        pub note: String,
        pub date: NaiveDate,
        pub created_at: DateTime<Utc>,
    }
}

pub mod split {
    use super::*;

    use serde::{Deserializer, de::Error};

    /// Request body for `POST /split`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct SplitNew {
        pub total_amount: Option<Decimal>,
        /// Defaults to 1. Must be > 0. Accepts `3`, `3.0` or `"3"`.
        #[serde(default, deserialize_with = "people_count")]
        pub people_count: Option<i64>,
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Int(i64),
        Float(f64),
        Text(String),
    }

    fn people_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let count = match Option::<Count>::deserialize(deserializer)? {
            None => return Ok(None),
            Some(count) => count,
        };

        match count {
            Count::Int(n) => Ok(Some(n)),
            Count::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Ok(Some(f as i64))
            }
            Count::Float(f) => Err(D::Error::custom(format!(
                "people_count must be an integer, got {f}"
            ))),
            Count::Text(text) => text.trim().parse().map(Some).map_err(|_| {
                D::Error::custom(format!("people_count must be an integer, got {text:?}"))
            }),
        }
    }


    #[derive(Debug, Serialize, Deserialize)]
    pub struct SplitView {
        pub id: Uuid,
        pub user_id: String,
        #[serde(with = "rust_decimal::serde::float")]
        pub total_amount: Decimal,
        pub people_count: i64,
        #[serde(with = "rust_decimal::serde::float")]
        pub per_person: Decimal,
        pub date: NaiveDate,
        pub created_at: DateTime<Utc>,
    }
}

pub mod summary {
    use super::*;

    /// Monthly totals. `total_saving` covers every saving, not just `ym`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SummaryView {
        pub ok: bool,
        pub ym: String,
        #[serde(with = "rust_decimal::serde::float")]
        pub income: Decimal,
        #[serde(with = "rust_decimal::serde::float")]
        pub expense: Decimal,
        #[serde(with = "rust_decimal::serde::float")]
        pub net: Decimal,
        #[serde(with = "rust_decimal::serde::float")]
        pub total_saving: Decimal,
    }
}

pub mod health {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Health {
        pub ok: bool,
        pub time: DateTime<Utc>,
    }
}
