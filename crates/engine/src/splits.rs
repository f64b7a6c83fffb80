//! Even bill splits.
//!
//! A split is computed once and recorded with the day it was made; callers
//! cannot backdate it.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine,
    util::{parse_amount, parse_uuid},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub id: Uuid,
    pub user_id: String,
    pub total_amount: Decimal,
    pub people_count: i64,
    pub per_person: Decimal,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Divide `total_amount` evenly, rounded to cents (midpoints go to even).
pub fn compute_split(total_amount: Decimal, people_count: i64) -> ResultEngine<Decimal> {
    if people_count <= 0 {
        return Err(EngineError::InvalidArgument(
            "people_count must be > 0".to_string(),
        ));
    }
    Ok((total_amount / Decimal::from(people_count)).round_dp(2))
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "splits")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub total_amount: String,
    pub people_count: i64,
    pub per_person: String,
    pub date: Date,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Split> for Model {
    fn from(split: &Split) -> Self {
        Self {
            id: split.id.to_string(),
            user_id: split.user_id.clone(),
            total_amount: split.total_amount.to_string(),
            people_count: split.people_count,
            per_person: split.per_person.to_string(),
            date: split.date,
            created_at: split.created_at,
        }
    }
}

impl TryFrom<Model> for Split {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "split")?,
            user_id: model.user_id,
            total_amount: parse_amount(&model.total_amount, "split")?,
            people_count: model.people_count,
            per_person: parse_amount(&model.per_person, "split")?,
            date: model.date,
            created_at: model.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    #[test]
    fn thirds_round_to_cents() {
        assert_eq!(compute_split(dec("100"), 3).unwrap(), dec("33.33"));
        assert_eq!(compute_split(dec("200"), 3).unwrap(), dec("66.67"));
    }

    #[test]
    fn exact_division_is_unchanged() {
        assert_eq!(compute_split(dec("90"), 4).unwrap(), dec("22.5"));
        assert_eq!(compute_split(dec("0"), 2).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn midpoints_round_to_even() {
        assert_eq!(compute_split(dec("0.125"), 1).unwrap(), dec("0.12"));
        assert_eq!(compute_split(dec("0.135"), 1).unwrap(), dec("0.14"));
    }

    #[test]
    fn zero_or_negative_people_is_rejected() {
        let expected = Err(EngineError::InvalidArgument(
            "people_count must be > 0".to_string(),
        ));
        assert_eq!(compute_split(dec("10"), 0), expected);
        assert_eq!(compute_split(dec("10"), -2), expected);
    }
}
