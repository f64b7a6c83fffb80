//! Income and expense records.
//!
//! A `Transaction` is immutable once stored: the amount sign already agrees
//! with its `Direction`, and it can only be removed by id.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Direction, EngineError,
    util::{parse_amount, parse_uuid},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: String,
    pub amount: Decimal,
    pub direction: Direction,
    pub category: String,
    pub note: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub amount: String,
    pub direction: String,
    pub category: String,
    pub note: String,
    pub date: Date,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for Model {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id.to_string(),
            user_id: tx.user_id.clone(),
            amount: tx.amount.to_string(),
            direction: tx.direction.as_str().to_string(),
            category: tx.category.clone(),
            note: tx.note.clone(),
            date: tx.date,
            created_at: tx.created_at,
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "transaction")?,
            user_id: model.user_id,
            amount: parse_amount(&model.amount, "transaction")?,
            direction: Direction::parse(&model.direction),
            category: model.category,
            note: model.note,
            date: model.date,
            created_at: model.created_at,
        })
    }
}
