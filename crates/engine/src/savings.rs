//! Savings deposits. Amounts are stored exactly as supplied.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError,
    util::{parse_amount, parse_uuid},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Saving {
    pub id: Uuid,
    pub user_id: String,
    pub amount: Decimal,
    pub note: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "savings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub amount: String,
    pub note: String,
    pub date: Date,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Saving> for Model {
    fn from(saving: &Saving) -> Self {
        Self {
            id: saving.id.to_string(),
            user_id: saving.user_id.clone(),
            amount: saving.amount.to_string(),
            note: saving.note.clone(),
            date: saving.date,
            created_at: saving.created_at,
        }
    }
}

impl TryFrom<Model> for Saving {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "saving")?,
            user_id: model.user_id,
            amount: parse_amount(&model.amount, "saving")?,
            note: model.note,
            date: model.date,
            created_at: model.created_at,
        })
    }
}
