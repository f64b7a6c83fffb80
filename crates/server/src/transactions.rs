//! Transactions API endpoints

use api_types::{
    Ack, Envelope, MonthQuery,
    transaction::{TransactionNew, TransactionView},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;

use crate::{ServerError, json::JsonBody, server::ServerState};

fn view(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        user_id: tx.user_id,
        amount: tx.amount,
        direction: tx.direction.as_str().to_string(),
        category: tx.category,
        note: tx.note,
        date: tx.date,
        created_at: tx.created_at,
    }
}

/// Handle requests for recording an income or expense
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<TransactionNew>,
) -> Result<(StatusCode, Json<Envelope<TransactionView>>), ServerError> {
    let tx = state
        .engine
        .create_transaction(
            payload.amount.unwrap_or(Decimal::ZERO),
            payload.direction.as_deref(),
            payload.category.as_deref().unwrap_or_default(),
            payload.note.as_deref().unwrap_or_default(),
            payload.date.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(Envelope::new(view(tx)))))
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Envelope<Vec<TransactionView>>>, ServerError> {
    let txs = state.engine.list_transactions(query.ym()).await?;

    Ok(Json(Envelope::new(txs.into_iter().map(view).collect())))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, ServerError> {
    state.engine.delete_transaction(&id).await?;

    Ok(Json(Ack::default()))
}
