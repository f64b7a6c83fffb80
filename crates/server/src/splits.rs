//! Bill split API endpoints

use api_types::{
    Ack, Envelope,
    split::{SplitNew, SplitView},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;

use crate::{ServerError, json::JsonBody, server::ServerState};

fn view(split: engine::Split) -> SplitView {
    SplitView {
        id: split.id,
        user_id: split.user_id,
        total_amount: split.total_amount,
        people_count: split.people_count,
        per_person: split.per_person,
        date: split.date,
        created_at: split.created_at,
    }
}

/// Handle requests for splitting a bill evenly
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<SplitNew>,
) -> Result<(StatusCode, Json<Envelope<SplitView>>), ServerError> {
    let split = state
        .engine
        .split(
            payload.total_amount.unwrap_or(Decimal::ZERO),
            payload.people_count.unwrap_or(1),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(Envelope::new(view(split)))))
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Envelope<Vec<SplitView>>>, ServerError> {
    let splits = state.engine.list_splits().await?;

    Ok(Json(Envelope::new(splits.into_iter().map(view).collect())))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, ServerError> {
    state.engine.delete_split(&id).await?;

    Ok(Json(Ack::default()))
}
