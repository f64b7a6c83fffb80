//! Savings API endpoints

use api_types::{
    Ack, Envelope,
    saving::{SavingNew, SavingView},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;

use crate::{ServerError, json::JsonBody, server::ServerState};

fn view(saving: engine::Saving) -> SavingView {
    SavingView {
        id: saving.id,
        user_id: saving.user_id,
        amount: saving.amount,
        note: saving.note,
        date: saving.date,
        created_at: saving.created_at,
    }
}

/// Handle requests for recording a savings deposit
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<SavingNew>,
) -> Result<(StatusCode, Json<Envelope<SavingView>>), ServerError> {
    let saving = state
        .engine
        .create_saving(
            payload.amount.unwrap_or(Decimal::ZERO),
            payload.note.as_deref().unwrap_or_default(),
            payload.date.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(Envelope::new(view(saving)))))
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Envelope<Vec<SavingView>>>, ServerError> {
    let savings = state.engine.list_savings().await?;

    Ok(Json(Envelope::new(savings.into_iter().map(view).collect())))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, ServerError> {
    state.engine.delete_saving(&id).await?;

    Ok(Json(Ack::default()))
}
