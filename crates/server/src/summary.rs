//! Summary API endpoint

use api_types::{MonthQuery, summary::SummaryView};
use axum::{
    Json,
    extract::{Query, State},
};

use crate::{ServerError, server::ServerState};

/// Handle requests for the monthly summary
pub async fn get(
    State(state): State<ServerState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<SummaryView>, ServerError> {
    let summary = state.engine.summary(query.ym()).await?;

    Ok(Json(SummaryView {
        ok: true,
        ym: summary.ym,
        income: summary.income,
        expense: summary.expense,
        net: summary.net,
        total_saving: summary.total_saving,
    }))
}
