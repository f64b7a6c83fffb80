use api_types::health::Health;
use axum::Json;
use chrono::Utc;

/// Liveness probe
pub async fn get() -> Json<Health> {
    Json(Health {
        ok: true,
        time: Utc::now(),
    })
}
