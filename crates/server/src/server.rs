use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{delete, get},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use std::sync::Arc;

use crate::{health, savings, splits, summary, transactions};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Browser origins allowed to call the API.
///
/// `*` allows any origin. Entries that are not valid header values are
/// skipped with a warning.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(AllowOrigin::any());
    }

    let origins = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring invalid CORS origin {origin:?}");
                None
            }
        })
        .collect::<Vec<_>>();

    layer.allow_origin(AllowOrigin::list(origins))
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(health::get))
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route("/transactions/{id}", delete(transactions::delete))
        .route("/savings", get(savings::list).post(savings::create))
        .route("/savings/{id}", delete(savings::delete))
        .route("/split", get(splits::list).post(splits::create))
        .route("/split/{id}", delete(splits::delete))
        .route("/summary", get(summary::get))
        .with_state(state)
}

/// Build the HTTP application, every route nested under `/api`.
pub fn app(engine: Engine, cors_origins: &[String]) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
    };

    Router::new()
        .nest("/api", router(state))
        .layer(cors_layer(cors_origins))
}

pub async fn run_with_listener(
    engine: Engine,
    cors_origins: &[String],
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine, cors_origins)).await
}
