use api_types::ErrorBody;
use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use server::{ServerState, app, run_with_listener};

mod health;
mod json;
mod savings;
mod server;
mod splits;
mod summary;
mod transactions;

pub mod types {
    pub use api_types::{Ack, Envelope, ErrorBody, MonthQuery};

    pub mod transaction {
        pub use api_types::transaction::{TransactionNew, TransactionView};
    }

    pub mod saving {
        pub use api_types::saving::{SavingNew, SavingView};
    }

    pub mod split {
        pub use api_types::split::{SplitNew, SplitView};
    }

    pub mod summary {
        pub use api_types::summary::SummaryView;
    }

    pub mod health {
        pub use api_types::health::Health;
    }
}

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    /// The request body could not be read or parsed.
    Malformed(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        EngineError::Overflow(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::CorruptRecord(_) | EngineError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::CorruptRecord(detail) => {
            tracing::error!("corrupt record: {detail}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Malformed(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(ErrorBody { ok: false, error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
