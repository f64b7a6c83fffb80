//! JSON request bodies.
//!
//! Bodies are parsed regardless of the `Content-Type` header, and every
//! failure is reported through [`ServerError::Malformed`] so clients get the
//! same `{ ok: false, error }` shape as any other rejection.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::ServerError;

pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|err| ServerError::Malformed(err.body_text()))?;

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|err| ServerError::Malformed(format!("malformed JSON body: {err}")))
    }
}
