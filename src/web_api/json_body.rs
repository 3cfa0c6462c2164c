use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api_error::ApiError;

/// JSON body extractor for the task routes.
///
/// Unlike `axum::Json` it doesn't insist on a `Content-Type`, reads an
/// empty body as `T::default()`, and rejects with an `ApiError` so bad
/// bodies still get an `{"error": ...}` response.
///
/// Only a JSON object populates fields. An array carries no named fields
/// and reads as `T::default()`; any other JSON value is rejected.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonBody(T::default()));
        }

        let value: Value = serde_json::from_slice(&bytes).map_err(invalid)?;
        if value.is_object() {
            serde_json::from_value(value).map(JsonBody).map_err(invalid)
        } else if value.is_array() {
            Ok(JsonBody(T::default()))
        } else {
            Err(ApiError::BadRequest(format!(
                "Invalid JSON body: expected an object, got {value}"
            )))
        }
    }
}

fn invalid(e: serde_json::Error) -> ApiError {
    ApiError::BadRequest(format!("Invalid JSON body: {e}"))
}
