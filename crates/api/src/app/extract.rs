//! Request body extraction with the API's error shape.

use axum::{
    Json, async_trait,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::Response,
};
use serde::de::DeserializeOwned;

use crate::app::errors::json_error;

/// JSON body whose rejections answer `400 validation_error` as JSON instead
/// of axum's plain-text 4xx.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_response)?;
        Ok(Self(value))
    }
}

fn rejection_to_response(rejection: JsonRejection) -> Response {
    tracing::debug!(error = %rejection, "rejected request body");
    json_error(
        StatusCode::BAD_REQUEST,
        "validation_error",
        rejection.body_text(),
    )
}
