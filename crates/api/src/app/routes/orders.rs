use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};

use crate::app::routes::parse_id;
use crate::app::services::AppServices;
use crate::app::errors::{self, ORDERS};
use crate::app::dto;
use crate::app::extract::JsonBody;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/view", get(order_view))
        .route("/:id", delete(delete_order))
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_orders().await {
        Ok(report) => Json(report).into_response(),
        Err(e) => errors::action_error_to_response(ORDERS, e),
    }
}

pub async fn order_view(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.order_view.snapshot())
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    JsonBody(body): JsonBody<dto::CreateOrderRequest>,
) -> axum::response::Response {
    let draft = match body.into_draft() {
        Ok(d) => d,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.create_order(draft).await {
        Ok(report) => (StatusCode::CREATED, Json(report)).into_response(),
        Err(e) => errors::action_error_to_response(ORDERS, e),
    }
}

pub async fn delete_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.delete_order(&id).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => errors::action_error_to_response(ORDERS, e),
    }
}
