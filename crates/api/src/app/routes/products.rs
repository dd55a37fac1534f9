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
use crate::app::errors::{self, PRODUCTS};
use crate::app::dto;
use crate::app::extract::JsonBody;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/view", get(product_view))
        .route("/:id", delete(delete_product))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_products().await {
        Ok(listing) => Json(listing).into_response(),
        Err(e) => errors::action_error_to_response(PRODUCTS, e),
    }
}

pub async fn product_view(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.product_view.snapshot())
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    JsonBody(body): JsonBody<dto::CreateProductRequest>,
) -> axum::response::Response {
    if let Err(e) = body.validate() {
        return errors::domain_error_to_response(e);
    }

    match services.create_product(body).await {
        Ok(listing) => (StatusCode::CREATED, Json(listing)).into_response(),
        Err(e) => errors::action_error_to_response(PRODUCTS, e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.delete_product(&id).await {
        Ok(listing) => Json(listing).into_response(),
        Err(e) => errors::action_error_to_response(PRODUCTS, e),
    }
}
