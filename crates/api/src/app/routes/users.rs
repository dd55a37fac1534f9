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
use crate::app::errors::{self, USERS};
use crate::app::dto;
use crate::app::extract::JsonBody;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/view", get(user_view))
        .route("/:id", delete(delete_user))
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_users().await {
        Ok(listing) => Json(listing).into_response(),
        Err(e) => errors::action_error_to_response(USERS, e),
    }
}

pub async fn user_view(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(services.user_view.snapshot())
}

/// The plaintext password is digested here and goes no further.
pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    JsonBody(body): JsonBody<dto::CreateUserRequest>,
) -> axum::response::Response {
    let draft = match body.into_draft() {
        Ok(d) => d,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.create_user(draft).await {
        Ok(listing) => (StatusCode::CREATED, Json(listing)).into_response(),
        Err(e) => errors::action_error_to_response(USERS, e),
    }
}

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.delete_user(&id).await {
        Ok(listing) => Json(listing).into_response(),
        Err(e) => errors::action_error_to_response(USERS, e),
    }
}
