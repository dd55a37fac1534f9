use axum::{Router, routing::get};

pub mod orders;
pub mod products;
pub mod system;
pub mod users;

/// Router for all endpoints behind the admin gate.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/orders", orders::router())
        .nest("/products", products::router())
        .nest("/users", users::router())
}

/// Parse a path id, answering 400 when it cannot be a document id.
pub(crate) fn parse_id(
    raw: &str,
) -> Result<shopdash_core::DocumentId, axum::response::Response> {
    raw.parse().map_err(crate::app::errors::domain_error_to_response)
}
