//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: repositories and per-resource views over one content store
//! - `views.rs`: last-good snapshot, error message and loading flag per resource
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses
//! - `extract.rs`: JSON body extractor answering in the same error shape

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use crate::config::{AppConfig, ConfigError};
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod extract;
pub mod routes;
pub mod services;
pub mod views;

/// Build the full HTTP router from configuration (used by `main.rs`).
pub fn build_app(config: &AppConfig) -> Result<Router, ConfigError> {
    let jwt = Arc::new(shopdash_auth::Hs256JwtValidator::new(
        config.jwt_secret().into_bytes(),
    ));
    let auth_state = middleware::AuthState {
        jwt,
        policy: Arc::new(config.access_policy()),
    };

    let services = Arc::new(services::AppServices::new(config.build_store()?));
    Ok(build_router(services, auth_state))
}

/// Router over already-built services; `/health` stays outside the admin gate.
pub fn build_router(services: Arc<services::AppServices>, auth_state: middleware::AuthState) -> Router {
    let protected = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
}
