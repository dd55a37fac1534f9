use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use shopdash_auth::AccessGrant;

use crate::context::PrincipalContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(principal): Extension<PrincipalContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "principal_id": principal.principal_id().to_string(),
        "email": principal.email(),
        "roles": principal.roles().iter().map(|r| r.as_str()).collect::<Vec<_>>(),
        "granted_by": match principal.grant() {
            AccessGrant::AllowListedEmail(_) => "allow_list",
            AccessGrant::RoleClaim(_) => "role",
        },
    }))
}
