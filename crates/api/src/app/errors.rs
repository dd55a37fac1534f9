//! Consistent error responses.
//!
//! Store failures are collapsed into two user-facing kinds. The underlying
//! store error is logged where it happens and never sent to the client.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use thiserror::Error;

use shopdash_core::DomainError;
use shopdash_store::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Delete,
}

impl Mutation {
    fn verb(self) -> &'static str {
        match self {
            Mutation::Create => "create",
            Mutation::Delete => "delete",
        }
    }
}

/// A dashboard collection, named the way its messages read.
///
/// Loading talks about the collection, a failed create or delete about one
/// document of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resource {
    pub plural: &'static str,
    pub singular: &'static str,
}

pub const ORDERS: Resource = Resource {
    plural: "orders",
    singular: "order",
};

pub const PRODUCTS: Resource = Resource {
    plural: "products",
    singular: "product",
};

pub const USERS: Resource = Resource {
    plural: "users",
    singular: "user",
};

/// Outcome of a failed dashboard action.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    #[error("fetch failed")]
    FetchFailure,

    #[error("{} failed", .0.verb())]
    MutationFailure(Mutation),
}

impl ActionError {
    /// Log the store error and collapse it into the action kind.
    pub fn log_store_error(self, resource: Resource, err: StoreError) -> Self {
        tracing::error!(
            resource = resource.plural,
            action = %self,
            error = %err,
            "content store call failed"
        );
        self
    }

    pub fn code(self) -> &'static str {
        match self {
            ActionError::FetchFailure => "fetch_failed",
            ActionError::MutationFailure(Mutation::Create) => "create_failed",
            ActionError::MutationFailure(Mutation::Delete) => "delete_failed",
        }
    }

    /// Static message shown to the dashboard user.
    pub fn user_message(self, resource: Resource) -> String {
        match self {
            ActionError::FetchFailure => {
                format!("Failed to load {}. Please try again later.", resource.plural)
            }
            ActionError::MutationFailure(m) => {
                format!("Failed to {} {}. Please try again.", m.verb(), resource.singular)
            }
        }
    }
}

pub fn action_error_to_response(resource: Resource, err: ActionError) -> axum::response::Response {
    json_error(StatusCode::BAD_GATEWAY, err.code(), err.user_message(resource))
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::MalformedValue(msg) => {
            json_error(StatusCode::BAD_REQUEST, "malformed_value", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
