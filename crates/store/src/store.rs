use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use shopdash_core::DocumentId;

use crate::StoreError;

/// A listing request: the collection's `_type` plus the query text sent to
/// the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentQuery {
    pub doc_type: &'static str,
    pub text: String,
}

impl DocumentQuery {
    pub fn new(doc_type: &'static str, text: impl Into<String>) -> Self {
        Self {
            doc_type,
            text: text.into(),
        }
    }
}

/// The narrow surface the dashboard needs from the content store.
///
/// Documents cross this boundary as raw JSON; typing happens in
/// [`crate::Repository`].
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn fetch(&self, query: &DocumentQuery) -> Result<Vec<JsonValue>, StoreError>;

    /// Create a document of `doc_type`; returns the id the store assigned.
    async fn create(&self, doc_type: &str, body: JsonValue) -> Result<DocumentId, StoreError>;

    async fn delete(&self, id: &DocumentId) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> ContentStore for Arc<S>
where
    S: ContentStore + ?Sized,
{
    async fn fetch(&self, query: &DocumentQuery) -> Result<Vec<JsonValue>, StoreError> {
        (**self).fetch(query).await
    }

    async fn create(&self, doc_type: &str, body: JsonValue) -> Result<DocumentId, StoreError> {
        (**self).create(doc_type, body).await
    }

    async fn delete(&self, id: &DocumentId) -> Result<(), StoreError> {
        (**self).delete(id).await
    }
}
