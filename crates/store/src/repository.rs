use std::marker::PhantomData;
use std::sync::Arc;

use shopdash_core::{Document, DocumentId};

use crate::{ContentStore, DocumentQuery, StoreError};

/// Typed list/create/delete over one collection.
pub struct Repository<D> {
    store: Arc<dyn ContentStore>,
    _doc: PhantomData<fn() -> D>,
}

impl<D> Clone for Repository<D> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _doc: PhantomData,
        }
    }
}

impl<D: Document> Repository<D> {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            store,
            _doc: PhantomData,
        }
    }

    pub fn query() -> DocumentQuery {
        DocumentQuery::new(D::DOC_TYPE, D::list_query())
    }

    pub async fn list(&self) -> Result<Vec<D>, StoreError> {
        let raw = self.store.fetch(&Self::query()).await?;
        let docs = raw
            .into_iter()
            .map(|doc| {
                serde_json::from_value::<D>(doc)
                    .map_err(|e| StoreError::Decode(format!("{}: {e}", D::DOC_TYPE)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(doc_type = D::DOC_TYPE, count = docs.len(), "listed documents");
        Ok(docs)
    }

    pub async fn create(&self, draft: &D::Draft) -> Result<DocumentId, StoreError> {
        let body = serde_json::to_value(draft)
            .map_err(|e| StoreError::InvalidDocument(e.to_string()))?;
        let id = self.store.create(D::DOC_TYPE, body).await?;

        tracing::info!(doc_type = D::DOC_TYPE, id = %id, "document created");
        Ok(id)
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<(), StoreError> {
        self.store.delete(id).await?;

        tracing::info!(doc_type = D::DOC_TYPE, id = %id, "document deleted");
        Ok(())
    }
}
