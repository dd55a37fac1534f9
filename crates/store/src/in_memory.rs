use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::{Value as JsonValue, json};

use shopdash_core::DocumentId;

use crate::{ContentStore, DocumentQuery, StoreError};

/// In-memory content store for tests/dev.
///
/// Documents keep insertion order so listings are stable. The query text is
/// ignored; only the `_type` filter applies. `set_failing(true)` makes every
/// call fail with a transport error, which is how failure paths get tested.
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    docs: RwLock<Vec<(DocumentId, JsonValue)>>,
    failing: AtomicBool,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Insert a document that already carries `_id` and `_type`.
    pub fn seed(&self, doc: JsonValue) -> Result<DocumentId, StoreError> {
        let id: DocumentId = doc
            .get("_id")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| StoreError::InvalidDocument("seed document has no _id".to_string()))?
            .parse()
            .map_err(|e| StoreError::InvalidDocument(format!("{e}")))?;
        if doc.get("_type").and_then(JsonValue::as_str).is_none() {
            return Err(StoreError::InvalidDocument(
                "seed document has no _type".to_string(),
            ));
        }

        let mut docs = self.write()?;
        docs.retain(|(existing, _)| existing != &id);
        docs.push((id.clone(), doc));
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.docs.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Transport("store unavailable".to_string()));
        }
        Ok(())
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<(DocumentId, JsonValue)>>, StoreError> {
        self.docs
            .write()
            .map_err(|_| StoreError::Transport("store lock poisoned".to_string()))
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn fetch(&self, query: &DocumentQuery) -> Result<Vec<JsonValue>, StoreError> {
        self.check_available()?;
        let docs = self
            .docs
            .read()
            .map_err(|_| StoreError::Transport("store lock poisoned".to_string()))?;

        Ok(docs
            .iter()
            .filter(|(_, doc)| doc.get("_type").and_then(JsonValue::as_str) == Some(query.doc_type))
            .map(|(_, doc)| doc.clone())
            .collect())
    }

    async fn create(&self, doc_type: &str, body: JsonValue) -> Result<DocumentId, StoreError> {
        self.check_available()?;
        let JsonValue::Object(mut fields) = body else {
            return Err(StoreError::InvalidDocument(
                "document body must be a JSON object".to_string(),
            ));
        };

        let id = DocumentId::generate();
        fields.insert("_id".to_string(), json!(id.as_str()));
        fields.insert("_type".to_string(), json!(doc_type));

        self.write()?.push((id.clone(), JsonValue::Object(fields)));
        Ok(id)
    }

    async fn delete(&self, id: &DocumentId) -> Result<(), StoreError> {
        self.check_available()?;
        let mut docs = self.write()?;
        let before = docs.len();
        docs.retain(|(existing, _)| existing != id);
        if docs.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
