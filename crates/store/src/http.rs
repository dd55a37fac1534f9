//! Client for the hosted content API.
//!
//! - `GET  {base}/v{version}/data/query/{dataset}?query=...` → `{ "result": [...] }`
//! - `POST {base}/v{version}/data/mutate/{dataset}?returnIds=true` with
//!   `{ "mutations": [ { "create": {...} } | { "delete": { "id": ... } } ] }`
//!
//! No retries and no cancellation: a failed call is reported once and the
//! caller decides what to show.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};

use shopdash_core::DocumentId;

use crate::{ContentStore, DocumentQuery, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpStoreSettings {
    /// e.g. `https://<project>.api.sanity.io`
    pub base_url: String,
    pub dataset: String,
    /// Dated API version, without the leading `v`.
    pub api_version: String,
    /// Write token; reads of a public dataset work without one.
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Option<Vec<JsonValue>>,
}

#[derive(Debug, Deserialize)]
struct MutationResult {
    id: String,
}

#[derive(Debug, Deserialize)]
struct MutateResponse {
    #[serde(default)]
    results: Vec<MutationResult>,
}

#[derive(Debug, Clone)]
pub struct HttpContentStore {
    client: reqwest::Client,
    settings: HttpStoreSettings,
}

impl HttpContentStore {
    pub fn new(settings: HttpStoreSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/v{}/data/{}/{}",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.api_version.trim_start_matches('v'),
            action,
            self.settings.dataset
        )
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.settings.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, StoreError> {
        let resp = self
            .authorize(req)
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Remote {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }

    async fn mutate(&self, mutation: JsonValue) -> Result<MutateResponse, StoreError> {
        let req = self
            .client
            .post(self.endpoint("mutate"))
            .query(&[("returnIds", "true")])
            .json(&json!({ "mutations": [mutation] }));

        self.send(req)
            .await?
            .json::<MutateResponse>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ContentStore for HttpContentStore {
    async fn fetch(&self, query: &DocumentQuery) -> Result<Vec<JsonValue>, StoreError> {
        let req = self
            .client
            .get(self.endpoint("query"))
            .query(&[("query", query.text.as_str())]);

        let body = self
            .send(req)
            .await?
            .json::<QueryResponse>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        tracing::debug!(doc_type = query.doc_type, "content query answered");
        Ok(body.result.unwrap_or_default())
    }

    async fn create(&self, doc_type: &str, body: JsonValue) -> Result<DocumentId, StoreError> {
        let JsonValue::Object(mut fields) = body else {
            return Err(StoreError::InvalidDocument(
                "document body must be a JSON object".to_string(),
            ));
        };
        fields.insert("_type".to_string(), json!(doc_type));

        let resp = self
            .mutate(json!({ "create": JsonValue::Object(fields) }))
            .await?;

        let id = resp
            .results
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("create returned no document id".to_string()))?
            .id;
        id.parse()
            .map_err(|e| StoreError::Decode(format!("store returned unusable id: {e}")))
    }

    async fn delete(&self, id: &DocumentId) -> Result<(), StoreError> {
        let resp = self
            .mutate(json!({ "delete": { "id": id.as_str() } }))
            .await?;

        // A delete that matched nothing comes back with an empty result list.
        if resp.results.is_empty() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(base: &str, version: &str) -> HttpContentStore {
        HttpContentStore::new(HttpStoreSettings {
            base_url: base.to_string(),
            dataset: "production".to_string(),
            api_version: version.to_string(),
            token: None,
        })
    }

    #[test]
    fn endpoints_are_versioned_per_dataset() {
        let s = store("https://abc123.api.sanity.io/", "2021-10-21");
        assert_eq!(
            s.endpoint("query"),
            "https://abc123.api.sanity.io/v2021-10-21/data/query/production"
        );
        assert_eq!(
            store("http://localhost:1", "v1").endpoint("mutate"),
            "http://localhost:1/v1/data/mutate/production"
        );
    }
}
