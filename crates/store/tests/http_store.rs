//! Drives `HttpContentStore` against a small local stand-in for the content API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::{Value, json};

use shopdash_orders::{LineItem, OrderDocument, OrderDraft};
use shopdash_store::{ContentStore, HttpContentStore, HttpStoreSettings, Repository, StoreError};

#[derive(Clone, Default)]
struct FakeApi {
    docs: Arc<Mutex<Vec<Value>>>,
    seen_queries: Arc<Mutex<Vec<String>>>,
    seen_auth: Arc<Mutex<Vec<String>>>,
}

fn record_auth(api: &FakeApi, headers: &HeaderMap) {
    if let Some(v) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        api.seen_auth.lock().unwrap().push(v.to_string());
    }
}

async fn query(
    State(api): State<FakeApi>,
    Path(dataset): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    record_auth(&api, &headers);
    if dataset == "broken" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    api.seen_queries
        .lock()
        .unwrap()
        .push(params.get("query").cloned().unwrap_or_default());
    let docs = api.docs.lock().unwrap().clone();
    Json(json!({ "ms": 1, "result": docs })).into_response()
}

async fn mutate(
    State(api): State<FakeApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    record_auth(&api, &headers);
    let mut docs = api.docs.lock().unwrap();
    let mut results = Vec::new();

    for m in body["mutations"].as_array().cloned().unwrap_or_default() {
        if let Some(create) = m.get("create") {
            let id = format!("doc-{}", docs.len() + 1);
            let mut doc = create.clone();
            doc["_id"] = json!(id);
            docs.push(doc);
            results.push(json!({"id": id, "operation": "create"}));
        } else if let Some(id) = m["delete"]["id"].as_str() {
            let before = docs.len();
            docs.retain(|d| d["_id"] != json!(id));
            if docs.len() < before {
                results.push(json!({"id": id, "operation": "delete"}));
            }
        }
    }

    Json(json!({ "transactionId": "tx1", "results": results }))
}

async fn spawn(api: FakeApi) -> (String, tokio::task::JoinHandle<()>) {
    let app = Router::new()
        .route("/v2021-10-21/data/query/:dataset", get(query))
        .route("/v2021-10-21/data/mutate/:dataset", post(mutate))
        .with_state(api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind ephemeral port");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), handle)
}

fn client(base_url: &str, dataset: &str, token: Option<&str>) -> HttpContentStore {
    HttpContentStore::new(HttpStoreSettings {
        base_url: base_url.to_string(),
        dataset: dataset.to_string(),
        api_version: "2021-10-21".to_string(),
        token: token.map(str::to_string),
    })
}

#[tokio::test]
async fn create_list_delete_round_trip() {
    let api = FakeApi::default();
    let (base, handle) = spawn(api.clone()).await;
    let store: Arc<dyn ContentStore> = Arc::new(client(&base, "production", Some("tok")));
    let orders: Repository<OrderDocument> = Repository::new(store);

    let id = orders
        .create(&OrderDraft::single_item(LineItem::new("Lamp", 12.5, 2)))
        .await
        .unwrap();
    assert_eq!(id.as_str(), "doc-1");

    let listed = orders.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].order_items, Some(vec![LineItem::new("Lamp", 12.5, 2)]));

    let stored_type = api.docs.lock().unwrap()[0]["_type"].clone();
    assert_eq!(stored_type, json!("orderSummary"));

    orders.delete(&id).await.unwrap();
    assert!(orders.list().await.unwrap().is_empty());

    let queries = api.seen_queries.lock().unwrap().clone();
    assert!(queries.iter().all(|q| q.contains("orderItems[]{productName, price, quantity}")));
    assert!(api.seen_auth.lock().unwrap().iter().all(|h| h == "Bearer tok"));

    handle.abort();
}

#[tokio::test]
async fn deleting_missing_document_is_not_found() {
    let (base, handle) = spawn(FakeApi::default()).await;
    let store = client(&base, "production", None);

    let err = store.delete(&"nope".parse().unwrap()).await.unwrap_err();
    assert_eq!(err, StoreError::NotFound("nope".to_string()));

    handle.abort();
}

#[tokio::test]
async fn server_error_is_reported_with_status() {
    let (base, handle) = spawn(FakeApi::default()).await;
    let orders: Repository<OrderDocument> =
        Repository::new(Arc::new(client(&base, "broken", None)));

    match orders.list().await {
        Err(StoreError::Remote { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("expected remote error, got {other:?}"),
    }

    handle.abort();
}

#[tokio::test]
async fn unreachable_store_is_a_transport_error() {
    let store = client("http://127.0.0.1:1", "production", None);
    let err = store
        .fetch(&Repository::<OrderDocument>::query())
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Transport(_)));
}
