//! In-process SICME backend for integration tests
//!
//! A small stateful REST mock served by axum on `127.0.0.1:0`. Every
//! request is recorded so tests can assert on routes, bodies and headers.

#![allow(dead_code)]

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value, json};
use sicme_client::{AdminContext, ClientConfig, MemoryTokenStore};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

/// One request as seen by the backend
#[derive(Debug, Clone)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Default)]
struct Db {
    collections: BTreeMap<String, Vec<Value>>,
    stock: Vec<Value>,
    calls: Vec<Call>,
    failure: Option<(StatusCode, String)>,
}

#[derive(Clone, Default)]
pub struct MockBackend {
    db: Arc<Mutex<Db>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection (e.g. "suppliers") with records
    pub fn seed(&self, collection: &str, records: Vec<Value>) -> &Self {
        self.db
            .lock()
            .unwrap()
            .collections
            .insert(collection.to_string(), records);
        self
    }

    /// Seed branch stock rows (`{productId, branchId, hasStock, stockQty}`)
    pub fn seed_stock(&self, rows: Vec<Value>) -> &Self {
        self.db.lock().unwrap().stock = rows;
        self
    }

    /// Answer the next request with `status` and a raw body
    pub fn fail_next(&self, status: u16, body: &str) {
        self.db.lock().unwrap().failure = Some((StatusCode::from_u16(status).unwrap(), body.to_string()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.db.lock().unwrap().calls.clone()
    }

    pub fn last_call(&self) -> Call {
        self.calls().pop().expect("no request recorded")
    }

    pub fn collection(&self, name: &str) -> Vec<Value> {
        self.db
            .lock()
            .unwrap()
            .collections
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    /// Serve on an ephemeral port; returns the API base URL
    pub async fn spawn(&self) -> String {
        let router = Router::new().fallback(handle).with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/api")
    }
}

/// Backend plus a context pointed at it, with an in-memory token store
pub async fn context_with(backend: &MockBackend, config: impl FnOnce(ClientConfig) -> ClientConfig) -> AdminContext {
    let base_url = backend.spawn().await;
    let config = config(ClientConfig::new(base_url).with_timeout(5));
    AdminContext::with_token_store(config, Arc::new(MemoryTokenStore::new())).unwrap()
}

pub async fn context(backend: &MockBackend) -> AdminContext {
    context_with(backend, |c| c).await
}

fn parse_query(uri: &Uri) -> HashMap<String, String> {
    uri.query()
        .unwrap_or_default()
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.to_string(), v.replace('+', " ")))
        .collect()
}

fn json_response(status: StatusCode, body: Value) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body.to_string()).into_response()
}

fn not_found() -> Response {
    json_response(StatusCode::NOT_FOUND, json!({ "message": "Recurso no encontrado" }))
}

async fn handle(
    State(backend): State<MockBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let call = Call {
        method: method.clone(),
        path: uri.path().to_string(),
        query: parse_query(&uri),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };

    let mut db = backend.db.lock().unwrap();
    db.calls.push(call.clone());
    if let Some((status, body)) = db.failure.take() {
        return (status, body).into_response();
    }

    let segments: Vec<&str> = call
        .path
        .trim_start_matches("/api/")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    match (method.as_str(), segments.as_slice()) {
        ("POST", ["auth", "login"]) => json_response(
            StatusCode::OK,
            json!({
                "access_token": "tok-123",
                "user": { "id": 1, "name": "Admin", "email": call.body["email"], "role": "admin", "state": true }
            }),
        ),
        ("POST", ["auth", "logout"]) => StatusCode::NO_CONTENT.into_response(),
        ("GET", ["auth", "me"]) => match call.authorization {
            Some(_) => json_response(
                StatusCode::OK,
                json!({ "id": 1, "name": "Admin", "email": "admin@sicme.test", "role": "admin", "state": true }),
            ),
            None => StatusCode::UNAUTHORIZED.into_response(),
        },
        ("GET", ["branches", branch_id, "products"]) => {
            let page: u64 = call.query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
            let limit: u64 = call.query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(10);
            let rows: Vec<Value> = db
                .stock
                .iter()
                .filter(|row| row["branchId"].to_string() == *branch_id)
                .cloned()
                .collect();
            let total = rows.len() as u64;
            let data: Vec<Value> = rows
                .into_iter()
                .skip(((page - 1) * limit) as usize)
                .take(limit as usize)
                .collect();
            json_response(
                StatusCode::OK,
                json!({
                    "data": data,
                    "total": total,
                    "page": page,
                    "limit": limit,
                    "totalPages": total.div_ceil(limit),
                }),
            )
        }
        ("PUT", ["products", product_id, "branches", branch_id, "stock"]) => json_response(
            StatusCode::OK,
            json!({
                "productId": product_id.parse::<i64>().unwrap_or_default(),
                "branchId": branch_id.parse::<i64>().unwrap_or_default(),
                "hasStock": call.body["has_stock"],
                "stockQty": call.body["stock_qty"],
            }),
        ),
        ("GET", [collection]) => {
            let records = db.collections.get(*collection).cloned().unwrap_or_default();
            json_response(StatusCode::OK, Value::Array(records))
        }
        ("POST", [collection]) => {
            let records = db.collections.entry(collection.to_string()).or_default();
            let id = records.iter().filter_map(|r| r["id"].as_i64()).max().unwrap_or(0) + 1;
            let mut record = match call.body {
                Value::Object(map) => map,
                _ => Map::new(),
            };
            record.insert("id".to_string(), json!(id));
            record.entry("state").or_insert(json!(true));
            let record = Value::Object(record);
            records.push(record.clone());
            json_response(StatusCode::CREATED, record)
        }
        (verb, [collection, id, rest @ ..]) => {
            let Some(records) = db.collections.get_mut(*collection) else {
                return not_found();
            };
            let Some(index) = records.iter().position(|r| r["id"].to_string() == *id) else {
                return not_found();
            };
            match (verb, rest) {
                ("GET", []) => json_response(StatusCode::OK, records[index].clone()),
                ("PUT" | "PATCH", []) | ("PATCH", ["state"]) => {
                    if let (Value::Object(record), Value::Object(changes)) = (&mut records[index], &call.body) {
                        for (key, value) in changes {
                            record.insert(key.clone(), value.clone());
                        }
                    }
                    json_response(StatusCode::OK, records[index].clone())
                }
                ("DELETE", []) => {
                    records.remove(index);
                    StatusCode::NO_CONTENT.into_response()
                }
                _ => not_found(),
            }
        }
        _ => not_found(),
    }
}
