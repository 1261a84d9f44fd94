//! In-process stand-in for the document API, served on an ephemeral port.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::net::TcpListener;

pub const PASSWORD: &str = "secret";
const SESSION_COOKIE: &str = "session=admin";

type Catalog = BTreeMap<String, BTreeMap<String, Vec<Value>>>;

pub struct StubState {
    pub catalog: Mutex<Catalog>,
    pub calls: Mutex<Vec<String>>,
}

impl StubState {
    fn seeded() -> Self {
        let orders: Vec<Value> = (1..=12)
            .map(|i| json!({"_id": format!("o{:02}", i), "qty": i}))
            .collect();
        let users = vec![json!({"_id": "u1", "name": "ann", "tags": ["a", "b"]})];

        let mut shop = BTreeMap::new();
        shop.insert("orders".to_string(), orders);
        shop.insert("users".to_string(), users);
        let mut crm = BTreeMap::new();
        crm.insert("contacts".to_string(), Vec::new());

        let mut catalog = BTreeMap::new();
        catalog.insert("crm".to_string(), crm);
        catalog.insert("shop".to_string(), shop);
        Self {
            catalog: Mutex::new(catalog),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().push(call.to_string());
    }
}

type Shared = Arc<StubState>;

/// Start the stub and return its base URL.
pub async fn spawn_stub() -> (String, Shared) {
    let state = Arc::new(StubState::seeded());
    let app = Router::new()
        .route("/api/databases", get(databases))
        .route("/api/collections", get(collections))
        .route("/api/docs", get(docs))
        .route("/api/delete_doc", post(delete_doc))
        .route("/api/delete_collection", post(delete_collection))
        .route("/api/delete_database", post(delete_database))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), state)
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn authorized(headers: &HeaderMap) -> Result<(), Response> {
    let ok = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.split(';').any(|c| c.trim() == SESSION_COOKIE));
    if ok {
        Ok(())
    } else {
        Err(error(StatusCode::UNAUTHORIZED, "Not logged in."))
    }
}

async fn databases(State(state): State<Shared>, headers: HeaderMap) -> Response {
    state.record("databases");
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    let names: Vec<String> = state.catalog.lock().keys().cloned().collect();
    Json(json!({ "databases": names })).into_response()
}

async fn collections(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.record("collections");
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    let db = params.get("db").cloned().unwrap_or_default();
    match state.catalog.lock().get(&db) {
        Some(colls) => {
            let names: Vec<String> = colls.keys().cloned().collect();
            Json(json!({ "collections": names })).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Database not found."),
    }
}

#[derive(Deserialize)]
struct DocsParams {
    db: String,
    collection: String,
    page: usize,
    limit: usize,
}

async fn docs(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<DocsParams>,
) -> Response {
    state.record("docs");
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    // Failure modes for the client's error extraction.
    match params.collection.as_str() {
        "broken" => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "database exploded").into_response()
        }
        "silent" => return StatusCode::BAD_GATEWAY.into_response(),
        _ => {}
    }
    let catalog = state.catalog.lock();
    let Some(docs) = catalog
        .get(&params.db)
        .and_then(|colls| colls.get(&params.collection))
    else {
        return error(StatusCode::NOT_FOUND, "Collection not found.");
    };
    let limit = params.limit.max(1);
    let total_pages = docs.len().div_ceil(limit).max(1);
    let page: Vec<Value> = docs
        .iter()
        .skip((params.page.max(1) - 1) * limit)
        .take(limit)
        .cloned()
        .collect();
    Json(json!({
        "docs": page,
        "page": params.page,
        "limit": limit,
        "total_pages": total_pages,
        "total_count": docs.len(),
    }))
    .into_response()
}

#[derive(Deserialize)]
struct DeleteDocBody {
    db: String,
    collection: String,
    id: String,
}

async fn delete_doc(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<DeleteDocBody>,
) -> Response {
    state.record("delete_doc");
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    let mut catalog = state.catalog.lock();
    let Some(docs) = catalog
        .get_mut(&body.db)
        .and_then(|colls| colls.get_mut(&body.collection))
    else {
        return error(StatusCode::NOT_FOUND, "Collection not found.");
    };
    let before = docs.len();
    docs.retain(|d| d.get("_id").and_then(Value::as_str) != Some(body.id.as_str()));
    if docs.len() == before {
        return error(StatusCode::NOT_FOUND, "Document not found.");
    }
    Json(json!({ "deleted": 1 })).into_response()
}

#[derive(Deserialize)]
struct DeleteCollectionBody {
    db: String,
    collection: String,
    confirm: String,
}

async fn delete_collection(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<DeleteCollectionBody>,
) -> Response {
    state.record("delete_collection");
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    if body.confirm != body.collection {
        return error(StatusCode::BAD_REQUEST, "Confirmation does not match.");
    }
    let mut catalog = state.catalog.lock();
    match catalog.get_mut(&body.db) {
        Some(colls) => match colls.remove(&body.collection) {
            Some(_) => Json(json!({ "ok": true })).into_response(),
            None => error(StatusCode::NOT_FOUND, "Collection not found."),
        },
        None => error(StatusCode::NOT_FOUND, "Database not found."),
    }
}

#[derive(Deserialize)]
struct DeleteDatabaseBody {
    db: String,
    confirm: String,
}

async fn delete_database(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<DeleteDatabaseBody>,
) -> Response {
    state.record("delete_database");
    if let Err(denied) = authorized(&headers) {
        return denied;
    }
    if body.confirm != body.db {
        return error(StatusCode::BAD_REQUEST, "Confirmation does not match.");
    }
    match state.catalog.lock().remove(&body.db) {
        Some(_) => Json(json!({ "ok": true })).into_response(),
        None => error(StatusCode::NOT_FOUND, "Database not found."),
    }
}

#[derive(Deserialize)]
struct LoginBody {
    password: String,
}

async fn login(State(state): State<Shared>, Json(body): Json<LoginBody>) -> Response {
    state.record("login");
    if body.password != PASSWORD {
        return error(StatusCode::UNAUTHORIZED, "Invalid password");
    }
    (
        [(header::SET_COOKIE, format!("{}; Path=/; HttpOnly", SESSION_COOKIE))],
        Json(json!({ "ok": true })),
    )
        .into_response()
}

async fn logout(State(state): State<Shared>) -> Response {
    state.record("logout");
    (
        [(header::SET_COOKIE, "session=; Path=/; Max-Age=0".to_string())],
        Json(json!({ "ok": true })),
    )
        .into_response()
}
