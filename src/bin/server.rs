//! Critical ACL editor REST server
//!
//! Run with: cargo run --features server --bin crit-acl-server
//!
//! Endpoints:
//!   GET  /status             - Server status
//!   GET  /presets            - Permission preset vocabulary
//!   GET  /acl/:resource      - Fetch a resource's ACL store
//!   PUT  /acl/:resource      - Replace a resource's ACL store
//!   POST /flatten            - Expand a store into editor rows
//!   POST /group              - Rebuild a store from editor rows
//!   POST /check              - Check principals against a stored ACL
//!   GET  /principals         - Prefix search over the principal directory

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crit_acl::{
    flatten, group, label, perms_to_names, qualify, AccessControlStore, AclRow, Preset,
    PrincipalHit, PrincipalKind,
};

// ============================================================================
// State
// ============================================================================

struct AppState {
    /// resource id -> its ACL store
    stores: Mutex<HashMap<String, AccessControlStore>>,
    directory: Vec<PrincipalHit>,
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Editor row on the wire. The in-memory `local_id` stays local.
#[derive(Serialize, Deserialize)]
struct RowDto {
    principal: String,
    permissions: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
}

impl From<&AclRow> for RowDto {
    fn from(r: &AclRow) -> Self {
        RowDto {
            principal: r.principal.clone(),
            permissions: r.permissions,
            scope: r.scope.clone(),
        }
    }
}

#[derive(Deserialize)]
struct GroupReq {
    rows: Vec<RowDto>,
}

#[derive(Deserialize)]
struct CheckReq {
    resource: String,
    principals: Vec<String>,
    required: u8,
}

#[derive(Serialize)]
struct CheckRes {
    allowed: bool,
    required: u8,
    required_label: String,
}

#[derive(Deserialize)]
struct SearchQuery {
    q: String,
    kind: Option<PrincipalKind>,
}

#[derive(Serialize)]
struct PresetInfo {
    name: &'static str,
    mask: u8,
    bits: Vec<&'static str>,
}

#[derive(Serialize)]
struct StatusRes {
    resources: usize,
    principals: usize,
}

#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(msg.into()) }
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn get_status(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatusRes>> {
    let resources = state.stores.lock().map(|s| s.len()).unwrap_or(0);
    Json(ApiResponse::ok(StatusRes {
        resources,
        principals: state.directory.len(),
    }))
}

async fn get_presets() -> Json<ApiResponse<Vec<PresetInfo>>> {
    let presets = Preset::ALL
        .into_iter()
        .map(|p| PresetInfo {
            name: p.name(),
            mask: p.mask(),
            bits: perms_to_names(p.mask()),
        })
        .collect();
    Json(ApiResponse::ok(presets))
}

async fn get_acl(
    State(state): State<Arc<AppState>>,
    Path(resource): Path<String>,
) -> (StatusCode, Json<ApiResponse<AccessControlStore>>) {
    match state.stores.lock() {
        // Unknown resources start with an open ACL
        Ok(stores) => {
            let store = stores.get(&resource).cloned().unwrap_or_default();
            (StatusCode::OK, Json(ApiResponse::ok(store)))
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::err("State poisoned")),
        ),
    }
}

async fn put_acl(
    State(state): State<Arc<AppState>>,
    Path(resource): Path<String>,
    Json(store): Json<AccessControlStore>,
) -> (StatusCode, Json<ApiResponse<String>>) {
    match state.stores.lock() {
        Ok(mut stores) => {
            stores.insert(resource, store);
            (StatusCode::OK, Json(ApiResponse::ok("saved".into())))
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::err("State poisoned")),
        ),
    }
}

async fn post_flatten(Json(store): Json<AccessControlStore>) -> Json<ApiResponse<Vec<RowDto>>> {
    let rows = flatten(&store).iter().map(RowDto::from).collect();
    Json(ApiResponse::ok(rows))
}

async fn post_group(Json(req): Json<GroupReq>) -> Json<ApiResponse<AccessControlStore>> {
    let rows: Vec<AclRow> = req
        .rows
        .into_iter()
        .map(|r| AclRow::new(r.principal, r.permissions, r.scope))
        .collect();
    Json(ApiResponse::ok(group(&rows)))
}

async fn post_check(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CheckReq>,
) -> Json<ApiResponse<CheckRes>> {
    match state.stores.lock() {
        Ok(stores) => {
            let store = stores.get(&req.resource).cloned().unwrap_or_default();
            Json(ApiResponse::ok(CheckRes {
                allowed: store.check_permission(&req.principals, req.required),
                required: req.required,
                required_label: label(req.required),
            }))
        }
        Err(_) => Json(ApiResponse::err("State poisoned")),
    }
}

async fn get_principals(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Json<ApiResponse<Vec<PrincipalHit>>> {
    let needle = query.q.to_lowercase();
    let prefixed = query.kind.map(|k| qualify(k, &needle));
    let hits = state
        .directory
        .iter()
        .filter(|hit| match &prefixed {
            Some(p) => hit.id.starts_with(p.as_str()),
            None => {
                hit.id.starts_with(needle.as_str())
                    || hit
                        .name
                        .as_deref()
                        .is_some_and(|n| n.to_lowercase().contains(&needle))
            }
        })
        .cloned()
        .collect();
    Json(ApiResponse::ok(hits))
}

// ============================================================================
// Main
// ============================================================================

fn seed_directory() -> Vec<PrincipalHit> {
    let named = [
        ("u_alice", "Alice Meyer"),
        ("u_bob", "Bob Tran"),
        ("u_carol", "Carol Osei"),
        ("g_platform", "Platform Team"),
        ("g_qa", "QA Guild"),
        ("svc_backup", "Backup Agent"),
        ("pl_deploy", "Deploy Pipeline"),
    ];
    named
        .into_iter()
        .map(|(id, name)| PrincipalHit {
            id: id.into(),
            name: Some(name.into()),
        })
        .collect()
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = Arc::new(AppState {
        stores: Mutex::new(HashMap::new()),
        directory: seed_directory(),
    });

    let app = Router::new()
        .route("/status", get(get_status))
        .route("/presets", get(get_presets))
        .route("/acl/:resource", get(get_acl).put(put_acl))
        .route("/flatten", post(post_flatten))
        .route("/group", post(post_group))
        .route("/check", post(post_check))
        .route("/principals", get(get_principals))
        .layer(cors)
        .with_state(state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".into());
    let addr = format!("0.0.0.0:{}", port);
    println!("crit-acl server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.expect("bind failed");
    axum::serve(listener, app).await.expect("server failed");
}
