//! Fake Zabbix frontend for end-to-end tests
//!
//! Serves `/zabbix/api_jsonrpc.php` on an ephemeral local port and records
//! every request body it receives.

#![allow(dead_code)]

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const USER: &str = "api";
pub const PASSWORD: &str = "secret";
pub const TOKEN: &str = "0424bd59b807674191e7d77572075f33";

#[derive(Clone, Default)]
pub struct FakeZabbix {
    requests: Arc<Mutex<Vec<Value>>>,
    content_types: Arc<Mutex<Vec<String>>>,
}

impl FakeZabbix {
    /// Request bodies received so far, in order
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r["method"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    pub fn ids(&self) -> Vec<u64> {
        self.requests()
            .iter()
            .map(|r| r["id"].as_u64().unwrap_or_default())
            .collect()
    }

    pub fn content_types(&self) -> Vec<String> {
        self.content_types.lock().unwrap().clone()
    }
}

/// Start the fake server, returning its state and the frontend base URL
pub async fn start() -> (FakeZabbix, String) {
    let state = FakeZabbix::default();

    let app = Router::new()
        .route("/zabbix/api_jsonrpc.php", post(handle))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (state, format!("http://{}/zabbix", addr))
}

/// Base URL of a port nothing listens on
pub async fn dead_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/zabbix", addr)
}

async fn handle(State(state): State<FakeZabbix>, headers: HeaderMap, body: String) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.content_types.lock().unwrap().push(content_type);

    let request: Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(_) => return (StatusCode::BAD_REQUEST, "bad json").into_response(),
    };
    state.requests.lock().unwrap().push(request.clone());

    let id = request["id"].clone();
    let method = request["method"].as_str().unwrap_or_default();
    let params = &request["params"];
    let authed = request["auth"] == TOKEN;

    let reply = match method {
        "apiinfo.version" => ok(id, json!("6.0.13")),
        "user.checkAuthentication" => ok(id, json!({"userid": "1", "username": USER})),
        "user.login" => {
            if params["user"] == USER && params["password"] == PASSWORD {
                ok(id, json!(TOKEN))
            } else {
                error(id, -32602, "Invalid params.", "Login name or password is incorrect.")
            }
        }
        _ if !authed => error(id, -32602, "Invalid params.", "Not authorised."),
        "host.get" => ok(
            id,
            json!([
                {"hostid": "10084", "host": "Zabbix server"},
                {"hostid": "10501", "host": "frontend-01.example.org"}
            ]),
        ),
        "item.get" => ok(id, json!([])),
        "host.delete" => json!({
            "jsonrpc": "2.0",
            "error": {"code": -32500, "message": "Application error.", "data": "No permissions to referred object or it does not exist!"},
            "result": {"hostids": ["10084"]},
            "id": id
        }),
        "slow.get" => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            ok(id, json!([]))
        }
        "garbage.get" => return "<html>Zabbix is down</html>".into_response(),
        _ => error(id, -32601, "Method not found.", "Incorrect API \"unknown\"."),
    };

    Json(reply).into_response()
}

fn ok(id: Value, result: Value) -> Value {
    json!({"jsonrpc": "2.0", "result": result, "id": id})
}

fn error(id: Value, code: i64, message: &str, data: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "error": {"code": code, "message": message, "data": data},
        "id": id
    })
}
