//! Local HTTP stand-ins for upstream services.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::Query;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::routing::{MethodRouter, any};
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;

/// One request as seen by a stub upstream.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl SeenRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Requests recorded by a stub, in arrival order.
pub type Seen = Arc<Mutex<Vec<SeenRequest>>>;

/// Route answering every request with `status` and `reply`, recording it
/// into `seen`.
pub fn stub(seen: Seen, status: StatusCode, reply: Value) -> MethodRouter {
    any(
        move |method: Method,
              uri: Uri,
              Query(query): Query<HashMap<String, String>>,
              headers: HeaderMap,
              body: Bytes| {
            let seen = seen.clone();
            let reply = reply.clone();
            async move {
                seen.lock().unwrap().push(SeenRequest {
                    method,
                    path: uri.path().to_string(),
                    query,
                    headers,
                    body: serde_json::from_slice(&body).ok(),
                });
                (status, Json(reply))
            }
        },
    )
}

/// Serve `app` on an ephemeral localhost port; returns `http://127.0.0.1:N`.
pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}
