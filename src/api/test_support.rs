// src/api/test_support.rs
// An in-process fake of the marketplace backend for the HTTP tests.
// Every request is recorded and answered with the same canned body.

use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::ApiClient;
use crate::session::Session;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path plus query string, e.g. `/api/products/?page=1&limit=20`.
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Clone)]
struct Reply {
    status: StatusCode,
    content_type: String,
    body: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct FakeBackend {
    /// Base URL to hand to [`ApiClient::new`], ends in `/api`.
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    stop: Option<oneshot::Sender<()>>,
    server: Option<JoinHandle<()>>,
}

impl FakeBackend {
    /// Answers every request with HTTP 200 and `body` as JSON.
    pub async fn replying(body: Value) -> Self {
        Self::raw(200, "application/json", &body.to_string()).await
    }

    pub async fn raw(status: u16, content_type: &str, body: &str) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let reply = Reply {
            status: StatusCode::from_u16(status).unwrap(),
            content_type: content_type.to_string(),
            body: body.to_string(),
            requests: requests.clone(),
        };

        let app = Router::new().fallback(record).with_state(reply);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop, stopped) = oneshot::channel::<()>();

        let server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = stopped.await;
                })
                .await
                .unwrap();
        });

        Self {
            base_url: format!("http://{}/api", addr),
            requests,
            stop: Some(stop),
            server: Some(server),
        }
    }

    /// A client pointed at this backend. Proxies are bypassed so
    /// HTTP_PROXY in the environment cannot intercept loopback traffic.
    pub fn client(&self, session: Session) -> ApiClient {
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        ApiClient::with_http_client(&self.base_url, session, http).unwrap()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Stops the server and waits until the port is released.
    pub async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(server) = self.server.take() {
            server.await.unwrap();
        }
    }
}

async fn record(
    State(reply): State<Reply>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let recorded = RecordedRequest {
        method: method.to_string(),
        path: uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string()),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    reply.requests.lock().unwrap().push(recorded);

    (
        reply.status,
        [(header::CONTENT_TYPE, reply.content_type.clone())],
        reply.body.clone(),
    )
        .into_response()
}
