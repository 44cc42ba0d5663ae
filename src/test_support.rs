//! In-process mock of the bookkeeping API for async tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::get;

pub(crate) const ALICE_JSON: &str = r#"{"id":"u1","name":"Alice","email":"a@x.com"}"#;

/// A running mock server and the number of `/user` hits it has served.
pub(crate) struct MockApi {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl MockApi {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Serve `GET /api/v1/user` with a fixed status and body.
pub(crate) async fn spawn_user_endpoint(status: StatusCode, body: &'static str) -> MockApi {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let router = Router::new().route(
        "/api/v1/user",
        get(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                (status, body)
            }
        }),
    );
    serve(router, hits).await
}

/// Serve `GET /api/v1/user` only to requests carrying `Cookie: <cookie>`.
pub(crate) async fn spawn_cookie_gated_user_endpoint(cookie: &'static str) -> MockApi {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let router = Router::new().route(
        "/api/v1/user",
        get(move |headers: HeaderMap| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                let presented = headers
                    .get(header::COOKIE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default();
                if presented.split(';').any(|pair| pair.trim() == cookie) {
                    (StatusCode::OK, ALICE_JSON)
                } else {
                    (StatusCode::UNAUTHORIZED, "")
                }
            }
        }),
    );
    serve(router, hits).await
}

/// An API base URL nothing is listening on.
pub(crate) async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api/v1")
}

async fn serve(router: Router, hits: Arc<AtomicUsize>) -> MockApi {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    MockApi { base_url: format!("http://{addr}/api/v1"), hits }
}
