//! Integration test harness for the school merch storefront.
//!
//! Tests drive the real storefront router in-process via `tower::oneshot`
//! while a mock merch backend listens on a loopback port, so the full
//! request path (sessions, HTMX fragments, backend gateway) is exercised
//! without any external services.
//!
//! # Test Categories
//!
//! - `storefront_cart_flow` - browsing, cart mutations, checkout
//! - `storefront_degradation` - backend outages and rejections
//! - `admin_products` - product creation

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::sync::Mutex;
use tower::ServiceExt;

use school_merch_storefront::config::MerchConfig;
use school_merch_storefront::routes;
use school_merch_storefront::state::AppState;

// =============================================================================
// Mock Backend
// =============================================================================

/// How the mock backend answers catalog and order requests.
#[derive(Clone)]
pub struct MockBackendConfig {
    /// Products returned by `GET /api/products`.
    pub products: Vec<Value>,
    /// When true, every backend route answers 500.
    pub unavailable: bool,
    /// Response to `POST /api/orders`: `Ok(body)` answers 200, `Err((status,
    /// body))` answers that status.
    pub order_response: Result<Value, (u16, Value)>,
}

impl Default for MockBackendConfig {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            unavailable: false,
            order_response: Ok(serde_json::json!({"grand_total": 0.0})),
        }
    }
}

struct MockBackendState {
    config: MockBackendConfig,
    orders: Mutex<Vec<Value>>,
    created_products: Mutex<Vec<Value>>,
}

/// Handle to a running mock backend.
pub struct MockBackend {
    /// Base URL to point the storefront at.
    pub base_url: String,
    state: Arc<MockBackendState>,
}

impl MockBackend {
    /// Start a mock backend on a random loopback port.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn(config: MockBackendConfig) -> Self {
        let state = Arc::new(MockBackendState {
            config,
            orders: Mutex::new(Vec::new()),
            created_products: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/products", get(list_products).post(create_product))
            .route("/api/orders", post(submit_order))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend addr");

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    /// Order payloads received so far.
    pub async fn orders(&self) -> Vec<Value> {
        self.state.orders.lock().await.clone()
    }

    /// Product creation payloads received so far.
    pub async fn created_products(&self) -> Vec<Value> {
        self.state.created_products.lock().await.clone()
    }
}

async fn list_products(State(state): State<Arc<MockBackendState>>) -> Response {
    if state.config.unavailable {
        return unavailable();
    }

    Json(state.config.products.clone()).into_response()
}

async fn create_product(
    State(state): State<Arc<MockBackendState>>,
    Json(body): Json<Value>,
) -> Response {
    if state.config.unavailable {
        return unavailable();
    }

    state.created_products.lock().await.push(body.clone());

    // Echo the definition back with a datastore-assigned identifier
    let mut created = body;
    created["_id"] = Value::String("backend-assigned-id".to_string());
    Json(created).into_response()
}

async fn submit_order(
    State(state): State<Arc<MockBackendState>>,
    Json(body): Json<Value>,
) -> Response {
    if state.config.unavailable {
        return unavailable();
    }

    state.orders.lock().await.push(body);

    match &state.config.order_response {
        Ok(confirmation) => Json(confirmation.clone()).into_response(),
        Err((status, error_body)) => (
            StatusCode::from_u16(*status).expect("valid status"),
            Json(error_body.clone()),
        )
            .into_response(),
    }
}

fn unavailable() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"detail": "backend down"})),
    )
        .into_response()
}

// =============================================================================
// Storefront Driver
// =============================================================================

/// A response from the storefront under test.
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Body decoded as UTF-8.
    pub body: String,
    /// Value of the `HX-Trigger` header, if present.
    pub hx_trigger: Option<String>,
}

impl TestResponse {
    /// Assert the body contains a substring.
    ///
    /// # Panics
    ///
    /// Panics with the full body when the substring is absent.
    pub fn assert_contains(&self, needle: &str) {
        assert!(
            self.body.contains(needle),
            "expected body to contain {needle:?}, got:\n{}",
            self.body
        );
    }
}

/// In-process storefront with a persistent session cookie, like a browser.
pub struct TestApp {
    router: Router,
    cookie: Option<String>,
}

impl TestApp {
    /// Build a storefront wired to the given backend base URL.
    #[must_use]
    pub fn new(backend_base_url: &str) -> Self {
        let config = MerchConfig {
            host: "127.0.0.1".parse().expect("valid host"),
            port: 0,
            backend_base_url: backend_base_url.to_string(),
            sentry_dsn: None,
        };

        Self {
            router: routes::app(AppState::new(config)),
            cookie: None,
        }
    }

    /// Send a GET request.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        let request = self
            .request_builder(path)
            .method("GET")
            .body(Body::empty())
            .expect("build request");

        self.send(request).await
    }

    /// Send a POST request with a urlencoded form body.
    pub async fn post_form(&mut self, path: &str, form: &[(&str, &str)]) -> TestResponse {
        let body = form
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let request = self
            .request_builder(path)
            .method("POST")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .expect("build request");

        self.send(request).await
    }

    fn request_builder(&self, path: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().uri(path);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie.clone());
        }
        builder
    }

    async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("infallible");

        // Carry the session cookie forward, like a browser would
        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let raw = set_cookie.to_str().expect("cookie is ascii");
            let pair = raw.split(';').next().unwrap_or(raw);
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let hx_trigger = response
            .headers()
            .get("HX-Trigger")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);

        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("read body")
            .to_bytes();

        TestResponse {
            status,
            body: String::from_utf8(bytes.to_vec()).expect("utf-8 body"),
            hx_trigger,
        }
    }
}

/// Percent-encode a form value (minimal: only what the tests need).
fn urlencode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// A hoodie product as the backend would serve it.
#[must_use]
pub fn hoodie_json() -> Value {
    serde_json::json!({
        "id": "p1",
        "title": "School Hoodie",
        "category": "hoodie",
        "description": "Cozy fleece hoodie",
        "base_price": 35.0,
        "colors": ["green", "black"],
        "images": ["https://cdn.example/hoodie.jpg"],
        "in_stock": true,
    })
}

/// A beanie product as the backend would serve it, keyed by `_id`.
#[must_use]
pub fn beanie_json() -> Value {
    serde_json::json!({
        "_id": "64f0c2",
        "title": "Beanie",
        "category": "beanie",
        "base_price": 20.0,
        "colors": ["yellow"],
    })
}
