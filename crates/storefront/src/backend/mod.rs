//! Client for the catalog/order backend.
//!
//! The backend exposes two REST JSON collaborators: the catalog service
//! (`GET`/`POST /api/products`) and the order service (`POST /api/orders`).
//! One request/response exchange per call - no caching, no pagination, no
//! retries. Errors propagate to the caller, which decides whether to
//! degrade (catalog on the home page) or surface (order submission).

pub mod types;

pub use types::{NewProduct, OrderConfirmation, ProductRecord};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use school_merch_core::{OrderRequest, Product};

/// Errors that can occur when talking to the merch backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed (backend unreachable, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-2xx response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error detail surfaced to the user.
        message: String,
    },

    /// Failed to parse a response body.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Client for the merch backend.
///
/// Cheap to clone; wraps a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new backend client for the given base URL.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Fetch the product catalog.
    ///
    /// Every wire record is normalized to a domain [`Product`] here, which
    /// is the single place a canonical product identifier is assigned.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend answers non-2xx,
    /// or a record cannot be normalized.
    pub async fn list_products(&self) -> Result<Vec<Product>, BackendError> {
        let response = self.client.get(self.url("/api/products")).send().await?;
        let records: Vec<ProductRecord> = read_json(response).await?;

        records
            .into_iter()
            .map(|record| Product::try_from(record).map_err(|e| BackendError::Parse(e.to_string())))
            .collect()
    }

    /// Create a new product in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// product definition.
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, BackendError> {
        let response = self
            .client
            .post(self.url("/api/products"))
            .json(product)
            .send()
            .await?;
        let record: ProductRecord = read_json(response).await?;

        Product::try_from(record).map_err(|e| BackendError::Parse(e.to_string()))
    }

    /// Submit an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// order; `BackendError::Api` carries the backend's detail string for
    /// the user.
    pub async fn submit_order(
        &self,
        order: &OrderRequest,
    ) -> Result<OrderConfirmation, BackendError> {
        let response = self
            .client
            .post(self.url("/api/orders"))
            .json(order)
            .send()
            .await?;

        read_json(response).await
    }
}

/// Read a JSON response body, turning non-2xx statuses into
/// [`BackendError::Api`] with the backend's `detail` string.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(BackendError::Api {
            status: status.as_u16(),
            message: error_detail(&body),
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %body.chars().take(500).collect::<String>(),
            "Failed to parse backend response"
        );
        BackendError::Parse(e.to_string())
    })
}

/// Extract the user-facing error detail from a backend error body.
///
/// The backend reports errors as `{"detail": "..."}`. Anything else falls
/// back to a truncated slice of the raw body, or a generic message when
/// the body is empty.
fn error_detail(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: String,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        return parsed.detail;
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "request failed".to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}
