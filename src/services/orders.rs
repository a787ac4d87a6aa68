//! HTTP client for the hosted order store.
//!
//! The store is a managed backend-as-a-service table: the only operation
//! this storefront uses is a single-row insert into the `orders` collection
//! (`POST {base}/rest/v1/orders`). The call either succeeds or surfaces a
//! typed error; there is no partial or streaming response and no client-side
//! retry. No request timeout is configured, so the transport default applies.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Url};
use thiserror::Error;

use crate::domain::aggregates::OrderRecord;

const ORDERS_PATH: &str = "rest/v1/orders";

/// Errors returned by the order store client.
#[derive(Debug, Error)]
pub enum OrderStoreError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("order store error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The client could not be constructed from the given settings.
    #[error("invalid order store configuration: {0}")]
    Config(String),
}

/// Client for the hosted order store.
///
/// Point `base_url` at the production project, or at a mock server in tests.
#[derive(Clone)]
pub struct OrderStoreClient {
    client: Client,
    endpoint: Url,
}

impl OrderStoreClient {
    /// Creates a client for the store at `base_url`, authenticating every
    /// request with the project API key.
    ///
    /// # Errors
    ///
    /// Returns [`OrderStoreError::Config`] for an unparseable URL or key,
    /// [`OrderStoreError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, OrderStoreError> {
        let key_value = HeaderValue::from_str(api_key)
            .map_err(|e| OrderStoreError::Config(format!("invalid API key: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| OrderStoreError::Config(format!("invalid API key: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", key_value);
        headers.insert(AUTHORIZATION, bearer);
        // single atomic insert; the row itself is not echoed back
        headers.insert("Prefer", HeaderValue::from_static("return=minimal"));

        let client = Client::builder().default_headers(headers).build()?;

        // Normalise the trailing slash so the join below lands on the root
        // path rather than replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(ORDERS_PATH))
            .map_err(|e| OrderStoreError::Config(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self { client, endpoint })
    }

    /// Inserts one order row. All-or-nothing from the caller's perspective:
    /// a non-2xx response yields [`OrderStoreError::Api`] and nothing has
    /// been recorded that needs undoing.
    pub async fn insert_order(&self, record: &OrderRecord) -> Result<(), OrderStoreError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(std::slice::from_ref(record))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OrderStoreError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}
