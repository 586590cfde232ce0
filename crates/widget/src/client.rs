//! HTTP client for the sales backend.
//!
//! Two endpoints are consumed:
//! - `GET /api/ai/recommendations/{product_id}` - "bought together"
//!   suggestions; advisory, failures are swallowed by the caller
//! - `POST /create_sale` - checkout; the response carries either an invoice
//!   or an application-level error message
//!
//! `GET /receipt/{sale_id}` is never fetched by the widget; its URL is built
//! here and handed to the view to open as an opaque document.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tillpoint_core::{PaymentMode, ProductId};
use tracing::instrument;

use crate::config::WidgetConfig;
use crate::store::CartLine;

/// Errors that can occur when talking to the sales backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport-level failure (connection, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The backend processed the checkout and declined it
    /// (`success: false`); the message is meant for the operator verbatim.
    #[error("sale rejected: {0}")]
    Rejected(String),

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),
}

/// A suggested complementary product. The backend sends more fields
/// (price, stock, co-purchase frequency); only the identity matters here
/// because accepted suggestions are re-looked-up in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Suggestion {
    pub id: ProductId,
    pub name: String,
}

/// Checkout request body for `POST /create_sale`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleRequest {
    pub items: Vec<CartLine>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub payment_mode: PaymentMode,
}

/// Sale identifier as the backend reports it: some deployments send a
/// number, some a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SaleId {
    Number(i64),
    Text(String),
}

impl core::fmt::Display for SaleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A recorded sale: what the success branch of `/create_sale` yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleReceipt {
    pub invoice: String,
    pub sale_id: SaleId,
}

/// Raw `/create_sale` response envelope.
#[derive(Debug, Deserialize)]
struct SaleResponse {
    success: bool,
    #[serde(default)]
    invoice: Option<String>,
    #[serde(default)]
    sale_id: Option<SaleId>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for the sales backend.
#[derive(Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &WidgetConfig) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch "bought together" suggestions for a product.
    ///
    /// An empty list is a normal answer, not an error.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body is not a suggestion
    /// array.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn recommendations(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<Suggestion>, BackendError> {
        let url = format!("{}/api/ai/recommendations/{product_id}", self.base_url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }

    /// Submit a checkout.
    ///
    /// # Errors
    ///
    /// - [`BackendError::Rejected`] when the backend declines the sale; the
    ///   message is surfaced to the operator verbatim
    /// - [`BackendError::Http`] / [`BackendError::Api`] /
    ///   [`BackendError::Parse`] for transport-level failures
    #[instrument(skip(self, sale), fields(items = sale.items.len(), mode = %sale.payment_mode))]
    pub async fn create_sale(&self, sale: &SaleRequest) -> Result<SaleReceipt, BackendError> {
        let url = format!("{}/create_sale", self.base_url);

        let response = self.client.post(&url).json(sale).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: SaleResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))?;

        if !body.success {
            return Err(BackendError::Rejected(body.error.unwrap_or_else(|| {
                "sale was not recorded".to_string()
            })));
        }

        let invoice = body
            .invoice
            .ok_or_else(|| BackendError::Parse("success response without invoice".to_string()))?;
        let sale_id = body
            .sale_id
            .ok_or_else(|| BackendError::Parse("success response without sale_id".to_string()))?;

        Ok(SaleReceipt { invoice, sale_id })
    }

    /// URL of the receipt view for a completed sale. Opened by the host UI;
    /// the widget treats it as opaque.
    #[must_use]
    pub fn receipt_url(&self, sale_id: &SaleId) -> String {
        format!("{}/receipt/{sale_id}", self.base_url)
    }
}
