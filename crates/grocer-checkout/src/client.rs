//! # Order Client
//!
//! Sends one order to the configured endpoint.
//!
//! ## Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Submission                                  │
//! │                                                                         │
//! │  OrderRequest ──► serialize ──► POST endpoint ──► status?               │
//! │                      │              │               │                   │
//! │                      ▼              ▼               ├─ non-2xx ──► HttpStatus
//! │            SerializationFailed   Network /          │                   │
//! │                                  Timeout            ▼                   │
//! │                                            parse OrderResponse          │
//! │                                                     │                   │
//! │                                   ┌─────────────────┼──────────────┐    │
//! │                                   ▼                 ▼              ▼    │
//! │                          DeserializationFailed   Placed        Rejected │
//! │                                                                         │
//! │  Exactly one attempt. No retry, no idempotency key, no polling.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use crate::config::OrderSettings;
use crate::error::{CheckoutError, CheckoutResult};
use crate::protocol::{OrderOutcome, OrderRequest, OrderResponse};

/// Header carrying a per-attempt id, for correlating logs on both sides.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Longest response body kept in an `HttpStatus` error.
const MAX_ERROR_BODY_LEN: usize = 512;

/// HTTP client for the order endpoint.
#[derive(Debug, Clone)]
pub struct OrderClient {
    http: reqwest::Client,
    endpoint: Url,
    timeout: Duration,
}

impl OrderClient {
    /// Builds a client from the `[order]` settings.
    ///
    /// ## Errors
    /// - `CheckoutError::InvalidUrl` for a malformed or non-http(s) endpoint
    /// - `CheckoutError::InvalidConfig` for a zero timeout
    pub fn new(settings: &OrderSettings) -> CheckoutResult<Self> {
        let endpoint = settings.endpoint_url()?;
        let timeout = settings.request_timeout();
        if timeout.is_zero() {
            return Err(CheckoutError::InvalidConfig(
                "order.request_timeout_secs must be greater than 0".into(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        Ok(OrderClient {
            http,
            endpoint,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Submits one order and waits for the answer.
    ///
    /// `success: false` from the endpoint is `Ok(OrderOutcome::Rejected)`,
    /// not an error.
    pub async fn submit(&self, request: &OrderRequest) -> CheckoutResult<OrderOutcome> {
        let request_id = Uuid::new_v4();
        info!(
            %request_id,
            endpoint = %self.endpoint,
            items = request.items.len(),
            total = %request.total,
            "Submitting order"
        );

        let response = match tokio::time::timeout(self.timeout, self.post(request, request_id)).await
        {
            Ok(result) => result?,
            Err(_) => {
                warn!(%request_id, timeout_secs = self.timeout.as_secs(), "Order request timed out");
                return Err(CheckoutError::Timeout(self.timeout.as_secs()));
            }
        };

        let outcome = OrderOutcome::from(response);
        match &outcome {
            OrderOutcome::Placed { .. } => info!(%request_id, "Order placed"),
            OrderOutcome::Rejected { message } => {
                warn!(%request_id, message = %message, "Order rejected")
            }
        }
        Ok(outcome)
    }

    async fn post(&self, request: &OrderRequest, request_id: Uuid) -> CheckoutResult<OrderResponse> {
        let body = serde_json::to_vec(request)
            .map_err(|e| CheckoutError::SerializationFailed(e.to_string()))?;

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .body(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;
        debug!(%request_id, status = status.as_u16(), bytes = text.len(), "Order response received");

        if !status.is_success() {
            return Err(CheckoutError::HttpStatus {
                status: status.as_u16(),
                body: truncate(&text, MAX_ERROR_BODY_LEN),
            });
        }

        serde_json::from_str(&text).map_err(|e| CheckoutError::DeserializationFailed(e.to_string()))
    }

    fn transport_error(&self, err: reqwest::Error) -> CheckoutError {
        if err.is_timeout() {
            CheckoutError::Timeout(self.timeout.as_secs())
        } else {
            CheckoutError::Network(err.to_string())
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
