//! # Order Protocol
//!
//! JSON shapes exchanged with the order endpoint.
//!
//! ## Request / Response
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST {endpoint}                                                        │
//! │  X-Request-Id: <uuid v4>                                                │
//! │                                                                         │
//! │  {                                                                      │
//! │    "items": [{ "id": "1", "name": "Wheat", "quantityLabel": "1 kg",     │
//! │                "price": 10000, "quantity": 2, "image": "https://..." }],│
//! │    "deliveryInfo": { "city": "Pune", "instructions": ["no-bell"] },     │
//! │    "paymentMethod": "Google Pay UPI",                                   │
//! │    "total": 27200,                                                      │
//! │    "placedAt": "2024-05-01T10:00:00Z"                                   │
//! │  }                                                                      │
//! │                                                                         │
//! │  ◄── 2xx { "success": true,  "order": { ... } }     → Placed            │
//! │  ◄── 2xx { "success": false, "message": "..." }     → Rejected          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts are integer paise, the same encoding `Money` uses everywhere else.

use chrono::{DateTime, Utc};
use grocer_core::catalog::Catalog;
use grocer_core::{Bill, Cart, CheckoutDraft, CoreError, CoreResult, DeliveryInstruction, Money};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Request
// =============================================================================

/// One cart line with the product fields denormalized into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub name: String,
    pub quantity_label: String,
    pub price: Money,
    pub quantity: u32,
    pub image: String,
}

/// Where and how to deliver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryInfo {
    pub city: String,
    pub instructions: Vec<DeliveryInstruction>,
}

/// The body of an order POST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub items: Vec<OrderItem>,
    pub delivery_info: DeliveryInfo,
    pub payment_method: String,
    pub total: Money,
    pub placed_at: DateTime<Utc>,
}

impl OrderRequest {
    /// Snapshots the cart, draft and bill into a request.
    ///
    /// ## Errors
    /// - `CoreError::EmptyCart` / `CoreError::Validation` from
    ///   [`CheckoutDraft::ensure_ready`]
    /// - `CoreError::ProductNotFound` if a cart line has no catalog entry;
    ///   an order must never ship a line nobody can price
    pub fn build(
        cart: &Cart,
        catalog: &impl Catalog,
        draft: &CheckoutDraft,
        bill: &Bill,
    ) -> CoreResult<Self> {
        draft.ensure_ready(cart)?;

        let items = cart
            .lines()
            .iter()
            .map(|line| {
                let product = catalog
                    .get(&line.product_id)
                    .ok_or_else(|| CoreError::ProductNotFound(line.product_id.clone()))?;
                Ok(OrderItem {
                    id: product.id.clone(),
                    name: product.name.clone(),
                    quantity_label: product.quantity_label.clone(),
                    price: product.price,
                    quantity: line.quantity,
                    image: product.image.clone(),
                })
            })
            .collect::<CoreResult<Vec<_>>>()?;

        Ok(OrderRequest {
            items,
            delivery_info: DeliveryInfo {
                city: draft.city.clone(),
                instructions: draft.instructions().to_vec(),
            },
            payment_method: draft.payment_method.clone(),
            total: bill.grand_total,
            placed_at: Utc::now(),
        })
    }

    /// Total units across all items.
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }
}

// =============================================================================
// Response
// =============================================================================

/// What the endpoint answers. `success` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// How a submitted order ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum OrderOutcome {
    /// Accepted. `order` is whatever the endpoint sent back.
    Placed { order: Option<Value> },
    /// Refused by the endpoint with a reason for the customer.
    Rejected { message: String },
}

impl From<OrderResponse> for OrderOutcome {
    fn from(response: OrderResponse) -> Self {
        if response.success {
            OrderOutcome::Placed {
                order: response.order,
            }
        } else {
            OrderOutcome::Rejected {
                message: response
                    .message
                    .unwrap_or_else(|| "Order was not accepted".to_string()),
            }
        }
    }
}

impl OrderOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, OrderOutcome::Placed { .. })
    }
}
