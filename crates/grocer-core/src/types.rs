//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐          ┌──────────────────────────┐        │
//! │  │       Product        │          │   DeliveryInstruction    │        │
//! │  │  ──────────────────  │          │  ──────────────────────  │        │
//! │  │  id ("1".."20")      │          │  record                  │        │
//! │  │  name, quantity_label│          │  avoid-bell              │        │
//! │  │  price (Money)       │          │  no-bell                 │        │
//! │  │  original_price?     │          │  other                   │        │
//! │  │  tag?, discount?     │          └──────────────────────────┘        │
//! │  └──────────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Optional product attributes (`tag`, `discount`, `original_price`) are plain
//! `Option` fields; a product either carries them or it doesn't.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Catalog identifier. Opaque to the cart.
    pub id: String,

    /// Display name, also the search target.
    pub name: String,

    /// Pack size shown under the name ("1 kg", "10 bars").
    pub quantity_label: String,

    /// Selling price.
    pub price: Money,

    /// MRP before discount, if the product is discounted.
    pub original_price: Option<Money>,

    /// Image URL.
    pub image: String,

    /// Average rating, 0.0 - 5.0.
    pub rating: f32,

    /// Number of reviews behind `rating`.
    pub reviews: u32,

    /// Delivery estimate label ("30 mins").
    pub delivery_time: String,

    /// Badge such as "Fresh" or "Personal Care".
    pub tag: Option<String>,

    /// Discount badge such as "10%".
    pub discount: Option<String>,

    /// Whether the product starts out favorited.
    pub is_favorite: bool,
}

impl Product {
    /// MRP shown on the bill: `original_price` when discounted, else `price`.
    #[inline]
    pub fn mrp(&self) -> Money {
        self.original_price.unwrap_or(self.price)
    }

    /// How much cheaper than MRP, if discounted.
    pub fn savings(&self) -> Option<Money> {
        self.original_price
            .map(|mrp| mrp - self.price)
            .filter(|saved| saved.is_positive())
    }
}

// =============================================================================
// Delivery Instruction
// =============================================================================

/// A delivery note the customer can toggle on the checkout screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum DeliveryInstruction {
    /// Record a voice note and hold.
    #[serde(rename = "record")]
    RecordAndHold,
    /// Avoid ringing the bell.
    AvoidBell,
    /// Don't ring the bell at all.
    NoBell,
    /// Anything else (free-form, handled by the rider).
    Other,
}

impl DeliveryInstruction {
    /// All instructions in display order.
    pub const ALL: [DeliveryInstruction; 4] = [
        DeliveryInstruction::RecordAndHold,
        DeliveryInstruction::AvoidBell,
        DeliveryInstruction::NoBell,
        DeliveryInstruction::Other,
    ];

    /// Wire tag, as sent in the order payload.
    pub const fn tag(&self) -> &'static str {
        match self {
            DeliveryInstruction::RecordAndHold => "record",
            DeliveryInstruction::AvoidBell => "avoid-bell",
            DeliveryInstruction::NoBell => "no-bell",
            DeliveryInstruction::Other => "other",
        }
    }

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            DeliveryInstruction::RecordAndHold => "Record and hold",
            DeliveryInstruction::AvoidBell => "Avoid ringing bell",
            DeliveryInstruction::NoBell => "Don't ring the bell",
            DeliveryInstruction::Other => "Other",
        }
    }
}

impl fmt::Display for DeliveryInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DeliveryInstruction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        DeliveryInstruction::ALL
            .into_iter()
            .find(|i| i.tag() == wanted)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "instruction".to_string(),
                allowed: DeliveryInstruction::ALL
                    .iter()
                    .map(|i| i.tag().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
