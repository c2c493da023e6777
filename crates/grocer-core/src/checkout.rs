//! # Checkout Draft
//!
//! What the customer fills in on the checkout screen before placing an
//! order: delivery city, delivery notes and the payment label.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  Deliver to:  Pune                           │
//! │  Notes:       [x] Avoid ringing bell         │
//! │               [x] Record and hold            │
//! │  Pay with:    Google Pay UPI                 │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The draft never talks to the network; `grocer-checkout` turns a draft and
//! a cart into an order request.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::types::DeliveryInstruction;
use crate::validation::{validate_city, validate_payment_method, ValidationResult};
use crate::DEFAULT_PAYMENT_METHOD;

/// Checkout form state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutDraft {
    /// Delivery city. Empty until the customer enters one.
    pub city: String,

    /// Selected delivery notes, in the order they were ticked.
    instructions: Vec<DeliveryInstruction>,

    /// Payment method label.
    pub payment_method: String,
}

impl Default for CheckoutDraft {
    fn default() -> Self {
        CheckoutDraft::new(DEFAULT_PAYMENT_METHOD)
    }
}

impl CheckoutDraft {
    /// Creates a draft with no city and no notes.
    pub fn new(payment_method: &str) -> Self {
        CheckoutDraft {
            city: String::new(),
            instructions: Vec::new(),
            payment_method: payment_method.to_string(),
        }
    }

    /// Ticks or unticks a delivery note. Returns whether it is now selected.
    pub fn toggle_instruction(&mut self, instruction: DeliveryInstruction) -> bool {
        if let Some(pos) = self.instructions.iter().position(|i| *i == instruction) {
            self.instructions.remove(pos);
            false
        } else {
            self.instructions.push(instruction);
            true
        }
    }

    pub fn instructions(&self) -> &[DeliveryInstruction] {
        &self.instructions
    }

    pub fn has_instruction(&self, instruction: DeliveryInstruction) -> bool {
        self.instructions.contains(&instruction)
    }

    /// Sets the delivery city (trimmed).
    pub fn set_city(&mut self, city: &str) -> ValidationResult<()> {
        self.city = validate_city(city)?;
        Ok(())
    }

    /// Sets the payment label (trimmed).
    pub fn set_payment_method(&mut self, label: &str) -> ValidationResult<()> {
        self.payment_method = validate_payment_method(label)?;
        Ok(())
    }

    /// Checks that an order can be placed for `cart` with this draft.
    ///
    /// ## Errors
    /// - `CoreError::EmptyCart` if the cart has no lines
    /// - `CoreError::Validation` if the city or payment label is missing
    pub fn ensure_ready(&self, cart: &Cart) -> CoreResult<()> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        validate_city(&self.city)?;
        validate_payment_method(&self.payment_method)?;
        Ok(())
    }

    /// Clears city and notes after an order goes through. The payment label
    /// is kept for the next order.
    pub fn reset(&mut self) {
        self.city.clear();
        self.instructions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_instruction() {
        let mut draft = CheckoutDraft::default();

        assert!(draft.toggle_instruction(DeliveryInstruction::NoBell));
        assert!(draft.toggle_instruction(DeliveryInstruction::RecordAndHold));
        assert_eq!(
            draft.instructions(),
            &[DeliveryInstruction::NoBell, DeliveryInstruction::RecordAndHold]
        );

        assert!(!draft.toggle_instruction(DeliveryInstruction::NoBell));
        assert!(!draft.has_instruction(DeliveryInstruction::NoBell));
        assert_eq!(draft.instructions(), &[DeliveryInstruction::RecordAndHold]);
    }

    #[test]
    fn test_default_payment_method() {
        assert_eq!(CheckoutDraft::default().payment_method, "Google Pay UPI");
    }

    #[test]
    fn test_ensure_ready() {
        let mut draft = CheckoutDraft::default();
        let mut cart = Cart::new();

        assert!(matches!(draft.ensure_ready(&cart), Err(CoreError::EmptyCart)));

        cart.add("1");
        assert!(matches!(
            draft.ensure_ready(&cart),
            Err(CoreError::Validation(_))
        ));

        draft.set_city("  Pune ").unwrap();
        assert_eq!(draft.city, "Pune");
        assert!(draft.ensure_ready(&cart).is_ok());
    }

    #[test]
    fn test_set_city_rejects_blank() {
        let mut draft = CheckoutDraft::default();
        draft.set_city("Pune").unwrap();
        assert!(draft.set_city("   ").is_err());
        // Failed update leaves the old value
        assert_eq!(draft.city, "Pune");
    }

    #[test]
    fn test_reset_keeps_payment_method() {
        let mut draft = CheckoutDraft::new("Cash");
        draft.set_city("Pune").unwrap();
        draft.toggle_instruction(DeliveryInstruction::Other);

        draft.reset();
        assert!(draft.city.is_empty());
        assert!(draft.instructions().is_empty());
        assert_eq!(draft.payment_method, "Cash");
    }
}
