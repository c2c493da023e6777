//! # Checkout State
//!
//! The checkout draft being filled in, and the client that submits it.

use std::sync::{Arc, Mutex};

use grocer_checkout::OrderClient;
use grocer_core::CheckoutDraft;

#[derive(Debug, Clone)]
pub struct CheckoutState {
    draft: Arc<Mutex<CheckoutDraft>>,
    client: OrderClient,
}

impl CheckoutState {
    /// Starts an empty draft with the configured payment label.
    pub fn new(client: OrderClient, default_payment_method: &str) -> Self {
        CheckoutState {
            draft: Arc::new(Mutex::new(CheckoutDraft::new(default_payment_method))),
            client,
        }
    }

    /// Executes a function with read access to the draft.
    pub fn with_draft<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CheckoutDraft) -> R,
    {
        let draft = self.draft.lock().expect("Checkout mutex poisoned");
        f(&draft)
    }

    /// Executes a function with write access to the draft.
    pub fn with_draft_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CheckoutDraft) -> R,
    {
        let mut draft = self.draft.lock().expect("Checkout mutex poisoned");
        f(&mut draft)
    }

    pub fn client(&self) -> &OrderClient {
        &self.client
    }
}
