//! # Cart State
//!
//! Owns the session cart and tells observers about every change.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Every cart command goes through the same store
//! 2. Only one command should modify the cart at a time
//! 3. Order submission runs on the async runtime alongside the shell
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Command                  CartState              Observers              │
//! │  ───────                  ─────────              ─────────              │
//! │                                                                         │
//! │  add_to_cart() ─────────► dispatch(Add) ───┐                            │
//! │  decrement_quantity() ──► dispatch(Dec) ───┤                            │
//! │  clear_cart() ──────────► dispatch(Clear) ─┼──► watch::Sender ──► view  │
//! │  hide_view_cart() ──────► dispatch(Hide) ──┘    <CartSnapshot>    cart  │
//! │                                                                  bubble │
//! │  get_cart() ────────────► with_cart(read) (no publish)                  │
//! │                                                                         │
//! │  NOTE: dispatch() holds the lock for one synchronous operation and      │
//! │        publishes the snapshot before releasing it, so observers see     │
//! │        changes in dispatch order.                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use grocer_core::{Cart, CartAction, CartOutcome, CartSnapshot};
use tokio::sync::watch;
use tracing::debug;

/// Session cart handle.
///
/// Cloning shares the same cart and the same update channel.
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
    updates: Arc<watch::Sender<CartSnapshot>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        let (updates, _) = watch::channel(CartSnapshot::default());
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
            updates: Arc::new(updates),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = cart_state.with_cart(|cart| cart.total_item_count());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Applies one action and publishes the resulting snapshot.
    ///
    /// Ignored actions (decrementing a product that is not in the cart, ...)
    /// are logged and not published.
    pub fn dispatch(&self, action: CartAction) -> CartOutcome {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        let description = format!("{:?}", action);
        let outcome = cart.dispatch(action);

        match outcome {
            CartOutcome::Applied => {
                debug!(action = %description, items = cart.total_item_count(), "Cart updated");
                self.updates.send_replace(cart.snapshot());
            }
            CartOutcome::Ignored => {
                debug!(action = %description, "Cart action ignored");
            }
        }
        outcome
    }

    /// Current snapshot, without waiting for a change.
    pub fn snapshot(&self) -> CartSnapshot {
        self.with_cart(Cart::snapshot)
    }

    /// Subscribes to snapshots published after each applied action.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.updates.subscribe()
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}
