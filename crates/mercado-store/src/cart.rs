//! # Cart Store
//!
//! Owns the shopping cart and publishes a snapshot after every mutation.
//!
//! ## Thread Safety
//! The cart is wrapped in a `Mutex` because:
//! 1. Multiple action handlers may access/modify the cart
//! 2. Only one handler should modify the cart at a time
//! 3. None of the find-then-replace sequences inside `Cart` are atomic
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  UI Action                Store Method             Cart Change          │
//! │  ───────────              ─────────────            ─────────────        │
//! │                                                                         │
//! │  Tap Product ───────────► add_to_cart() ─────────► qty += 1 or push    │
//! │                                                                         │
//! │  Change Quantity ───────► update_quantity() ─────► qty = n (≤0 drops)  │
//! │                                                                         │
//! │  Tap Remove ────────────► remove_from_cart() ────► retain(≠ id)        │
//! │                                                                         │
//! │  Tap Clear ─────────────► clear_cart() ──────────► items.clear()       │
//! │                                                                         │
//! │  Every mutation ends with a snapshot pushed into the watch channel;    │
//! │  the UI re-renders from the latest published value.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Mutex;

use tokio::sync::watch;
use tracing::debug;

use mercado_core::{Cart, CartTotals, Money, Product};

/// The cart store.
///
/// ## Usage
/// Construct once, share by reference (or `Arc`) with every consumer:
///
/// ```rust,ignore
/// let cart = CartStore::new();
/// cart.add_to_cart(&product);
/// assert_eq!(cart.cart_item_count(), 1);
///
/// let mut updates = cart.subscribe();
/// // ... updates.changed().await fires on the next mutation
/// ```
///
/// ## Why Not RwLock?
/// Cart operations are quick and most of them write. A `RwLock` would add
/// complexity with minimal benefit.
#[derive(Debug)]
pub struct CartStore {
    cart: Mutex<Cart>,
    tx: watch::Sender<Cart>,
}

impl CartStore {
    /// Creates a new store with an empty cart.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Cart::new());
        CartStore {
            cart: Mutex::new(Cart::new()),
            tx,
        }
    }

    /// Subscribes to cart snapshots.
    ///
    /// The receiver always holds the latest published cart; `changed()`
    /// resolves after the next mutation.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.tx.subscribe()
    }

    /// Returns a copy of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.with_cart(|c| c.clone())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a product to the cart, or bumps its quantity when already there.
    pub fn add_to_cart(&self, product: &Product) {
        debug!(product_id = product.id, "add_to_cart");
        self.with_cart_mut(|c| c.add_to_cart(product));
    }

    /// Removes a line by product id; no-op when absent.
    pub fn remove_from_cart(&self, product_id: i64) {
        debug!(product_id, "remove_from_cart");
        self.with_cart_mut(|c| c.remove_from_cart(product_id));
    }

    /// Sets a line's quantity; `<= 0` removes the line, absent lines are
    /// left alone.
    pub fn update_quantity(&self, product_id: i64, quantity: i64) {
        debug!(product_id, quantity, "update_quantity");
        self.with_cart_mut(|c| c.update_quantity(product_id, quantity));
    }

    /// Empties the cart unconditionally.
    pub fn clear_cart(&self) {
        debug!("clear_cart");
        self.with_cart_mut(|c| c.clear());
    }

    // =========================================================================
    // Derived Reads
    // =========================================================================

    /// Σ price × quantity over the current lines.
    pub fn cart_total(&self) -> Money {
        self.with_cart(|c| c.cart_total())
    }

    /// Σ quantity over the current lines (the cart badge number).
    pub fn cart_item_count(&self) -> i64 {
        self.with_cart(|c| c.cart_item_count())
    }

    /// Totals summary of the current cart.
    pub fn totals(&self) -> CartTotals {
        self.with_cart(|c| CartTotals::from(c))
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Executes a function with read access to the cart.
    fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart, then publishes
    /// the new snapshot.
    fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        let result = f(&mut cart);
        self.tx.send_replace(cart.clone());
        result
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
