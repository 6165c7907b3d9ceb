//! # Cart
//!
//! The shopping cart collection and its derived totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action                Operation                Collection Change    │
//! │  ───────────              ─────────────            ─────────────────    │
//! │                                                                         │
//! │  Tap Product ───────────► add_to_cart() ─────────► qty += 1 or push    │
//! │                                                                         │
//! │  Change Quantity ───────► update_quantity() ─────► qty = n (≤0 drops)  │
//! │                                                                         │
//! │  Tap Remove ────────────► remove_from_cart() ────► retain(≠ id)        │
//! │                                                                         │
//! │  Tap Clear ─────────────► clear() ───────────────► items.clear()       │
//! │                                                                         │
//! │  Cart Badge ────────────► cart_item_count() ─────► (read only)         │
//! │                                                                         │
//! │  Every operation is total: there is no error case to surface.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{CartItem, Product};

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `product_id` (adding the same product increases
///   its quantity)
/// - Quantity is always >= 1 (updating to <= 0 removes the line)
/// - Totals are recomputed from the items on every read, never cached
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in the cart.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds a product to the cart or increases quantity if already present.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity += 1; the frozen name/price
    ///   snapshot is NOT refreshed from the product
    /// - Product not in cart: new line with quantity 1
    pub fn add_to_cart(&mut self, product: &Product) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            item.quantity += 1;
            return;
        }

        self.items.push(CartItem::from_product(product));
    }

    /// Removes a line from the cart by product ID; no-op when absent.
    pub fn remove_from_cart(&mut self, product_id: i64) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Updates the quantity of a line in the cart.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: behaves exactly like [`Cart::remove_from_cart`]
    /// - Line absent: no-op (an update never creates a line)
    pub fn update_quantity(&mut self, product_id: i64, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(product_id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = quantity;
        }
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Derived total price = Σ price × quantity.
    ///
    /// Recomputed from the current lines on every call; a stale cached total
    /// can never be observed.
    pub fn cart_total(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(), |acc, i| acc + i.line_total())
    }

    /// Derived item count = Σ quantity (the cart badge number).
    pub fn cart_item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Returns the number of distinct lines in the cart.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals summary for store snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct lines in the cart.
    pub line_count: usize,
    /// Σ quantity across all lines.
    pub item_count: i64,
    /// Σ price × quantity across all lines, in cents.
    pub total_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            item_count: cart.cart_item_count(),
            total_cents: cart.cart_total().cents(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_product(id: i64, price_cents: i64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            description: String::new(),
            image_url: format!("https://example.com/{}.jpg", id),
            category: "Test".to_string(),
            stock: 10,
            price_cents,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_to_cart() {
        let mut cart = Cart::new();
        let product = test_product(1, 999); // $9.99

        cart.add_to_cart(&product);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.cart_item_count(), 1);
        assert_eq!(cart.cart_total().cents(), 999);
    }

    #[test]
    fn test_add_same_product_twice_merges_lines() {
        let mut cart = Cart::new();
        let product = test_product(5, 19999); // $199.99

        cart.add_to_cart(&product);
        cart.add_to_cart(&product);

        // One line with quantity 2, never two lines
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.cart_total().cents(), 39998); // $399.98
    }

    #[test]
    fn test_snapshot_not_refreshed_on_repeat_add() {
        let mut cart = Cart::new();
        let mut product = test_product(1, 1000);

        cart.add_to_cart(&product);

        // Catalog price changes after the item is already in the cart
        product.price_cents = 2000;
        cart.add_to_cart(&product);

        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.items[0].price_cents, 1000);
        assert_eq!(cart.cart_total().cents(), 2000);
    }

    #[test]
    fn test_remove_from_cart() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product(1, 999));
        cart.add_to_cart(&test_product(2, 500));

        cart.remove_from_cart(1);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.items[0].product_id, 2);

        // Removing an absent product is a no-op
        cart.remove_from_cart(99);
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product(1, 250));

        cart.update_quantity(1, 4);
        assert_eq!(cart.items[0].quantity, 4);
        assert_eq!(cart.cart_total().cents(), 1000);

        // Updating an absent product never creates a line
        cart.update_quantity(42, 3);
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_update_quantity_zero_equals_remove() {
        let product = test_product(1, 999);

        let mut updated = Cart::new();
        updated.add_to_cart(&product);
        updated.update_quantity(1, 0);

        let mut removed = Cart::new();
        removed.add_to_cart(&product);
        removed.remove_from_cart(1);

        assert_eq!(updated, removed);
        assert!(updated.is_empty());
    }

    #[test]
    fn test_totals_recomputed_per_read() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product(1, 1000));
        cart.add_to_cart(&test_product(2, 250));
        cart.update_quantity(2, 2);

        assert_eq!(cart.cart_total().cents(), 1500);
        assert_eq!(cart.cart_item_count(), 3);

        cart.remove_from_cart(1);

        assert_eq!(cart.cart_total().cents(), 500);
        assert_eq!(cart.cart_item_count(), 2);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product(1, 999));
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.cart_total(), Money::zero());
        assert_eq!(cart.cart_item_count(), 0);
    }

    #[test]
    fn test_totals_summary() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product(1, 19999));
        cart.add_to_cart(&test_product(1, 19999));

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.line_count, 1);
        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_cents, 39998);
    }
}
