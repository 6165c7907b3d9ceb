//! # Domain Types
//!
//! Core domain types used throughout Mercado.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │     Product     │   │    CartItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  product_id(FK) │       │
//! │  │  email (key)    │   │  name           │   │  name snapshot  │       │
//! │  │  password       │   │  price_cents    │   │  price snapshot │       │
//! │  │  is_admin       │   │  category/stock │   │  quantity ≥ 1   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │   AuthStatus    │   Idle → Loading → {Success, Error}               │
//! │  │  ─────────────  │   back to Idle only via reset_state()/logout()    │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Entity ids are plain integers assigned as `max(existing) + 1` by the
//! owning collection, so they are strictly increasing within one store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// User
// =============================================================================

/// An account that can log in to the application.
///
/// ## Password Storage
/// `password` is plain text and login compares it verbatim. This reproduces
/// the demo system's behavior; swap in salted-hash verification before any
/// real deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    /// Unique identifier, assigned monotonically at creation.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Login email - the uniqueness key for registration.
    pub email: String,

    /// Login password (plain text, see above).
    pub password: String,

    /// Whether this account may manage other accounts.
    pub is_admin: bool,

    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
///
/// Catalog entries are reference data for the cart: adding one to the cart
/// snapshots its name and price, so later catalog edits never rewrite an
/// open cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier.
    pub id: i64,

    /// Display name shown in the catalog and on cart lines.
    pub name: String,

    /// Longer description for the product detail view.
    pub description: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Image location for the catalog tile.
    pub image_url: String,

    /// Free-form category label ("Audio", "Wearables", ...).
    pub category: String,

    /// Units available. Informational in this core; the cart does not
    /// reserve stock.
    pub stock: i64,

    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line item in the shopping cart.
/// Uses the snapshot pattern to freeze product data at the time of adding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product this line refers to; unique within one cart.
    pub product_id: i64,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Price in cents at time of adding (frozen).
    /// This is critical: we lock in the price when the item enters the cart.
    pub price_cents: i64,

    /// Image location at time of adding (frozen).
    pub image_url: String,

    /// Quantity in cart; always >= 1. A line whose quantity would drop to
    /// zero is removed instead.
    pub quantity: i64,
}

impl CartItem {
    /// Creates a new cart line from a product.
    ///
    /// ## Price Freezing
    /// The price is captured at this moment. If the product price changes in
    /// the catalog, this cart line retains the original price.
    pub fn from_product(product: &Product) -> Self {
        CartItem {
            product_id: product.id,
            name: product.name.clone(),
            price_cents: product.price_cents,
            image_url: product.image_url.clone(),
            quantity: 1,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Auth Status
// =============================================================================

/// The authentication state machine published to the UI shell.
///
/// ## Transitions
/// ```text
/// Idle ──login/register──► Loading ──► Success
///                                 └──► Error(message)
///
/// Success/Error ──reset_state() or logout()──► Idle   (never automatic)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "message")]
pub enum AuthStatus {
    /// No login or registration in flight.
    Idle,
    /// A login or registration has been dispatched.
    Loading,
    /// The last login or registration succeeded.
    Success,
    /// The last login or registration failed; the message is shown inline.
    Error(String),
}

impl AuthStatus {
    /// Checks if a login/registration is currently in flight.
    ///
    /// Callers must gate their submit actions on this: the store does not
    /// serialize overlapping login calls itself.
    #[inline]
    pub fn is_loading(&self) -> bool {
        matches!(self, AuthStatus::Loading)
    }

    /// Returns the error message, if in the error state.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            AuthStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl Default for AuthStatus {
    fn default() -> Self {
        AuthStatus::Idle
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price_cents: i64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            description: String::new(),
            price_cents,
            image_url: String::new(),
            category: "Test".to_string(),
            stock: 10,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_cart_item_snapshots_product() {
        let p = product(5, 19999);
        let item = CartItem::from_product(&p);

        assert_eq!(item.product_id, 5);
        assert_eq!(item.price_cents, 19999);
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_cart_item_line_total() {
        let p = product(1, 299);
        let mut item = CartItem::from_product(&p);
        item.quantity = 3;

        assert_eq!(item.line_total().cents(), 897);
    }

    #[test]
    fn test_auth_status_default() {
        assert_eq!(AuthStatus::default(), AuthStatus::Idle);
        assert!(!AuthStatus::default().is_loading());
    }

    #[test]
    fn test_auth_status_error_message() {
        let status = AuthStatus::Error("invalid credentials".to_string());
        assert_eq!(status.error_message(), Some("invalid credentials"));
        assert_eq!(AuthStatus::Success.error_message(), None);
    }
}
