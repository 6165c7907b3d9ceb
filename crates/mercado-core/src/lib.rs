//! # mercado-core: Pure Domain Logic for Mercado
//!
//! This crate is the **heart** of Mercado. It contains the session and cart
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Mercado Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      UI Shell (external)                        │   │
//! │  │    Login ──► Catalog ──► Cart ──► Admin user management        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ store snapshots / actions              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 mercado-store (stores + pub/sub)                │   │
//! │  │    UserStore, CartStore, watch-channel snapshots               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ mercado-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  session  │  │   │
//! │  │   │   User    │  │   Money   │  │   Cart    │  │  login /  │  │   │
//! │  │   │  Product  │  │  (cents)  │  │ CartItem  │  │  register │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  mercado-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Product, CartItem, AuthStatus)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Shopping cart collection and derived totals
//! - [`session`] - User collection and authentication state machine
//! - [`error`] - Domain error types
//! - [`validation`] - Registration input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every operation is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use mercado_core::Money` instead of
// `use mercado_core::money::Money`

pub use cart::{Cart, CartTotals};
pub use error::AuthError;
pub use money::Money;
pub use session::SessionState;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Email of the seed administrator account.
///
/// ## Why a constant?
/// Every fresh installation is guaranteed exactly one administrator with this
/// email. The store layer seeds it idempotently on startup, keyed by email,
/// so restarting never creates duplicates.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@admin.com";

/// Display name of the seed administrator account.
pub const DEFAULT_ADMIN_NAME: &str = "Administrator";

/// Password of the seed administrator account.
///
/// Plain text, like every password in this system. The scheme reproduces the
/// demo application it models and must not be used for a real deployment.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
