//! # mercado-store: Shared Application Stores
//!
//! Thread-safe stores over the pure state in `mercado-core`, with an
//! explicit publish/subscribe contract for the UI shell.
//!
//! ## Why Two Stores?
//! Each store has a single owner and a single responsibility:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐              ┌──────────────────┐                │
//! │  │    UserStore     │              │    CartStore     │                │
//! │  │                  │              │                  │                │
//! │  │  Mutex<Session   │              │  Mutex<Cart>     │                │
//! │  │        State>    │              │                  │                │
//! │  │  Option<Database>│              │  (memory only)   │                │
//! │  │  watch::Sender   │              │  watch::Sender   │                │
//! │  └────────┬─────────┘              └────────┬─────────┘                │
//! │           │ SessionSnapshot                 │ Cart snapshot            │
//! │           ▼                                 ▼                          │
//! │  subscribe() receivers - the UI re-renders from the latest value      │
//! │                                                                         │
//! │  OWNERSHIP:                                                            │
//! │  • UserStore exclusively owns the user collection + session            │
//! │  • CartStore exclusively owns the cart lines                           │
//! │  • No entity is mutated by two stores                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Publish/Subscribe Contract
//! Every mutation pushes a complete snapshot into a `tokio::sync::watch`
//! channel. Consumers either poll the current snapshot or await changes on
//! a receiver from `subscribe()` - there is no implicit framework magic.
//!
//! ## Construction
//! Stores are built explicitly and injected into consumers. The durable
//! variant takes a [`mercado_db::Database`] by value:
//!
//! ```rust,ignore
//! let db = Database::new(DbConfig::new("./mercado.db")).await?;
//! let users = UserStore::open(db).await?;   // loads accounts, seeds admin
//! let cart = CartStore::new();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use cart::CartStore;
pub use error::StoreError;
pub use session::{SessionSnapshot, UserStore};
