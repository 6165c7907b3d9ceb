//! # Repository Module
//!
//! Database repository implementations for Mercado.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  UserStore                                                             │
//! │       │                                                                 │
//! │       │  db.users().find_by_credentials(email, password)               │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  UserRepository                                                        │
//! │  ├── list(&self)                                                       │
//! │  ├── find_by_email(&self, email)                                       │
//! │  ├── find_by_credentials(&self, email, password)                       │
//! │  ├── insert(&self, user)                                               │
//! │  ├── update(&self, user)                                               │
//! │  └── delete_by_id(&self, id)                                           │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • Easy to test (in-memory SQLite)                                     │
//! │  • SQL is isolated in one place                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`user::UserRepository`] - Account rows backing the user store
//! - [`product::ProductRepository`] - Catalog CRUD

pub mod product;
pub mod user;
