//! # Error Types
//!
//! Domain-specific error types for mercado-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mercado-core errors (this file)                                       │
//! │  └── AuthError        - Login/registration failures                    │
//! │                                                                         │
//! │  mercado-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  mercado-store errors (separate crate)                                 │
//! │  └── StoreError       - What store consumers see                       │
//! │                                                                         │
//! │  Flow: AuthError → StoreError → UI shell                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Display strings double as the user-visible inline messages
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Auth Error
// =============================================================================

/// Authentication and registration failures.
///
/// Every variant is recoverable at the call site: the form that raised it
/// stays editable and the session state machine records the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Login credentials do not match any user.
    ///
    /// ## When This Occurs
    /// - Unknown email
    /// - Wrong password for a known email
    ///
    /// The message deliberately does not distinguish the two cases, so the
    /// login form cannot be used to enumerate accounts.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration with an email that is already taken.
    #[error("user already exists")]
    DuplicateEmail,

    /// Registration with an empty name, email, or password.
    ///
    /// One combined message for all three fields, matching the single inline
    /// message the registration form shows.
    #[error("fill all fields")]
    MissingFields,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with AuthError.
pub type AuthResult<T> = Result<T, AuthError>;

// =============================================================================
// Unit Tests
// =============================================================================
