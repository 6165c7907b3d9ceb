//! # Store Error Types
//!
//! What store consumers see when an operation fails.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  AuthError (mercado-core)  ──┐                                         │
//! │                              ├──► StoreError (this module) ──► UI      │
//! │  DbError (mercado-db)      ──┘                                         │
//! │                                                                         │
//! │  Auth failures also land on the published AuthStatus, so a UI that    │
//! │  only watches snapshots never needs to match on this type.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use mercado_core::AuthError;
use mercado_db::DbError;

/// Errors surfaced by store operations.
///
/// None of these are fatal: every variant is recoverable at the point of
/// the single operation that raised it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A login or registration was rejected.
    ///
    /// The same failure is recorded on the published session snapshot as
    /// `AuthStatus::Error(message)`.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The durable backing failed.
    ///
    /// The in-memory state stays authoritative; the caller may retry.
    #[error(transparent)]
    Db(#[from] DbError),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_message_passes_through() {
        let err = StoreError::from(AuthError::InvalidCredentials);
        assert_eq!(err.to_string(), "invalid credentials");
    }
}
