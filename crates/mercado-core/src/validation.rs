//! # Validation Module
//!
//! Input validation for registration.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI shell (external)                                          │
//! │  ├── Disables submit while fields are empty                            │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── One combined empty-field rule for register()                      │
//! │                                                                         │
//! │  Administrative add_user() deliberately skips this module: the admin   │
//! │  form mirrors the original system, which only validates registration.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{AuthError, AuthResult};

/// Validates the three registration fields.
///
/// ## Rules
/// - `name`, `email`, and `password` must all be non-empty
/// - One combined [`AuthError::MissingFields`] for any violation; the
///   registration form shows a single inline message
///
/// ## Example
/// ```rust
/// use mercado_core::validation::validate_registration;
///
/// assert!(validate_registration("Ana", "ana@example.com", "pw").is_ok());
/// assert!(validate_registration("", "ana@example.com", "pw").is_err());
/// ```
pub fn validate_registration(name: &str, email: &str, password: &str) -> AuthResult<()> {
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingFields);
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_registration() {
        assert!(validate_registration("Ana", "ana@example.com", "pw").is_ok());

        assert_eq!(
            validate_registration("", "ana@example.com", "pw"),
            Err(AuthError::MissingFields)
        );
        assert_eq!(
            validate_registration("Ana", "", "pw"),
            Err(AuthError::MissingFields)
        );
        assert_eq!(
            validate_registration("Ana", "ana@example.com", ""),
            Err(AuthError::MissingFields)
        );
    }
}
