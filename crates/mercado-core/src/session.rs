//! # Session State
//!
//! The user collection, the authenticated session, and the auth state
//! machine, as one owned value.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session State Ownership                              │
//! │                                                                         │
//! │  SessionState (this module)                                             │
//! │  ├── users: Vec<User>         ← the full account collection            │
//! │  ├── current_user: Option     ← at most one authenticated account      │
//! │  └── status: AuthStatus       ← Idle / Loading / Success / Error       │
//! │                                                                         │
//! │  Exactly one owner mutates this value. mercado-store wraps it in a     │
//! │  Mutex and publishes snapshots; nothing else ever holds it.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Id Assignment
//! New accounts get `max(existing ids) + 1` (or `1` on an empty collection),
//! so ids are strictly increasing for the lifetime of the collection even
//! after deletions.

use chrono::Utc;

use crate::error::{AuthError, AuthResult};
use crate::types::{AuthStatus, User};
use crate::validation::validate_registration;

// =============================================================================
// Session State
// =============================================================================

/// The user collection plus the authenticated session.
///
/// All operations are synchronous and infallible at the collection level;
/// login/registration failures are reported both as a typed [`AuthError`]
/// and as the recorded [`AuthStatus`] for the UI shell.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    users: Vec<User>,
    current_user: Option<User>,
    status: AuthStatus,
}

impl SessionState {
    /// Creates an empty session state with no accounts.
    pub fn new() -> Self {
        SessionState::default()
    }

    /// Creates a session state over an existing account collection.
    ///
    /// Used by the store layer after loading accounts from the database.
    pub fn with_users(users: Vec<User>) -> Self {
        SessionState {
            users,
            current_user: None,
            status: AuthStatus::Idle,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The full account collection.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// The authenticated account, or `None` when logged out.
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// The current auth state machine position.
    pub fn status(&self) -> &AuthStatus {
        &self.status
    }

    /// Direct account lookup; `None` when the id is absent.
    pub fn get_user_by_id(&self, id: i64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Lookup by email; `None` when no account holds it.
    pub fn get_user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    /// The id the next created account will receive.
    fn next_id(&self) -> i64 {
        self.users.iter().map(|u| u.id).max().unwrap_or(0) + 1
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Attempts to log in with the given credentials.
    ///
    /// ## Behavior
    /// - Sets status to `Loading`, then resolves in the same call
    /// - Exact, case-sensitive match on `(email, password)`; passwords are
    ///   compared as plain text (demo scheme, not deployable)
    /// - Match: `current_user` set, status `Success`
    /// - No match: `current_user` untouched, status
    ///   `Error("invalid credentials")` - the message never says whether the
    ///   email exists
    pub fn login(&mut self, email: &str, password: &str) -> AuthResult<User> {
        self.begin_auth();

        let user = self
            .users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .cloned();

        self.resolve_login(user)
    }

    /// Marks a login or registration as dispatched.
    ///
    /// The synchronous [`Self::login`]/[`Self::register`] paths do this
    /// internally. A store backed by a durable lookup calls it before
    /// dispatching, so the UI can disable its submit action while the call
    /// is in flight.
    pub fn begin_auth(&mut self) {
        self.status = AuthStatus::Loading;
    }

    /// Applies a resolved credential lookup to the session.
    ///
    /// `Some(user)` logs the account in; `None` records the
    /// "invalid credentials" failure without touching `current_user`.
    pub fn resolve_login(&mut self, user: Option<User>) -> AuthResult<User> {
        match user {
            Some(user) => {
                self.current_user = Some(user.clone());
                self.status = AuthStatus::Success;
                Ok(user)
            }
            None => self.fail(AuthError::InvalidCredentials),
        }
    }

    /// Records an out-of-band failure on the state machine.
    ///
    /// Used by durable-backed stores when the backing lookup itself fails
    /// (as opposed to resolving with a rejection).
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status = AuthStatus::Error(message.into());
    }

    /// Registers a new account and logs it in.
    ///
    /// ## Behavior
    /// - Sets status to `Loading`, then resolves in the same call
    /// - Taken email: `Error("user already exists")`. This is checked before
    ///   the empty-field rule, so an empty name with a taken email still
    ///   reports the duplicate
    /// - Empty name/email/password: `Error("fill all fields")`
    /// - Otherwise: appends `{id: max+1, is_admin: false}`, sets
    ///   `current_user`, status `Success`
    pub fn register(&mut self, name: &str, email: &str, password: &str) -> AuthResult<User> {
        self.begin_auth();

        if self.users.iter().any(|u| u.email == email) {
            return self.fail(AuthError::DuplicateEmail);
        }

        if let Err(err) = validate_registration(name, email, password) {
            return self.fail(err);
        }

        let user = self.insert_user(name, email, password, false);
        self.current_user = Some(user.clone());
        self.status = AuthStatus::Success;
        Ok(user)
    }

    /// Clears the session; the account collection is untouched.
    pub fn logout(&mut self) {
        self.current_user = None;
        self.status = AuthStatus::Idle;
    }

    /// Returns the state machine to `Idle` without touching the session.
    ///
    /// `Success` and `Error` only ever leave via this or [`Self::logout`],
    /// never automatically.
    pub fn reset_state(&mut self) {
        self.status = AuthStatus::Idle;
    }

    /// Records a failure on the state machine and propagates it.
    fn fail(&mut self, err: AuthError) -> AuthResult<User> {
        self.status = AuthStatus::Error(err.to_string());
        Err(err)
    }

    // =========================================================================
    // Administrative CRUD
    // =========================================================================

    /// Administrative account creation.
    ///
    /// Same id rule as registration, but NO duplicate-email check and no
    /// session change: the admin screen of the original system never
    /// validated this path, and the asymmetry is preserved on purpose.
    pub fn add_user(&mut self, name: &str, email: &str, password: &str, is_admin: bool) -> User {
        self.insert_user(name, email, password, is_admin)
    }

    /// Replaces all mutable fields of the account with matching `id`.
    ///
    /// Silent no-op when no such account exists. The authenticated session
    /// keeps its own snapshot and is not rewritten here.
    pub fn update_user(
        &mut self,
        id: i64,
        name: &str,
        email: &str,
        password: &str,
        is_admin: bool,
    ) {
        if let Some(user) = self.users.iter_mut().find(|u| u.id == id) {
            user.name = name.to_string();
            user.email = email.to_string();
            user.password = password.to_string();
            user.is_admin = is_admin;
        }
    }

    /// Removes the account with matching `id`; silent no-op when absent.
    ///
    /// Deleting the authenticated account also performs [`Self::logout`].
    pub fn delete_user(&mut self, id: i64) {
        self.users.retain(|u| u.id != id);

        if self.current_user.as_ref().is_some_and(|u| u.id == id) {
            self.logout();
        }
    }

    fn insert_user(&mut self, name: &str, email: &str, password: &str, is_admin: bool) -> User {
        let user = User {
            id: self.next_id(),
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            is_admin,
            created_at: Utc::now(),
        };
        self.users.push(user.clone());
        user
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> SessionState {
        let mut state = SessionState::new();
        state.add_user("Administrator", "admin@admin.com", "admin123", true);
        state.add_user("Juan Pérez", "juan@test.com", "password", false);
        state
    }

    #[test]
    fn test_ids_are_max_plus_one() {
        let mut state = SessionState::new();

        let first = state.add_user("A", "a@test.com", "pw", false);
        let second = state.add_user("B", "b@test.com", "pw", false);
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);

        // Deleting the newest account frees its id for reuse; deleting an
        // older one does not disturb the max
        state.delete_user(1);
        let third = state.add_user("C", "c@test.com", "pw", false);
        assert_eq!(third.id, 3);
    }

    #[test]
    fn test_login_success() {
        let mut state = seeded();

        let user = state.login("admin@admin.com", "admin123").unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(state.current_user().map(|u| u.id), Some(1));
        assert_eq!(*state.status(), AuthStatus::Success);
    }

    #[test]
    fn test_login_wrong_credentials() {
        let mut state = seeded();

        let err = state.login("x@x.com", "wrong").unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert!(state.current_user().is_none());
        assert_eq!(
            state.status().error_message(),
            Some("invalid credentials")
        );
    }

    #[test]
    fn test_login_is_case_sensitive() {
        let mut state = seeded();

        assert!(state.login("ADMIN@ADMIN.COM", "admin123").is_err());
        assert!(state.login("admin@admin.com", "ADMIN123").is_err());
    }

    #[test]
    fn test_register_success_logs_in() {
        let mut state = seeded();

        let user = state.register("Ana", "ana@test.com", "secret").unwrap();
        assert_eq!(user.id, 3);
        assert!(!user.is_admin);
        assert_eq!(state.current_user().map(|u| u.id), Some(3));
        assert_eq!(*state.status(), AuthStatus::Success);
    }

    #[test]
    fn test_register_duplicate_email_leaves_collection_unchanged() {
        let mut state = seeded();
        let before: Vec<i64> = state.users().iter().map(|u| u.id).collect();

        let err = state.register("Other", "admin@admin.com", "pw").unwrap_err();
        assert_eq!(err, AuthError::DuplicateEmail);

        let after: Vec<i64> = state.users().iter().map(|u| u.id).collect();
        assert_eq!(before, after);
        assert_eq!(state.status().error_message(), Some("user already exists"));
    }

    #[test]
    fn test_register_empty_field() {
        let mut state = seeded();

        let err = state.register("", "a@a.com", "pw").unwrap_err();
        assert_eq!(err, AuthError::MissingFields);
        assert_eq!(state.users().len(), 2);
        assert_eq!(state.status().error_message(), Some("fill all fields"));
    }

    #[test]
    fn test_register_duplicate_checked_before_empty_fields() {
        let mut state = seeded();

        // Empty name with a taken email reports the duplicate, not the
        // missing field
        let err = state.register("", "admin@admin.com", "pw").unwrap_err();
        assert_eq!(err, AuthError::DuplicateEmail);
    }

    #[test]
    fn test_add_user_skips_duplicate_check() {
        let mut state = seeded();

        // The administrative path has no duplicate-email rule
        let dup = state.add_user("Clone", "admin@admin.com", "pw", false);
        assert_eq!(dup.id, 3);
        assert_eq!(state.users().len(), 3);

        // ...and it never touches the session
        assert!(state.current_user().is_none());
        assert_eq!(*state.status(), AuthStatus::Idle);
    }

    #[test]
    fn test_update_user() {
        let mut state = seeded();

        state.update_user(2, "Juan P.", "juanp@test.com", "newpw", true);
        let user = state.get_user_by_id(2).unwrap();
        assert_eq!(user.name, "Juan P.");
        assert_eq!(user.email, "juanp@test.com");
        assert!(user.is_admin);

        // Absent id: silent no-op
        state.update_user(99, "Ghost", "g@test.com", "pw", false);
        assert_eq!(state.users().len(), 2);
        assert!(state.get_user_by_id(99).is_none());
    }

    #[test]
    fn test_delete_user() {
        let mut state = seeded();

        state.delete_user(2);
        assert!(state.get_user_by_id(2).is_none());
        assert_eq!(state.users().len(), 1);

        // Absent id: silent no-op
        state.delete_user(99);
        assert_eq!(state.users().len(), 1);
    }

    #[test]
    fn test_delete_current_user_logs_out() {
        let mut state = seeded();
        state.login("juan@test.com", "password").unwrap();

        state.delete_user(2);

        assert!(state.current_user().is_none());
        assert_eq!(*state.status(), AuthStatus::Idle);
    }

    #[test]
    fn test_delete_other_user_keeps_session() {
        let mut state = seeded();
        state.login("admin@admin.com", "admin123").unwrap();

        state.delete_user(2);

        assert_eq!(state.current_user().map(|u| u.id), Some(1));
        assert_eq!(*state.status(), AuthStatus::Success);
    }

    #[test]
    fn test_status_sticks_until_reset() {
        let mut state = seeded();

        state.login("x@x.com", "wrong").unwrap_err();
        assert!(state.status().error_message().is_some());

        // Error never clears on its own
        assert!(state.status().error_message().is_some());

        state.reset_state();
        assert_eq!(*state.status(), AuthStatus::Idle);
    }

    #[test]
    fn test_logout_clears_session_only() {
        let mut state = seeded();
        state.login("admin@admin.com", "admin123").unwrap();

        state.logout();

        assert!(state.current_user().is_none());
        assert_eq!(*state.status(), AuthStatus::Idle);
        assert_eq!(state.users().len(), 2);
    }
}
