//! # User Store
//!
//! Owns the user collection and the authenticated session, publishes a
//! snapshot after every mutation, and optionally writes through to SQLite.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    UserStore Data Flow                                  │
//! │                                                                         │
//! │  UserStore::open(db)                                                   │
//! │       │                                                                 │
//! │       ├── users().list()  ──► SessionState::with_users(...)            │
//! │       └── ensure_default_admin()   (idempotent, keyed by email)        │
//! │                                                                         │
//! │  login(email, pw) ───► find_by_credentials() ──► resolve_login()       │
//! │  register(...) ──────► SessionState::register ──► insert write-through │
//! │  add/update/delete ──► SessionState CRUD ───────► write-through        │
//! │                                                                         │
//! │  Every mutation publishes SessionSnapshot { current_user, status,      │
//! │  users } into the watch channel.                                       │
//! │                                                                         │
//! │  The in-memory collection is authoritative: a failed write-through is  │
//! │  logged and swallowed, never rolled back.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Single-Flight
//! The store does not serialize overlapping `login`/`register` calls; the
//! caller disables its submit action while the published status is
//! `Loading`. Mutations on the collection itself are serialized by the
//! mutex.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use mercado_core::{
    AuthStatus, SessionState, User, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_NAME,
    DEFAULT_ADMIN_PASSWORD,
};
use mercado_db::Database;

// =============================================================================
// Session Snapshot
// =============================================================================

/// The complete published state of the user store.
///
/// A UI shell re-renders from the latest snapshot; it never reaches into
/// the store's internals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// The authenticated account, or `None` when logged out.
    pub current_user: Option<User>,
    /// Position of the auth state machine.
    pub status: AuthStatus,
    /// The full account collection (for the admin screen).
    pub users: Vec<User>,
}

impl SessionSnapshot {
    fn of(state: &SessionState) -> Self {
        SessionSnapshot {
            current_user: state.current_user().cloned(),
            status: state.status().clone(),
            users: state.users().to_vec(),
        }
    }
}

// =============================================================================
// User Store
// =============================================================================

/// The user store.
///
/// ## Construction
/// - [`UserStore::new`] - memory only, starts empty
/// - [`UserStore::open`] - loads the collection from the database, seeds
///   the administrator, and writes every later mutation through
///
/// Constructed explicitly and passed by reference to consumers; there is
/// no process-global instance.
#[derive(Debug)]
pub struct UserStore {
    state: Mutex<SessionState>,
    db: Option<Database>,
    tx: watch::Sender<SessionSnapshot>,
}

impl UserStore {
    /// Creates a memory-only store with an empty collection.
    pub fn new() -> Self {
        UserStore::with_parts(SessionState::new(), None)
    }

    /// Opens a store over a database.
    ///
    /// Loads the full account collection, then guarantees the seed
    /// administrator exists.
    pub async fn open(db: Database) -> StoreResult<Self> {
        let users = db.users().list().await?;
        info!(count = users.len(), "Loaded user collection");

        let store = UserStore::with_parts(SessionState::with_users(users), Some(db));
        store.ensure_default_admin().await;
        Ok(store)
    }

    fn with_parts(state: SessionState, db: Option<Database>) -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot::of(&state));
        UserStore {
            state: Mutex::new(state),
            db,
            tx,
        }
    }

    /// Guarantees the seed administrator account exists.
    ///
    /// Keyed by [`DEFAULT_ADMIN_EMAIL`] under the same duplicate-email rule
    /// registration uses, so calling this any number of times creates at
    /// most one account.
    pub async fn ensure_default_admin(&self) {
        let exists = self.read(|s| s.get_user_by_email(DEFAULT_ADMIN_EMAIL).is_some());
        if exists {
            return;
        }

        info!(email = DEFAULT_ADMIN_EMAIL, "Seeding administrator account");
        let admin = self.mutate(|s| {
            s.add_user(
                DEFAULT_ADMIN_NAME,
                DEFAULT_ADMIN_EMAIL,
                DEFAULT_ADMIN_PASSWORD,
                true,
            )
        });
        self.persist_insert(&admin).await;
    }

    // =========================================================================
    // Subscriptions & Reads
    // =========================================================================

    /// Subscribes to session snapshots.
    ///
    /// The receiver always holds the latest published snapshot; `changed()`
    /// resolves after the next mutation.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }

    /// Returns a copy of the current snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.read(SessionSnapshot::of)
    }

    /// The authenticated account, or `None` when logged out.
    pub fn current_user(&self) -> Option<User> {
        self.read(|s| s.current_user().cloned())
    }

    /// Position of the auth state machine.
    ///
    /// Callers gate their submit actions on `status().is_loading()`.
    pub fn status(&self) -> AuthStatus {
        self.read(|s| s.status().clone())
    }

    /// The full account collection.
    pub fn users(&self) -> Vec<User> {
        self.read(|s| s.users().to_vec())
    }

    /// Direct account lookup; `None` when the id is absent.
    pub fn get_user_by_id(&self, id: i64) -> Option<User> {
        self.read(|s| s.get_user_by_id(id).cloned())
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Attempts to log in with the given credentials.
    ///
    /// ## Behavior
    /// - Publishes `Loading`, resolves to `Success` or
    ///   `Error("invalid credentials")`
    /// - Durable mode delegates the lookup to
    ///   [`mercado_db::UserRepository::find_by_credentials`]; memory mode
    ///   searches the owned collection - the two are equivalent because the
    ///   collection is loaded from and written through to the same table
    /// - A failed database lookup publishes `Error("login failed")` and
    ///   propagates the underlying error
    pub async fn login(&self, email: &str, password: &str) -> StoreResult<User> {
        match &self.db {
            Some(db) => {
                self.mutate(|s| s.begin_auth());

                match db.users().find_by_credentials(email, password).await {
                    Ok(outcome) => self
                        .mutate(|s| s.resolve_login(outcome))
                        .map_err(StoreError::from),
                    Err(err) => {
                        warn!(error = %err, "Login lookup failed");
                        self.mutate(|s| s.set_error("login failed"));
                        Err(err.into())
                    }
                }
            }
            None => self
                .mutate(|s| s.login(email, password))
                .map_err(StoreError::from),
        }
    }

    /// Registers a new account and logs it in.
    ///
    /// Duplicate-email and empty-field rules live in
    /// [`SessionState::register`]; on success the new account is written
    /// through to the database.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> StoreResult<User> {
        let user = self.mutate(|s| s.register(name, email, password))?;
        self.persist_insert(&user).await;
        Ok(user)
    }

    /// Clears the session; the collection is untouched.
    pub fn logout(&self) {
        self.mutate(|s| s.logout());
    }

    /// Returns the auth state machine to `Idle`.
    pub fn reset_state(&self) {
        self.mutate(|s| s.reset_state());
    }

    // =========================================================================
    // Administrative CRUD
    // =========================================================================

    /// Administrative account creation; NO duplicate-email check, the
    /// session is untouched.
    pub async fn add_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        is_admin: bool,
    ) -> User {
        let user = self.mutate(|s| s.add_user(name, email, password, is_admin));
        self.persist_insert(&user).await;
        user
    }

    /// Replaces all mutable fields of the account with matching `id`;
    /// silent no-op when absent.
    pub async fn update_user(
        &self,
        id: i64,
        name: &str,
        email: &str,
        password: &str,
        is_admin: bool,
    ) {
        let updated = self.mutate(|s| {
            s.update_user(id, name, email, password, is_admin);
            s.get_user_by_id(id).cloned()
        });

        if let (Some(db), Some(user)) = (&self.db, updated) {
            if let Err(err) = db.users().update(&user).await {
                warn!(error = %err, id, "User update write-through failed");
            }
        }
    }

    /// Removes the account with matching `id`; silent no-op when absent.
    /// Deleting the authenticated account also logs it out.
    pub async fn delete_user(&self, id: i64) {
        self.mutate(|s| s.delete_user(id));

        if let Some(db) = &self.db {
            if let Err(err) = db.users().delete_by_id(id).await {
                // Absent ids are a silent no-op by contract
                debug!(error = %err, id, "User delete write-through skipped");
            }
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Executes a function with read access to the session state.
    fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SessionState) -> R,
    {
        let state = self.state.lock().expect("Session mutex poisoned");
        f(&state)
    }

    /// Executes a function with write access to the session state, then
    /// publishes the new snapshot.
    fn mutate<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SessionState) -> R,
    {
        let mut state = self.state.lock().expect("Session mutex poisoned");
        let result = f(&mut state);
        self.tx.send_replace(SessionSnapshot::of(&state));
        result
    }

    /// Writes a new account through to the database, if one is attached.
    ///
    /// The in-memory collection stays authoritative; failures are logged
    /// and swallowed.
    async fn persist_insert(&self, user: &User) {
        if let Some(db) = &self.db {
            if let Err(err) = db.users().insert(user).await {
                warn!(error = %err, id = user.id, "User insert write-through failed");
            }
        }
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mercado_core::AuthError;
    use mercado_db::DbConfig;

    async fn seeded_memory_store() -> UserStore {
        let store = UserStore::new();
        store.add_user("Administrator", DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD, true)
            .await;
        store.add_user("Juan Pérez", "juan@test.com", "password", false).await;
        store
    }

    #[tokio::test]
    async fn test_memory_login_and_logout() {
        let store = seeded_memory_store().await;

        let user = store.login(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD).await.unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(store.current_user().map(|u| u.id), Some(1));
        assert_eq!(store.status(), AuthStatus::Success);

        store.logout();
        assert!(store.current_user().is_none());
        assert_eq!(store.status(), AuthStatus::Idle);
    }

    #[tokio::test]
    async fn test_memory_register_duplicate() {
        let store = seeded_memory_store().await;

        let err = store.register("Other", DEFAULT_ADMIN_EMAIL, "pw").await.unwrap_err();
        assert!(matches!(err, StoreError::Auth(AuthError::DuplicateEmail)));
        assert_eq!(store.users().len(), 2);
        assert_eq!(store.status(), AuthStatus::Error("user already exists".to_string()));
    }

    #[tokio::test]
    async fn test_delete_current_user_logs_out() {
        let store = seeded_memory_store().await;
        store.login("juan@test.com", "password").await.unwrap();

        store.delete_user(2).await;

        assert!(store.current_user().is_none());
        assert_eq!(store.status(), AuthStatus::Idle);
        assert!(store.get_user_by_id(2).is_none());
    }

    #[tokio::test]
    async fn test_mutations_publish_snapshots() {
        let store = seeded_memory_store().await;
        let mut rx = store.subscribe();

        store.login(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD).await.unwrap();

        rx.changed().await.unwrap();
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.current_user.map(|u| u.id), Some(1));
        assert_eq!(snapshot.status, AuthStatus::Success);
        assert_eq!(snapshot.users.len(), 2);
    }

    #[tokio::test]
    async fn test_open_seeds_administrator_once() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let store = UserStore::open(db.clone()).await.unwrap();
        assert_eq!(store.users().len(), 1);
        assert_eq!(store.users()[0].email, DEFAULT_ADMIN_EMAIL);
        assert!(store.users()[0].is_admin);

        // A second startup over the same database must not duplicate it
        let reopened = UserStore::open(db.clone()).await.unwrap();
        assert_eq!(reopened.users().len(), 1);
        assert_eq!(db.users().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_durable_login_uses_credential_lookup() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = UserStore::open(db).await.unwrap();

        let user = store.login(DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD).await.unwrap();
        assert!(user.is_admin);
        assert_eq!(store.status(), AuthStatus::Success);

        let err = store.login(DEFAULT_ADMIN_EMAIL, "wrong").await.unwrap_err();
        assert!(matches!(err, StoreError::Auth(AuthError::InvalidCredentials)));
        assert_eq!(store.status().error_message(), Some("invalid credentials"));
    }

    #[tokio::test]
    async fn test_durable_register_survives_restart() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let store = UserStore::open(db.clone()).await.unwrap();
        store.register("Ana", "ana@test.com", "secret").await.unwrap();

        // "Restart": a fresh store over the same database
        let reopened = UserStore::open(db).await.unwrap();
        assert_eq!(reopened.users().len(), 2);
        let ana = reopened.login("ana@test.com", "secret").await.unwrap();
        assert_eq!(ana.name, "Ana");
    }

    #[tokio::test]
    async fn test_durable_update_and_delete_write_through() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = UserStore::open(db.clone()).await.unwrap();

        let ana = store.register("Ana", "ana@test.com", "secret").await.unwrap();
        store.update_user(ana.id, "Ana María", "ana@test.com", "newpw", false).await;

        let row = db.users().find_by_email("ana@test.com").await.unwrap().unwrap();
        assert_eq!(row.name, "Ana María");
        assert_eq!(row.password, "newpw");

        store.delete_user(ana.id).await;
        assert!(db.users().find_by_email("ana@test.com").await.unwrap().is_none());

        // Deleting again is a silent no-op at the store boundary
        store.delete_user(ana.id).await;
    }

    #[tokio::test]
    async fn test_durable_add_user_skips_duplicate_check() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = UserStore::open(db.clone()).await.unwrap();

        store.add_user("Clone", DEFAULT_ADMIN_EMAIL, "pw", false).await;

        assert_eq!(store.users().len(), 2);
        assert_eq!(db.users().count().await.unwrap(), 2);
    }
}
