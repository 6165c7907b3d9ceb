//! # User Repository
//!
//! Database operations for account rows.
//!
//! ## Key Operations
//! - Credential lookup for login
//! - Email lookup for the idempotent admin seed
//! - CRUD write-through from the user store
//!
//! ## Id Assignment
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Who Assigns Ids?                                     │
//! │                                                                         │
//! │  The user store owns the `max(existing) + 1` rule and hands this       │
//! │  repository fully-formed rows. The repository never generates ids;     │
//! │  `insert` stores exactly what it is given, so the in-memory            │
//! │  collection and the table can never disagree about an id.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Email Uniqueness
//! `users.email` is deliberately NOT a UNIQUE column: registration enforces
//! uniqueness in the store, while the administrative add path performs no
//! check at all. The repository stores whatever the store decided.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use mercado_core::User;

/// Repository for account database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = UserRepository::new(pool);
///
/// // Login lookup
/// let user = repo.find_by_credentials("admin@admin.com", "admin123").await?;
///
/// // Load the full collection
/// let users = repo.list().await?;
/// ```
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Lists every account, ordered by id.
    ///
    /// Used by the store at startup to load its collection; order is not
    /// significant for correctness, but a stable order keeps admin screens
    /// deterministic.
    pub async fn list(&self) -> DbResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, is_admin, created_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = users.len(), "Loaded users");
        Ok(users)
    }

    /// Finds an account by email.
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - Account found (first row when duplicates exist)
    /// * `Ok(None)` - No account holds this email
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, is_admin, created_at
            FROM users
            WHERE email = ?1
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Finds an account by exact credential match.
    ///
    /// ## Security Note
    /// Passwords are stored and compared as plain text, reproducing the demo
    /// system this models. A real deployment substitutes a salted-hash
    /// verification behind the same signature.
    pub async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, is_admin, created_at
            FROM users
            WHERE email = ?1 AND password = ?2
            LIMIT 1
            "#,
        )
        .bind(email)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Inserts a new account row.
    ///
    /// ## Arguments
    /// * `user` - Fully-formed account (id chosen by the store)
    pub async fn insert(&self, user: &User) -> DbResult<()> {
        debug!(id = user.id, email = %user.email, "Inserting user");

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password, is_admin, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.is_admin)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates all mutable fields of an existing account.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Account doesn't exist
    pub async fn update(&self, user: &User) -> DbResult<()> {
        debug!(id = user.id, "Updating user");

        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = ?2,
                email = ?3,
                password = ?4,
                is_admin = ?5
            WHERE id = ?1
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.is_admin)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", user.id));
        }

        Ok(())
    }

    /// Deletes the account with the given id.
    ///
    /// ## Returns
    /// * `Ok(())` - Row deleted
    /// * `Err(DbError::NotFound)` - Account doesn't exist (the store treats
    ///   this as the silent no-op the contract requires)
    pub async fn delete_by_id(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting user");

        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }

    /// Counts accounts (for diagnostics and seed guards).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;

    fn user(id: i64, email: &str, is_admin: bool) -> User {
        User {
            id,
            name: format!("User {}", id),
            email: email.to_string(),
            password: "secret".to_string(),
            is_admin,
            created_at: Utc::now(),
        }
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_list_round_trip() {
        let db = test_db().await;
        let repo = db.users();

        repo.insert(&user(1, "admin@admin.com", true)).await.unwrap();
        repo.insert(&user(2, "juan@test.com", false)).await.unwrap();

        let users = repo.list().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, 1);
        assert_eq!(users[0].email, "admin@admin.com");
        assert!(users[0].is_admin);
        assert_eq!(users[1].id, 2);
        assert!(!users[1].is_admin);
    }

    #[tokio::test]
    async fn test_find_by_email() {
        let db = test_db().await;
        let repo = db.users();
        repo.insert(&user(1, "admin@admin.com", true)).await.unwrap();

        let found = repo.find_by_email("admin@admin.com").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(1));

        let missing = repo.find_by_email("nobody@test.com").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_find_by_credentials() {
        let db = test_db().await;
        let repo = db.users();
        repo.insert(&user(1, "admin@admin.com", true)).await.unwrap();

        let hit = repo
            .find_by_credentials("admin@admin.com", "secret")
            .await
            .unwrap();
        assert!(hit.is_some());

        let wrong_password = repo
            .find_by_credentials("admin@admin.com", "nope")
            .await
            .unwrap();
        assert!(wrong_password.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_emails_are_storable() {
        // The administrative add path performs no duplicate check, so the
        // schema must accept what it produces
        let db = test_db().await;
        let repo = db.users();

        repo.insert(&user(1, "same@test.com", false)).await.unwrap();
        repo.insert(&user(2, "same@test.com", false)).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
        // Lookup returns the first row
        let found = repo.find_by_email("same@test.com").await.unwrap().unwrap();
        assert_eq!(found.id, 1);
    }

    #[tokio::test]
    async fn test_update() {
        let db = test_db().await;
        let repo = db.users();
        repo.insert(&user(1, "old@test.com", false)).await.unwrap();

        let mut updated = user(1, "new@test.com", true);
        updated.name = "Renamed".to_string();
        repo.update(&updated).await.unwrap();

        let found = repo.find_by_email("new@test.com").await.unwrap().unwrap();
        assert_eq!(found.name, "Renamed");
        assert!(found.is_admin);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let db = test_db().await;
        let repo = db.users();

        let err = repo.update(&user(42, "ghost@test.com", false)).await;
        assert!(matches!(err, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let db = test_db().await;
        let repo = db.users();
        repo.insert(&user(1, "a@test.com", false)).await.unwrap();

        repo.delete_by_id(1).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);

        let err = repo.delete_by_id(1).await;
        assert!(matches!(err, Err(DbError::NotFound { .. })));
    }
}
