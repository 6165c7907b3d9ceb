//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Catalog Role
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog vs Cart                                      │
//! │                                                                         │
//! │  products table (this repository)                                      │
//! │       │                                                                 │
//! │       │  list() / get_by_id()                                          │
//! │       ▼                                                                 │
//! │  Catalog screen ──► add_to_cart(product)                               │
//! │                            │                                            │
//! │                            ▼                                            │
//! │                  CartItem snapshot (name, price, image frozen)         │
//! │                                                                         │
//! │  The cart never reads this table again for an existing line: edits    │
//! │  to a product do not rewrite open carts.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use mercado_core::Product;

/// Repository for product catalog operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// // Load the catalog
/// let products = repo.list().await?;
///
/// // Get by ID
/// let product = repo.get_by_id(5).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists the full catalog, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price_cents, image_url, category, stock, created_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Loaded catalog");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price_cents, image_url, category, stock, created_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price_cents, image_url, category, stock, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(&product.image_url)
        .bind(&product.category)
        .bind(product.stock)
        .bind(product.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing product.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                price_cents = ?4,
                image_url = ?5,
                category = ?6,
                stock = ?7
            WHERE id = ?1
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(&product.image_url)
        .bind(&product.category)
        .bind(product.stock)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", product.id));
        }

        Ok(())
    }

    /// Deletes the product with the given id.
    pub async fn delete_by_id(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts catalog rows (for diagnostics and seed guards).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
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

    fn product(id: i64, price_cents: i64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            description: "A test product".to_string(),
            price_cents,
            image_url: format!("https://example.com/{}.jpg", id),
            category: "Test".to_string(),
            stock: 10,
            created_at: Utc::now(),
        }
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_list_round_trip() {
        let db = test_db().await;
        let repo = db.products();

        repo.insert(&product(1, 129999)).await.unwrap();
        repo.insert(&product(2, 79999)).await.unwrap();

        let catalog = repo.list().await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].price_cents, 129999);
        assert_eq!(catalog[1].id, 2);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let db = test_db().await;
        let repo = db.products();
        repo.insert(&product(5, 19999)).await.unwrap();

        let found = repo.get_by_id(5).await.unwrap().unwrap();
        assert_eq!(found.price_cents, 19999);

        assert!(repo.get_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update() {
        let db = test_db().await;
        let repo = db.products();
        repo.insert(&product(1, 1000)).await.unwrap();

        let mut updated = product(1, 2000);
        updated.stock = 3;
        repo.update(&updated).await.unwrap();

        let found = repo.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(found.price_cents, 2000);
        assert_eq!(found.stock, 3);

        let err = repo.update(&product(42, 1)).await;
        assert!(matches!(err, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let db = test_db().await;
        let repo = db.products();
        repo.insert(&product(1, 1000)).await.unwrap();

        repo.delete_by_id(1).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);

        let err = repo.delete_by_id(1).await;
        assert!(matches!(err, Err(DbError::NotFound { .. })));
    }
}
