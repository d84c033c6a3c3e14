//! Repository for `products` and its per-type attribute tables.

use catalog_core::product::{AttributeValue, NewProduct, Product};
use catalog_core::types::DbId;
use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};

use crate::error::RepoError;
use crate::models::product::ProductRow;

/// Parent row left-joined with every attribute table. At most one of the
/// child joins matches for a given product.
const SELECT_JOINED: &str = "SELECT p.id, p.sku, p.name, p.price, p.type AS product_type, \
            d.size, b.weight, f.height, f.width, f.length \
     FROM products p \
     LEFT JOIN dvd_products d ON d.id = p.id \
     LEFT JOIN book_products b ON b.id = p.id \
     LEFT JOIN furniture_products f ON f.id = p.id";

/// Constraint guarding SKU uniqueness.
const SKU_CONSTRAINT: &str = "uq_products_sku";

/// PostgreSQL `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Provides create, read and delete operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Whether any product already uses `sku`.
    pub async fn sku_exists(pool: &PgPool, sku: &str) -> Result<bool, sqlx::Error> {
        sku_exists_with(pool, sku).await
    }

    /// Persist a new product and its attribute row in one transaction.
    ///
    /// The SKU pre-check only short-circuits the common case; a concurrent
    /// insert is caught by `uq_products_sku` and reported the same way. Any
    /// failure rolls the transaction back, so either both rows exist or
    /// neither does.
    pub async fn save(pool: &PgPool, product: &NewProduct) -> Result<Product, RepoError> {
        let binding = product.attributes.binding();
        let mut tx = pool.begin().await?;

        if sku_exists_with(&mut *tx, &product.sku).await? {
            return Err(RepoError::DuplicateSku(product.sku.clone()));
        }

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO products (sku, name, price, type)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&product.sku)
        .bind(&product.name)
        .bind(product.price)
        .bind(binding.product_type.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| classify_insert_error(e, &product.sku))?;

        let values = product.attributes.values();
        let mut insert: QueryBuilder<'_, Postgres> = QueryBuilder::new("INSERT INTO ");
        insert.push(binding.table).push(" (id");
        for (column, _) in &values {
            insert.push(", ").push(*column);
        }
        insert.push(") VALUES (");
        let mut separated = insert.separated(", ");
        separated.push_bind(id);
        for (_, value) in values {
            match value {
                AttributeValue::Integer(n) => separated.push_bind(n),
                AttributeValue::Decimal(d) => separated.push_bind(d),
            };
        }
        separated.push_unseparated(")");

        insert
            .build()
            .execute(&mut *tx)
            .await
            .map_err(|e| classify_insert_error(e, &product.sku))?;

        tx.commit().await?;

        tracing::info!(
            product_id = id,
            sku = %product.sku,
            product_type = %binding.product_type,
            "Product created"
        );
        Ok(Product::from_new(id, product.clone()))
    }

    /// All products ordered by id ascending.
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Product>, RepoError> {
        let query = format!("{SELECT_JOINED} ORDER BY p.id ASC");
        let rows = sqlx::query_as::<_, ProductRow>(&query)
            .fetch_all(pool)
            .await?;
        rows.into_iter().map(ProductRow::into_product).collect()
    }

    /// Find a product by its id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, RepoError> {
        let query = format!("{SELECT_JOINED} WHERE p.id = $1");
        let row = sqlx::query_as::<_, ProductRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        row.map(ProductRow::into_product).transpose()
    }

    /// Find a product by its SKU.
    pub async fn find_by_sku(pool: &PgPool, sku: &str) -> Result<Option<Product>, RepoError> {
        let query = format!("{SELECT_JOINED} WHERE p.sku = $1");
        let row = sqlx::query_as::<_, ProductRow>(&query)
            .bind(sku)
            .fetch_optional(pool)
            .await?;
        row.map(ProductRow::into_product).transpose()
    }

    /// Delete products by id. Attribute rows go with them via `ON DELETE
    /// CASCADE`. Returns the number of products removed.
    pub async fn delete_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("DELETE FROM products WHERE id = ANY($1)")
            .bind(ids)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete products by SKU. Returns the number of products removed.
    pub async fn delete_by_skus(pool: &PgPool, skus: &[String]) -> Result<u64, sqlx::Error> {
        if skus.is_empty() {
            return Ok(0);
        }
        let result = sqlx::query("DELETE FROM products WHERE sku = ANY($1)")
            .bind(skus)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

async fn sku_exists_with<'e, E>(executor: E, sku: &str) -> Result<bool, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM products WHERE sku = $1)")
        .bind(sku)
        .fetch_one(executor)
        .await
}

/// Map a unique violation on the SKU constraint to [`RepoError::DuplicateSku`].
fn classify_insert_error(err: sqlx::Error, sku: &str) -> RepoError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
            && db_err.constraint() == Some(SKU_CONSTRAINT)
        {
            return RepoError::DuplicateSku(sku.to_string());
        }
    }
    RepoError::Database(err)
}
