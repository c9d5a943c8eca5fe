use anyhow::Context;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::products::repo_types::{Product, ProductFields, ProductRow};

pub async fn insert(db: &PgPool, fields: &ProductFields) -> anyhow::Result<Product> {
    let row = sqlx::query_as::<_, ProductRow>(
        r#"
        INSERT INTO products (id, doc)
        VALUES ($1, $2)
        RETURNING id, doc
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(Json(fields))
    .fetch_one(db)
    .await
    .context("insert product")?;
    Ok(row.into())
}

pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Product>> {
    let rows = sqlx::query_as::<_, ProductRow>(
        r#"
        SELECT id, doc
        FROM products
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .fetch_all(db)
    .await
    .context("list products")?;
    Ok(rows.into_iter().map(Product::from).collect())
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Product>> {
    let row = sqlx::query_as::<_, ProductRow>(
        r#"
        SELECT id, doc
        FROM products
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .context("find product")?;
    Ok(row.map(Product::from))
}

/// Shallow merge: top-level keys in `patch` overwrite the stored ones, the rest are kept.
pub async fn merge_by_id(
    db: &PgPool,
    id: Uuid,
    patch: &ProductFields,
) -> anyhow::Result<Option<Product>> {
    let row = sqlx::query_as::<_, ProductRow>(
        r#"
        UPDATE products
           SET doc = doc || $2
         WHERE id = $1
        RETURNING id, doc
        "#,
    )
    .bind(id)
    .bind(Json(patch))
    .fetch_optional(db)
    .await
    .context("update product")?;
    Ok(row.map(Product::from))
}

/// Returns whether a row was removed.
pub async fn delete_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
    let deleted = sqlx::query_scalar::<_, Uuid>(
        r#"
        DELETE FROM products
         WHERE id = $1
        RETURNING id
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
    .context("delete product")?;
    Ok(deleted.is_some())
}

/// Products whose `price` is a JSON number strictly above `price`.
pub async fn count_price_above(db: &PgPool, price: f64) -> anyhow::Result<u64> {
    // CASE keeps the float cast away from non-numeric prices.
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
          FROM products
         WHERE CASE
                 WHEN jsonb_typeof(doc -> 'price') = 'number'
                 THEN (doc ->> 'price')::float8 > $1
                 ELSE false
               END
        "#,
    )
    .bind(price)
    .fetch_one(db)
    .await
    .context("count products over price")?;
    Ok(count.max(0) as u64)
}
