use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::auth::{
    repo as users,
    repo_types::{NewUser, User},
};
use crate::config::AppConfig;
use crate::products::{
    repo as products,
    repo_types::{Product, ProductFields},
};
use crate::storage::DocumentStore;

/// Postgres-backed document store: users as rows, products as JSONB documents.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        tracing::info!("database connected");
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("run migrations")?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn insert_user(&self, user: NewUser) -> anyhow::Result<User> {
        users::create(&self.pool, &user).await
    }

    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        users::find_by_email(&self.pool, email).await
    }

    async fn insert_product(&self, fields: ProductFields) -> anyhow::Result<Product> {
        products::insert(&self.pool, &fields).await
    }

    async fn list_products(&self) -> anyhow::Result<Vec<Product>> {
        products::list_all(&self.pool).await
    }

    async fn find_product(&self, id: Uuid) -> anyhow::Result<Option<Product>> {
        products::find_by_id(&self.pool, id).await
    }

    async fn update_product(
        &self,
        id: Uuid,
        patch: ProductFields,
    ) -> anyhow::Result<Option<Product>> {
        products::merge_by_id(&self.pool, id, &patch).await
    }

    async fn delete_product(&self, id: Uuid) -> anyhow::Result<bool> {
        products::delete_by_id(&self.pool, id).await
    }

    async fn count_products_over(&self, price: f64) -> anyhow::Result<u64> {
        products::count_price_above(&self.pool, price).await
    }
}
