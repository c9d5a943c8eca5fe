use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::repo_types::{NewUser, User};
use crate::products::repo_types::{Product, ProductFields};

/// Document store holding the `users` and `products` collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert_user(&self, user: NewUser) -> anyhow::Result<User>;
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;

    async fn insert_product(&self, fields: ProductFields) -> anyhow::Result<Product>;
    async fn list_products(&self) -> anyhow::Result<Vec<Product>>;
    async fn find_product(&self, id: Uuid) -> anyhow::Result<Option<Product>>;
    async fn update_product(
        &self,
        id: Uuid,
        patch: ProductFields,
    ) -> anyhow::Result<Option<Product>>;
    async fn delete_product(&self, id: Uuid) -> anyhow::Result<bool>;
    async fn count_products_over(&self, price: f64) -> anyhow::Result<u64>;
}
