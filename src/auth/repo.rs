use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::repo_types::{NewUser, User};

/// Find the first user registered under `email`.
pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, email, password, created_at
        FROM users
        WHERE email = $1
        ORDER BY created_at ASC
        LIMIT 1
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await
    .context("find user by email")?;
    Ok(user)
}

/// Insert a new user with an already hashed password.
pub async fn create(db: &PgPool, new: &NewUser) -> anyhow::Result<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, name, email, password, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, email, password, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&new.name)
    .bind(&new.email)
    .bind(&new.password_hash)
    .bind(new.created_at)
    .fetch_one(db)
    .await
    .context("insert user")?;
    Ok(user)
}
