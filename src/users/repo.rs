use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(skip)]
    pub deleted_at: Option<OffsetDateTime>,
}

/// Persistence seam for the user resource. Every operation sees only
/// non-deleted rows; absence is `None`, not an error.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Page slice plus the total count of non-deleted users.
    /// Callers guarantee `page >= 1` and `limit >= 1`.
    async fn list(&self, page: i64, limit: i64) -> anyhow::Result<(Vec<User>, i64)>;
    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<User>>;
    async fn get_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn create(&self, name: &str, email: &str) -> anyhow::Result<User>;
    /// Persists the full, already-merged state of `user`.
    async fn update(&self, user: &User) -> anyhow::Result<User>;
    /// Soft delete: marks the row, never purges it.
    async fn delete(&self, id: i64) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list(&self, page: i64, limit: i64) -> anyhow::Result<(Vec<User>, i64)> {
        let offset = (page - 1) * limit;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM users WHERE deleted_at IS NULL
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, created_at, updated_at, deleted_at
            FROM users
            WHERE deleted_at IS NULL
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        Ok((users, total))
    }

    async fn get_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, created_at, updated_at, deleted_at
            FROM users
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn get_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, created_at, updated_at, deleted_at
            FROM users
            WHERE email = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn create(&self, name: &str, email: &str) -> anyhow::Result<User> {
        // The partial unique index on (email) WHERE deleted_at IS NULL is the
        // final arbiter under concurrent creates; a violation surfaces here.
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email, created_at, updated_at, deleted_at
            "#,
        )
        .bind(name)
        .bind(email)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn update(&self, user: &User) -> anyhow::Result<User> {
        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $1, email = $2, updated_at = now()
            WHERE id = $3 AND deleted_at IS NULL
            RETURNING id, name, email, created_at, updated_at, deleted_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.id)
        .fetch_one(&self.db)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET deleted_at = now()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await?;
        Ok(())
    }
}
