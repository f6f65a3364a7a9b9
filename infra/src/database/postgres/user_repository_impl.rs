//! PostgreSQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use dl_core::domain::entities::user::User;
use dl_core::errors::{AuthError, DomainError};
use dl_core::repositories::UserRepository;

const USER_COLUMNS: &str = "id, email, name, password_hash, is_active, created_at, updated_at";

/// PostgreSQL implementation of UserRepository
pub struct PgUserRepository {
    /// Database connection pool
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PostgreSQL user repository
    ///
    /// # Arguments
    /// * `pool` - PostgreSQL connection pool from SQLx
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
        Ok(User {
            id: row.try_get::<Uuid, _>("id").map_err(column_error("id"))?,
            email: row.try_get("email").map_err(column_error("email"))?,
            name: row.try_get("name").map_err(column_error("name"))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(column_error("password_hash"))?,
            is_active: row.try_get("is_active").map_err(column_error("is_active"))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(column_error("created_at"))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(column_error("updated_at"))?,
        })
    }
}

fn column_error(column: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| DomainError::Database {
        message: format!("Failed to get {}: {}", column, e),
    }
}

fn query_error(e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "User query failed");
    DomainError::Database {
        message: format!("Database query failed: {}", e),
    }
}

/// Maps a unique violation on `users.email` to the domain duplicate error
fn insert_error(e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AuthError::EmailAlreadyRegistered.into();
        }
    }
    query_error(e)
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE email = $1 LIMIT 1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = format!(
            r#"
            INSERT INTO users (id, email, name, password_hash, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.name)
            .bind(&user.password_hash)
            .bind(user.is_active)
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(insert_error)?;

        Self::row_to_user(&row)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = format!(
            r#"
            UPDATE users
            SET email = $2, name = $3, password_hash = $4, is_active = $5, updated_at = $6
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.name)
            .bind(&user.password_hash)
            .bind(user.is_active)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(insert_error)?;

        match row {
            Some(row) => Self::row_to_user(&row),
            None => Err(DomainError::NotFound {
                resource: "User".to_string(),
            }),
        }
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(exists)
    }
}
