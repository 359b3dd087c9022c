//! User store for database operations

use anyhow::anyhow;
use async_trait::async_trait;
use auth_api_shared::NormalizedCredential;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

/// User record from the store
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub username: Option<String>,
    pub mobile: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// True when `value` equals any of the stored identifiers
    pub fn matches_identifier(&self, value: &str) -> bool {
        [&self.email, &self.username, &self.mobile]
            .into_iter()
            .any(|field| field.as_deref() == Some(value))
    }
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub credential: NormalizedCredential,
    pub password_hash: String,
}

/// Store failures
#[derive(Error, Debug)]
pub enum StoreError {
    /// A unique identifier index rejected the write
    #[error("user already exists")]
    Conflict,

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict,
            _ => StoreError::Backend(anyhow!(err)),
        }
    }
}

/// Persistence capability for user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user whose email, username or mobile equals `value`
    async fn find_by_any_identifier(&self, value: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Insert a new user, returning the stored record
    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError>;
}

/// PostgreSQL-backed user store
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_any_identifier(&self, value: &str) -> Result<Option<UserRecord>, StoreError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, name, email, username, mobile, password_hash, created_at
            FROM users
            WHERE email = $1 OR username = $1 OR mobile = $1
            LIMIT 1
            "#,
        )
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (name, email, username, mobile, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, username, mobile, password_hash, created_at
            "#,
        )
        .bind(&user.name)
        .bind(user.credential.email())
        .bind(user.credential.username())
        .bind(user.credential.mobile())
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }
}
