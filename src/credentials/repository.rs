//! Persistence for user records.

use super::error::PersistenceError;
use async_trait::async_trait;
use sqlx::{Connection, PgPool, Row};
use tracing::{info_span, Instrument};
use uuid::Uuid;

const SCHEMA_SQL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/sql/schema.sql"));

#[derive(Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
}

impl UserRecord {
    #[must_use]
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            username,
            password_hash,
        }
    }
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Created,
    /// The unique index on `username` rejected the row.
    Conflict,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert `record` unless its username is already taken.
    ///
    /// Implementations must decide the conflict atomically; callers never
    /// look the username up first.
    async fn insert(&self, record: &UserRecord) -> Result<InsertOutcome, PersistenceError>;

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, PersistenceError>;

    /// Cheap liveness check used by `/health`.
    async fn ping(&self) -> Result<(), PersistenceError>;
}

/// `users` table in PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the `users` table and its unique index when missing.
    ///
    /// # Errors
    /// Returns an error if any schema statement fails.
    pub async fn ensure_schema(&self) -> Result<(), PersistenceError> {
        for statement in split_sql_statements(SCHEMA_SQL) {
            let span = info_span!(
                "db.query",
                db.system = "postgresql",
                db.operation = "DDL",
                db.statement = statement.as_str()
            );
            sqlx::query(&statement)
                .execute(&self.pool)
                .instrument(span)
                .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, record: &UserRecord) -> Result<InsertOutcome, PersistenceError> {
        let query = r"
            INSERT INTO users
                (id, username, password_hash)
            VALUES ($1, $2, $3)
        ";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        let result = sqlx::query(query)
            .bind(record.id)
            .bind(&record.username)
            .bind(&record.password_hash)
            .execute(&self.pool)
            .instrument(span)
            .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Created),
            Err(err) if is_unique_violation(&err) => Ok(InsertOutcome::Conflict),
            Err(err) => Err(err.into()),
        }
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, PersistenceError> {
        let query = "SELECT id, username, password_hash FROM users WHERE username = $1";
        let span = info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(username)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await?;

        Ok(row.map(|row| UserRecord {
            id: row.get("id"),
            username: row.get("username"),
            password_hash: row.get("password_hash"),
        }))
    }

    async fn ping(&self) -> Result<(), PersistenceError> {
        let acquire_span = info_span!(
            "db.acquire",
            db.system = "postgresql",
            db.operation = "ACQUIRE"
        );
        let mut conn = self.pool.acquire().instrument(acquire_span).await?;

        let ping_span = info_span!("db.ping", db.system = "postgresql", db.operation = "PING");
        conn.ping().instrument(ping_span).await?;

        Ok(())
    }
}

/// Returns `true` when `err` is a database unique-violation (SQLSTATE `23505`).
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    let without_comments = sql
        .lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n");

    without_comments
        .split(';')
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
        .map(str::to_string)
        .collect()
}
