use chirp_core::error::AppError;
use chirp_core::models::Tweet;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Pool, Postgres};

/// Repository for tweet persistence in PostgreSQL.
#[derive(Clone)]
pub struct TweetRepository {
    pool: Pool<Postgres>,
}

impl TweetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All tweets, oldest first.
    pub async fn list(&self) -> Result<Vec<Tweet>, AppError> {
        let rows = sqlx::query_as::<_, TweetRow>(
            r#"
            SELECT id, message, created_at, updated_at
            FROM tweets
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: i64) -> Result<Option<Tweet>, AppError> {
        let row = sqlx::query_as::<_, TweetRow>(
            r#"SELECT id, message, created_at, updated_at FROM tweets WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    pub async fn create(&self, message: &str) -> Result<Tweet, AppError> {
        let row = sqlx::query_as::<_, TweetRow>(
            r#"
            INSERT INTO tweets (message)
            VALUES ($1)
            RETURNING id, message, created_at, updated_at
            "#,
        )
        .bind(message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        tracing::debug!(tweet_id = row.id, "tweet created");
        Ok(row.into())
    }

    /// Replace the message of a tweet and bump `updated_at`. Returns `None` if absent.
    pub async fn update_message(&self, id: i64, message: &str) -> Result<Option<Tweet>, AppError> {
        let row = sqlx::query_as::<_, TweetRow>(
            r#"
            UPDATE tweets
            SET message = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, message, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(message)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    /// Delete a tweet. Returns `false` if no row matched.
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(r#"DELETE FROM tweets WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct TweetRow {
    id: i64,
    message: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TweetRow> for Tweet {
    fn from(row: TweetRow) -> Self {
        Tweet {
            id: row.id,
            message: row.message,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
