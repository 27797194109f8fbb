use chirp_core::AppError;
use chirp_core::models::{NewUser, Tweet, User};
use chirp_core::traits::{Store, TweetStore, UserStore};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::DatabaseConfig;
use crate::tweet_repository::TweetRepository;
use crate::user_repository::UserRepository;

/// Central database facade: owns the connection pool, runs migrations,
/// and vends repository instances.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL with the given configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to connect: {e}")))?;

        tracing::debug!(max_connections = config.max_connections, "database pool ready");
        Ok(Self { pool })
    }

    /// Create a `Database` from an existing pool (useful for testing).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run all pending migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Migration failed: {e}")))?;
        Ok(())
    }

    pub fn tweet_repo(&self) -> TweetRepository {
        TweetRepository::new(self.pool.clone())
    }

    pub fn user_repo(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }
}

// -- Trait implementations, delegating to the repositories --

impl TweetStore for Database {
    async fn list_tweets(&self) -> Result<Vec<Tweet>, AppError> {
        self.tweet_repo().list().await
    }

    async fn get_tweet(&self, id: i64) -> Result<Option<Tweet>, AppError> {
        self.tweet_repo().get(id).await
    }

    async fn create_tweet(&self, message: &str) -> Result<Tweet, AppError> {
        self.tweet_repo().create(message).await
    }

    async fn update_tweet(&self, id: i64, message: &str) -> Result<Option<Tweet>, AppError> {
        self.tweet_repo().update_message(id, message).await
    }

    async fn delete_tweet(&self, id: i64) -> Result<bool, AppError> {
        self.tweet_repo().delete(id).await
    }
}

impl UserStore for Database {
    async fn create_user(&self, user: &NewUser) -> Result<User, AppError> {
        self.user_repo().create(user).await
    }
}

impl Store for Database {
    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}
