use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use chirp_core::models::{Tweet, User};
use chirp_core::validation::Fields;

// ---------------------------------------------------------------------------
// Tweets
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct TweetRequest {
    /// Tweet text, 1 to 280 characters
    pub message: Option<String>,
}

impl Fields for TweetRequest {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "message" => self.message.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TweetResponse {
    pub id: i64,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Tweet> for TweetResponse {
    fn from(tweet: Tweet) -> Self {
        Self {
            id: tweet.id,
            message: tweet.message,
            created_at: tweet.created_at,
            updated_at: tweet.updated_at,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TweetListResponse {
    pub tweets: Vec<TweetResponse>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TweetEnvelope {
    pub tweet: TweetResponse,
}

/// Single-tweet lookup. Keyed `tweetId` for compatibility with existing clients.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct TweetLookupResponse {
    #[serde(rename = "tweetId")]
    pub tweet_id: TweetResponse,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    /// Plaintext password; only its Argon2 hash is stored
    pub password: Option<String>,
}

impl Fields for CreateUserRequest {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "username" => self.username.as_deref(),
            "email" => self.email.as_deref(),
            "password" => self.password.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub title: String,
    pub message: String,
    pub errors: Option<Vec<String>>,
    /// Error detail; null in production
    pub stack: Option<String>,
}
