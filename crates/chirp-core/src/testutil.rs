//! Test utilities: an in-memory implementation of the storage traits.
//!
//! `MemoryStore` mirrors the PostgreSQL semantics the HTTP layer relies on:
//! ids start at 1 and are never reused, listing is in id order, and usernames
//! and emails are unique. Clones share the same underlying data.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use crate::error::AppError;
use crate::models::{NewUser, Tweet, User};
use crate::traits::{Store, TweetStore, UserStore};

#[derive(Default)]
struct Inner {
    tweets: BTreeMap<i64, Tweet>,
    last_tweet_id: i64,
    users: Vec<(User, String)>,
    healthy: bool,
}

/// Shared in-memory store for tests.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                healthy: true,
                ..Inner::default()
            })),
        }
    }

    /// A store whose health check and writes fail, for exercising 5xx paths.
    pub fn unavailable() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    /// The stored password hash for `username`, if the user exists.
    pub fn hashed_password(&self, username: &str) -> Option<String> {
        self.lock()
            .users
            .iter()
            .find(|(user, _)| user.username == username)
            .map(|(_, hash)| hash.clone())
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn ensure_available(inner: &Inner) -> Result<(), AppError> {
        if inner.healthy {
            Ok(())
        } else {
            Err(AppError::DatabaseError("connection refused".into()))
        }
    }
}

impl TweetStore for MemoryStore {
    async fn list_tweets(&self) -> Result<Vec<Tweet>, AppError> {
        let inner = self.lock();
        Self::ensure_available(&inner)?;
        Ok(inner.tweets.values().cloned().collect())
    }

    async fn get_tweet(&self, id: i64) -> Result<Option<Tweet>, AppError> {
        let inner = self.lock();
        Self::ensure_available(&inner)?;
        Ok(inner.tweets.get(&id).cloned())
    }

    async fn create_tweet(&self, message: &str) -> Result<Tweet, AppError> {
        let mut inner = self.lock();
        Self::ensure_available(&inner)?;
        inner.last_tweet_id += 1;
        let now = Utc::now();
        let tweet = Tweet {
            id: inner.last_tweet_id,
            message: message.to_string(),
            created_at: now,
            updated_at: now,
        };
        inner.tweets.insert(tweet.id, tweet.clone());
        Ok(tweet)
    }

    async fn update_tweet(&self, id: i64, message: &str) -> Result<Option<Tweet>, AppError> {
        let mut inner = self.lock();
        Self::ensure_available(&inner)?;
        Ok(inner.tweets.get_mut(&id).map(|tweet| {
            tweet.message = message.to_string();
            tweet.updated_at = Utc::now();
            tweet.clone()
        }))
    }

    async fn delete_tweet(&self, id: i64) -> Result<bool, AppError> {
        let mut inner = self.lock();
        Self::ensure_available(&inner)?;
        Ok(inner.tweets.remove(&id).is_some())
    }
}

impl UserStore for MemoryStore {
    async fn create_user(&self, new_user: &NewUser) -> Result<User, AppError> {
        let mut inner = self.lock();
        Self::ensure_available(&inner)?;

        if inner.users.iter().any(|(u, _)| u.username == new_user.username) {
            return Err(AppError::username_taken());
        }
        if inner.users.iter().any(|(u, _)| u.email == new_user.email) {
            return Err(AppError::email_taken());
        }

        let now = Utc::now();
        let user = User {
            id: inner.users.len() as i64 + 1,
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            created_at: now,
            updated_at: now,
        };
        inner
            .users
            .push((user.clone(), new_user.hashed_password.clone()));
        Ok(user)
    }
}

impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), AppError> {
        Self::ensure_available(&self.lock())
    }
}
