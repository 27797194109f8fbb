use std::future::Future;

use crate::error::AppError;
use crate::models::{NewUser, Tweet, User};

/// Persists and retrieves tweets.
pub trait TweetStore: Send + Sync + Clone {
    /// All tweets, in ascending id order.
    fn list_tweets(&self) -> impl Future<Output = Result<Vec<Tweet>, AppError>> + Send;

    fn get_tweet(&self, id: i64) -> impl Future<Output = Result<Option<Tweet>, AppError>> + Send;

    fn create_tweet(&self, message: &str) -> impl Future<Output = Result<Tweet, AppError>> + Send;

    /// Replace the message of an existing tweet.
    ///
    /// Returns `None` if no tweet has this id. `created_at` is left untouched.
    fn update_tweet(
        &self,
        id: i64,
        message: &str,
    ) -> impl Future<Output = Result<Option<Tweet>, AppError>> + Send;

    /// Delete a tweet. Returns `false` if no tweet has this id.
    fn delete_tweet(&self, id: i64) -> impl Future<Output = Result<bool, AppError>> + Send;
}

/// Persists user accounts.
pub trait UserStore: Send + Sync + Clone {
    /// Insert a user.
    ///
    /// Fails with [`AppError::Conflict`] if the username or email is already taken.
    fn create_user(&self, user: &NewUser) -> impl Future<Output = Result<User, AppError>> + Send;
}

/// Everything the HTTP layer needs from storage.
pub trait Store: TweetStore + UserStore {
    /// Check that the backing store is reachable.
    fn health_check(&self) -> impl Future<Output = Result<(), AppError>> + Send;
}
