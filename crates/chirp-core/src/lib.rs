pub mod error;
pub mod models;
pub mod password;
pub mod testutil;
pub mod traits;
pub mod validation;

pub use error::AppError;
pub use models::{MAX_TWEET_CHARS, MAX_USERNAME_CHARS, NewUser, Tweet, User};
pub use traits::{Store, TweetStore, UserStore};
