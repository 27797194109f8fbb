pub mod config;
pub mod database;
pub mod tweet_repository;
pub mod user_repository;

pub use config::DatabaseConfig;
pub use database::Database;
pub use tweet_repository::TweetRepository;
pub use user_repository::UserRepository;
