// Service exports
pub mod cache;
pub mod postgres;

pub use cache::{CacheError, CacheManager};
pub use postgres::{PostgresClient, PostgresError};
