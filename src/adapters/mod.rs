//! Adapters implementing domain ports against concrete backends.

pub mod cache;
pub mod identity;
pub mod rate_limit;
pub mod sqlite;

pub use cache::MokaClassificationCache;
pub use identity::StaticIdentityProvider;
pub use rate_limit::KeyedRateLimiter;
pub use sqlite::SqliteTaskRepository;
