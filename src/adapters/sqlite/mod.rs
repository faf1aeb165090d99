//! SQLite adapters.

pub mod connection;
pub mod migrations;
pub mod task_repository;

pub use connection::{create_pool, create_test_pool, verify_connection, ConnectionError, PoolConfig};
pub use migrations::{all_embedded_migrations, Migration, MigrationError, Migrator};
pub use task_repository::SqliteTaskRepository;
