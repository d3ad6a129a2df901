//! Application state shared by the route builders.

use database::postgres::DatabaseConnection;
use domain_users::{InMemoryUserRepository, PasswordHasher};

/// Connected storage backend
#[derive(Clone)]
pub enum Storage {
    /// PostgreSQL connection pool
    Postgres(DatabaseConnection),
    /// Process-local map, lost on restart
    Memory(InMemoryUserRepository),
}

/// Shared application state.
///
/// Cloning is cheap: the pool, the in-memory map and the hasher are all
/// reference counted or small.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    pub storage: Storage,
    pub hasher: PasswordHasher,
}
