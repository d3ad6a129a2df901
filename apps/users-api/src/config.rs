use axum_helpers::BearerAuthConfig;
use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, env_parse, server::ServerConfig};
use database::postgres::PostgresConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Which `UserRepository` adapter backs the service
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageConfig {
    Postgres(PostgresConfig),
    /// Process-local map; data is lost on restart
    Memory,
}

impl FromEnv for StorageConfig {
    /// `STORAGE_BACKEND`: `postgres` (default) or `memory`
    fn from_env() -> Result<Self, ConfigError> {
        let backend = env_or_default("STORAGE_BACKEND", "postgres");

        match backend.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres(PostgresConfig::from_env()?)),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::ParseError {
                key: "STORAGE_BACKEND".to_string(),
                details: format!("unknown backend '{}', expected 'postgres' or 'memory'", other),
            }),
        }
    }
}

/// Argon2id cost parameters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordHashConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordHashConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl FromEnv for PasswordHashConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            memory_kib: env_parse("PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib)?,
            iterations: env_parse("PASSWORD_HASH_ITERATIONS", defaults.iterations)?,
            parallelism: env_parse("PASSWORD_HASH_PARALLELISM", defaults.parallelism)?,
        })
    }
}

/// Application-specific configuration
/// Composes shared config components from the `core_config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub auth: BearerAuthConfig,
    pub storage: StorageConfig,
    pub password_hash: PasswordHashConfig,
    /// Apply pending migrations before serving (postgres only)
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?, // HOST=0.0.0.0, PORT=8080
            auth: BearerAuthConfig::from_env()?, // Required
            storage: StorageConfig::from_env()?,
            password_hash: PasswordHashConfig::from_env()?,
            run_migrations: env_parse("RUN_MIGRATIONS", true)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "0123456789abcdef0123";

    #[test]
    fn test_memory_backend() {
        temp_env::with_vars(
            [
                ("STORAGE_BACKEND", Some("memory")),
                ("API_TOKEN", Some(TOKEN)),
                ("DATABASE_URL", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.storage, StorageConfig::Memory);
                assert_eq!(config.auth.token, TOKEN);
                assert!(config.run_migrations);
            },
        );
    }

    #[test]
    fn test_postgres_is_default_and_needs_url() {
        temp_env::with_vars(
            [("STORAGE_BACKEND", None::<&str>), ("DATABASE_URL", None)],
            || {
                let err = StorageConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("DATABASE_URL"));
            },
        );

        temp_env::with_vars(
            [
                ("STORAGE_BACKEND", None),
                ("DATABASE_URL", Some("postgresql://localhost/users")),
            ],
            || match StorageConfig::from_env().unwrap() {
                StorageConfig::Postgres(pg) => assert_eq!(pg.url, "postgresql://localhost/users"),
                StorageConfig::Memory => panic!("expected postgres"),
            },
        );
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        temp_env::with_var("STORAGE_BACKEND", Some("mongodb"), || {
            let err = StorageConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("STORAGE_BACKEND"));
        });
    }

    #[test]
    fn test_missing_token_is_rejected() {
        temp_env::with_vars(
            [("STORAGE_BACKEND", Some("memory")), ("API_TOKEN", None)],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("API_TOKEN"));
            },
        );
    }

    #[test]
    fn test_short_token_is_rejected() {
        temp_env::with_vars(
            [("STORAGE_BACKEND", Some("memory")), ("API_TOKEN", Some("short"))],
            || assert!(Config::from_env().is_err()),
        );
    }

    #[test]
    fn test_password_hash_params() {
        temp_env::with_vars(
            [
                ("PASSWORD_HASH_MEMORY_KIB", None),
                ("PASSWORD_HASH_ITERATIONS", Some("3")),
                ("PASSWORD_HASH_PARALLELISM", None),
            ],
            || {
                let config = PasswordHashConfig::from_env().unwrap();
                assert_eq!(config.memory_kib, 19456);
                assert_eq!(config.iterations, 3);
                assert_eq!(config.parallelism, 1);
            },
        );
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        temp_env::with_vars(
            [("STORAGE_BACKEND", Some("memory")), ("API_TOKEN", Some(TOKEN))],
            || {
                let config = Config::from_env().unwrap();
                assert!(!format!("{:?}", config).contains(TOKEN));
            },
        );
    }
}
