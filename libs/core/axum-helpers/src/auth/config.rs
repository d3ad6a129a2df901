//! Configuration for static bearer-token authentication.

use core_config::{ConfigError, FromEnv, env_required};

/// Minimum accepted token length.
pub const MIN_TOKEN_LEN: usize = 16;

/// Bearer token configuration.
///
/// Loaded from environment variables:
/// - `API_TOKEN` (required) - at least 16 characters
///
/// # Example
///
/// ```ignore
/// use axum_helpers::BearerAuthConfig;
/// use core_config::FromEnv;
///
/// let config = BearerAuthConfig::from_env()?;
/// ```
#[derive(Clone)]
pub struct BearerAuthConfig {
    pub token: String,
}

impl BearerAuthConfig {
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();

        if token.len() < MIN_TOKEN_LEN {
            return Err(ConfigError::ParseError {
                key: "API_TOKEN".to_string(),
                details: format!(
                    "must be at least {} characters (got {}). Generate one with: openssl rand -hex 32",
                    MIN_TOKEN_LEN,
                    token.len()
                ),
            });
        }

        Ok(Self { token })
    }
}

// Never print the token itself
impl std::fmt::Debug for BearerAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAuthConfig")
            .field("token", &"<redacted>")
            .finish()
    }
}

impl FromEnv for BearerAuthConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Self::new(env_required("API_TOKEN")?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_config_from_env_valid() {
        temp_env::with_var("API_TOKEN", Some("0123456789abcdef"), || {
            let config = BearerAuthConfig::from_env().unwrap();
            assert_eq!(config.token, "0123456789abcdef");
        });
    }

    #[test]
    fn test_bearer_config_from_env_missing() {
        temp_env::with_var_unset("API_TOKEN", || {
            let err = BearerAuthConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("API_TOKEN"));
        });
    }

    #[test]
    fn test_bearer_config_too_short() {
        let err = BearerAuthConfig::new("short").unwrap_err();
        assert!(err.to_string().contains("16 characters"));
    }

    #[test]
    fn test_bearer_config_debug_redacts_token() {
        let config = BearerAuthConfig::new("super-secret-token-value").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("redacted"));
    }
}
