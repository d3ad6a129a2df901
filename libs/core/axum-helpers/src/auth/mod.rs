//! Static bearer-token authentication.
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{BearerAuth, BearerAuthConfig, bearer_auth_middleware};
//! use core_config::FromEnv;
//!
//! let auth = BearerAuth::new(&BearerAuthConfig::from_env()?);
//!
//! let protected = Router::new()
//!     .route("/", get(handler))
//!     .route_layer(axum::middleware::from_fn_with_state(auth, bearer_auth_middleware));
//! ```

pub mod config;
pub mod middleware;
pub mod token;

pub use config::BearerAuthConfig;
pub use middleware::bearer_auth_middleware;
pub use token::BearerAuth;
