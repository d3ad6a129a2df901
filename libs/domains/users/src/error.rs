use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

/// Error kinds a `UserRepository` implementation may report.
///
/// Storage adapters translate their driver errors into these variants so
/// the service layer never depends on a specific storage library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("User with email '{0}' already exists")]
    Conflict(String),

    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<RepositoryError> for UserError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => UserError::NotFound(id),
            RepositoryError::DuplicateEmail(email) => UserError::Conflict(email),
            RepositoryError::Storage(msg) => UserError::Storage(msg),
        }
    }
}

impl From<validator::ValidationErrors> for UserError {
    fn from(errors: validator::ValidationErrors) -> Self {
        UserError::Validation(errors.to_string())
    }
}

/// Convert UserError to AppError for standardized error responses.
///
/// Storage and hashing details are logged here and replaced by an opaque
/// message before they reach the client.
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::Conflict(email) => {
                AppError::Conflict(format!("User with email '{}' already exists", email))
            }
            UserError::NotFound(_) => AppError::NotFound("User not found".to_string()),
            UserError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                AppError::InternalServerError("Operation failed".to_string())
            }
            UserError::PasswordHash(msg) => {
                tracing::error!("Password hash error: {}", msg);
                AppError::InternalServerError("Operation failed".to_string())
            }
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
