use axum::Router;
use axum_helpers::BearerAuth;
use domain_users::{PgUserRepository, UserService, handlers};

use crate::state::{AppState, Storage};

/// Build the users router over whichever repository the state carries.
pub fn router(state: &AppState) -> Router {
    let auth = BearerAuth::new(&state.config.auth);
    let hasher = state.hasher.clone();

    match &state.storage {
        Storage::Postgres(db) => {
            let repository = PgUserRepository::new(db.clone());
            handlers::router(UserService::with_hasher(repository, hasher), auth)
        }
        Storage::Memory(repository) => {
            handlers::router(UserService::with_hasher(repository.clone(), hasher), auth)
        }
    }
}
