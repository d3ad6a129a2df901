//! Readiness check against the configured storage backend.

use crate::state::{AppState, Storage};
use axum::{extract::State, response::Response};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let storage: HealthCheckFuture<'_> = match &state.storage {
        Storage::Postgres(db) => Box::pin(async move {
            database::postgres::check_health(db)
                .await
                .map_err(|e| e.to_string())
        }),
        Storage::Memory(_) => Box::pin(async { Ok(()) }),
    };

    run_health_checks(vec![("storage", storage)]).await
}
