use axum::Router;

pub mod health;
pub mod users;

/// Base path of the users resource below `/api`
pub const USERS_PATH: &str = "/v1/users";

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().nest(USERS_PATH, users::router(state))
}

/// Router with the `/ready` endpoint, merged next to `/health`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
