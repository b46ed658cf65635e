use axum::Router;

use super::AppState;

pub(crate) mod ads;
pub(crate) mod auth;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/ads", ads::router(state))
}
