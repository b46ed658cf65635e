use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::presentation::AppState;
use crate::presentation::handlers::ads::{create_ad, list_ads};
use crate::presentation::middleware::auth::{jwt_auth_middleware, optional_jwt_auth_middleware};

pub(crate) fn router(state: AppState) -> Router<AppState> {
    // Listing is public, but a presented token is still verified so the
    // viewer-relative ownership flag can be computed.
    let public = Router::new()
        .route("/", get(list_ads))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            optional_jwt_auth_middleware,
        ));

    let protected = Router::new()
        .route("/", post(create_ad))
        .layer(middleware::from_fn_with_state(state, jwt_auth_middleware));

    public.merge(protected)
}
