use std::sync::Arc;

use crate::application::ad_service::AdService;
use crate::application::auth_service::AuthService;
use crate::data::repositories::postgres::ad_repository::PostgresAdRepository;
use crate::data::repositories::postgres::user_repository::PostgresUserRepository;
use crate::infrastructure::jwt::JwtService;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService<PostgresUserRepository>>,
    pub(crate) ad_service: Arc<AdService<PostgresAdRepository>>,
    pub(crate) jwt: Arc<JwtService>,
}

impl AppState {
    pub(crate) fn new(
        auth_service: Arc<AuthService<PostgresUserRepository>>,
        ad_service: Arc<AdService<PostgresAdRepository>>,
        jwt: Arc<JwtService>,
    ) -> Self {
        Self {
            auth_service,
            ad_service,
            jwt,
        }
    }
}
