use std::sync::Arc;

use anyhow::Result;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::ad_service::AdService;
use application::auth_service::AuthService;
use data::repositories::postgres::ad_repository::PostgresAdRepository;
use data::repositories::postgres::user_repository::PostgresUserRepository;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings.database_url).await?;
    run_migrations(&pool).await?;

    let jwt = Arc::new(JwtService::new(
        &settings.jwt_secret,
        settings.jwt_ttl_seconds,
    ));

    let user_repo = PostgresUserRepository::new(pool.clone());
    let ad_repo = PostgresAdRepository::new(pool);

    let auth_service = Arc::new(AuthService::new(
        user_repo,
        JwtService::new(&settings.jwt_secret, settings.jwt_ttl_seconds),
    ));
    let ad_service = Arc::new(AdService::new(ad_repo));

    let state = AppState::new(auth_service, ad_service, jwt);

    server::run_http(&settings, state).await
}
