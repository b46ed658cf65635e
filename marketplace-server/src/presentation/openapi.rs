use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::handlers::ads::{AdDto, AdListingDto, CreateAdDto, ListAdsQuery};
use crate::presentation::handlers::auth::{LoginDto, RegisterDto, TokenDto, UserDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::auth::register,
        crate::presentation::handlers::auth::login,
        crate::presentation::handlers::ads::create_ad,
        crate::presentation::handlers::ads::list_ads
    ),
    components(
        schemas(
            RegisterDto,
            LoginDto,
            UserDto,
            TokenDto,
            CreateAdDto,
            ListAdsQuery,
            AdDto,
            AdListingDto
        )
    ),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "ads", description = "Advertisement endpoints")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}
