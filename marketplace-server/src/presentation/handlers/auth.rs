use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::{LoginRequest, RegisterRequest, User};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct RegisterDto {
    #[validate(length(min = 3, max = 20))]
    pub(crate) login: String,
    #[validate(length(min = 8, max = 128))]
    pub(crate) password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct LoginDto {
    #[validate(length(min = 1, max = 64))]
    pub(crate) login: String,
    #[validate(length(min = 1))]
    pub(crate) password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UserDto {
    pub(crate) id: i64,
    pub(crate) login: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct TokenDto {
    pub(crate) token: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            login: user.login,
        }
    }
}

#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Registered successfully", body = UserDto),
        (status = 400, description = "Validation error or login already taken"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    let Json(dto) = payload?;
    dto.validate()?;

    let req = RegisterRequest {
        login: dto.login,
        password: dto.password,
    };

    let user = state.auth_service.register(req).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = TokenDto),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<TokenDto>)> {
    let Json(dto) = payload?;
    dto.validate()?;

    let req = LoginRequest {
        login: dto.login,
        password: dto.password,
    };

    let token = state.auth_service.login(req).await?;

    Ok((StatusCode::OK, Json(TokenDto { token })))
}
