use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::infrastructure::jwt::JwtService;
use crate::presentation::AppState;
use crate::presentation::app_error::AppError;

#[derive(Debug, Clone)]
pub(crate) struct AuthenticatedUser {
    pub(crate) user_id: i64,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Extractor for routes where authentication is optional. Never rejects:
/// yields the viewer identity when the auth middleware resolved one.
#[derive(Debug, Clone)]
pub(crate) struct MaybeUser(pub(crate) Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<AuthenticatedUser>().cloned()))
    }
}

pub(crate) async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let user = authenticate(&state.jwt, auth_header)?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Variant for the public listing route: a missing header means an
/// anonymous viewer, but a header that is present and invalid is still
/// rejected.
pub(crate) async fn optional_jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    if let Some(header) = auth_header {
        let user = authenticate(&state.jwt, &header)?;
        request.extensions_mut().insert(user);
    }

    Ok(next.run(request).await)
}

fn authenticate(jwt: &JwtService, auth_header: &str) -> Result<AuthenticatedUser, AppError> {
    let mut parts = auth_header.split_whitespace();
    let scheme = parts.next().ok_or(AppError::Unauthorized)?;
    let token = parts.next().ok_or(AppError::Unauthorized)?;
    if parts.next().is_some() {
        return Err(AppError::Unauthorized);
    }
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AppError::Unauthorized);
    }
    if token.trim().is_empty() {
        return Err(AppError::Unauthorized);
    }

    let claims = jwt
        .verify_token(token.trim())
        .map_err(|_| AppError::Unauthorized)?;

    Ok(AuthenticatedUser {
        user_id: claims.user_id,
    })
}

#[cfg(test)]
mod tests {
    use crate::infrastructure::jwt::JwtService;
    use crate::presentation::app_error::AppError;

    use super::authenticate;

    fn test_jwt() -> JwtService {
        JwtService::new("0123456789abcdef0123456789abcdef", 3600)
    }

    #[test]
    fn bearer_token_resolves_user() {
        let jwt = test_jwt();
        let token = jwt.generate_token(7).expect("token must be issued");
        let user = authenticate(&jwt, &format!("Bearer {token}")).expect("must authenticate");
        assert_eq!(user.user_id, 7);
    }

    #[test]
    fn wrong_scheme_is_rejected() {
        let jwt = test_jwt();
        let token = jwt.generate_token(7).expect("token must be issued");
        let err = authenticate(&jwt, &format!("Basic {token}")).expect_err("must reject");
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn malformed_header_is_rejected() {
        let jwt = test_jwt();
        for header in ["", "Bearer", "Bearer a b", "garbage"] {
            assert!(authenticate(&jwt, header).is_err(), "header: {header:?}");
        }
    }
}
