use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};
use tracing::info;

use crate::data::user_repository::{NewUser, UserRepository};
use crate::domain::error::DomainError;
use crate::domain::user::{LoginRequest, RegisterRequest, User};
use crate::infrastructure::jwt::JwtService;

pub(crate) struct AuthService<R: UserRepository> {
    repo: R,
    jwt: JwtService,
}

impl<R: UserRepository> AuthService<R> {
    const DUMMY_PASSWORD_HASH: &'static str = "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$gwN6hT1sNdk9kI95f7n2Gl3fL0qRmBf2Ffkj2r90/0M";

    pub(crate) fn new(repo: R, jwt: JwtService) -> Self {
        Self { repo, jwt }
    }

    /// Registers a user. The login is normalized to lowercase by
    /// validation; duplicate logins are rejected by the store's unique
    /// constraint, so two concurrent registrations cannot both succeed.
    pub(crate) async fn register(&self, req: RegisterRequest) -> Result<User, DomainError> {
        let req = req.validate()?;

        let password_hash = self.hash_password(&req.password)?;

        let new_user = NewUser {
            login: req.login,
            password_hash,
        };
        let user = self.repo.create_user(new_user).await?;

        info!(user_id = user.id, login = %user.login, "user registered");
        Ok(user)
    }

    /// Authenticates a user and issues a signed token. A missing login and
    /// a wrong password are indistinguishable to the caller.
    pub(crate) async fn login(&self, req: LoginRequest) -> Result<String, DomainError> {
        let req = req.validate()?;

        let user_creds = match self.repo.find_by_login(&req.login).await? {
            Some(user_creds) => user_creds,
            None => {
                // Verify against a dummy hash so the missing-user path
                // takes as long as a real verification.
                match self.verify_password(&req.password, Self::DUMMY_PASSWORD_HASH) {
                    Ok(()) | Err(DomainError::InvalidCredentials) => {}
                    Err(err) => return Err(err),
                }
                return Err(DomainError::InvalidCredentials);
            }
        };

        self.verify_password(&req.password, &user_creds.password_hash)?;

        self.jwt
            .generate_token(user_creds.user.id)
            .map_err(|err| DomainError::Unexpected(err.to_string()))
    }

    pub(crate) fn hash_password(&self, raw_password: &str) -> Result<String, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Self::argon2()?
            .hash_password(raw_password.as_bytes(), &salt)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(password_hash.to_string())
    }

    pub(crate) fn verify_password(
        &self,
        raw_password: &str,
        password_hash: &str,
    ) -> Result<(), DomainError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Self::argon2()?
            .verify_password(raw_password.as_bytes(), &parsed_hash)
            .map_err(|err| match err {
                PasswordHashError::Password => DomainError::InvalidCredentials,
                _ => DomainError::Unexpected(err.to_string()),
            })?;

        Ok(())
    }

    fn argon2() -> Result<Argon2<'static>, DomainError> {
        let params = Params::new(19 * 1024, 2, 1, None)
            .map_err(|err| DomainError::Unexpected(err.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::AuthService;
    use crate::data::user_repository::{NewUser, UserCredentials, UserRepository};
    use crate::domain::error::DomainError;
    use crate::domain::user::{LoginRequest, RegisterRequest, User};
    use crate::infrastructure::jwt::JwtService;

    #[derive(Clone)]
    struct FakeUserRepo {
        created_input: Arc<Mutex<Option<NewUser>>>,
        login_credentials: Arc<Mutex<Option<UserCredentials>>>,
        create_user_out: User,
    }

    impl FakeUserRepo {
        fn new(create_user_out: User) -> Self {
            Self {
                created_input: Arc::new(Mutex::new(None)),
                login_credentials: Arc::new(Mutex::new(None)),
                create_user_out,
            }
        }

        fn set_login_credentials(&self, creds: Option<UserCredentials>) {
            *self
                .login_credentials
                .lock()
                .expect("login credentials mutex poisoned") = creds;
        }

        fn take_created_input(&self) -> Option<NewUser> {
            self.created_input
                .lock()
                .expect("created input mutex poisoned")
                .take()
        }
    }

    #[async_trait]
    impl UserRepository for FakeUserRepo {
        async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
            *self
                .created_input
                .lock()
                .expect("created input mutex poisoned") = Some(input);
            Ok(self.create_user_out.clone())
        }

        async fn find_by_login(&self, _login: &str) -> Result<Option<UserCredentials>, DomainError> {
            Ok(self
                .login_credentials
                .lock()
                .expect("login credentials mutex poisoned")
                .clone())
        }
    }

    #[tokio::test]
    async fn register_normalizes_login_and_hashes_password() {
        let repo = FakeUserRepo::new(sample_user(1, "alice42"));
        let service = AuthService::new(repo.clone(), test_jwt());

        let req = RegisterRequest {
            login: "  AlIcE42  ".to_string(),
            password: "very-secure-password".to_string(),
        };

        let user = service.register(req).await.expect("register must succeed");
        assert_eq!(user.login, "alice42");

        let created = repo
            .take_created_input()
            .expect("create_user must be called");
        assert_eq!(created.login, "alice42");
        assert!(!created.password_hash.is_empty());
        assert_ne!(created.password_hash, "very-secure-password");
    }

    #[tokio::test]
    async fn register_rejects_invalid_login() {
        let repo = FakeUserRepo::new(sample_user(1, "alice42"));
        let service = AuthService::new(repo.clone(), test_jwt());

        let req = RegisterRequest {
            login: "no punctuation!".to_string(),
            password: "very-secure-password".to_string(),
        };

        let err = service.register(req).await.expect_err("must be rejected");
        assert!(matches!(err, DomainError::Validation { field: "login", .. }));
        assert!(repo.take_created_input().is_none());
    }

    #[tokio::test]
    async fn login_returns_invalid_credentials_for_missing_user() {
        let repo = FakeUserRepo::new(sample_user(1, "alice42"));
        repo.set_login_credentials(None);
        let service = AuthService::new(repo, test_jwt());

        let req = LoginRequest {
            login: "alice42".to_string(),
            password: "some-password".to_string(),
        };

        let err = service.login(req).await.expect_err("login must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_returns_invalid_credentials_for_wrong_password() {
        let repo = FakeUserRepo::new(sample_user(1, "alice42"));
        let service = AuthService::new(repo.clone(), test_jwt());

        let hash = service
            .hash_password("correct-password")
            .expect("hash must be created");
        repo.set_login_credentials(Some(UserCredentials {
            user: sample_user(1, "alice42"),
            password_hash: hash,
        }));

        let req = LoginRequest {
            login: "alice42".to_string(),
            password: "wrong-password".to_string(),
        };

        let err = service.login(req).await.expect_err("login must fail");
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_issues_verifiable_token_for_valid_credentials() {
        let repo = FakeUserRepo::new(sample_user(7, "alice42"));
        let service = AuthService::new(repo.clone(), test_jwt());

        let hash = service
            .hash_password("correct-password")
            .expect("hash must be created");
        repo.set_login_credentials(Some(UserCredentials {
            user: sample_user(7, "alice42"),
            password_hash: hash,
        }));

        let req = LoginRequest {
            login: "Alice42".to_string(),
            password: "correct-password".to_string(),
        };

        let token = service.login(req).await.expect("login must succeed");
        let claims = test_jwt().verify_token(&token).expect("token must verify");
        assert_eq!(claims.user_id, 7);
    }

    fn sample_user(id: i64, login: &str) -> User {
        User::new(id, login.to_string(), Utc::now()).expect("sample user must be valid")
    }

    fn test_jwt() -> JwtService {
        JwtService::new("0123456789abcdef0123456789abcdef", 3600)
    }
}
