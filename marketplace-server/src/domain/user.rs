use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RegisterRequest {
    pub(crate) login: String,
    pub(crate) password: String,
}

impl RegisterRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let login = normalize_login(&self.login)?;
        let password_len = self.password.chars().count();
        if password_len < 8 || password_len > 128 {
            return Err(DomainError::Validation {
                field: "password",
                message: "must be 8..128 chars",
            });
        }
        Ok(Self {
            login,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) login: String,
    pub(crate) password: String,
}

impl LoginRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let login = self.login.trim();
        if login.is_empty() || login.len() > 64 {
            return Err(DomainError::Validation {
                field: "login",
                message: "must be 1..64 chars",
            });
        }

        if self.password.is_empty() {
            return Err(DomainError::Validation {
                field: "password",
                message: "must not be empty",
            });
        }
        Ok(Self {
            login: login.to_lowercase(),
            password: self.password,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct User {
    pub(crate) id: i64,
    pub(crate) login: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl User {
    pub(crate) fn new(
        id: i64,
        login: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation {
                field: "id",
                message: "must be > 0",
            });
        }
        let login = normalize_login(&login.into())?;

        Ok(Self {
            id,
            login,
            created_at,
        })
    }
}

// Logins are stored lowercased so that lookups are case-insensitive.
fn normalize_login(login: &str) -> Result<String, DomainError> {
    let login = login.trim();
    let len = login.chars().count();
    if len < 3 || len > 20 {
        return Err(DomainError::Validation {
            field: "login",
            message: "must be 3..20 chars",
        });
    }
    if !login.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(DomainError::Validation {
            field: "login",
            message: "must contain only letters and digits",
        });
    }
    Ok(login.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::{LoginRequest, RegisterRequest, User, normalize_login};
    use chrono::Utc;

    #[test]
    fn user_new_rejects_non_positive_id() {
        let result = User::new(0, "validuser", Utc::now());
        assert!(result.is_err());
    }

    #[test]
    fn normalize_login_lowercases_and_trims() {
        let value = normalize_login("  AlIcE42 ").expect("must be valid");
        assert_eq!(value, "alice42");
    }

    #[test]
    fn login_rules_are_applied() {
        assert!(normalize_login("ab").is_err());
        assert!(normalize_login("way-too-long-login-name-here").is_err());
        assert!(normalize_login("not alnum!").is_err());
        assert!(normalize_login("bob2024").is_ok());
    }

    #[test]
    fn register_password_length_is_checked() {
        let short = RegisterRequest {
            login: "validuser".to_string(),
            password: "short".to_string(),
        };
        assert!(short.validate().is_err());

        let ok = RegisterRequest {
            login: "ValidUser".to_string(),
            password: "very-secure-password".to_string(),
        };
        let validated = ok.validate().expect("must be valid");
        assert_eq!(validated.login, "validuser");
    }

    #[test]
    fn login_request_lowercases_login() {
        let req = LoginRequest {
            login: "  Alice42 ".to_string(),
            password: "whatever".to_string(),
        };
        let validated = req.validate().expect("must be valid");
        assert_eq!(validated.login, "alice42");
    }
}
