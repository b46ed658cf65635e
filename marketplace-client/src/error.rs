use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `marketplace-client`.
pub enum MarketClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Требуется авторизация (отсутствует/некорректен токен).
    #[error("unauthorized")]
    Unauthorized,

    /// Запрошенный ресурс не найден.
    #[error("not found")]
    NotFound,

    /// Некорректный запрос или бизнес-ошибка валидации.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Результат операций `marketplace-client`.
pub type MarketClientResult<T> = Result<T, MarketClientError>;

impl MarketClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Self::Unauthorized
            }
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            _ => {
                let message = message.unwrap_or_else(|| format!("http status {status}"));
                Self::InvalidRequest(message)
            }
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}
