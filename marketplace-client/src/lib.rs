//! Клиентская библиотека для работы с marketplace-server по HTTP.
//!
//! Клиент хранит JWT-токен после `login` и автоматически использует его
//! в защищённых операциях и при запросе ленты объявлений (чтобы сервер
//! помечал собственные объявления флагом `is_owner`).
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{MarketClientError, MarketClientResult};
pub use models::{AdListing, Advertisement, ListAdsParams, User};

use http_client::HttpClient;

#[derive(Debug, Clone)]
/// Клиент маркетплейса объявлений.
pub struct MarketClient {
    http_client: HttpClient,
    token: Option<String>,
}

impl MarketClient {
    /// Создаёт клиент с базовым URL сервера, например `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(base_url),
            token: None,
        }
    }

    /// Устанавливает JWT-токен вручную.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Возвращает текущий JWT-токен, если он установлен.
    pub fn get_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Очищает сохранённый JWT-токен.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Регистрирует пользователя.
    ///
    /// Сервер не выдаёт токен при регистрации, для входа используйте
    /// [`MarketClient::login`].
    pub async fn register(&self, login: &str, password: &str) -> MarketClientResult<User> {
        self.http_client.register(login, password).await
    }

    /// Выполняет вход пользователя и сохраняет полученный JWT-токен в клиенте.
    pub async fn login(&mut self, login: &str, password: &str) -> MarketClientResult<String> {
        let token = self.http_client.login(login, password).await?;
        self.token = Some(token.clone());
        Ok(token)
    }

    /// Размещает объявление.
    ///
    /// Требует установленный JWT-токен.
    pub async fn create_ad(
        &self,
        title: &str,
        description: &str,
        image_url: &str,
        price: f64,
    ) -> MarketClientResult<Advertisement> {
        let token = self.require_token()?;
        self.http_client
            .create_ad(token, title, description, image_url, price)
            .await
    }

    /// Возвращает ленту объявлений.
    ///
    /// Токен не обязателен; если он сохранён, сервер пометит объявления
    /// текущего пользователя флагом `is_owner`.
    pub async fn list_ads(&self, params: ListAdsParams) -> MarketClientResult<Vec<AdListing>> {
        self.http_client.list_ads(params, self.token.as_deref()).await
    }

    fn require_token(&self) -> MarketClientResult<&str> {
        self.token.as_deref().ok_or(MarketClientError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_management() {
        let mut client = MarketClient::new("http://localhost:8080");
        assert!(client.get_token().is_none());

        client.set_token("abc");
        assert_eq!(client.get_token(), Some("abc"));

        client.clear_token();
        assert!(client.get_token().is_none());
    }

    #[tokio::test]
    async fn create_ad_without_token_is_unauthorized() {
        let client = MarketClient::new("http://localhost:8080");
        let result = client
            .create_ad(
                "Mountain bike",
                "Barely used, full suspension",
                "https://img.example.com/bike.jpg",
                250.0,
            )
            .await;
        assert!(matches!(result, Err(MarketClientError::Unauthorized)));
    }
}
