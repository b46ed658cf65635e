use reqwest::{Client, Method};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{MarketClientError, MarketClientResult};
use crate::models::{AdListing, Advertisement, ListAdsParams, User};

#[derive(Debug, Serialize)]
struct RegisterRequestDto<'a> {
    login: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginRequestDto<'a> {
    login: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateAdRequestDto<'a> {
    title: &'a str,
    description: &'a str,
    image_url: &'a str,
    price: f64,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserDto {
    id: i64,
    login: String,
}

#[derive(Debug, Deserialize)]
struct TokenDto {
    token: String,
}

#[derive(Debug, Deserialize)]
struct AdDto {
    id: i64,
    title: String,
    description: String,
    image_url: String,
    price: f64,
    user_id: i64,
    created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize)]
struct AdListingDto {
    id: i64,
    title: String,
    description: String,
    image_url: String,
    price: f64,
    created_at: chrono::DateTime<chrono::Utc>,
    author_login: String,
    #[serde(default)]
    is_owner: bool,
}

#[derive(Debug, Default, Serialize)]
struct ListAdsQueryDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sort_order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_price: Option<f64>,
}

impl From<UserDto> for User {
    fn from(value: UserDto) -> Self {
        Self {
            id: value.id,
            login: value.login,
        }
    }
}

impl From<AdDto> for Advertisement {
    fn from(value: AdDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            image_url: value.image_url,
            price: value.price,
            user_id: value.user_id,
            created_at: value.created_at,
        }
    }
}

impl From<AdListingDto> for AdListing {
    fn from(value: AdListingDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            image_url: value.image_url,
            price: value.price,
            created_at: value.created_at,
            author_login: value.author_login,
            is_owner: value.is_owner,
        }
    }
}

impl From<ListAdsParams> for ListAdsQueryDto {
    fn from(value: ListAdsParams) -> Self {
        Self {
            page: value.page,
            limit: value.limit,
            sort_by: value.sort_by,
            sort_order: value.sort_order,
            min_price: value.min_price,
            max_price: value.max_price,
        }
    }
}

#[derive(Debug, Clone)]
/// HTTP-клиент для работы с REST API `marketplace-server`.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт новый HTTP-клиент с базовым URL сервера.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()
            .expect("failed to build reqwest client");

        Self {
            base_url: base_url.into(),
            client,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode_error(response: reqwest::Response) -> MarketClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body
                .error
                .unwrap_or_else(|| format!("http status {status}")),
            Err(_) => format!("http status {status}"),
        };
        MarketClientError::from_http_status(status, Some(message))
    }

    /// универсальный helper для отправки запросов с json-payload
    async fn send_json<TReq, TRes>(
        &self,
        method: Method,
        path: &str,
        body: &TReq,
        token: Option<&str>,
    ) -> MarketClientResult<TRes>
    where
        TReq: Serialize,
        TRes: DeserializeOwned,
    {
        let url = self.endpoint(path);

        let mut request = self.client.request(method, url).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(MarketClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        response
            .json::<TRes>()
            .await
            .map_err(MarketClientError::from_reqwest)
    }

    /// Регистрирует пользователя и возвращает его публичные данные.
    pub async fn register(&self, login: &str, password: &str) -> MarketClientResult<User> {
        let payload = RegisterRequestDto { login, password };
        let dto: UserDto = self
            .send_json(Method::POST, "/register", &payload, None)
            .await?;
        Ok(dto.into())
    }

    /// Выполняет вход пользователя и возвращает JWT-токен.
    pub async fn login(&self, login: &str, password: &str) -> MarketClientResult<String> {
        let payload = LoginRequestDto { login, password };
        let dto: TokenDto = self
            .send_json(Method::POST, "/login", &payload, None)
            .await?;
        Ok(dto.token)
    }

    /// Размещает объявление от имени авторизованного пользователя.
    ///
    /// Требует валидный JWT-токен.
    pub async fn create_ad(
        &self,
        token: &str,
        title: &str,
        description: &str,
        image_url: &str,
        price: f64,
    ) -> MarketClientResult<Advertisement> {
        let payload = CreateAdRequestDto {
            title,
            description,
            image_url,
            price,
        };
        let dto: AdDto = self
            .send_json(Method::POST, "/ads", &payload, Some(token))
            .await?;

        Ok(dto.into())
    }

    /// Возвращает ленту объявлений с фильтрами и пагинацией.
    ///
    /// Если передан токен, сервер помечает объявления текущего
    /// пользователя флагом `is_owner`.
    pub async fn list_ads(
        &self,
        params: ListAdsParams,
        token: Option<&str>,
    ) -> MarketClientResult<Vec<AdListing>> {
        let url = self.endpoint("/ads");

        let query = ListAdsQueryDto::from(params);

        let mut request = self.client.request(Method::GET, url).query(&query);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(MarketClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        let dtos = response
            .json::<Vec<AdListingDto>>()
            .await
            .map_err(MarketClientError::from_reqwest)?;
        Ok(dtos.into_iter().map(AdListing::from).collect())
    }
}
