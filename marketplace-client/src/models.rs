use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Публичная модель пользователя.
pub struct User {
    /// Идентификатор пользователя.
    pub id: i64,
    /// Логин.
    pub login: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Созданное объявление (ответ владельцу).
pub struct Advertisement {
    /// Идентификатор объявления.
    pub id: i64,
    /// Заголовок.
    pub title: String,
    /// Текст объявления.
    pub description: String,
    /// Ссылка на изображение.
    pub image_url: String,
    /// Цена.
    pub price: f64,
    /// Идентификатор владельца.
    pub user_id: i64,
    /// Дата и время создания (UTC).
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Объявление в ленте с логином автора.
pub struct AdListing {
    /// Идентификатор объявления.
    pub id: i64,
    /// Заголовок.
    pub title: String,
    /// Текст объявления.
    pub description: String,
    /// Ссылка на изображение.
    pub image_url: String,
    /// Цена.
    pub price: f64,
    /// Дата и время создания (UTC).
    pub created_at: DateTime<Utc>,
    /// Логин автора.
    pub author_login: String,
    /// Принадлежит ли объявление текущему пользователю. Сервер опускает
    /// поле, когда оно ложно.
    #[serde(default)]
    pub is_owner: bool,
}

#[derive(Debug, Clone, Default)]
/// Параметры выборки ленты объявлений.
///
/// Незаполненные поля не отправляются, и сервер применяет свои значения
/// по умолчанию (первая страница по 10 объявлений, сортировка по дате
/// создания по убыванию).
pub struct ListAdsParams {
    /// Номер страницы, начиная с 1. `0` отключает пагинацию.
    pub page: Option<u32>,
    /// Размер страницы. `0` отключает пагинацию.
    pub limit: Option<u32>,
    /// Поле сортировки: `created_at` или `price`.
    pub sort_by: Option<String>,
    /// Направление сортировки: `asc` или `desc`.
    pub sort_order: Option<String>,
    /// Минимальная цена. `0` снимает ограничение.
    pub min_price: Option<f64>,
    /// Максимальная цена. `0` снимает ограничение.
    pub max_price: Option<f64>,
}
