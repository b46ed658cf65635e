use async_trait::async_trait;

use crate::domain::ad::{Advertisement, SortField, SortOrder};
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct NewAd {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) image_url: String,
    pub(crate) price: f64,
    pub(crate) user_id: i64,
}

/// Normalized listing query: sort inputs are already coerced to valid
/// values, price bounds of zero mean "no bound", page/limit of zero mean
/// "no pagination".
#[derive(Debug, Clone, Copy)]
pub(crate) struct AdQuery {
    pub(crate) min_price: f64,
    pub(crate) max_price: f64,
    pub(crate) sort: SortField,
    pub(crate) order: SortOrder,
    pub(crate) page: u32,
    pub(crate) limit: u32,
}

#[derive(Debug, Clone)]
pub(crate) struct AdWithAuthor {
    pub(crate) ad: Advertisement,
    pub(crate) author_login: String,
}

#[async_trait]
pub(crate) trait AdRepository: Send + Sync {
    async fn create_ad(&self, input: NewAd) -> Result<Advertisement, DomainError>;
    async fn list_ads(&self, query: AdQuery) -> Result<Vec<AdWithAuthor>, DomainError>;
}
