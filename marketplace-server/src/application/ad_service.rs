use chrono::{DateTime, Utc};
use tracing::info;

use crate::data::ad_repository::{AdQuery, AdRepository, NewAd};
use crate::domain::ad::{AdFilter, Advertisement, CreateAdRequest, SortField, SortOrder};
use crate::domain::error::DomainError;

/// One row of a listing response: the advertisement projected together
/// with its author's login and the viewer-relative ownership flag.
#[derive(Debug, Clone)]
pub(crate) struct AdListing {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) image_url: String,
    pub(crate) price: f64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) author_login: String,
    pub(crate) is_owner: bool,
}

pub(crate) struct AdService<R: AdRepository> {
    repo: R,
}

impl<R: AdRepository> AdService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn create_ad(
        &self,
        owner_id: i64,
        req: CreateAdRequest,
    ) -> Result<Advertisement, DomainError> {
        let req = req.validate()?;

        let new_ad = NewAd {
            title: req.title,
            description: req.description,
            image_url: req.image_url,
            price: req.price,
            user_id: owner_id,
        };
        let ad = self.repo.create_ad(new_ad).await?;

        info!(ad_id = ad.id, user_id = owner_id, "advertisement created");
        Ok(ad)
    }

    /// Lists advertisements for the given filter. Unknown sort inputs are
    /// silently coerced to `created_at`/`desc` rather than rejected; an
    /// empty match yields an empty vec.
    pub(crate) async fn list_ads(
        &self,
        filter: AdFilter,
        viewer_id: Option<i64>,
    ) -> Result<Vec<AdListing>, DomainError> {
        let query = AdQuery {
            min_price: filter.min_price,
            max_price: filter.max_price,
            sort: SortField::parse(&filter.sort_by),
            order: SortOrder::parse(&filter.sort_order),
            page: filter.page,
            limit: filter.limit,
        };

        let rows = self.repo.list_ads(query).await?;

        Ok(rows
            .into_iter()
            .map(|row| AdListing {
                id: row.ad.id,
                title: row.ad.title,
                description: row.ad.description,
                image_url: row.ad.image_url,
                price: row.ad.price,
                created_at: row.ad.created_at,
                author_login: row.author_login,
                is_owner: viewer_id == Some(row.ad.user_id),
            })
            .collect())
    }
}
