use axum::{
    Json,
    extract::{Query, State},
    extract::rejection::JsonRejection,
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::ad_service::AdListing;
use crate::domain::ad::{AdFilter, Advertisement, CreateAdRequest};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::middleware::auth::{AuthenticatedUser, MaybeUser};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreateAdDto {
    #[validate(length(min = 5, max = 100))]
    pub(crate) title: String,
    #[validate(length(min = 10, max = 1000))]
    pub(crate) description: String,
    pub(crate) image_url: String,
    #[validate(range(exclusive_min = 0.0))]
    pub(crate) price: f64,
}

/// Raw listing query parameters. Values are kept as strings and parsed
/// leniently: a malformed number becomes 0 (disabling that bound or
/// pagination) instead of failing the request.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub(crate) struct ListAdsQuery {
    pub(crate) page: Option<String>,
    pub(crate) limit: Option<String>,
    pub(crate) sort_by: Option<String>,
    pub(crate) sort_order: Option<String>,
    pub(crate) min_price: Option<String>,
    pub(crate) max_price: Option<String>,
}

impl ListAdsQuery {
    const DEFAULT_PAGE: u32 = 1;
    const DEFAULT_LIMIT: u32 = 10;

    pub(crate) fn into_filter(self) -> AdFilter {
        AdFilter {
            page: parse_or_zero(self.page, Self::DEFAULT_PAGE),
            limit: parse_or_zero(self.limit, Self::DEFAULT_LIMIT),
            sort_by: self.sort_by.unwrap_or_else(|| "created_at".to_string()),
            sort_order: self.sort_order.unwrap_or_else(|| "desc".to_string()),
            min_price: parse_or_zero(self.min_price, 0.0),
            max_price: parse_or_zero(self.max_price, 0.0),
        }
    }
}

fn parse_or_zero<T>(raw: Option<String>, default: T) -> T
where
    T: std::str::FromStr + Default,
{
    match raw {
        Some(value) => value.parse().unwrap_or_default(),
        None => default,
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AdDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) image_url: String,
    pub(crate) price: f64,
    pub(crate) user_id: i64,
    pub(crate) created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AdListingDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) image_url: String,
    pub(crate) price: f64,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) author_login: String,
    #[serde(skip_serializing_if = "is_false")]
    pub(crate) is_owner: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl From<Advertisement> for AdDto {
    fn from(ad: Advertisement) -> Self {
        Self {
            id: ad.id,
            title: ad.title,
            description: ad.description,
            image_url: ad.image_url,
            price: ad.price,
            user_id: ad.user_id,
            created_at: ad.created_at,
        }
    }
}

impl From<AdListing> for AdListingDto {
    fn from(listing: AdListing) -> Self {
        Self {
            id: listing.id,
            title: listing.title,
            description: listing.description,
            image_url: listing.image_url,
            price: listing.price,
            created_at: listing.created_at,
            author_login: listing.author_login,
            is_owner: listing.is_owner,
        }
    }
}

#[utoipa::path(
    post,
    path = "/ads",
    tag = "ads",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreateAdDto,
    responses(
        (status = 201, description = "Advertisement created", body = AdDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_ad(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    payload: Result<Json<CreateAdDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<AdDto>)> {
    let Json(dto) = payload?;
    dto.validate()?;

    let req = CreateAdRequest {
        title: dto.title,
        description: dto.description,
        image_url: dto.image_url,
        price: dto.price,
    };

    let ad = state.ad_service.create_ad(auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(ad.into())))
}

#[utoipa::path(
    get,
    path = "/ads",
    tag = "ads",
    params(
        ("page" = Option<u32>, Query, description = "Page number (default 1, 0 disables pagination)"),
        ("limit" = Option<u32>, Query, description = "Items per page (default 10, 0 disables pagination)"),
        ("sort_by" = Option<String>, Query, description = "created_at or price (default created_at)"),
        ("sort_order" = Option<String>, Query, description = "asc or desc (default desc)"),
        ("min_price" = Option<f64>, Query, description = "Minimum price (0 = unbounded)"),
        ("max_price" = Option<f64>, Query, description = "Maximum price (0 = unbounded)")
    ),
    responses(
        (status = 200, description = "Advertisements listed", body = [AdListingDto]),
        (status = 401, description = "Invalid bearer token presented"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_ads(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Query(query): Query<ListAdsQuery>,
) -> AppResult<(StatusCode, Json<Vec<AdListingDto>>)> {
    let filter = query.into_filter();
    let viewer_id = viewer.map(|user| user.user_id);

    let listings = state.ad_service.list_ads(filter, viewer_id).await?;
    let body = listings.into_iter().map(AdListingDto::from).collect();

    Ok((StatusCode::OK, Json(body)))
}

#[cfg(test)]
mod tests {
    use super::{AdListingDto, ListAdsQuery};
    use chrono::Utc;

    #[test]
    fn empty_query_takes_defaults() {
        let filter = ListAdsQuery::default().into_filter();
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, 10);
        assert_eq!(filter.sort_by, "created_at");
        assert_eq!(filter.sort_order, "desc");
        assert_eq!(filter.min_price, 0.0);
        assert_eq!(filter.max_price, 0.0);
    }

    #[test]
    fn malformed_numbers_silently_become_zero() {
        let query = ListAdsQuery {
            page: Some("abc".to_string()),
            limit: Some("-".to_string()),
            min_price: Some("cheap".to_string()),
            max_price: Some("1e3x".to_string()),
            ..ListAdsQuery::default()
        };
        let filter = query.into_filter();
        assert_eq!(filter.page, 0);
        assert_eq!(filter.limit, 0);
        assert_eq!(filter.min_price, 0.0);
        assert_eq!(filter.max_price, 0.0);
    }

    #[test]
    fn provided_values_are_parsed() {
        let query = ListAdsQuery {
            page: Some("2".to_string()),
            limit: Some("25".to_string()),
            sort_by: Some("price".to_string()),
            sort_order: Some("asc".to_string()),
            min_price: Some("9.5".to_string()),
            max_price: Some("100".to_string()),
        };
        let filter = query.into_filter();
        assert_eq!(filter.page, 2);
        assert_eq!(filter.limit, 25);
        assert_eq!(filter.sort_by, "price");
        assert_eq!(filter.sort_order, "asc");
        assert_eq!(filter.min_price, 9.5);
        assert_eq!(filter.max_price, 100.0);
    }

    #[test]
    fn is_owner_is_omitted_when_false() {
        let dto = AdListingDto {
            id: 1,
            title: "Mountain bike".to_string(),
            description: "Barely used, full suspension".to_string(),
            image_url: "https://img.example.com/bike.jpg".to_string(),
            price: 250.0,
            created_at: Utc::now(),
            author_login: "alice42".to_string(),
            is_owner: false,
        };
        let json = serde_json::to_value(&dto).expect("must serialize");
        assert!(json.get("is_owner").is_none());

        let owned = AdListingDto {
            is_owner: true,
            ..dto
        };
        let json = serde_json::to_value(&owned).expect("must serialize");
        assert_eq!(json["is_owner"], serde_json::Value::Bool(true));
    }
}
