use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Advertisement {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) image_url: String,
    pub(crate) price: f64,
    pub(crate) user_id: i64,
    pub(crate) created_at: DateTime<Utc>,
}

impl Advertisement {
    pub(crate) fn new(
        id: i64,
        title: impl Into<String>,
        description: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
        user_id: i64,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_positive_i64("id", id)?;
        validate_positive_i64("user_id", user_id)?;
        let title = normalize_title(&title.into())?;
        let description = normalize_description(&description.into())?;
        let image_url = validate_image_url(image_url.into())?;
        validate_price(price)?;

        Ok(Self {
            id,
            title,
            description,
            image_url,
            price,
            user_id,
            created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreateAdRequest {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) image_url: String,
    pub(crate) price: f64,
}

impl CreateAdRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let title = normalize_title(&self.title)?;
        let description = normalize_description(&self.description)?;
        let image_url = validate_image_url(self.image_url)?;
        validate_price(self.price)?;

        Ok(Self {
            title,
            description,
            image_url,
            price: self.price,
        })
    }
}

/// Listing filter as it arrives from the query string: sort inputs are kept
/// raw and coerced to [`SortField`]/[`SortOrder`] at query time. A zero
/// price bound means "unbounded", a zero page or limit disables pagination.
#[derive(Debug, Clone, Default)]
pub(crate) struct AdFilter {
    pub(crate) page: u32,
    pub(crate) limit: u32,
    pub(crate) sort_by: String,
    pub(crate) sort_order: String,
    pub(crate) min_price: f64,
    pub(crate) max_price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SortField {
    CreatedAt,
    Price,
}

impl SortField {
    /// Invalid input silently falls back to `CreatedAt`; listing never
    /// rejects a sort field.
    pub(crate) fn parse(raw: &str) -> Self {
        match raw {
            "price" => SortField::Price,
            _ => SortField::CreatedAt,
        }
    }

    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            SortField::CreatedAt => "a.created_at",
            SortField::Price => "a.price",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Invalid input silently falls back to `Desc`.
    pub(crate) fn parse(raw: &str) -> Self {
        match raw {
            "asc" => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

fn validate_positive_i64(field: &'static str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::Validation {
            field,
            message: "must be > 0",
        });
    }
    Ok(())
}

fn normalize_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    let len = title.chars().count();
    if len < 5 || len > 100 {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be 5..100 chars",
        });
    }
    Ok(title.to_string())
}

fn normalize_description(description: &str) -> Result<String, DomainError> {
    let description = description.trim();
    let len = description.chars().count();
    if len < 10 || len > 1000 {
        return Err(DomainError::Validation {
            field: "description",
            message: "must be 10..1000 chars",
        });
    }
    Ok(description.to_string())
}

fn validate_image_url(image_url: String) -> Result<String, DomainError> {
    if !image_url.starts_with("http") {
        return Err(DomainError::Validation {
            field: "image_url",
            message: "must start with an http(s) scheme",
        });
    }
    Ok(image_url)
}

fn validate_price(price: f64) -> Result<(), DomainError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(DomainError::Validation {
            field: "price",
            message: "must be > 0",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{Advertisement, CreateAdRequest, DomainError, SortField, SortOrder};

    fn valid_request() -> CreateAdRequest {
        CreateAdRequest {
            title: "Mountain bike".to_string(),
            description: "Barely used, full suspension".to_string(),
            image_url: "https://img.example.com/bike.jpg".to_string(),
            price: 250.0,
        }
    }

    #[test]
    fn create_ad_request_validate_rejects_short_title() {
        let req = CreateAdRequest {
            title: "bike".to_string(),
            ..valid_request()
        };
        let err = req.validate().expect_err("title must be rejected");
        assert_validation_field(err, "title");
    }

    #[test]
    fn create_ad_request_validate_rejects_short_description() {
        let req = CreateAdRequest {
            description: "too short".to_string(),
            ..valid_request()
        };
        let err = req.validate().expect_err("description must be rejected");
        assert_validation_field(err, "description");
    }

    #[test]
    fn create_ad_request_validate_rejects_non_http_url() {
        let req = CreateAdRequest {
            image_url: "ftp://img.example.com/bike.jpg".to_string(),
            ..valid_request()
        };
        let err = req.validate().expect_err("image_url must be rejected");
        assert_validation_field(err, "image_url");
    }

    #[test]
    fn create_ad_request_validate_rejects_non_positive_price() {
        for price in [0.0, -5.0, f64::NAN] {
            let req = CreateAdRequest {
                price,
                ..valid_request()
            };
            let err = req.validate().expect_err("price must be rejected");
            assert_validation_field(err, "price");
        }
    }

    #[test]
    fn create_ad_request_validate_trims_text_fields() {
        let req = CreateAdRequest {
            title: "  Mountain bike  ".to_string(),
            description: "  Barely used, full suspension  ".to_string(),
            ..valid_request()
        };
        let validated = req.validate().expect("must validate");
        assert_eq!(validated.title, "Mountain bike");
        assert_eq!(validated.description, "Barely used, full suspension");
    }

    #[test]
    fn advertisement_new_rejects_non_positive_owner() {
        let err = Advertisement::new(
            1,
            "Mountain bike",
            "Barely used, full suspension",
            "https://img.example.com/bike.jpg",
            250.0,
            0,
            Utc::now(),
        )
        .expect_err("user_id must be > 0");
        assert_validation_field(err, "user_id");
    }

    #[test]
    fn sort_field_falls_back_to_created_at() {
        assert_eq!(SortField::parse("price"), SortField::Price);
        assert_eq!(SortField::parse("created_at"), SortField::CreatedAt);
        assert_eq!(SortField::parse("popularity"), SortField::CreatedAt);
        assert_eq!(SortField::parse(""), SortField::CreatedAt);
    }

    #[test]
    fn sort_order_falls_back_to_desc() {
        assert_eq!(SortOrder::parse("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::parse("desc"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("sideways"), SortOrder::Desc);
    }

    fn assert_validation_field(err: DomainError, expected_field: &'static str) {
        match err {
            DomainError::Validation { field, .. } => assert_eq!(field, expected_field),
            _ => panic!("expected DomainError::Validation"),
        }
    }
}
