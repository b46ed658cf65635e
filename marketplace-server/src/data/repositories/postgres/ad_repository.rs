use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::data::ad_repository::{AdQuery, AdRepository, AdWithAuthor, NewAd};
use crate::domain::ad::Advertisement;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct PostgresAdRepository {
    pool: PgPool,
}

impl PostgresAdRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AdRow {
    id: i64,
    title: String,
    description: String,
    image_url: String,
    price: f64,
    user_id: i64,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct AdWithAuthorRow {
    id: i64,
    title: String,
    description: String,
    image_url: String,
    price: f64,
    user_id: i64,
    created_at: DateTime<Utc>,
    author_login: String,
}

#[async_trait]
impl AdRepository for PostgresAdRepository {
    async fn create_ad(&self, input: NewAd) -> Result<Advertisement, DomainError> {
        let row = sqlx::query_as::<_, AdRow>(
            r#"
            INSERT INTO advertisements (title, description, image_url, price, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, image_url, price, user_id, created_at
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.image_url)
        .bind(input.price)
        .bind(input.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_ad_db_error)?;

        map_row_to_ad(row)
    }

    async fn list_ads(&self, query: AdQuery) -> Result<Vec<AdWithAuthor>, DomainError> {
        let mut qb = build_list_query(&query);

        let rows = qb
            .build_query_as::<AdWithAuthorRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_ad_db_error)?;

        rows.into_iter()
            .map(|row| {
                let AdWithAuthorRow {
                    id,
                    title,
                    description,
                    image_url,
                    price,
                    user_id,
                    created_at,
                    author_login,
                } = row;
                let ad = map_row_to_ad(AdRow {
                    id,
                    title,
                    description,
                    image_url,
                    price,
                    user_id,
                    created_at,
                })?;
                Ok(AdWithAuthor { ad, author_login })
            })
            .collect()
    }
}

/// Builds the filtered/sorted/paginated listing query. A price bound of
/// zero emits no predicate, and pagination is skipped entirely unless both
/// page and limit are positive. Sort field/direction come from whitelisted
/// enums, never from raw input.
fn build_list_query(query: &AdQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(
        "SELECT a.id, a.title, a.description, a.image_url, a.price, a.user_id, a.created_at, \
         u.login AS author_login \
         FROM advertisements a \
         JOIN users u ON u.id = a.user_id \
         WHERE a.deleted_at IS NULL",
    );

    if query.min_price > 0.0 {
        qb.push(" AND a.price >= ");
        qb.push_bind(query.min_price);
    }
    if query.max_price > 0.0 {
        qb.push(" AND a.price <= ");
        qb.push_bind(query.max_price);
    }

    qb.push(" ORDER BY ");
    qb.push(query.sort.as_sql());
    qb.push(" ");
    qb.push(query.order.as_sql());

    if query.page > 0 && query.limit > 0 {
        let limit = i64::from(query.limit);
        let offset = (i64::from(query.page) - 1) * limit;
        qb.push(" LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);
    }

    qb
}

fn map_row_to_ad(row: AdRow) -> Result<Advertisement, DomainError> {
    Advertisement::new(
        row.id,
        row.title,
        row.description,
        row.image_url,
        row.price,
        row.user_id,
        row.created_at,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_ad_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return DomainError::NotFound("owner".to_string());
    }
    DomainError::Unexpected(err.to_string())
}

#[cfg(test)]
mod tests {
    use crate::data::ad_repository::AdQuery;
    use crate::domain::ad::{SortField, SortOrder};

    use super::build_list_query;

    fn base_query() -> AdQuery {
        AdQuery {
            min_price: 0.0,
            max_price: 0.0,
            sort: SortField::CreatedAt,
            order: SortOrder::Desc,
            page: 1,
            limit: 10,
        }
    }

    #[test]
    fn zero_price_bounds_emit_no_predicates() {
        let qb = build_list_query(&base_query());
        let sql = qb.sql();
        assert!(!sql.contains("a.price >="));
        assert!(!sql.contains("a.price <="));
    }

    #[test]
    fn positive_price_bounds_emit_predicates() {
        let qb = build_list_query(&AdQuery {
            min_price: 10.0,
            max_price: 100.0,
            ..base_query()
        });
        let sql = qb.sql();
        assert!(sql.contains("a.price >= $1"));
        assert!(sql.contains("a.price <= $2"));
    }

    #[test]
    fn default_sort_is_created_at_desc() {
        let qb = build_list_query(&base_query());
        assert!(qb.sql().contains("ORDER BY a.created_at DESC"));
    }

    #[test]
    fn price_ascending_sort_is_applied() {
        let qb = build_list_query(&AdQuery {
            sort: SortField::Price,
            order: SortOrder::Asc,
            ..base_query()
        });
        assert!(qb.sql().contains("ORDER BY a.price ASC"));
    }

    #[test]
    fn zero_page_or_limit_disables_pagination() {
        for (page, limit) in [(0, 10), (1, 0), (0, 0)] {
            let qb = build_list_query(&AdQuery {
                page,
                limit,
                ..base_query()
            });
            let sql = qb.sql();
            assert!(!sql.contains("LIMIT"), "page={page} limit={limit}");
            assert!(!sql.contains("OFFSET"), "page={page} limit={limit}");
        }
    }

    #[test]
    fn pagination_emits_limit_and_offset() {
        let qb = build_list_query(&AdQuery {
            page: 2,
            limit: 10,
            ..base_query()
        });
        let sql = qb.sql();
        assert!(sql.contains("LIMIT $1"));
        assert!(sql.contains("OFFSET $2"));
    }
}
