use crate::{
    abstract_trait::ReviewQueryRepositoryTrait, config::ConnectionPool,
    domain::requests::FindAllReviews, errors::RepositoryError, model::Review as ReviewModel,
    repository::limit_offset,
};
use async_trait::async_trait;
use tracing::{error, info};

#[derive(Clone)]
pub struct ReviewQueryRepository {
    db: ConnectionPool,
}

impl ReviewQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewQueryRepositoryTrait for ReviewQueryRepository {
    async fn find_all_by_product(
        &self,
        product_id: i32,
        req: &FindAllReviews,
    ) -> Result<(Vec<ReviewModel>, i64), RepositoryError> {
        info!("🔍 Fetching reviews for product {}", product_id);

        let (limit, offset) = limit_offset(req.page, req.page_size);

        let reviews = sqlx::query_as::<_, ReviewModel>(
            r#"
            SELECT r.*
            FROM reviews r
            WHERE r.product_id = $1
            ORDER BY r.created_at DESC, r.review_id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(product_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch reviews for product {}: {:?}", product_id, e);
            RepositoryError::from(e)
        })?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM reviews WHERE product_id = $1")
                .bind(product_id)
                .fetch_one(&self.db)
                .await
                .map_err(|e| {
                    error!("❌ Failed to count reviews for product {}: {:?}", product_id, e);
                    RepositoryError::from(e)
                })?;

        Ok((reviews, total))
    }

    async fn find_by_id(
        &self,
        product_id: i32,
        review_id: i32,
    ) -> Result<Option<ReviewModel>, RepositoryError> {
        sqlx::query_as::<_, ReviewModel>(
            "SELECT * FROM reviews WHERE product_id = $1 AND review_id = $2",
        )
        .bind(product_id)
        .bind(review_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch review {}: {:?}", review_id, e);
            RepositoryError::from(e)
        })
    }
}
