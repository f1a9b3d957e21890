use crate::{
    abstract_trait::ReviewCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateReviewRecord, UpdateReviewRequest},
    errors::RepositoryError,
    model::Review as ReviewModel,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct ReviewCommandRepository {
    db: ConnectionPool,
}

impl ReviewCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewCommandRepositoryTrait for ReviewCommandRepository {
    async fn create(&self, req: &CreateReviewRecord) -> Result<ReviewModel, RepositoryError> {
        let review = sqlx::query_as::<_, ReviewModel>(
            r#"
            INSERT INTO reviews (product_id, customer_id, summary, details, rating)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(req.product_id)
        .bind(req.customer_id)
        .bind(&req.summary)
        .bind(&req.details)
        .bind(req.rating)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to create review for product {}: {:?}",
                req.product_id, err
            );
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Created review ID {} for product {}",
            review.review_id, review.product_id
        );
        Ok(review)
    }

    async fn update(
        &self,
        review_id: i32,
        req: &UpdateReviewRequest,
    ) -> Result<ReviewModel, RepositoryError> {
        let review = sqlx::query_as::<_, ReviewModel>(
            r#"
            UPDATE reviews
            SET summary = $2, details = $3, rating = $4
            WHERE review_id = $1
            RETURNING *
            "#,
        )
        .bind(review_id)
        .bind(&req.summary)
        .bind(&req.details)
        .bind(req.rating)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to update review {}: {:?}", review_id, err);
            RepositoryError::from(err)
        })?;

        info!("🔄 Updated review ID {}", review.review_id);
        Ok(review)
    }

    async fn delete(&self, review_id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM reviews WHERE review_id = $1")
            .bind(review_id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete review {}: {:?}", review_id, e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted review ID {}", review_id);
        Ok(())
    }
}
