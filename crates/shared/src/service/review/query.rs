use crate::{
    abstract_trait::{DynProductQueryRepository, DynReviewQueryRepository, ReviewQueryServiceTrait},
    domain::{
        requests::{FindAllReviews, normalize_page},
        responses::{ApiResponse, ApiResponsePagination, Pagination, ReviewResponse},
    },
    errors::ServiceError,
    model::Review,
    utils::{Method, OperationTracker},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use tracing::info;

pub struct ReviewQueryService {
    query: DynReviewQueryRepository,
    product_query: DynProductQueryRepository,
    tracker: OperationTracker,
}

impl ReviewQueryService {
    pub fn new(
        query: DynReviewQueryRepository,
        product_query: DynProductQueryRepository,
        registry: &mut Registry,
    ) -> Self {
        Self {
            query,
            product_query,
            tracker: OperationTracker::new("review-query-service", registry),
        }
    }

    async fn list(
        &self,
        product_id: i32,
        req: &FindAllReviews,
    ) -> Result<(Vec<Review>, i64), ServiceError> {
        if self.product_query.find_by_id(product_id).await?.is_none() {
            return Err(ServiceError::not_found("Product", product_id));
        }
        Ok(self.query.find_all_by_product(product_id, req).await?)
    }
}

#[async_trait]
impl ReviewQueryServiceTrait for ReviewQueryService {
    async fn find_all(
        &self,
        product_id: i32,
        req: &FindAllReviews,
    ) -> Result<ApiResponsePagination<Vec<ReviewResponse>>, ServiceError> {
        let (page, page_size) = normalize_page(req.page, req.page_size);
        let req = FindAllReviews { page, page_size };

        info!("⭐ Listing reviews of product {product_id} | page: {page}");

        let method = Method::Get;
        let tracing_ctx = self.tracker.start(
            "FindAllReviews",
            vec![
                KeyValue::new("component", "review"),
                KeyValue::new("product.id", product_id as i64),
            ],
        );

        let result = self.list(product_id, &req).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Reviews fetched successfully");

        let (reviews, total) = result?;
        let data = reviews.into_iter().map(ReviewResponse::from).collect();

        Ok(ApiResponsePagination::success(
            "Reviews fetched successfully",
            data,
            Pagination::new(page, page_size, total),
        ))
    }

    async fn find_by_id(
        &self,
        product_id: i32,
        review_id: i32,
    ) -> Result<ApiResponse<ReviewResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracker.start(
            "FindReviewById",
            vec![
                KeyValue::new("component", "review"),
                KeyValue::new("product.id", product_id as i64),
                KeyValue::new("review.id", review_id as i64),
            ],
        );

        let result = match self.query.find_by_id(product_id, review_id).await {
            Ok(Some(review)) => Ok(ReviewResponse::from(review)),
            Ok(None) => Err(ServiceError::not_found("Review", review_id)),
            Err(e) => Err(ServiceError::Repo(e)),
        };
        self.tracker
            .finish(&tracing_ctx, method, &result, "Review fetched successfully");

        Ok(ApiResponse::success("Review fetched successfully", result?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::{MockProductQueryRepositoryTrait, MockReviewQueryRepositoryTrait};
    use std::sync::Arc;

    #[tokio::test]
    async fn reviews_of_unknown_product_are_not_found() {
        let mut products = MockProductQueryRepositoryTrait::new();
        products.expect_find_by_id().returning(|_| Ok(None));
        let mut query = MockReviewQueryRepositoryTrait::new();
        query.expect_find_all_by_product().never();

        let service =
            ReviewQueryService::new(Arc::new(query), Arc::new(products), &mut Registry::default());
        let req = FindAllReviews {
            page: 1,
            page_size: 10,
        };

        let err = service.find_all(5, &req).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
