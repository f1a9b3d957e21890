use crate::{
    abstract_trait::{
        DynProductQueryRepository, DynReviewCommandRepository, DynReviewQueryRepository,
        ReviewCommandServiceTrait,
    },
    domain::{
        Session,
        requests::{CreateReviewRecord, CreateReviewRequest, UpdateReviewRequest},
        responses::{ApiResponse, ReviewResponse},
    },
    errors::ServiceError,
    model::Review,
    service::customer::CustomerProfiles,
    utils::{Method, OperationTracker},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use tracing::{info, warn};

pub struct ReviewCommandService {
    query: DynReviewQueryRepository,
    command: DynReviewCommandRepository,
    product_query: DynProductQueryRepository,
    profiles: CustomerProfiles,
    tracker: OperationTracker,
}

impl ReviewCommandService {
    pub(super) fn new(
        query: DynReviewQueryRepository,
        command: DynReviewCommandRepository,
        product_query: DynProductQueryRepository,
        profiles: CustomerProfiles,
        registry: &mut Registry,
    ) -> Self {
        Self {
            query,
            command,
            product_query,
            profiles,
            tracker: OperationTracker::new("review-command-service", registry),
        }
    }

    async fn insert(
        &self,
        session: &Session,
        product_id: i32,
        req: &CreateReviewRequest,
    ) -> Result<Review, ServiceError> {
        if self.product_query.find_by_id(product_id).await?.is_none() {
            return Err(ServiceError::not_found("Product", product_id));
        }

        let customer = self.profiles.get_or_create(session.user_id).await?;
        let record = CreateReviewRecord {
            product_id,
            customer_id: customer.customer_id,
            summary: req.summary.clone(),
            details: req.details.clone(),
            rating: req.rating,
        };

        Ok(self.command.create(&record).await?)
    }

    /// Loads the review and checks that the caller wrote it or is staff.
    async fn authorized(
        &self,
        session: &Session,
        product_id: i32,
        review_id: i32,
    ) -> Result<Review, ServiceError> {
        let review = self
            .query
            .find_by_id(product_id, review_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Review", review_id))?;

        if session.is_staff {
            return Ok(review);
        }

        let author = self.profiles.query.find_by_id(review.customer_id).await?;
        match author {
            Some(customer) if customer.user_id == session.user_id => Ok(review),
            _ => {
                warn!(
                    "⚠️ User {} tried to modify review {review_id} they did not write",
                    session.user_id
                );
                Err(ServiceError::Forbidden(
                    "You may only modify your own reviews".into(),
                ))
            }
        }
    }

    async fn modify(
        &self,
        session: &Session,
        product_id: i32,
        review_id: i32,
        req: &UpdateReviewRequest,
    ) -> Result<Review, ServiceError> {
        self.authorized(session, product_id, review_id).await?;
        Ok(self.command.update(review_id, req).await?)
    }

    async fn remove(
        &self,
        session: &Session,
        product_id: i32,
        review_id: i32,
    ) -> Result<(), ServiceError> {
        self.authorized(session, product_id, review_id).await?;
        Ok(self.command.delete(review_id).await?)
    }
}

#[async_trait]
impl ReviewCommandServiceTrait for ReviewCommandService {
    async fn create(
        &self,
        session: &Session,
        product_id: i32,
        req: &CreateReviewRequest,
    ) -> Result<ApiResponse<ReviewResponse>, ServiceError> {
        info!(
            "⭐ User {} reviewing product {product_id} with rating {}",
            session.user_id, req.rating
        );

        let method = Method::Post;
        let tracing_ctx = self.tracker.start(
            "CreateReview",
            vec![
                KeyValue::new("component", "review"),
                KeyValue::new("product.id", product_id as i64),
                KeyValue::new("user.id", session.user_id as i64),
            ],
        );

        let result = self.insert(session, product_id, req).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Review created successfully");

        Ok(ApiResponse::success(
            "Review created successfully",
            ReviewResponse::from(result?),
        ))
    }

    async fn update(
        &self,
        session: &Session,
        product_id: i32,
        review_id: i32,
        req: &UpdateReviewRequest,
    ) -> Result<ApiResponse<ReviewResponse>, ServiceError> {
        let method = Method::Put;
        let tracing_ctx = self.tracker.start(
            "UpdateReview",
            vec![
                KeyValue::new("component", "review"),
                KeyValue::new("review.id", review_id as i64),
            ],
        );

        let result = self.modify(session, product_id, review_id, req).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Review updated successfully");

        Ok(ApiResponse::success(
            "Review updated successfully",
            ReviewResponse::from(result?),
        ))
    }

    async fn delete(
        &self,
        session: &Session,
        product_id: i32,
        review_id: i32,
    ) -> Result<ApiResponse<()>, ServiceError> {
        info!("🗑️ Deleting review {review_id} of product {product_id}");

        let method = Method::Delete;
        let tracing_ctx = self.tracker.start(
            "DeleteReview",
            vec![
                KeyValue::new("component", "review"),
                KeyValue::new("review.id", review_id as i64),
            ],
        );

        let result = self.remove(session, product_id, review_id).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Review deleted successfully");

        result?;
        Ok(ApiResponse::success("Review deleted successfully", ()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::{
        MockCustomerCommandRepositoryTrait, MockCustomerQueryRepositoryTrait,
        MockProductQueryRepositoryTrait, MockReviewCommandRepositoryTrait,
        MockReviewQueryRepositoryTrait,
    };
    use crate::service::test_support::{customer, product, timestamp};
    use std::sync::Arc;

    fn review(id: i32, product_id: i32, customer_id: i32) -> Review {
        Review {
            review_id: id,
            product_id,
            customer_id,
            summary: "Lovely".into(),
            details: None,
            rating: 5,
            created_at: timestamp(),
        }
    }

    struct Mocks {
        query: MockReviewQueryRepositoryTrait,
        command: MockReviewCommandRepositoryTrait,
        products: MockProductQueryRepositoryTrait,
        customers: MockCustomerQueryRepositoryTrait,
        customer_command: MockCustomerCommandRepositoryTrait,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                query: MockReviewQueryRepositoryTrait::new(),
                command: MockReviewCommandRepositoryTrait::new(),
                products: MockProductQueryRepositoryTrait::new(),
                customers: MockCustomerQueryRepositoryTrait::new(),
                customer_command: MockCustomerCommandRepositoryTrait::new(),
            }
        }

        fn build(self) -> ReviewCommandService {
            ReviewCommandService::new(
                Arc::new(self.query),
                Arc::new(self.command),
                Arc::new(self.products),
                CustomerProfiles::new(Arc::new(self.customers), Arc::new(self.customer_command)),
                &mut Registry::default(),
            )
        }
    }

    fn create_request() -> CreateReviewRequest {
        CreateReviewRequest {
            summary: "Lovely".into(),
            details: None,
            rating: 5,
        }
    }

    #[tokio::test]
    async fn review_of_unknown_product_is_not_found() {
        let mut mocks = Mocks::new();
        mocks.products.expect_find_by_id().returning(|_| Ok(None));
        mocks.command.expect_create().never();

        let err = mocks
            .build()
            .create(&Session::new(2, false), 40, &create_request())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn first_review_creates_customer_profile() {
        let mut mocks = Mocks::new();
        mocks
            .products
            .expect_find_by_id()
            .returning(|id| Ok(Some(product(id, "4.00", 1))));
        mocks.customers.expect_find_by_user_id().returning(|_| Ok(None));
        mocks
            .customer_command
            .expect_create()
            .times(1)
            .returning(|r| Ok(customer(15, r.user_id)));
        mocks
            .command
            .expect_create()
            .withf(|r| r.customer_id == 15 && r.product_id == 40)
            .returning(|r| Ok(review(1, r.product_id, r.customer_id)));

        let response = mocks
            .build()
            .create(&Session::new(2, false), 40, &create_request())
            .await
            .unwrap();

        assert_eq!(response.data.customer_id, 15);
    }

    #[tokio::test]
    async fn only_author_may_delete() {
        let mut mocks = Mocks::new();
        mocks
            .query
            .expect_find_by_id()
            .returning(|product_id, id| Ok(Some(review(id, product_id, 15))));
        mocks
            .customers
            .expect_find_by_id()
            .returning(|id| Ok(Some(customer(id, 2))));
        mocks.command.expect_delete().never();

        let err = mocks
            .build()
            .delete(&Session::new(3, false), 40, 1)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[tokio::test]
    async fn staff_may_delete_any_review() {
        let mut mocks = Mocks::new();
        mocks
            .query
            .expect_find_by_id()
            .returning(|product_id, id| Ok(Some(review(id, product_id, 15))));
        mocks.command.expect_delete().times(1).returning(|_| Ok(()));

        assert!(
            mocks
                .build()
                .delete(&Session::new(1, true), 40, 1)
                .await
                .is_ok()
        );
    }
}
