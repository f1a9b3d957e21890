use crate::{
    domain::{
        Session,
        requests::{CreateReviewRecord, CreateReviewRequest, FindAllReviews, UpdateReviewRequest},
        responses::{ApiResponse, ApiResponsePagination, ReviewResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Review as ReviewModel,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynReviewQueryRepository = Arc<dyn ReviewQueryRepositoryTrait + Send + Sync>;
pub type DynReviewCommandRepository = Arc<dyn ReviewCommandRepositoryTrait + Send + Sync>;
pub type DynReviewQueryService = Arc<dyn ReviewQueryServiceTrait + Send + Sync>;
pub type DynReviewCommandService = Arc<dyn ReviewCommandServiceTrait + Send + Sync>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewQueryRepositoryTrait {
    async fn find_all_by_product(
        &self,
        product_id: i32,
        req: &FindAllReviews,
    ) -> Result<(Vec<ReviewModel>, i64), RepositoryError>;
    async fn find_by_id(
        &self,
        product_id: i32,
        review_id: i32,
    ) -> Result<Option<ReviewModel>, RepositoryError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewCommandRepositoryTrait {
    async fn create(&self, req: &CreateReviewRecord) -> Result<ReviewModel, RepositoryError>;
    async fn update(
        &self,
        review_id: i32,
        req: &UpdateReviewRequest,
    ) -> Result<ReviewModel, RepositoryError>;
    async fn delete(&self, review_id: i32) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait ReviewQueryServiceTrait {
    async fn find_all(
        &self,
        product_id: i32,
        req: &FindAllReviews,
    ) -> Result<ApiResponsePagination<Vec<ReviewResponse>>, ServiceError>;
    async fn find_by_id(
        &self,
        product_id: i32,
        review_id: i32,
    ) -> Result<ApiResponse<ReviewResponse>, ServiceError>;
}

#[async_trait]
pub trait ReviewCommandServiceTrait {
    async fn create(
        &self,
        session: &Session,
        product_id: i32,
        req: &CreateReviewRequest,
    ) -> Result<ApiResponse<ReviewResponse>, ServiceError>;
    async fn update(
        &self,
        session: &Session,
        product_id: i32,
        review_id: i32,
        req: &UpdateReviewRequest,
    ) -> Result<ApiResponse<ReviewResponse>, ServiceError>;
    async fn delete(
        &self,
        session: &Session,
        product_id: i32,
        review_id: i32,
    ) -> Result<ApiResponse<()>, ServiceError>;
}
