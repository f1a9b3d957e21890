use crate::{
    domain::{
        Session,
        requests::{
            CreateCustomerRecord, CreateCustomerRequest, FindAllCustomers, UpdateCustomerRequest,
        },
        responses::{ApiResponse, ApiResponsePagination, CustomerResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Customer as CustomerModel,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynCustomerQueryRepository = Arc<dyn CustomerQueryRepositoryTrait + Send + Sync>;
pub type DynCustomerCommandRepository = Arc<dyn CustomerCommandRepositoryTrait + Send + Sync>;
pub type DynCustomerQueryService = Arc<dyn CustomerQueryServiceTrait + Send + Sync>;
pub type DynCustomerCommandService = Arc<dyn CustomerCommandServiceTrait + Send + Sync>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerQueryRepositoryTrait {
    async fn find_all(
        &self,
        req: &FindAllCustomers,
    ) -> Result<(Vec<CustomerModel>, i64), RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<CustomerModel>, RepositoryError>;
    async fn find_by_user_id(&self, user_id: i32)
    -> Result<Option<CustomerModel>, RepositoryError>;
    async fn count_orders(&self, id: i32) -> Result<i64, RepositoryError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerCommandRepositoryTrait {
    async fn create(&self, req: &CreateCustomerRecord) -> Result<CustomerModel, RepositoryError>;
    /// Absent fields keep their stored value.
    async fn update(
        &self,
        id: i32,
        req: &UpdateCustomerRequest,
    ) -> Result<CustomerModel, RepositoryError>;
    async fn delete(&self, id: i32) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait CustomerQueryServiceTrait {
    async fn find_all(
        &self,
        session: &Session,
        req: &FindAllCustomers,
    ) -> Result<ApiResponsePagination<Vec<CustomerResponse>>, ServiceError>;
    async fn find_by_id(
        &self,
        session: &Session,
        id: i32,
    ) -> Result<ApiResponse<CustomerResponse>, ServiceError>;
}

#[async_trait]
pub trait CustomerCommandServiceTrait {
    async fn create(
        &self,
        session: &Session,
        req: &CreateCustomerRequest,
    ) -> Result<ApiResponse<CustomerResponse>, ServiceError>;
    async fn update(
        &self,
        session: &Session,
        id: i32,
        req: &UpdateCustomerRequest,
    ) -> Result<ApiResponse<CustomerResponse>, ServiceError>;
    /// Returns the caller's profile, creating a bronze one when missing.
    async fn get_or_create_me(
        &self,
        session: &Session,
    ) -> Result<ApiResponse<CustomerResponse>, ServiceError>;
    async fn update_me(
        &self,
        session: &Session,
        req: &UpdateCustomerRequest,
    ) -> Result<ApiResponse<CustomerResponse>, ServiceError>;
    async fn delete(&self, session: &Session, id: i32) -> Result<ApiResponse<()>, ServiceError>;
}
