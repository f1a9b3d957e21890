use crate::{
    domain::responses::{ApiResponse, CartResponse},
    errors::{RepositoryError, ServiceError},
    model::Cart as CartModel,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynCartQueryRepository = Arc<dyn CartQueryRepositoryTrait + Send + Sync>;
pub type DynCartCommandRepository = Arc<dyn CartCommandRepositoryTrait + Send + Sync>;
pub type DynCartService = Arc<dyn CartServiceTrait + Send + Sync>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartQueryRepositoryTrait {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CartModel>, RepositoryError>;
    async fn count_items(&self, id: Uuid) -> Result<i64, RepositoryError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartCommandRepositoryTrait {
    async fn create(&self, id: Uuid) -> Result<CartModel, RepositoryError>;
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait CartServiceTrait {
    async fn create(&self) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, ServiceError>;
}
