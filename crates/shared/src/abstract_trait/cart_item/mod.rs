use crate::{
    domain::{
        requests::{CreateCartItemRequest, UpdateCartItemRequest},
        responses::{ApiResponse, CartItemResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{CartItem as CartItemModel, CartItemWithProduct},
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynCartItemQueryRepository = Arc<dyn CartItemQueryRepositoryTrait + Send + Sync>;
pub type DynCartItemCommandRepository = Arc<dyn CartItemCommandRepositoryTrait + Send + Sync>;
pub type DynCartItemService = Arc<dyn CartItemServiceTrait + Send + Sync>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartItemQueryRepositoryTrait {
    async fn find_all_by_cart(
        &self,
        cart_id: Uuid,
    ) -> Result<Vec<CartItemWithProduct>, RepositoryError>;
    async fn find_by_id(
        &self,
        cart_id: Uuid,
        item_id: i32,
    ) -> Result<Option<CartItemWithProduct>, RepositoryError>;
    async fn find_by_product(
        &self,
        cart_id: Uuid,
        product_id: i32,
    ) -> Result<Option<CartItemModel>, RepositoryError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartItemCommandRepositoryTrait {
    /// Inserts the line, or adds to its quantity when (cart, product) already exists.
    async fn create(
        &self,
        cart_id: Uuid,
        product_id: i32,
        quantity: i32,
    ) -> Result<CartItemModel, RepositoryError>;
    async fn update_quantity(
        &self,
        item_id: i32,
        quantity: i32,
    ) -> Result<CartItemModel, RepositoryError>;
    async fn delete(&self, item_id: i32) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait CartItemServiceTrait {
    async fn find_all(
        &self,
        cart_id: Uuid,
    ) -> Result<ApiResponse<Vec<CartItemResponse>>, ServiceError>;
    async fn find_by_id(
        &self,
        cart_id: Uuid,
        item_id: i32,
    ) -> Result<ApiResponse<CartItemResponse>, ServiceError>;
    async fn add(
        &self,
        cart_id: Uuid,
        req: &CreateCartItemRequest,
    ) -> Result<ApiResponse<CartItemResponse>, ServiceError>;
    async fn update(
        &self,
        cart_id: Uuid,
        item_id: i32,
        req: &UpdateCartItemRequest,
    ) -> Result<ApiResponse<CartItemResponse>, ServiceError>;
    async fn delete(&self, cart_id: Uuid, item_id: i32) -> Result<ApiResponse<()>, ServiceError>;
}
