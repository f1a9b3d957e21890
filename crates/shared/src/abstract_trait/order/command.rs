use crate::{
    domain::{
        Session,
        requests::{
            CreateOrderItemRecord, CreateOrderItemRequest, CreateOrderRequest, PlaceOrderRecord,
            UpdateOrderRequest,
        },
        responses::{ApiResponse, OrderItemResponse, OrderResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::{Order as OrderModel, OrderItem as OrderItemModel, PaymentStatus},
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;
pub type DynOrderCommandService = Arc<dyn OrderCommandServiceTrait + Send + Sync>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderCommandRepositoryTrait {
    /// Inserts the order and its lines, takes the quantities out of stock and
    /// deletes the cart, all in one transaction.
    async fn place_order(
        &self,
        req: &PlaceOrderRecord,
    ) -> Result<(OrderModel, Vec<OrderItemModel>), RepositoryError>;
    /// Inserts one line and takes its quantity out of stock.
    async fn create_item(
        &self,
        req: &CreateOrderItemRecord,
    ) -> Result<OrderItemModel, RepositoryError>;
    async fn update_status(
        &self,
        id: i32,
        status: PaymentStatus,
    ) -> Result<OrderModel, RepositoryError>;
    async fn delete(&self, id: i32) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait OrderCommandServiceTrait {
    async fn checkout(
        &self,
        session: &Session,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn add_item(
        &self,
        session: &Session,
        order_id: i32,
        req: &CreateOrderItemRequest,
    ) -> Result<ApiResponse<OrderItemResponse>, ServiceError>;
    async fn update(
        &self,
        session: &Session,
        id: i32,
        req: &UpdateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError>;
    async fn delete(&self, session: &Session, id: i32) -> Result<ApiResponse<()>, ServiceError>;
}
