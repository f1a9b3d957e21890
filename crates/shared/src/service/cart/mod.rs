use crate::{
    abstract_trait::{
        CartServiceTrait, DynCartCommandRepository, DynCartItemQueryRepository,
        DynCartQueryRepository,
    },
    domain::responses::{ApiResponse, CartResponse},
    errors::{RepositoryError, ServiceError},
    utils::{Method, OperationTracker},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use tracing::{info, warn};
use uuid::Uuid;

const CART_NOT_EMPTY: &str = "Cart cannot be deleted because it still holds items.";

pub struct CartService {
    query: DynCartQueryRepository,
    command: DynCartCommandRepository,
    items: DynCartItemQueryRepository,
    tracker: OperationTracker,
}

impl CartService {
    pub fn new(
        query: DynCartQueryRepository,
        command: DynCartCommandRepository,
        items: DynCartItemQueryRepository,
        registry: &mut Registry,
    ) -> Self {
        Self {
            query,
            command,
            items,
            tracker: OperationTracker::new("cart-service", registry),
        }
    }

    async fn load(&self, id: Uuid) -> Result<CartResponse, ServiceError> {
        let cart = self
            .query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Cart", id))?;
        let items = self.items.find_all_by_cart(id).await?;

        Ok(CartResponse::new(cart, items))
    }

    async fn remove(&self, id: Uuid) -> Result<(), ServiceError> {
        if self.query.find_by_id(id).await?.is_none() {
            return Err(ServiceError::not_found("Cart", id));
        }

        let items = self.query.count_items(id).await?;
        if items > 0 {
            warn!("⚠️ Cart {id} still holds {items} items");
            return Err(ServiceError::Conflict(CART_NOT_EMPTY.into()));
        }

        self.command.delete(id).await.map_err(|e| match e {
            RepositoryError::ForeignKey(_) => ServiceError::Conflict(CART_NOT_EMPTY.into()),
            other => ServiceError::Repo(other),
        })
    }
}

#[async_trait]
impl CartServiceTrait for CartService {
    async fn create(&self) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let id = Uuid::new_v4();

        let method = Method::Post;
        let tracing_ctx = self.tracker.start(
            "CreateCart",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("cart.id", id.to_string()),
            ],
        );

        let result = self.command.create(id).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Cart created successfully");

        Ok(ApiResponse::success(
            "Cart created successfully",
            CartResponse::new(result?, Vec::new()),
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let method = Method::Get;
        let tracing_ctx = self.tracker.start(
            "FindCartById",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("cart.id", id.to_string()),
            ],
        );

        let result = self.load(id).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Cart fetched successfully");

        Ok(ApiResponse::success("Cart fetched successfully", result?))
    }

    async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, ServiceError> {
        info!("🗑️ Deleting cart {id}");

        let method = Method::Delete;
        let tracing_ctx = self.tracker.start(
            "DeleteCart",
            vec![
                KeyValue::new("component", "cart"),
                KeyValue::new("cart.id", id.to_string()),
            ],
        );

        let result = self.remove(id).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Cart deleted successfully");

        result?;
        Ok(ApiResponse::success("Cart deleted successfully", ()))
    }
}
