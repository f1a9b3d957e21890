use crate::{
    abstract_trait::{
        DynCategoryQueryRepository, DynProductCommandRepository, DynProductQueryRepository,
        ProductCommandServiceTrait,
    },
    domain::{
        requests::{CreateProductRequest, UpdateProductRecord, UpdateProductRequest},
        responses::{ApiResponse, ProductResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Product,
    utils::{Method, OperationTracker},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use tracing::{info, warn};

const PRODUCT_IN_ORDERS: &str =
    "Product cannot be deleted because it is associated with an order item.";

pub struct ProductCommandService {
    query: DynProductQueryRepository,
    command: DynProductCommandRepository,
    category_query: DynCategoryQueryRepository,
    tracker: OperationTracker,
}

impl ProductCommandService {
    pub fn new(
        query: DynProductQueryRepository,
        command: DynProductCommandRepository,
        category_query: DynCategoryQueryRepository,
        registry: &mut Registry,
    ) -> Self {
        Self {
            query,
            command,
            category_query,
            tracker: OperationTracker::new("product-command-service", registry),
        }
    }

    async fn ensure_category(&self, category_id: i32) -> Result<(), ServiceError> {
        match self.category_query.find_by_id(category_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::field(
                "category_id",
                format!("No category with the id {category_id}"),
            )),
        }
    }

    async fn insert(&self, req: &CreateProductRequest) -> Result<Product, ServiceError> {
        self.ensure_category(req.category_id).await?;
        Ok(self.command.create(req).await?)
    }

    async fn patch(&self, id: i32, req: &UpdateProductRequest) -> Result<Product, ServiceError> {
        let current = self
            .query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Product", id))?;

        if let Some(category_id) = req.category_id {
            if category_id != current.category_id {
                self.ensure_category(category_id).await?;
            }
        }

        let record = merge_update(current, req);
        self.command.update(&record).await.map_err(|e| match e {
            RepositoryError::NotFound => ServiceError::not_found("Product", id),
            other => ServiceError::Repo(other),
        })
    }

    async fn remove(&self, id: i32) -> Result<(), ServiceError> {
        if self.query.find_by_id(id).await?.is_none() {
            return Err(ServiceError::not_found("Product", id));
        }

        let referenced = self.query.count_order_items(id).await?;
        if referenced > 0 {
            warn!("⚠️ Product {id} is referenced by {referenced} order items");
            return Err(ServiceError::Conflict(PRODUCT_IN_ORDERS.into()));
        }

        self.command.delete(id).await.map_err(|e| match e {
            RepositoryError::ForeignKey(_) => ServiceError::Conflict(PRODUCT_IN_ORDERS.into()),
            other => ServiceError::Repo(other),
        })
    }
}

/// Applies the present fields of a partial update over the stored product.
fn merge_update(current: Product, req: &UpdateProductRequest) -> UpdateProductRecord {
    let discount_percent = if req.clear_discount {
        None
    } else {
        req.discount_percent.or(current.discount_percent)
    };

    let description = if req.clear_description {
        None
    } else {
        req.description.clone().or(current.description)
    };

    UpdateProductRecord {
        product_id: current.product_id,
        name: req.name.clone().unwrap_or(current.name),
        description,
        price: req.price.unwrap_or(current.price),
        discount_percent,
        stock_quantity: req.stock_quantity.unwrap_or(current.stock_quantity),
        category_id: req.category_id.unwrap_or(current.category_id),
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🏗️ Creating product: {} in category {}", req.name, req.category_id);

        let method = Method::Post;
        let tracing_ctx = self.tracker.start(
            "CreateProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.name", req.name.clone()),
                KeyValue::new("product.category_id", req.category_id as i64),
            ],
        );

        let result = self.insert(req).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Product created successfully");

        Ok(ApiResponse::success(
            "Product created successfully",
            ProductResponse::from(result?),
        ))
    }

    async fn update(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🔄 Updating product {id}");

        let method = Method::Patch;
        let tracing_ctx = self.tracker.start(
            "UpdateProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id as i64),
            ],
        );

        let result = self.patch(id, req).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Product updated successfully");

        Ok(ApiResponse::success(
            "Product updated successfully",
            ProductResponse::from(result?),
        ))
    }

    async fn delete(&self, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        info!("🗑️ Deleting product {id}");

        let method = Method::Delete;
        let tracing_ctx = self.tracker.start(
            "DeleteProduct",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("product.id", id as i64),
            ],
        );

        let result = self.remove(id).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Product deleted successfully");

        result?;
        Ok(ApiResponse::success("Product deleted successfully", ()))
    }
}
