use crate::{
    abstract_trait::OrderQueryRepositoryTrait,
    config::ConnectionPool,
    domain::requests::FindAllOrders,
    errors::RepositoryError,
    model::{Order as OrderModel, OrderItem as OrderItemModel},
    repository::limit_offset,
};
use async_trait::async_trait;
use tracing::{error, info};

#[derive(Clone)]
pub struct OrderQueryRepository {
    db: ConnectionPool,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllOrders,
        customer_id: Option<i32>,
    ) -> Result<(Vec<OrderModel>, i64), RepositoryError> {
        info!(
            "🔍 Fetching orders page {} (customer: {:?})",
            req.page, customer_id
        );

        let (limit, offset) = limit_offset(req.page, req.page_size);

        let status = req.payment_status.map(|s| s.as_code());

        let orders = sqlx::query_as::<_, OrderModel>(
            r#"
            SELECT o.*
            FROM orders o
            WHERE ($1::INT IS NULL OR o.customer_id = $1)
              AND ($2::TEXT IS NULL OR o.payment_status = $2)
            ORDER BY o.placed_at DESC, o.order_id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(customer_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch orders: {:?}", e);
            RepositoryError::from(e)
        })?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM orders o
            WHERE ($1::INT IS NULL OR o.customer_id = $1)
              AND ($2::TEXT IS NULL OR o.payment_status = $2)
            "#,
        )
        .bind(customer_id)
        .bind(status)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to count orders: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok((orders, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError> {
        sqlx::query_as::<_, OrderModel>("SELECT * FROM orders WHERE order_id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch order {}: {:?}", id, e);
                RepositoryError::from(e)
            })
    }

    async fn find_items(&self, order_ids: &[i32]) -> Result<Vec<OrderItemModel>, RepositoryError> {
        sqlx::query_as::<_, OrderItemModel>(
            "SELECT * FROM order_items WHERE order_id = ANY($1) ORDER BY order_item_id",
        )
        .bind(order_ids)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch order items for {:?}: {:?}", order_ids, e);
            RepositoryError::from(e)
        })
    }

    async fn count_items(&self, id: i32) -> Result<i64, RepositoryError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM order_items WHERE order_id = $1")
            .bind(id)
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to count items of order {}: {:?}", id, e);
                RepositoryError::from(e)
            })
    }
}
