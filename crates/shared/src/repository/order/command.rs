use crate::{
    abstract_trait::OrderCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateOrderItemRecord, PlaceOrderRecord},
    errors::RepositoryError,
    model::{Order as OrderModel, OrderItem as OrderItemModel, PaymentStatus},
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction};
use tracing::{error, info, warn};

pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    /// Decrements stock, refusing to go below zero.
    async fn take_stock(
        tx: &mut Transaction<'_, Postgres>,
        product_id: i32,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock_quantity = stock_quantity - $2,
                updated_at = current_timestamp
            WHERE product_id = $1 AND stock_quantity >= $2
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .execute(&mut **tx)
        .await
        .map_err(RepositoryError::from)?;

        if result.rows_affected() == 0 {
            warn!(
                "⚠️ Not enough stock for product {} (wanted {})",
                product_id, quantity
            );
            return Err(RepositoryError::Conflict(format!(
                "Insufficient stock for product {product_id}"
            )));
        }

        Ok(())
    }

    async fn insert_item(
        tx: &mut Transaction<'_, Postgres>,
        order_id: i32,
        product_id: i32,
        quantity: i32,
        unit_price: Decimal,
    ) -> Result<OrderItemModel, RepositoryError> {
        sqlx::query_as::<_, OrderItemModel>(
            r#"
            INSERT INTO order_items (order_id, product_id, quantity, unit_price)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price)
        .fetch_one(&mut **tx)
        .await
        .map_err(RepositoryError::from)
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn place_order(
        &self,
        req: &PlaceOrderRecord,
    ) -> Result<(OrderModel, Vec<OrderItemModel>), RepositoryError> {
        let mut tx = self.db.begin().await.map_err(|e| {
            error!("❌ Failed to begin checkout transaction: {:?}", e);
            RepositoryError::from(e)
        })?;

        let order = sqlx::query_as::<_, OrderModel>(
            "INSERT INTO orders (customer_id, payment_status) VALUES ($1, $2) RETURNING *",
        )
        .bind(req.customer_id)
        .bind(PaymentStatus::Pending.as_code())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!(
                "❌ Failed to create order for customer {}: {:?}",
                req.customer_id, e
            );
            RepositoryError::from(e)
        })?;

        let mut items = Vec::with_capacity(req.lines.len());
        for line in &req.lines {
            Self::take_stock(&mut tx, line.product_id, line.quantity).await?;
            let item = Self::insert_item(
                &mut tx,
                order.order_id,
                line.product_id,
                line.quantity,
                line.unit_price,
            )
            .await?;
            items.push(item);
        }

        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(req.cart_id)
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::from)?;

        sqlx::query("DELETE FROM carts WHERE cart_id = $1")
            .bind(req.cart_id)
            .execute(&mut *tx)
            .await
            .map_err(RepositoryError::from)?;

        tx.commit().await.map_err(|e| {
            error!("❌ Failed to commit order {}: {:?}", order.order_id, e);
            RepositoryError::from(e)
        })?;

        info!(
            "✅ Placed order ID {} with {} items from cart {}",
            order.order_id,
            items.len(),
            req.cart_id
        );
        Ok((order, items))
    }

    async fn create_item(
        &self,
        req: &CreateOrderItemRecord,
    ) -> Result<OrderItemModel, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        Self::take_stock(&mut tx, req.product_id, req.quantity).await?;
        let item = Self::insert_item(
            &mut tx,
            req.order_id,
            req.product_id,
            req.quantity,
            req.unit_price,
        )
        .await
        .map_err(|e| {
            error!("❌ Failed to add item to order {}: {:?}", req.order_id, e);
            e
        })?;

        tx.commit().await.map_err(RepositoryError::from)?;

        info!(
            "✅ Added product {} x{} to order {} at {}",
            item.product_id, item.quantity, item.order_id, item.unit_price
        );
        Ok(item)
    }

    async fn update_status(
        &self,
        id: i32,
        status: PaymentStatus,
    ) -> Result<OrderModel, RepositoryError> {
        let order = sqlx::query_as::<_, OrderModel>(
            "UPDATE orders SET payment_status = $2 WHERE order_id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status.as_code())
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update order {}: {:?}", id, e);
            RepositoryError::from(e)
        })?;

        info!("🔄 Order {} is now {:?}", id, status);
        Ok(order)
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM orders WHERE order_id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete order {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted order ID {}", id);
        Ok(())
    }
}
