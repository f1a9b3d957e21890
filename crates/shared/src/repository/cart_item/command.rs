use crate::{
    abstract_trait::CartItemCommandRepositoryTrait, config::ConnectionPool,
    errors::RepositoryError, model::CartItem as CartItemModel,
};
use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

pub struct CartItemCommandRepository {
    db: ConnectionPool,
}

impl CartItemCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartItemCommandRepositoryTrait for CartItemCommandRepository {
    async fn create(
        &self,
        cart_id: Uuid,
        product_id: i32,
        quantity: i32,
    ) -> Result<CartItemModel, RepositoryError> {
        // Two concurrent adds of the same product both land on one row.
        let item = sqlx::query_as::<_, CartItemModel>(
            r#"
            INSERT INTO cart_items (cart_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (cart_id, product_id)
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
            RETURNING *
            "#,
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!(
                "❌ Failed to add product {} to cart {}: {:?}",
                product_id, cart_id, e
            );
            RepositoryError::from(e)
        })?;

        info!(
            "🛒 Cart {} now holds {} of product {}",
            cart_id, item.quantity, product_id
        );
        Ok(item)
    }

    async fn update_quantity(
        &self,
        item_id: i32,
        quantity: i32,
    ) -> Result<CartItemModel, RepositoryError> {
        sqlx::query_as::<_, CartItemModel>(
            "UPDATE cart_items SET quantity = $2 WHERE cart_item_id = $1 RETURNING *",
        )
        .bind(item_id)
        .bind(quantity)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to update cart item {}: {:?}", item_id, e);
            RepositoryError::from(e)
        })
    }

    async fn delete(&self, item_id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE cart_item_id = $1")
            .bind(item_id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete cart item {}: {:?}", item_id, e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
