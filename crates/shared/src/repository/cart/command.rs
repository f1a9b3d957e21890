use crate::{
    abstract_trait::CartCommandRepositoryTrait, config::ConnectionPool, errors::RepositoryError,
    model::Cart as CartModel,
};
use async_trait::async_trait;
use tracing::{error, info};
use uuid::Uuid;

pub struct CartCommandRepository {
    db: ConnectionPool,
}

impl CartCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartCommandRepositoryTrait for CartCommandRepository {
    async fn create(&self, id: Uuid) -> Result<CartModel, RepositoryError> {
        let cart =
            sqlx::query_as::<_, CartModel>("INSERT INTO carts (cart_id) VALUES ($1) RETURNING *")
                .bind(id)
                .fetch_one(&self.db)
                .await
                .map_err(|e| {
                    error!("❌ Failed to create cart: {:?}", e);
                    RepositoryError::from(e)
                })?;

        info!("🛒 Created cart {}", cart.cart_id);
        Ok(cart)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM carts WHERE cart_id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete cart {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted cart {}", id);
        Ok(())
    }
}
