use crate::{
    abstract_trait::CartQueryRepositoryTrait, config::ConnectionPool, errors::RepositoryError,
    model::Cart as CartModel,
};
use async_trait::async_trait;
use tracing::error;
use uuid::Uuid;

#[derive(Clone)]
pub struct CartQueryRepository {
    db: ConnectionPool,
}

impl CartQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartQueryRepositoryTrait for CartQueryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CartModel>, RepositoryError> {
        sqlx::query_as::<_, CartModel>("SELECT * FROM carts WHERE cart_id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch cart {}: {:?}", id, e);
                RepositoryError::from(e)
            })
    }

    async fn count_items(&self, id: Uuid) -> Result<i64, RepositoryError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cart_items WHERE cart_id = $1")
            .bind(id)
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to count items of cart {}: {:?}", id, e);
                RepositoryError::from(e)
            })
    }
}
