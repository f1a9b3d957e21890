use crate::{
    abstract_trait::CartItemQueryRepositoryTrait,
    config::ConnectionPool,
    errors::RepositoryError,
    model::{CartItem as CartItemModel, CartItemWithProduct},
};
use async_trait::async_trait;
use tracing::error;
use uuid::Uuid;

const SELECT_WITH_PRODUCT: &str = r#"
    SELECT
        ci.cart_item_id,
        ci.cart_id,
        ci.product_id,
        p.name AS product_name,
        p.price AS product_price,
        p.stock_quantity,
        ci.quantity
    FROM cart_items ci
    JOIN products p ON p.product_id = ci.product_id
"#;

#[derive(Clone)]
pub struct CartItemQueryRepository {
    db: ConnectionPool,
}

impl CartItemQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartItemQueryRepositoryTrait for CartItemQueryRepository {
    async fn find_all_by_cart(
        &self,
        cart_id: Uuid,
    ) -> Result<Vec<CartItemWithProduct>, RepositoryError> {
        let sql = format!("{SELECT_WITH_PRODUCT} WHERE ci.cart_id = $1 ORDER BY ci.cart_item_id");

        sqlx::query_as::<_, CartItemWithProduct>(&sql)
            .bind(cart_id)
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch items of cart {}: {:?}", cart_id, e);
                RepositoryError::from(e)
            })
    }

    async fn find_by_id(
        &self,
        cart_id: Uuid,
        item_id: i32,
    ) -> Result<Option<CartItemWithProduct>, RepositoryError> {
        let sql = format!("{SELECT_WITH_PRODUCT} WHERE ci.cart_id = $1 AND ci.cart_item_id = $2");

        sqlx::query_as::<_, CartItemWithProduct>(&sql)
            .bind(cart_id)
            .bind(item_id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch cart item {}: {:?}", item_id, e);
                RepositoryError::from(e)
            })
    }

    async fn find_by_product(
        &self,
        cart_id: Uuid,
        product_id: i32,
    ) -> Result<Option<CartItemModel>, RepositoryError> {
        sqlx::query_as::<_, CartItemModel>(
            "SELECT * FROM cart_items WHERE cart_id = $1 AND product_id = $2",
        )
        .bind(cart_id)
        .bind(product_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!(
                "❌ Failed to fetch product {} in cart {}: {:?}",
                product_id, cart_id, e
            );
            RepositoryError::from(e)
        })
    }
}
