use crate::{
    abstract_trait::ProductCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateProductRequest, UpdateProductRecord},
    errors::RepositoryError,
    model::Product as ProductModel,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create(&self, req: &CreateProductRequest) -> Result<ProductModel, RepositoryError> {
        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            INSERT INTO products
                (name, description, price, discount_percent, stock_quantity, category_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.price)
        .bind(req.discount_percent)
        .bind(req.stock_quantity)
        .bind(req.category_id)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to create product {}: {:?}", req.name, err);
            RepositoryError::from(err)
        })?;

        info!("✅ Created product ID {}", product.product_id);
        Ok(product)
    }

    async fn update(&self, req: &UpdateProductRecord) -> Result<ProductModel, RepositoryError> {
        let product = sqlx::query_as::<_, ProductModel>(
            r#"
            UPDATE products
            SET name = $2,
                description = $3,
                price = $4,
                discount_percent = $5,
                stock_quantity = $6,
                category_id = $7,
                updated_at = current_timestamp
            WHERE product_id = $1
            RETURNING *
            "#,
        )
        .bind(req.product_id)
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.price)
        .bind(req.discount_percent)
        .bind(req.stock_quantity)
        .bind(req.category_id)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to update product {}: {:?}", req.product_id, err);
            RepositoryError::from(err)
        })?;

        info!("🔄 Updated product ID {}", product.product_id);
        Ok(product)
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        info!("🗑️ Deleting product: {}", id);

        let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete product {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
