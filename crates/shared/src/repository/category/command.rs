use crate::{
    abstract_trait::CategoryCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateCategoryRequest, UpdateCategoryRequest},
    errors::RepositoryError,
    model::Category as CategoryModel,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct CategoryCommandRepository {
    db: ConnectionPool,
}

impl CategoryCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryCommandRepositoryTrait for CategoryCommandRepository {
    async fn create(&self, req: &CreateCategoryRequest) -> Result<CategoryModel, RepositoryError> {
        let category = sqlx::query_as::<_, CategoryModel>(
            r#"
            INSERT INTO categories (title)
            VALUES ($1)
            RETURNING category_id, title, created_at, updated_at, 0::BIGINT AS products_count
            "#,
        )
        .bind(&req.title)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to create category {}: {:?}", req.title, err);
            RepositoryError::from(err)
        })?;

        info!("✅ Created category ID {}", category.category_id);
        Ok(category)
    }

    async fn update(
        &self,
        id: i32,
        req: &UpdateCategoryRequest,
    ) -> Result<CategoryModel, RepositoryError> {
        let category = sqlx::query_as::<_, CategoryModel>(
            r#"
            UPDATE categories c
            SET title = $2,
                updated_at = current_timestamp
            WHERE c.category_id = $1
            RETURNING
                c.category_id,
                c.title,
                c.created_at,
                c.updated_at,
                (SELECT COUNT(*) FROM products p WHERE p.category_id = c.category_id) AS products_count
            "#,
        )
        .bind(id)
        .bind(&req.title)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to update category {}: {:?}", id, err);
            RepositoryError::from(err)
        })?;

        info!("🔄 Updated category ID {}", category.category_id);
        Ok(category)
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        info!("🗑️ Deleting category: {}", id);

        let result = sqlx::query("DELETE FROM categories WHERE category_id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete category {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
