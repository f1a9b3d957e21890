use crate::{
    abstract_trait::CategoryQueryRepositoryTrait,
    config::ConnectionPool,
    domain::requests::FindAllCategories,
    errors::RepositoryError,
    model::Category as CategoryModel,
    repository::{limit_offset, search_pattern},
};
use async_trait::async_trait;
use tracing::{error, info};

#[derive(Clone)]
pub struct CategoryQueryRepository {
    db: ConnectionPool,
}

impl CategoryQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryQueryRepositoryTrait for CategoryQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllCategories,
    ) -> Result<(Vec<CategoryModel>, i64), RepositoryError> {
        info!("🔍 Fetching categories with search: {:?}", req.search);

        let (limit, offset) = limit_offset(req.page, req.page_size);

        let search = search_pattern(&req.search);

        let categories = sqlx::query_as::<_, CategoryModel>(
            r#"
            SELECT
                c.category_id,
                c.title,
                c.created_at,
                c.updated_at,
                (SELECT COUNT(*) FROM products p WHERE p.category_id = c.category_id) AS products_count
            FROM categories c
            WHERE ($1::TEXT IS NULL OR c.title ILIKE $1)
            ORDER BY c.title, c.category_id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(search.clone())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch categories: {:?}", e);
            RepositoryError::from(e)
        })?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM categories c WHERE ($1::TEXT IS NULL OR c.title ILIKE $1)",
        )
        .bind(search)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to count categories: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok((categories, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<CategoryModel>, RepositoryError> {
        sqlx::query_as::<_, CategoryModel>(
            r#"
            SELECT
                c.category_id,
                c.title,
                c.created_at,
                c.updated_at,
                (SELECT COUNT(*) FROM products p WHERE p.category_id = c.category_id) AS products_count
            FROM categories c
            WHERE c.category_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch category {}: {:?}", id, e);
            RepositoryError::from(e)
        })
    }
}
