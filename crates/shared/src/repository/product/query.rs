use crate::{
    abstract_trait::ProductQueryRepositoryTrait,
    config::ConnectionPool,
    domain::requests::FindAllProducts,
    errors::RepositoryError,
    model::Product as ProductModel,
    repository::{limit_offset, search_pattern},
};
use async_trait::async_trait;
use tracing::{error, info};

/// Shared `FROM`/`WHERE` for the product list and its count; binds `$1..$6`.
const PRODUCT_FILTER: &str = r#"
    FROM products p
    JOIN categories c ON c.category_id = p.category_id
    WHERE ($1::TEXT IS NULL OR p.name ILIKE $1 OR c.title ILIKE $1)
      AND ($2::INT IS NULL OR p.category_id = $2)
      AND ($3::NUMERIC IS NULL OR p.price >= $3)
      AND ($4::NUMERIC IS NULL OR p.price <= $4)
      AND ($5::INT IS NULL OR p.stock_quantity > $5)
      AND ($6::INT IS NULL OR p.stock_quantity < $6)
"#;

#[derive(Clone)]
pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<(Vec<ProductModel>, i64), RepositoryError> {
        info!("🔍 Fetching products with filters: {:?}", req);

        let (limit, offset) = limit_offset(req.page, req.page_size);
        let order_by = req
            .ordering
            .map(|o| o.as_sql())
            .unwrap_or("p.product_id ASC");

        let search = req.search.as_deref().and_then(search_pattern);

        let sql = format!(
            "SELECT p.* {PRODUCT_FILTER} ORDER BY {order_by} LIMIT $7 OFFSET $8"
        );

        let products = sqlx::query_as::<_, ProductModel>(&sql)
            .bind(search.clone())
            .bind(req.category_id)
            .bind(req.price_min)
            .bind(req.price_max)
            .bind(req.stock_gt)
            .bind(req.stock_lt)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch products: {:?}", e);
                RepositoryError::from(e)
            })?;

        let count_sql = format!("SELECT COUNT(*) {PRODUCT_FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(search)
            .bind(req.category_id)
            .bind(req.price_min)
            .bind(req.price_max)
            .bind(req.stock_gt)
            .bind(req.stock_lt)
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to count products: {:?}", e);
                RepositoryError::from(e)
            })?;

        Ok((products, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
        sqlx::query_as::<_, ProductModel>("SELECT * FROM products WHERE product_id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch product {}: {:?}", id, e);
                RepositoryError::from(e)
            })
    }

    async fn count_order_items(&self, id: i32) -> Result<i64, RepositoryError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM order_items WHERE product_id = $1")
            .bind(id)
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to count order items for product {}: {:?}", id, e);
                RepositoryError::from(e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::PRODUCT_FILTER;
    use crate::domain::requests::ProductOrdering;

    #[test]
    fn count_filter_binds_only_the_filter_parameters() {
        assert!(PRODUCT_FILTER.contains("$6"));
        assert!(!PRODUCT_FILTER.contains("$7"));
        assert!(!PRODUCT_FILTER.contains("'%'"));
    }

    #[test]
    fn ordering_sql_is_whitelisted() {
        for ordering in [
            ProductOrdering::PriceAsc,
            ProductOrdering::PriceDesc,
            ProductOrdering::StockAsc,
            ProductOrdering::StockDesc,
        ] {
            assert!(ordering.as_sql().starts_with("p."));
            assert!(!ordering.as_sql().contains(';'));
        }
    }
}
