use crate::{
    abstract_trait::CustomerQueryRepositoryTrait, config::ConnectionPool,
    domain::requests::FindAllCustomers, errors::RepositoryError, model::Customer as CustomerModel,
    repository::limit_offset,
};
use async_trait::async_trait;
use tracing::{error, info};

pub(super) const SELECT_CUSTOMER: &str = r#"
    SELECT
        c.customer_id,
        c.user_id,
        c.phone,
        c.birth_date,
        c.membership,
        u.first_name,
        u.last_name,
        u.email,
        c.created_at,
        c.updated_at
"#;

#[derive(Clone)]
pub struct CustomerQueryRepository {
    db: ConnectionPool,
}

impl CustomerQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerQueryRepositoryTrait for CustomerQueryRepository {
    async fn find_all(
        &self,
        req: &FindAllCustomers,
    ) -> Result<(Vec<CustomerModel>, i64), RepositoryError> {
        info!("🔍 Fetching customers page {}", req.page);

        let (limit, offset) = limit_offset(req.page, req.page_size);
        let sql = format!(
            "{SELECT_CUSTOMER} FROM customers c JOIN users u ON u.user_id = c.user_id
             ORDER BY u.first_name, u.last_name, c.customer_id
             LIMIT $1 OFFSET $2"
        );

        let customers = sqlx::query_as::<_, CustomerModel>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch customers: {:?}", e);
                RepositoryError::from(e)
            })?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to count customers: {:?}", e);
                RepositoryError::from(e)
            })?;

        Ok((customers, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<CustomerModel>, RepositoryError> {
        let sql = format!(
            "{SELECT_CUSTOMER} FROM customers c JOIN users u ON u.user_id = c.user_id
             WHERE c.customer_id = $1"
        );

        sqlx::query_as::<_, CustomerModel>(&sql)
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch customer {}: {:?}", id, e);
                RepositoryError::from(e)
            })
    }

    async fn find_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<CustomerModel>, RepositoryError> {
        let sql = format!(
            "{SELECT_CUSTOMER} FROM customers c JOIN users u ON u.user_id = c.user_id
             WHERE c.user_id = $1"
        );

        sqlx::query_as::<_, CustomerModel>(&sql)
            .bind(user_id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch customer of user {}: {:?}", user_id, e);
                RepositoryError::from(e)
            })
    }

    async fn count_orders(&self, id: i32) -> Result<i64, RepositoryError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE customer_id = $1")
            .bind(id)
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to count orders of customer {}: {:?}", id, e);
                RepositoryError::from(e)
            })
    }
}
