use super::query::SELECT_CUSTOMER;
use crate::{
    abstract_trait::CustomerCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{CreateCustomerRecord, UpdateCustomerRequest},
    errors::RepositoryError,
    model::Customer as CustomerModel,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct CustomerCommandRepository {
    db: ConnectionPool,
}

impl CustomerCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerCommandRepositoryTrait for CustomerCommandRepository {
    async fn create(&self, req: &CreateCustomerRecord) -> Result<CustomerModel, RepositoryError> {
        let sql = format!(
            "WITH c AS (
                INSERT INTO customers (user_id, phone, birth_date, membership)
                VALUES ($1, $2, $3, $4)
                RETURNING *
             )
             {SELECT_CUSTOMER} FROM c JOIN users u ON u.user_id = c.user_id"
        );

        let customer = sqlx::query_as::<_, CustomerModel>(&sql)
            .bind(req.user_id)
            .bind(&req.phone)
            .bind(req.birth_date)
            .bind(req.membership.as_code())
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to create customer for user {}: {:?}", req.user_id, e);
                RepositoryError::from(e)
            })?;

        info!(
            "✅ Created customer ID {} for user {}",
            customer.customer_id, customer.user_id
        );
        Ok(customer)
    }

    async fn update(
        &self,
        id: i32,
        req: &UpdateCustomerRequest,
    ) -> Result<CustomerModel, RepositoryError> {
        let sql = format!(
            "WITH c AS (
                UPDATE customers
                SET phone = COALESCE($2, phone),
                    birth_date = COALESCE($3, birth_date),
                    membership = COALESCE($4, membership),
                    updated_at = current_timestamp
                WHERE customer_id = $1
                RETURNING *
             )
             {SELECT_CUSTOMER} FROM c JOIN users u ON u.user_id = c.user_id"
        );

        let customer = sqlx::query_as::<_, CustomerModel>(&sql)
            .bind(id)
            .bind(&req.phone)
            .bind(req.birth_date)
            .bind(req.membership.map(|m| m.as_code()))
            .fetch_one(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to update customer {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        info!("🔄 Updated customer ID {}", customer.customer_id);
        Ok(customer)
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM customers WHERE customer_id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete customer {}: {:?}", id, e);
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🗑️ Deleted customer ID {}", id);
        Ok(())
    }
}
