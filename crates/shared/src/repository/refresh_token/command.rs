use crate::{
    abstract_trait::RefreshTokenCommandRepositoryTrait, config::ConnectionPool,
    errors::RepositoryError, model::RefreshToken as RefreshTokenModel,
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use tracing::{error, info};

pub struct RefreshTokenCommandRepository {
    db: ConnectionPool,
}

impl RefreshTokenCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RefreshTokenCommandRepositoryTrait for RefreshTokenCommandRepository {
    async fn upsert(
        &self,
        user_id: i32,
        token: &str,
        expired_date: NaiveDateTime,
    ) -> Result<RefreshTokenModel, RepositoryError> {
        let record = sqlx::query_as::<_, RefreshTokenModel>(
            r#"
            INSERT INTO refresh_tokens (user_id, token, expired_date)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE
            SET token = EXCLUDED.token,
                expired_date = EXCLUDED.expired_date,
                created_at = current_timestamp
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(token)
        .bind(expired_date)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to store refresh token for user {}: {:?}", user_id, e);
            RepositoryError::from(e)
        })?;

        info!("🔑 Stored refresh token for user {}", user_id);
        Ok(record)
    }
}
