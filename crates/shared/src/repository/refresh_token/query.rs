use crate::{
    abstract_trait::RefreshTokenQueryRepositoryTrait, config::ConnectionPool,
    errors::RepositoryError, model::RefreshToken as RefreshTokenModel,
};
use async_trait::async_trait;
use tracing::error;

pub struct RefreshTokenQueryRepository {
    db: ConnectionPool,
}

impl RefreshTokenQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RefreshTokenQueryRepositoryTrait for RefreshTokenQueryRepository {
    async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<RefreshTokenModel>, RepositoryError> {
        sqlx::query_as::<_, RefreshTokenModel>("SELECT * FROM refresh_tokens WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch refresh token: {:?}", e);
                RepositoryError::from(e)
            })
    }
}
