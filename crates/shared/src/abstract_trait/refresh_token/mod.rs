use crate::{errors::RepositoryError, model::RefreshToken as RefreshTokenModel};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::sync::Arc;

pub type DynRefreshTokenQueryRepository = Arc<dyn RefreshTokenQueryRepositoryTrait + Send + Sync>;

pub type DynRefreshTokenCommandRepository =
    Arc<dyn RefreshTokenCommandRepositoryTrait + Send + Sync>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RefreshTokenQueryRepositoryTrait {
    async fn find_by_token(&self, token: &str)
    -> Result<Option<RefreshTokenModel>, RepositoryError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RefreshTokenCommandRepositoryTrait {
    /// Stores the user's refresh token, replacing any previous one.
    async fn upsert(
        &self,
        user_id: i32,
        token: &str,
        expired_date: NaiveDateTime,
    ) -> Result<RefreshTokenModel, RepositoryError>;
}
