use crate::{
    abstract_trait::{DynJwtService, DynRefreshTokenCommandRepository, TokenServiceTrait},
    config::{ACCESS_TOKEN, JwtConfig, REFRESH_TOKEN},
    errors::ServiceError,
};
use async_trait::async_trait;
use chrono::Utc;
use tracing::{error, info};

pub struct TokenService {
    jwt: DynJwtService,
    refresh: DynRefreshTokenCommandRepository,
}

impl TokenService {
    pub fn new(jwt: DynJwtService, refresh: DynRefreshTokenCommandRepository) -> Self {
        Self { jwt, refresh }
    }
}

#[async_trait]
impl TokenServiceTrait for TokenService {
    async fn create_access_token(&self, id: i32) -> Result<String, ServiceError> {
        match self.jwt.generate_token(id, ACCESS_TOKEN) {
            Ok(token) => {
                info!("✅ Successfully generated access token for user_id: {}", id);
                Ok(token)
            }
            Err(err) => {
                error!(
                    "❌ Failed to generate access token for user_id {}: {:?}",
                    id, err
                );
                Err(err)
            }
        }
    }

    async fn create_refresh_token(&self, id: i32) -> Result<String, ServiceError> {
        let token = self.jwt.generate_token(id, REFRESH_TOKEN)?;
        let expires_at = (Utc::now() + JwtConfig::lifetime(REFRESH_TOKEN)?).naive_utc();

        match self.refresh.upsert(id, &token, expires_at).await {
            Ok(_) => {
                info!("✅ Created refresh token for user_id {}", id);
                Ok(token)
            }
            Err(e) => {
                error!("❌ Failed to store refresh token: {:?}", e);
                Err(ServiceError::from(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::{MockJwtServiceTrait, MockRefreshTokenCommandRepositoryTrait};
    use crate::model::RefreshToken;
    use crate::service::test_support::timestamp;
    use std::sync::Arc;

    #[tokio::test]
    async fn refresh_token_is_persisted() {
        let mut jwt = MockJwtServiceTrait::new();
        jwt.expect_generate_token()
            .withf(|id, token_type| *id == 7 && token_type == REFRESH_TOKEN)
            .returning(|_, _| Ok("refresh-jwt".to_string()));

        let mut refresh = MockRefreshTokenCommandRepositoryTrait::new();
        refresh
            .expect_upsert()
            .withf(|user_id, token, _| *user_id == 7 && token == "refresh-jwt")
            .times(1)
            .returning(|user_id, token, expired_date| {
                Ok(RefreshToken {
                    refresh_token_id: 1,
                    user_id,
                    token: token.to_string(),
                    expired_date,
                    created_at: timestamp(),
                })
            });

        let service = TokenService::new(Arc::new(jwt), Arc::new(refresh));
        let token = service.create_refresh_token(7).await.unwrap();

        assert_eq!(token, "refresh-jwt");
    }
}
