use crate::{
    abstract_trait::{DynHashing, DynTokenService, DynUserQueryRepository, LoginServiceTrait},
    domain::{
        requests::LoginRequest,
        responses::{ApiResponse, TokenResponse},
    },
    errors::ServiceError,
    utils::{Method, OperationTracker},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use tracing::{info, warn};

pub struct LoginService {
    hash: DynHashing,
    token_service: DynTokenService,
    query: DynUserQueryRepository,
    tracker: OperationTracker,
}

pub struct LoginServiceDeps {
    pub hash: DynHashing,
    pub token_service: DynTokenService,
    pub query: DynUserQueryRepository,
}

impl LoginService {
    pub fn new(deps: LoginServiceDeps, registry: &mut Registry) -> Self {
        let LoginServiceDeps {
            hash,
            token_service,
            query,
        } = deps;

        Self {
            hash,
            token_service,
            query,
            tracker: OperationTracker::new("login-service", registry),
        }
    }

    async fn authenticate(&self, req: &LoginRequest) -> Result<TokenResponse, ServiceError> {
        let user = match self.query.find_by_username(&req.username).await? {
            Some(user) if user.is_active => user,
            _ => {
                warn!("⚠️ Login rejected for unknown or inactive user: {}", req.username);
                return Err(ServiceError::InvalidCredentials);
            }
        };

        self.hash
            .compare_password(&user.password, &req.password)
            .await?;

        let access_token = self.token_service.create_access_token(user.user_id).await?;
        let refresh_token = self.token_service.create_refresh_token(user.user_id).await?;

        Ok(TokenResponse {
            access_token,
            refresh_token,
        })
    }
}

#[async_trait]
impl LoginServiceTrait for LoginService {
    async fn login(&self, req: &LoginRequest) -> Result<ApiResponse<TokenResponse>, ServiceError> {
        info!("🔐 Login attempt | Username: {}", req.username);

        let method = Method::Post;
        let tracing_ctx = self.tracker.start(
            "LoginUser",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.username", req.username.clone()),
            ],
        );

        let result = self.authenticate(req).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Login successful");

        let tokens = result?;
        Ok(ApiResponse::success("Login successful", tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::{
        MockHashingTrait, MockTokenServiceTrait, MockUserQueryRepositoryTrait,
    };
    use crate::service::test_support::user;
    use std::sync::Arc;

    fn request() -> LoginRequest {
        LoginRequest {
            username: "user1".into(),
            password: "secret-pass".into(),
        }
    }

    fn service(
        query: MockUserQueryRepositoryTrait,
        hash: MockHashingTrait,
        tokens: MockTokenServiceTrait,
    ) -> LoginService {
        LoginService::new(
            LoginServiceDeps {
                hash: Arc::new(hash),
                token_service: Arc::new(tokens),
                query: Arc::new(query),
            },
            &mut Registry::default(),
        )
    }

    #[tokio::test]
    async fn valid_credentials_issue_both_tokens() {
        let mut query = MockUserQueryRepositoryTrait::new();
        query
            .expect_find_by_username()
            .returning(|_| Ok(Some(user(1))));

        let mut hash = MockHashingTrait::new();
        hash.expect_compare_password().returning(|_, _| Ok(()));

        let mut tokens = MockTokenServiceTrait::new();
        tokens
            .expect_create_access_token()
            .returning(|_| Ok("access".into()));
        tokens
            .expect_create_refresh_token()
            .returning(|_| Ok("refresh".into()));

        let response = service(query, hash, tokens).login(&request()).await.unwrap();

        assert_eq!(response.data.access_token, "access");
        assert_eq!(response.data.refresh_token, "refresh");
    }

    #[tokio::test]
    async fn unknown_user_is_invalid_credentials() {
        let mut query = MockUserQueryRepositoryTrait::new();
        query.expect_find_by_username().returning(|_| Ok(None));

        let err = service(query, MockHashingTrait::new(), MockTokenServiceTrait::new())
            .login(&request())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidCredentials));
    }

    #[tokio::test]
    async fn inactive_user_cannot_log_in() {
        let mut query = MockUserQueryRepositoryTrait::new();
        query.expect_find_by_username().returning(|_| {
            let mut u = user(1);
            u.is_active = false;
            Ok(Some(u))
        });

        let err = service(query, MockHashingTrait::new(), MockTokenServiceTrait::new())
            .login(&request())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidCredentials));
    }
}
