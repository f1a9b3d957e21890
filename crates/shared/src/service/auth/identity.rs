use crate::{
    abstract_trait::{
        DynJwtService, DynRefreshTokenQueryRepository, DynTokenService, DynUserQueryRepository,
        IdentityServiceTrait,
    },
    config::REFRESH_TOKEN,
    domain::{
        Session,
        responses::{ApiResponse, TokenResponse, UserResponse},
    },
    errors::ServiceError,
    utils::{Method, OperationTracker},
};
use async_trait::async_trait;
use chrono::Utc;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use tracing::{info, warn};

pub struct IdentityService {
    jwt: DynJwtService,
    token_service: DynTokenService,
    refresh_query: DynRefreshTokenQueryRepository,
    user_query: DynUserQueryRepository,
    tracker: OperationTracker,
}

pub struct IdentityServiceDeps {
    pub jwt: DynJwtService,
    pub token_service: DynTokenService,
    pub refresh_query: DynRefreshTokenQueryRepository,
    pub user_query: DynUserQueryRepository,
}

impl IdentityService {
    pub fn new(deps: IdentityServiceDeps, registry: &mut Registry) -> Self {
        let IdentityServiceDeps {
            jwt,
            token_service,
            refresh_query,
            user_query,
        } = deps;

        Self {
            jwt,
            token_service,
            refresh_query,
            user_query,
            tracker: OperationTracker::new("identity-service", registry),
        }
    }

    async fn refresh(&self, token: &str) -> Result<TokenResponse, ServiceError> {
        let user_id = self.jwt.verify_token(token, REFRESH_TOKEN)?;

        let record = match self.refresh_query.find_by_token(token).await? {
            Some(record) if record.user_id == user_id => record,
            _ => {
                warn!("⚠️ Refresh token for user {} is not on record", user_id);
                return Err(ServiceError::InvalidTokenType);
            }
        };

        if record.expired_date < Utc::now().naive_utc() {
            return Err(ServiceError::TokenExpired);
        }

        let access_token = self.token_service.create_access_token(user_id).await?;

        Ok(TokenResponse {
            access_token,
            refresh_token: token.to_string(),
        })
    }
}

#[async_trait]
impl IdentityServiceTrait for IdentityService {
    async fn refresh_token(&self, token: &str) -> Result<ApiResponse<TokenResponse>, ServiceError> {
        info!("🔄 Attempting to refresh token");

        let method = Method::Post;
        let tracing_ctx = self
            .tracker
            .start("RefreshToken", vec![KeyValue::new("component", "auth")]);

        let result = self.refresh(token).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "Token refreshed successfully");

        Ok(ApiResponse::success("Token refreshed", result?))
    }

    async fn get_me(&self, id: i32) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!("👤 Fetching user profile | User ID: {id}");

        let method = Method::Get;
        let tracing_ctx = self.tracker.start(
            "GetMe",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.id", id as i64),
            ],
        );

        let result = match self.user_query.find_by_id(id).await {
            Ok(Some(user)) => Ok(UserResponse::from(user)),
            Ok(None) => Err(ServiceError::not_found("User", id)),
            Err(e) => Err(ServiceError::Repo(e)),
        };
        self.tracker
            .finish(&tracing_ctx, method, &result, "User fetched successfully");

        Ok(ApiResponse::success("User fetched successfully", result?))
    }

    async fn session(&self, user_id: i32) -> Result<Session, ServiceError> {
        match self.user_query.find_by_id(user_id).await? {
            Some(user) if user.is_active => Ok(Session::new(user.user_id, user.is_staff)),
            _ => {
                warn!("⚠️ Token for missing or inactive user {user_id}");
                Err(ServiceError::InvalidCredentials)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::{
        MockJwtServiceTrait, MockRefreshTokenQueryRepositoryTrait, MockTokenServiceTrait,
        MockUserQueryRepositoryTrait,
    };
    use crate::model::RefreshToken;
    use crate::service::test_support::{timestamp, user};
    use chrono::Duration;
    use std::sync::Arc;

    fn record(user_id: i32, expired_date: chrono::NaiveDateTime) -> RefreshToken {
        RefreshToken {
            refresh_token_id: 1,
            user_id,
            token: "refresh-jwt".into(),
            expired_date,
            created_at: timestamp(),
        }
    }

    fn service(
        refresh_query: MockRefreshTokenQueryRepositoryTrait,
        tokens: MockTokenServiceTrait,
    ) -> IdentityService {
        with_users(refresh_query, tokens, MockUserQueryRepositoryTrait::new())
    }

    fn with_users(
        refresh_query: MockRefreshTokenQueryRepositoryTrait,
        tokens: MockTokenServiceTrait,
        users: MockUserQueryRepositoryTrait,
    ) -> IdentityService {
        let mut jwt = MockJwtServiceTrait::new();
        jwt.expect_verify_token().returning(|_, _| Ok(3));

        IdentityService::new(
            IdentityServiceDeps {
                jwt: Arc::new(jwt),
                token_service: Arc::new(tokens),
                refresh_query: Arc::new(refresh_query),
                user_query: Arc::new(users),
            },
            &mut Registry::default(),
        )
    }

    #[tokio::test]
    async fn stored_refresh_token_yields_new_access_token() {
        let mut refresh_query = MockRefreshTokenQueryRepositoryTrait::new();
        refresh_query.expect_find_by_token().returning(|_| {
            Ok(Some(record(3, (Utc::now() + Duration::days(1)).naive_utc())))
        });

        let mut tokens = MockTokenServiceTrait::new();
        tokens
            .expect_create_access_token()
            .returning(|_| Ok("fresh-access".into()));

        let response = service(refresh_query, tokens)
            .refresh_token("refresh-jwt")
            .await
            .unwrap();

        assert_eq!(response.data.access_token, "fresh-access");
        assert_eq!(response.data.refresh_token, "refresh-jwt");
    }

    #[tokio::test]
    async fn unknown_refresh_token_is_rejected() {
        let mut refresh_query = MockRefreshTokenQueryRepositoryTrait::new();
        refresh_query.expect_find_by_token().returning(|_| Ok(None));

        let err = service(refresh_query, MockTokenServiceTrait::new())
            .refresh_token("refresh-jwt")
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidTokenType));
    }

    #[tokio::test]
    async fn expired_record_is_rejected() {
        let mut refresh_query = MockRefreshTokenQueryRepositoryTrait::new();
        refresh_query.expect_find_by_token().returning(|_| {
            Ok(Some(record(3, (Utc::now() - Duration::hours(1)).naive_utc())))
        });

        let err = service(refresh_query, MockTokenServiceTrait::new())
            .refresh_token("refresh-jwt")
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::TokenExpired));
    }

    #[tokio::test]
    async fn session_carries_staff_flag() {
        let mut users = MockUserQueryRepositoryTrait::new();
        users.expect_find_by_id().returning(|id| {
            let mut staff = user(id);
            staff.is_staff = true;
            Ok(Some(staff))
        });

        let session = with_users(
            MockRefreshTokenQueryRepositoryTrait::new(),
            MockTokenServiceTrait::new(),
            users,
        )
        .session(5)
        .await
        .unwrap();

        assert_eq!(session, Session::new(5, true));
    }

    #[tokio::test]
    async fn inactive_user_has_no_session() {
        let mut users = MockUserQueryRepositoryTrait::new();
        users.expect_find_by_id().returning(|id| {
            let mut inactive = user(id);
            inactive.is_active = false;
            Ok(Some(inactive))
        });

        let err = with_users(
            MockRefreshTokenQueryRepositoryTrait::new(),
            MockTokenServiceTrait::new(),
            users,
        )
        .session(5)
        .await
        .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidCredentials));
    }
}
