use crate::{
    domain::{
        Session,
        requests::{LoginRequest, RegisterRequest},
        responses::{ApiResponse, TokenResponse, UserResponse},
    },
    errors::ServiceError,
};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynRegisterService = Arc<dyn RegisterServiceTrait + Send + Sync>;
pub type DynLoginService = Arc<dyn LoginServiceTrait + Send + Sync>;
pub type DynIdentityService = Arc<dyn IdentityServiceTrait + Send + Sync>;
pub type DynTokenService = Arc<dyn TokenServiceTrait + Send + Sync>;

#[async_trait]
pub trait RegisterServiceTrait {
    async fn register(
        &self,
        register_request: &RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
}

#[async_trait]
pub trait LoginServiceTrait {
    async fn login(&self, request: &LoginRequest)
    -> Result<ApiResponse<TokenResponse>, ServiceError>;
}

#[async_trait]
pub trait IdentityServiceTrait {
    async fn refresh_token(&self, token: &str)
    -> Result<ApiResponse<TokenResponse>, ServiceError>;
    async fn get_me(&self, user_id: i32) -> Result<ApiResponse<UserResponse>, ServiceError>;
    /// Resolves an authenticated user id into a session; inactive users are rejected.
    async fn session(&self, user_id: i32) -> Result<Session, ServiceError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenServiceTrait {
    async fn create_access_token(&self, id: i32) -> Result<String, ServiceError>;
    async fn create_refresh_token(&self, id: i32) -> Result<String, ServiceError>;
}
