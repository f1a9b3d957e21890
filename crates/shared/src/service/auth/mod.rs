mod identity;
mod login;
mod register;
mod token;

use self::identity::{IdentityService, IdentityServiceDeps};
use self::login::{LoginService, LoginServiceDeps};
use self::register::{RegisterService, RegisterServiceDeps};
use self::token::TokenService;
use crate::abstract_trait::{
    DynHashing, DynIdentityService, DynJwtService, DynLoginService,
    DynRefreshTokenCommandRepository, DynRefreshTokenQueryRepository, DynRegisterService,
    DynTokenService, DynUserCommandRepository, DynUserQueryRepository,
};
use prometheus_client::registry::Registry;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthService {
    pub identity: DynIdentityService,
    pub login: DynLoginService,
    pub register: DynRegisterService,
    pub token: DynTokenService,
}

#[derive(Clone)]
pub struct AuthServiceDeps {
    pub hash: DynHashing,
    pub jwt: DynJwtService,
    pub user_query: DynUserQueryRepository,
    pub user_command: DynUserCommandRepository,
    pub refresh_query: DynRefreshTokenQueryRepository,
    pub refresh_command: DynRefreshTokenCommandRepository,
}

impl AuthService {
    pub fn new(deps: AuthServiceDeps, registry: &mut Registry) -> Self {
        let token = Arc::new(TokenService::new(
            deps.jwt.clone(),
            deps.refresh_command.clone(),
        )) as DynTokenService;

        let identity = Arc::new(IdentityService::new(
            IdentityServiceDeps {
                jwt: deps.jwt.clone(),
                token_service: token.clone(),
                refresh_query: deps.refresh_query.clone(),
                user_query: deps.user_query.clone(),
            },
            registry,
        )) as DynIdentityService;

        let login = Arc::new(LoginService::new(
            LoginServiceDeps {
                hash: deps.hash.clone(),
                token_service: token.clone(),
                query: deps.user_query.clone(),
            },
            registry,
        )) as DynLoginService;

        let register = Arc::new(RegisterService::new(
            RegisterServiceDeps {
                query: deps.user_query.clone(),
                command: deps.user_command.clone(),
                hash: deps.hash.clone(),
            },
            registry,
        )) as DynRegisterService;

        Self {
            identity,
            login,
            register,
            token,
        }
    }
}
