use crate::{
    abstract_trait::{
        DynHashing, DynUserCommandRepository, DynUserQueryRepository, RegisterServiceTrait,
    },
    domain::{
        requests::{CreateUserRecord, RegisterRequest},
        responses::{ApiResponse, UserResponse},
    },
    errors::{FieldErrors, ServiceError},
    utils::{Method, OperationTracker},
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use tracing::{error, info, warn};

pub struct RegisterService {
    query: DynUserQueryRepository,
    command: DynUserCommandRepository,
    hash: DynHashing,
    tracker: OperationTracker,
}

pub struct RegisterServiceDeps {
    pub query: DynUserQueryRepository,
    pub command: DynUserCommandRepository,
    pub hash: DynHashing,
}

impl RegisterService {
    pub fn new(deps: RegisterServiceDeps, registry: &mut Registry) -> Self {
        let RegisterServiceDeps {
            query,
            command,
            hash,
        } = deps;

        Self {
            query,
            command,
            hash,
            tracker: OperationTracker::new("register-service", registry),
        }
    }

    async fn check_unique(&self, req: &RegisterRequest) -> Result<(), ServiceError> {
        let mut errors = FieldErrors::new();

        if self.query.find_by_username(&req.username).await?.is_some() {
            errors
                .entry("username".into())
                .or_default()
                .push("A user with that username already exists.".into());
        }

        if self.query.find_by_email(&req.email).await?.is_some() {
            errors
                .entry("email".into())
                .or_default()
                .push("A user with that email already exists.".into());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Validation(errors))
        }
    }

    async fn create(&self, req: &RegisterRequest) -> Result<UserResponse, ServiceError> {
        if req.password != req.password2 {
            return Err(ServiceError::field("password", "Passwords do not match"));
        }

        self.check_unique(req).await?;

        let password = self.hash.hash_password(&req.password).await?;

        let record = CreateUserRecord {
            username: req.username.clone(),
            email: req.email.clone(),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            password,
        };

        let user = self.command.create_user(&record).await.map_err(|e| {
            error!("❌ Failed to create user '{}': {e:?}", req.username);
            ServiceError::Repo(e)
        })?;

        Ok(UserResponse::from(user))
    }
}

#[async_trait]
impl RegisterServiceTrait for RegisterService {
    async fn register(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        info!(
            "📝 [REGISTER] Starting user registration | Username: {}",
            req.username
        );

        let method = Method::Post;
        let tracing_ctx = self.tracker.start(
            "RegisterUser",
            vec![
                KeyValue::new("component", "auth"),
                KeyValue::new("user.username", req.username.clone()),
            ],
        );

        let result = self.create(req).await;
        self.tracker
            .finish(&tracing_ctx, method, &result, "User registered successfully");

        match result {
            Ok(user) => {
                info!("✅ [REGISTER] User registered | ID: {}", user.id);
                Ok(ApiResponse::success("User registered successfully", user))
            }
            Err(e) => {
                warn!("⚠️ [REGISTER] Registration rejected: {e}");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::{
        MockHashingTrait, MockUserCommandRepositoryTrait, MockUserQueryRepositoryTrait,
    };
    use crate::service::test_support::user;
    use std::sync::Arc;

    fn request(password2: &str) -> RegisterRequest {
        RegisterRequest {
            username: "ada".into(),
            email: "ada@example.com".into(),
            password: "analytical1".into(),
            password2: password2.into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
        }
    }

    fn service(
        query: MockUserQueryRepositoryTrait,
        command: MockUserCommandRepositoryTrait,
        hash: MockHashingTrait,
    ) -> RegisterService {
        RegisterService::new(
            RegisterServiceDeps {
                query: Arc::new(query),
                command: Arc::new(command),
                hash: Arc::new(hash),
            },
            &mut Registry::default(),
        )
    }

    #[tokio::test]
    async fn stores_submitted_last_name_and_hashed_password() {
        let mut query = MockUserQueryRepositoryTrait::new();
        query.expect_find_by_username().returning(|_| Ok(None));
        query.expect_find_by_email().returning(|_| Ok(None));

        let mut hash = MockHashingTrait::new();
        hash.expect_hash_password()
            .returning(|_| Ok("bcrypt-hash".to_string()));

        let mut command = MockUserCommandRepositoryTrait::new();
        command
            .expect_create_user()
            .withf(|r| r.last_name == "Lovelace" && r.password == "bcrypt-hash")
            .times(1)
            .returning(|r| {
                let mut u = user(1);
                u.username = r.username.clone();
                u.last_name = r.last_name.clone();
                Ok(u)
            });

        let response = service(query, command, hash)
            .register(&request("analytical1"))
            .await
            .unwrap();

        assert_eq!(response.data.last_name, "Lovelace");
        assert_eq!(response.data.username, "ada");
    }

    #[tokio::test]
    async fn mismatched_passwords_are_a_password_field_error() {
        let err = service(
            MockUserQueryRepositoryTrait::new(),
            MockUserCommandRepositoryTrait::new(),
            MockHashingTrait::new(),
        )
        .register(&request("different1"))
        .await
        .unwrap_err();

        match err {
            ServiceError::Validation(errors) => {
                assert_eq!(errors["password"], vec!["Passwords do not match".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn duplicate_username_and_email_are_reported_together() {
        let mut query = MockUserQueryRepositoryTrait::new();
        query.expect_find_by_username().returning(|_| Ok(Some(user(2))));
        query.expect_find_by_email().returning(|_| Ok(Some(user(2))));

        let err = service(
            query,
            MockUserCommandRepositoryTrait::new(),
            MockHashingTrait::new(),
        )
        .register(&request("analytical1"))
        .await
        .unwrap_err();

        match err {
            ServiceError::Validation(errors) => {
                assert!(errors.contains_key("username"));
                assert!(errors.contains_key("email"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
