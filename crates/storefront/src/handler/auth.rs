use super::authenticated;
use crate::{middleware::validate::SimpleValidatedJson, state::AppState};
use axum::{
    Extension, Json,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use shared::{
    abstract_trait::{DynIdentityService, DynLoginService, DynRegisterService},
    domain::{
        requests::{LoginRequest, RefreshTokenRequest, RegisterRequest},
        responses::{ApiResponse, TokenResponse, UserResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = ApiResponse<UserResponse>),
        (status = 400, description = "Validation error"),
    ),
    tag = "Auth"
)]
pub async fn register_user_handler(
    Extension(service): Extension<DynRegisterService>,
    SimpleValidatedJson(body): SimpleValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.register(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<TokenResponse>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login_user_handler(
    Extension(service): Extension<DynLoginService>,
    SimpleValidatedJson(body): SimpleValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.login(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Token refreshed", body = ApiResponse<TokenResponse>),
        (status = 401, description = "Invalid or expired refresh token")
    ),
    tag = "Auth"
)]
pub async fn refresh_token_handler(
    Extension(service): Extension<DynIdentityService>,
    SimpleValidatedJson(body): SimpleValidatedJson<RefreshTokenRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.refresh_token(&body.refresh_token).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth",
)]
pub async fn get_me_handler(
    Extension(service): Extension<DynIdentityService>,
    Extension(user_id): Extension<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_me(user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn auth_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let auth = &app_state.di_container.auth_service;

    let public_routes = OpenApiRouter::new()
        .route("/api/auth/register", post(register_user_handler))
        .route("/api/auth/login", post(login_user_handler))
        .route("/api/auth/refresh", post(refresh_token_handler))
        .layer(Extension(auth.register.clone()))
        .layer(Extension(auth.login.clone()))
        .layer(Extension(auth.identity.clone()));

    let private_routes = authenticated(
        OpenApiRouter::new().route("/api/auth/me", get(get_me_handler)),
        &app_state,
    );

    public_routes.merge(private_routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{Router, body::Body, http};
    use shared::{abstract_trait::RegisterServiceTrait, errors::ServiceError};
    use tower::ServiceExt;

    struct EchoRegister;

    #[async_trait]
    impl RegisterServiceTrait for EchoRegister {
        async fn register(
            &self,
            req: &RegisterRequest,
        ) -> Result<ApiResponse<UserResponse>, ServiceError> {
            Ok(ApiResponse::success(
                "User registered",
                UserResponse {
                    id: 1,
                    username: req.username.clone(),
                    email: req.email.clone(),
                    first_name: req.first_name.clone(),
                    last_name: req.last_name.clone(),
                    is_staff: false,
                    created_at: String::new(),
                },
            ))
        }
    }

    fn app() -> Router {
        Router::new()
            .route("/api/auth/register", post(register_user_handler))
            .layer(Extension(Arc::new(EchoRegister) as DynRegisterService))
    }

    fn register_body(password2: &str) -> Body {
        Body::from(
            serde_json::json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "wonderland1",
                "password2": password2,
                "first_name": "Alice",
                "last_name": "Liddell"
            })
            .to_string(),
        )
    }

    fn post_register(body: Body) -> http::Request<Body> {
        http::Request::builder()
            .method("POST")
            .uri("/api/auth/register")
            .header("content-type", "application/json")
            .body(body)
            .unwrap()
    }

    #[tokio::test]
    async fn register_answers_created() {
        let response = app()
            .oneshot(post_register(register_body("wonderland1")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn password_mismatch_is_a_field_error() {
        let response = app()
            .oneshot(post_register(register_body("different1")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["errors"]["password"][0], "Passwords do not match");
    }
}
