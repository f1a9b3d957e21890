use axum::{
    Extension, Json,
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::IntoResponse,
};
use shared::{
    abstract_trait::DynIdentityService,
    errors::{ErrorResponse, ServiceError},
};
use tracing::error;

/// Resolves the user id left by `auth_middleware` into a `Session`.
pub async fn session_middleware(
    Extension(identity): Extension<DynIdentityService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorResponse>)> {
    let Some(user_id) = req.extensions().get::<i32>().copied() else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new(
                "error",
                "Missing user_id in request context",
            )),
        ));
    };

    let session = match identity.session(user_id).await {
        Ok(session) => session,
        Err(ServiceError::InvalidCredentials) => {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new(
                    "error",
                    "User not found or inactive",
                )),
            ));
        }
        Err(e) => {
            error!("❌ Failed to load session for user {user_id}: {e}");
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("error", "Failed to load session")),
            ));
        }
    };

    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}
