use crate::errors::{
    FieldErrors, error::ErrorResponse, repository::RepositoryError, service::ServiceError,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    Validation(FieldErrors),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidCredentials => {
                HttpError::Unauthorized("No active account found with the given credentials".into())
            }

            ServiceError::Validation(errors) => HttpError::Validation(errors),

            ServiceError::Conflict(msg) => HttpError::Conflict(msg),

            ServiceError::NotFound(msg) => HttpError::NotFound(msg),

            ServiceError::Forbidden(msg) => HttpError::Forbidden(msg),

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => HttpError::NotFound("Not found".into()),
                RepositoryError::Conflict(msg) => HttpError::Conflict(msg),
                RepositoryError::AlreadyExists(msg) => {
                    HttpError::Conflict(format!("Already exists: {msg}"))
                }
                RepositoryError::ForeignKey(msg) => HttpError::Conflict(format!(
                    "Operation violates a reference constraint: {msg}"
                )),
                RepositoryError::Sqlx(_) | RepositoryError::Custom(_) => {
                    HttpError::Internal("Repository error".into())
                }
            },

            ServiceError::Jwt(err) => HttpError::Unauthorized(format!("JWT error: {err}")),

            ServiceError::TokenExpired => HttpError::Unauthorized("Token expired".into()),

            ServiceError::InvalidTokenType => HttpError::Unauthorized("Invalid token type".into()),

            ServiceError::Bcrypt(_) => HttpError::Internal("Internal authentication error".into()),

            ServiceError::Internal(msg) => HttpError::Internal(msg),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new("error", msg)),
            HttpError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    status: "error".into(),
                    message: "Validation failed".into(),
                    errors: Some(errors),
                },
            ),
            HttpError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorResponse::new("error", msg))
            }
            HttpError::Forbidden(msg) => (StatusCode::FORBIDDEN, ErrorResponse::new("error", msg)),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new("error", msg)),
            HttpError::Conflict(msg) => (StatusCode::CONFLICT, ErrorResponse::new("error", msg)),
            HttpError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("error", msg),
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deletion_guard_is_a_conflict() {
        let err = HttpError::from(ServiceError::Conflict("has items".into()));
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn field_errors_are_bad_request() {
        let err = HttpError::from(ServiceError::field("product_id", "No product with the given id"));
        assert!(matches!(&err, HttpError::Validation(errors) if errors.contains_key("product_id")));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_rows_are_not_found() {
        let err = HttpError::from(ServiceError::Repo(RepositoryError::NotFound));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn restrict_violations_are_conflicts() {
        let err = HttpError::from(ServiceError::Repo(RepositoryError::ForeignKey(
            "order_items_product_id_fkey".into(),
        )));
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }
}
