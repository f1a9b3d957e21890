use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use shared::errors::{FieldErrors, HttpError};
use validator::{Validate, ValidationErrors};

/// JSON body extractor that runs the `validator` rules and answers 400 with
/// per-field messages.
pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| HttpError::Validation(field_errors(&errors)))?;

        Ok(Self(value))
    }
}

fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut map = FieldErrors::new();

    for (field, field_errors) in errors.field_errors() {
        let messages = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| match e.code.as_ref() {
                        "email" => "Enter a valid email address.".to_string(),
                        "length" => "Invalid length".to_string(),
                        "range" => "Value out of range".to_string(),
                        "must_match" => "Passwords do not match".to_string(),
                        _ => format!("Invalid {field}"),
                    })
            })
            .collect();
        map.insert(field.to_string(), messages);
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{self, StatusCode},
        routing::post,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Quantity {
        #[validate(range(min = 1, message = "Quantity must be at least 1"))]
        quantity: i32,
    }

    async fn echo(SimpleValidatedJson(body): SimpleValidatedJson<Quantity>) -> String {
        body.quantity.to_string()
    }

    fn post_json(body: &'static str) -> http::Request<Body> {
        http::Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn invalid_field_is_reported_by_name() {
        let app = Router::new().route("/", post(echo));

        let response = app.oneshot(post_json(r#"{"quantity":0}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["errors"]["quantity"][0], "Quantity must be at least 1");
    }

    #[tokio::test]
    async fn valid_body_passes_through() {
        let app = Router::new().route("/", post(echo));

        let response = app.oneshot(post_json(r#"{"quantity":3}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let app = Router::new().route("/", post(echo));

        let response = app.oneshot(post_json("{")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
