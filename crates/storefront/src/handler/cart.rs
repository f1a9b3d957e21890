use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use shared::{
    abstract_trait::DynCartService,
    domain::responses::{ApiResponse, CartResponse},
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/carts",
    tag = "Cart",
    responses(
        (status = 201, description = "Cart created", body = ApiResponse<CartResponse>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_cart(
    Extension(service): Extension<DynCartService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create().await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/carts/{id}",
    tag = "Cart",
    params(("id" = Uuid, Path, description = "Cart ID")),
    responses(
        (status = 200, description = "Cart with its items and total", body = ApiResponse<CartResponse>),
        (status = 404, description = "Cart not found")
    )
)]
pub async fn get_cart(
    Extension(service): Extension<DynCartService>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/carts/{id}",
    tag = "Cart",
    params(("id" = Uuid, Path, description = "Cart ID")),
    responses(
        (status = 204, description = "Cart deleted"),
        (status = 404, description = "Cart not found"),
        (status = 409, description = "Cart still holds items")
    )
)]
pub async fn delete_cart(
    Extension(service): Extension<DynCartService>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn cart_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/carts", post(create_cart))
        .route("/api/carts/{id}", get(get_cart))
        .route("/api/carts/{id}", delete(delete_cart))
        .layer(Extension(app_state.di_container.cart_service.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{Router, body::Body, http};
    use rust_decimal::Decimal;
    use shared::{abstract_trait::CartServiceTrait, errors::ServiceError};
    use tower::ServiceExt;

    struct OneCart {
        id: Uuid,
        has_items: bool,
    }

    #[async_trait]
    impl CartServiceTrait for OneCart {
        async fn create(&self) -> Result<ApiResponse<CartResponse>, ServiceError> {
            Ok(ApiResponse::success(
                "Cart created",
                CartResponse {
                    id: self.id,
                    created_at: String::new(),
                    items: Vec::new(),
                    total_price: Decimal::ZERO,
                },
            ))
        }

        async fn find_by_id(&self, id: Uuid) -> Result<ApiResponse<CartResponse>, ServiceError> {
            if id == self.id {
                self.create().await
            } else {
                Err(ServiceError::NotFound("Cart not found".into()))
            }
        }

        async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, ServiceError> {
            if id != self.id {
                return Err(ServiceError::NotFound("Cart not found".into()));
            }
            if self.has_items {
                return Err(ServiceError::Conflict(
                    "Cart cannot be deleted because it still holds items.".into(),
                ));
            }
            Ok(ApiResponse::success("Cart deleted", ()))
        }
    }

    fn app(cart: OneCart) -> Router {
        Router::new()
            .route("/api/carts", post(create_cart))
            .route("/api/carts/{id}", get(get_cart).delete(delete_cart))
            .layer(Extension(Arc::new(cart) as DynCartService))
    }

    fn request(method: &str, uri: String) -> http::Request<Body> {
        http::Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn new_cart_is_created_empty() {
        let id = Uuid::new_v4();
        let response = app(OneCart { id, has_items: false })
            .oneshot(request("POST", "/api/carts".into()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["id"], id.to_string());
    }

    #[tokio::test]
    async fn cart_with_items_cannot_be_deleted() {
        let id = Uuid::new_v4();
        let response = app(OneCart { id, has_items: true })
            .oneshot(request("DELETE", format!("/api/carts/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn empty_cart_is_deleted() {
        let id = Uuid::new_v4();
        let response = app(OneCart { id, has_items: false })
            .oneshot(request("DELETE", format!("/api/carts/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn malformed_cart_id_is_rejected() {
        let response = app(OneCart {
            id: Uuid::new_v4(),
            has_items: false,
        })
        .oneshot(request("GET", "/api/carts/not-a-uuid".into()))
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
