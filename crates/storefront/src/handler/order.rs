use super::authenticated;
use crate::{middleware::validate::SimpleValidatedJson, state::AppState};
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use shared::{
    abstract_trait::{DynOrderCommandService, DynOrderQueryService},
    domain::{
        Session,
        requests::{
            CreateOrderItemRequest, CreateOrderRequest, FindAllOrders, UpdateOrderRequest,
        },
        responses::{ApiResponse, ApiResponsePagination, OrderItemResponse, OrderResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(FindAllOrders),
    responses(
        (status = 200, description = "All orders for staff, the caller's own otherwise", body = ApiResponsePagination<Vec<OrderResponse>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_orders(
    Extension(service): Extension<DynOrderQueryService>,
    Extension(session): Extension<Session>,
    Query(params): Query<FindAllOrders>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&session, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with items and total", body = ApiResponse<OrderResponse>),
        (status = 403, description = "Neither staff nor the owner"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order(
    Extension(service): Extension<DynOrderQueryService>,
    Extension(session): Extension<Session>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(&session, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Order",
    security(("bearer_auth" = [])),
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Cart checked out into a new order", body = ApiResponse<OrderResponse>),
        (status = 400, description = "Unknown or empty cart"),
        (status = 409, description = "Not enough stock")
    )
)]
pub async fn create_order(
    Extension(service): Extension<DynOrderCommandService>,
    Extension(session): Extension<Session>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateOrderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.checkout(&session, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/items",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    request_body = CreateOrderItemRequest,
    responses(
        (status = 201, description = "Item added to the order", body = ApiResponse<OrderItemResponse>),
        (status = 400, description = "Validation error or unknown product"),
        (status = 403, description = "Neither staff nor the owner"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order is not pending or stock is short")
    )
)]
pub async fn add_order_item(
    Extension(service): Extension<DynOrderCommandService>,
    Extension(session): Extension<Session>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateOrderItemRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.add_item(&session, id, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/api/orders/{id}",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Payment status updated", body = ApiResponse<OrderResponse>),
        (status = 403, description = "Staff only"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn update_order(
    Extension(service): Extension<DynOrderCommandService>,
    Extension(session): Extension<Session>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateOrderRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update(&session, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    tag = "Order",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Order ID")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 403, description = "Staff only"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order still has items")
    )
)]
pub async fn delete_order(
    Extension(service): Extension<DynOrderCommandService>,
    Extension(session): Extension<Session>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    service.delete(&session, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let order = &app_state.di_container.order_service;

    authenticated(
        OpenApiRouter::new()
            .route("/api/orders", get(get_orders))
            .route("/api/orders", post(create_order))
            .route("/api/orders/{id}", get(get_order))
            .route("/api/orders/{id}", patch(update_order))
            .route("/api/orders/{id}", delete(delete_order))
            .route("/api/orders/{id}/items", post(add_order_item))
            .layer(Extension(order.query.clone()))
            .layer(Extension(order.command.clone())),
        &app_state,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::jwt::auth_middleware;
    use async_trait::async_trait;
    use axum::{Router, body::Body, http, middleware};
    use shared::{
        abstract_trait::{DynJwtService, JwtServiceTrait, OrderCommandServiceTrait},
        errors::ServiceError,
    };
    use tower::ServiceExt;

    struct EmptyCarts;

    #[async_trait]
    impl OrderCommandServiceTrait for EmptyCarts {
        async fn checkout(
            &self,
            _session: &Session,
            _req: &CreateOrderRequest,
        ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
            Err(ServiceError::field("cart_id", "The cart is empty."))
        }

        async fn add_item(
            &self,
            _session: &Session,
            _order_id: i32,
            _req: &CreateOrderItemRequest,
        ) -> Result<ApiResponse<OrderItemResponse>, ServiceError> {
            Err(ServiceError::Conflict("Only pending orders accept new items.".into()))
        }

        async fn update(
            &self,
            _session: &Session,
            _id: i32,
            _req: &UpdateOrderRequest,
        ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
            Err(ServiceError::Forbidden("Only staff can change orders.".into()))
        }

        async fn delete(&self, _session: &Session, _id: i32) -> Result<ApiResponse<()>, ServiceError> {
            Err(ServiceError::Forbidden("Only staff can delete orders.".into()))
        }
    }

    #[derive(Debug)]
    struct RejectingJwt;

    impl JwtServiceTrait for RejectingJwt {
        fn generate_token(&self, _user_id: i32, _token_type: &str) -> Result<String, ServiceError> {
            Err(ServiceError::Internal("not used".into()))
        }

        fn verify_token(&self, _token: &str, _expected_type: &str) -> Result<i32, ServiceError> {
            Err(ServiceError::TokenExpired)
        }
    }

    fn app() -> Router {
        Router::new()
            .route("/api/orders", post(create_order))
            .route("/api/orders/{id}/items", post(add_order_item))
            .layer(Extension(Arc::new(EmptyCarts) as DynOrderCommandService))
            .layer(Extension(Session::new(3, false)))
    }

    fn post_json(uri: &str, body: &str) -> http::Request<Body> {
        http::Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    #[tokio::test]
    async fn empty_cart_checkout_flags_cart_id() {
        let response = app()
            .oneshot(post_json(
                "/api/orders",
                r#"{"cart_id":"0b6f1c1e-5d1a-4c6e-9a57-0d3a2f1c9e11"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["errors"]["cart_id"][0], "The cart is empty.");
    }

    #[tokio::test]
    async fn items_on_settled_orders_are_a_conflict() {
        let response = app()
            .oneshot(post_json(
                "/api/orders/5/items",
                r#"{"product_id":1,"quantity":1}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn checkout_requires_a_token() {
        let app = Router::new()
            .route("/api/orders", post(create_order))
            .route_layer(middleware::from_fn(auth_middleware))
            .layer(Extension(Arc::new(EmptyCarts) as DynOrderCommandService))
            .layer(Extension(Arc::new(RejectingJwt) as DynJwtService));

        let response = app
            .clone()
            .oneshot(post_json("/api/orders", "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let request = http::Request::builder()
            .method("POST")
            .uri("/api/orders")
            .header("authorization", "Bearer stale")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
