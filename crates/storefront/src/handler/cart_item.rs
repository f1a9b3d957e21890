use crate::{middleware::validate::SimpleValidatedJson, state::AppState};
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use shared::{
    abstract_trait::DynCartItemService,
    domain::{
        requests::{CreateCartItemRequest, UpdateCartItemRequest},
        responses::{ApiResponse, CartItemResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/carts/{cart_id}/items",
    tag = "Cart-item",
    params(("cart_id" = Uuid, Path, description = "Cart ID")),
    responses(
        (status = 200, description = "Items in the cart", body = ApiResponse<Vec<CartItemResponse>>),
        (status = 404, description = "Cart not found")
    )
)]
pub async fn get_cart_items(
    Extension(service): Extension<DynCartItemService>,
    Path(cart_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(cart_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/carts/{cart_id}/items/{id}",
    tag = "Cart-item",
    params(
        ("cart_id" = Uuid, Path, description = "Cart ID"),
        ("id" = i32, Path, description = "Cart item ID")
    ),
    responses(
        (status = 200, description = "Cart item", body = ApiResponse<CartItemResponse>),
        (status = 404, description = "Cart or item not found")
    )
)]
pub async fn get_cart_item(
    Extension(service): Extension<DynCartItemService>,
    Path((cart_id, id)): Path<(Uuid, i32)>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(cart_id, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/carts/{cart_id}/items",
    tag = "Cart-item",
    params(("cart_id" = Uuid, Path, description = "Cart ID")),
    request_body = CreateCartItemRequest,
    responses(
        (status = 201, description = "Item added, or merged into the existing line", body = ApiResponse<CartItemResponse>),
        (status = 400, description = "Validation error or unknown product"),
        (status = 404, description = "Cart not found")
    )
)]
pub async fn add_cart_item(
    Extension(service): Extension<DynCartItemService>,
    Path(cart_id): Path<Uuid>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateCartItemRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.add(cart_id, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/api/carts/{cart_id}/items/{id}",
    tag = "Cart-item",
    params(
        ("cart_id" = Uuid, Path, description = "Cart ID"),
        ("id" = i32, Path, description = "Cart item ID")
    ),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Quantity updated", body = ApiResponse<CartItemResponse>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Cart or item not found")
    )
)]
pub async fn update_cart_item(
    Extension(service): Extension<DynCartItemService>,
    Path((cart_id, id)): Path<(Uuid, i32)>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateCartItemRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update(cart_id, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/carts/{cart_id}/items/{id}",
    tag = "Cart-item",
    params(
        ("cart_id" = Uuid, Path, description = "Cart ID"),
        ("id" = i32, Path, description = "Cart item ID")
    ),
    responses(
        (status = 204, description = "Item removed"),
        (status = 404, description = "Cart or item not found")
    )
)]
pub async fn delete_cart_item(
    Extension(service): Extension<DynCartItemService>,
    Path((cart_id, id)): Path<(Uuid, i32)>,
) -> Result<impl IntoResponse, HttpError> {
    service.delete(cart_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn cart_item_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/carts/{cart_id}/items", get(get_cart_items))
        .route("/api/carts/{cart_id}/items", post(add_cart_item))
        .route("/api/carts/{cart_id}/items/{id}", get(get_cart_item))
        .route("/api/carts/{cart_id}/items/{id}", patch(update_cart_item))
        .route("/api/carts/{cart_id}/items/{id}", delete(delete_cart_item))
        .layer(Extension(app_state.di_container.cart_item_service.clone()))
}
