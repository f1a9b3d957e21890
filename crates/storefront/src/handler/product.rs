use super::{authenticated, require_staff};
use crate::{middleware::validate::SimpleValidatedJson, state::AppState};
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use shared::{
    abstract_trait::{DynProductCommandService, DynProductQueryService},
    domain::{
        Session,
        requests::{CreateProductRequest, FindAllProducts, UpdateProductRequest},
        responses::{ApiResponse, ApiResponsePagination, ProductResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Product",
    params(FindAllProducts),
    responses(
        (status = 200, description = "List of products", body = ApiResponsePagination<Vec<ProductResponse>>),
        (status = 400, description = "Malformed filter"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_products(
    Extension(service): Extension<DynProductQueryService>,
    Query(params): Query<FindAllProducts>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Product",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    Extension(service): Extension<DynProductQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Product",
    security(("bearer_auth" = [])),
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Staff only")
    )
)]
pub async fn create_product(
    Extension(service): Extension<DynProductCommandService>,
    Extension(session): Extension<Session>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    require_staff(&session)?;
    let response = service.create(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Staff only"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    Extension(service): Extension<DynProductCommandService>,
    Extension(session): Extension<Session>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    require_staff(&session)?;
    let response = service.update(id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 403, description = "Staff only"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Product is referenced by an order")
    )
)]
pub async fn delete_product(
    Extension(service): Extension<DynProductCommandService>,
    Extension(session): Extension<Session>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    require_staff(&session)?;
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let product = &app_state.di_container.product_service;

    let public_routes = OpenApiRouter::new()
        .route("/api/products", get(get_products))
        .route("/api/products/{id}", get(get_product))
        .layer(Extension(product.query.clone()));

    let staff_routes = authenticated(
        OpenApiRouter::new()
            .route("/api/products", post(create_product))
            .route("/api/products/{id}", patch(update_product))
            .route("/api/products/{id}", delete(delete_product))
            .layer(Extension(product.command.clone())),
        &app_state,
    );

    public_routes.merge(staff_routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{Router, body::Body, http};
    use rust_decimal::Decimal;
    use shared::{
        abstract_trait::ProductQueryServiceTrait, domain::responses::Pagination,
        errors::ServiceError,
    };
    use std::sync::Mutex;
    use tower::ServiceExt;

    #[derive(Default)]
    struct RecordingProducts {
        seen: Mutex<Option<FindAllProducts>>,
    }

    #[async_trait]
    impl ProductQueryServiceTrait for RecordingProducts {
        async fn find_all(
            &self,
            req: &FindAllProducts,
        ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
            *self.seen.lock().unwrap() = Some(req.clone());
            Ok(ApiResponsePagination::success(
                "Products retrieved",
                Vec::new(),
                Pagination {
                    page: req.page,
                    page_size: req.page_size,
                    total_items: 0,
                    total_pages: 0,
                },
            ))
        }

        async fn find_by_id(&self, _id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
            Err(ServiceError::NotFound("Product not found".into()))
        }
    }

    fn get(uri: &str) -> http::Request<Body> {
        http::Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn list_filters_come_from_the_query_string() {
        let service = Arc::new(RecordingProducts::default());
        let app = Router::new()
            .route("/api/products", axum::routing::get(get_products))
            .layer(Extension(service.clone() as DynProductQueryService));

        let response = app
            .oneshot(get(
                "/api/products?category_id=3&price_min=5.50&stock_gt=0&ordering=-price&page_size=20",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let seen = service.seen.lock().unwrap().clone().unwrap();
        assert_eq!(seen.category_id, Some(3));
        assert_eq!(seen.price_min, Some(Decimal::new(550, 2)));
        assert_eq!(seen.stock_gt, Some(0));
        assert_eq!(seen.page_size, 20);
        assert!(seen.ordering.is_some());
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let app = Router::new()
            .route("/api/products/{id}", axum::routing::get(get_product))
            .layer(Extension(
                Arc::new(RecordingProducts::default()) as DynProductQueryService
            ));

        let response = app.oneshot(get("/api/products/99")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
