use super::authenticated;
use crate::{middleware::validate::SimpleValidatedJson, state::AppState};
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use shared::{
    abstract_trait::{DynReviewCommandService, DynReviewQueryService},
    domain::{
        Session,
        requests::{CreateReviewRequest, FindAllReviews, UpdateReviewRequest},
        responses::{ApiResponse, ApiResponsePagination, ReviewResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/products/{product_id}/reviews",
    tag = "Review",
    params(
        ("product_id" = i32, Path, description = "Product ID"),
        FindAllReviews
    ),
    responses(
        (status = 200, description = "Reviews of the product", body = ApiResponsePagination<Vec<ReviewResponse>>),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_reviews(
    Extension(service): Extension<DynReviewQueryService>,
    Path(product_id): Path<i32>,
    Query(params): Query<FindAllReviews>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(product_id, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/{product_id}/reviews/{id}",
    tag = "Review",
    params(
        ("product_id" = i32, Path, description = "Product ID"),
        ("id" = i32, Path, description = "Review ID")
    ),
    responses(
        (status = 200, description = "Review details", body = ApiResponse<ReviewResponse>),
        (status = 404, description = "Review not found")
    )
)]
pub async fn get_review(
    Extension(service): Extension<DynReviewQueryService>,
    Path((product_id, id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(product_id, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/products/{product_id}/reviews",
    tag = "Review",
    security(("bearer_auth" = [])),
    params(("product_id" = i32, Path, description = "Product ID")),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ApiResponse<ReviewResponse>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn create_review(
    Extension(service): Extension<DynReviewCommandService>,
    Extension(session): Extension<Session>,
    Path(product_id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateReviewRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create(&session, product_id, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/products/{product_id}/reviews/{id}",
    tag = "Review",
    security(("bearer_auth" = [])),
    params(
        ("product_id" = i32, Path, description = "Product ID"),
        ("id" = i32, Path, description = "Review ID")
    ),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated", body = ApiResponse<ReviewResponse>),
        (status = 403, description = "Neither the author nor staff"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn update_review(
    Extension(service): Extension<DynReviewCommandService>,
    Extension(session): Extension<Session>,
    Path((product_id, id)): Path<(i32, i32)>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateReviewRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update(&session, product_id, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/products/{product_id}/reviews/{id}",
    tag = "Review",
    security(("bearer_auth" = [])),
    params(
        ("product_id" = i32, Path, description = "Product ID"),
        ("id" = i32, Path, description = "Review ID")
    ),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 403, description = "Neither the author nor staff"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn delete_review(
    Extension(service): Extension<DynReviewCommandService>,
    Extension(session): Extension<Session>,
    Path((product_id, id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, HttpError> {
    service.delete(&session, product_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn review_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let review = &app_state.di_container.review_service;

    let public_routes = OpenApiRouter::new()
        .route("/api/products/{product_id}/reviews", get(get_reviews))
        .route("/api/products/{product_id}/reviews/{id}", get(get_review))
        .layer(Extension(review.query.clone()));

    let private_routes = authenticated(
        OpenApiRouter::new()
            .route("/api/products/{product_id}/reviews", post(create_review))
            .route("/api/products/{product_id}/reviews/{id}", put(update_review))
            .route(
                "/api/products/{product_id}/reviews/{id}",
                delete(delete_review),
            )
            .layer(Extension(review.command.clone())),
        &app_state,
    );

    public_routes.merge(private_routes)
}
