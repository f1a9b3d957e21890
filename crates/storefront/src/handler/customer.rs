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
    abstract_trait::{DynCustomerCommandService, DynCustomerQueryService},
    domain::{
        Session,
        requests::{CreateCustomerRequest, FindAllCustomers, UpdateCustomerRequest},
        responses::{ApiResponse, ApiResponsePagination, CustomerResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/customers",
    tag = "Customer",
    security(("bearer_auth" = [])),
    params(FindAllCustomers),
    responses(
        (status = 200, description = "All profiles for staff, the caller's own otherwise", body = ApiResponsePagination<Vec<CustomerResponse>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_customers(
    Extension(service): Extension<DynCustomerQueryService>,
    Extension(session): Extension<Session>,
    Query(params): Query<FindAllCustomers>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&session, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    tag = "Customer",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer profile", body = ApiResponse<CustomerResponse>),
        (status = 403, description = "Neither staff nor the owner"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn get_customer(
    Extension(service): Extension<DynCustomerQueryService>,
    Extension(session): Extension<Session>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(&session, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/customers",
    tag = "Customer",
    security(("bearer_auth" = [])),
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Profile created for the caller", body = ApiResponse<CustomerResponse>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "The caller already has a profile")
    )
)]
pub async fn create_customer(
    Extension(service): Extension<DynCustomerCommandService>,
    Extension(session): Extension<Session>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateCustomerRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create(&session, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    tag = "Customer",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<CustomerResponse>),
        (status = 403, description = "Neither staff nor the owner"),
        (status = 404, description = "Customer not found")
    )
)]
pub async fn update_customer(
    Extension(service): Extension<DynCustomerCommandService>,
    Extension(session): Extension<Session>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateCustomerRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update(&session, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    tag = "Customer",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 403, description = "Staff only"),
        (status = 409, description = "Customer has orders")
    )
)]
pub async fn delete_customer(
    Extension(service): Extension<DynCustomerCommandService>,
    Extension(session): Extension<Session>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    service.delete(&session, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/customers/me",
    tag = "Customer",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's profile, created on first access", body = ApiResponse<CustomerResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_me(
    Extension(service): Extension<DynCustomerCommandService>,
    Extension(session): Extension<Session>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_or_create_me(&session).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/customers/me",
    tag = "Customer",
    security(("bearer_auth" = [])),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "The caller's profile, updated", body = ApiResponse<CustomerResponse>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn update_me(
    Extension(service): Extension<DynCustomerCommandService>,
    Extension(session): Extension<Session>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateCustomerRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update_me(&session, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn customer_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let customer = &app_state.di_container.customer_service;

    authenticated(
        OpenApiRouter::new()
            .route("/api/customers", get(get_customers))
            .route("/api/customers", post(create_customer))
            .route("/api/customers/me", get(get_me))
            .route("/api/customers/me", put(update_me))
            .route("/api/customers/{id}", get(get_customer))
            .route("/api/customers/{id}", put(update_customer))
            .route("/api/customers/{id}", delete(delete_customer))
            .layer(Extension(customer.query.clone()))
            .layer(Extension(customer.command.clone())),
        &app_state,
    )
}
