mod auth;
mod cart;
mod cart_item;
mod category;
mod customer;
mod order;
mod product;
mod review;
mod user;

use crate::{
    middleware::{jwt::auth_middleware, session::session_middleware},
    state::AppState,
};
use anyhow::Result;
use axum::extract::{DefaultBodyLimit, State};
use axum::{Extension, middleware};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use prometheus_client::encoding::text::encode;
use shared::domain::Session;
use shared::errors::HttpError;
use shared::utils::shutdown_signal;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::{Modify, OpenApi, openapi::security::SecurityScheme};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::auth::auth_routes;
pub use self::cart::cart_routes;
pub use self::cart_item::cart_item_routes;
pub use self::category::category_routes;
pub use self::customer::customer_routes;
pub use self::order::order_routes;
pub use self::product::product_routes;
pub use self::review::review_routes;
pub use self::user::user_routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register_user_handler,
        auth::login_user_handler,
        auth::refresh_token_handler,
        auth::get_me_handler,

        user::get_users,
        user::get_user,

        category::get_categories,
        category::get_category,
        category::create_category,
        category::update_category,
        category::delete_category,

        product::get_products,
        product::get_product,
        product::create_product,
        product::update_product,
        product::delete_product,

        review::get_reviews,
        review::get_review,
        review::create_review,
        review::update_review,
        review::delete_review,

        cart::create_cart,
        cart::get_cart,
        cart::delete_cart,

        cart_item::get_cart_items,
        cart_item::get_cart_item,
        cart_item::add_cart_item,
        cart_item::update_cart_item,
        cart_item::delete_cart_item,

        customer::get_customers,
        customer::get_customer,
        customer::create_customer,
        customer::update_customer,
        customer::delete_customer,
        customer::get_me,
        customer::update_me,

        order::get_orders,
        order::get_order,
        order::create_order,
        order::add_order_item,
        order::update_order,
        order::delete_order,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Authentication endpoints"),
        (name = "User", description = "User endpoints"),
        (name = "Category", description = "Category endpoints"),
        (name = "Product", description = "Product endpoints"),
        (name = "Review", description = "Product review endpoints"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Cart-item", description = "Cart item endpoints"),
        (name = "Customer", description = "Customer profile endpoints"),
        (name = "Order", description = "Order endpoints"),
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(utoipa::openapi::security::Http::new(
                    utoipa::openapi::security::HttpAuthScheme::Bearer,
                )),
            );
        }
    }
}

/// Wraps routes that need a logged-in caller: the access token is checked
/// first, then the caller's session is loaded.
pub(crate) fn authenticated(router: OpenApiRouter, app_state: &AppState) -> OpenApiRouter {
    router
        .route_layer(middleware::from_fn(session_middleware))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.auth_service.identity.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}

/// Rejects callers that are not staff.
pub(crate) fn require_staff(session: &Session) -> Result<(), HttpError> {
    if session.is_staff {
        Ok(())
    } else {
        Err(HttpError::Forbidden(
            "You do not have permission to perform this action.".into(),
        ))
    }
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let mut buffer = String::new();

    let registry = state.registry.lock().await;

    if let Err(e) = encode(&mut buffer, &registry) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {e}"),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
        .into_response()
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(app_state: AppState) -> axum::Router {
        let shared_state = Arc::new(app_state);

        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/metrics", get(metrics_handler))
            .with_state(shared_state.clone())
            .merge(auth_routes(shared_state.clone()))
            .merge(user_routes(shared_state.clone()))
            .merge(category_routes(shared_state.clone()))
            .merge(product_routes(shared_state.clone()))
            .merge(review_routes(shared_state.clone()))
            .merge(cart_routes(shared_state.clone()))
            .merge(cart_item_routes(shared_state.clone()))
            .merge(customer_routes(shared_state.clone()))
            .merge(order_routes(shared_state));

        let router_with_layers = api_router
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(2 * 1024 * 1024))
            .layer(TraceLayer::new_for_http());

        let (app_router, api) = router_with_layers.split_for_parts();

        app_router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(app_state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr).await?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_check() {
        assert!(require_staff(&Session::new(1, true)).is_ok());
        assert!(matches!(
            require_staff(&Session::new(2, false)),
            Err(HttpError::Forbidden(_))
        ));
    }
}
