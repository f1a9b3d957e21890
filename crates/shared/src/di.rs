use crate::{
    abstract_trait::{DynCartItemService, DynCartService, DynHashing, DynJwtService},
    config::ConnectionPool,
    repository::{
        CartItemRepository, CartRepository, CategoryRepository, CustomerRepository,
        OrderRepository, ProductRepository, RefreshTokenRepository, ReviewRepository,
        UserRepository,
    },
    service::{
        AuthService, AuthServiceDeps, CartItemService, CartService, CategoryService,
        CustomerService, OrderService, OrderServiceDeps, ProductService, ReviewService,
        ReviewServiceDeps, UserService,
    },
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub category_service: CategoryService,
    pub product_service: ProductService,
    pub review_service: ReviewService,
    pub cart_service: DynCartService,
    pub cart_item_service: DynCartItemService,
    pub customer_service: CustomerService,
    pub order_service: OrderService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth_service", &"<AuthService>")
            .field("user_service", &"<UserService>")
            .field("category_service", &"<CategoryService>")
            .field("product_service", &"<ProductService>")
            .field("review_service", &"<ReviewService>")
            .field("cart_service", &"<CartService>")
            .field("cart_item_service", &"<CartItemService>")
            .field("customer_service", &"<CustomerService>")
            .field("order_service", &"<OrderService>")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
    pub hash: DynHashing,
    pub jwt_config: DynJwtService,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps {
            pool,
            hash,
            jwt_config,
        } = deps;

        let user_repository = UserRepository::new(pool.clone());
        let refresh_token = RefreshTokenRepository::new(pool.clone());
        let category_repository = CategoryRepository::new(pool.clone());
        let product_repository = ProductRepository::new(pool.clone());
        let review_repository = ReviewRepository::new(pool.clone());
        let cart_repository = CartRepository::new(pool.clone());
        let cart_item_repository = CartItemRepository::new(pool.clone());
        let customer_repository = CustomerRepository::new(pool.clone());
        let order_repository = OrderRepository::new(pool);

        let auth_service = AuthService::new(
            AuthServiceDeps {
                hash,
                jwt: jwt_config,
                user_query: user_repository.query.clone(),
                user_command: user_repository.command,
                refresh_query: refresh_token.query,
                refresh_command: refresh_token.command,
            },
            registry,
        );

        let user_service = UserService::new(user_repository.query, registry);

        let category_service = CategoryService::new(
            category_repository.query.clone(),
            category_repository.command,
            registry,
        );

        let product_service = ProductService::new(
            product_repository.query.clone(),
            product_repository.command,
            category_repository.query,
            registry,
        );

        let review_service = ReviewService::new(
            ReviewServiceDeps {
                query: review_repository.query,
                command: review_repository.command,
                product_query: product_repository.query.clone(),
                customer_query: customer_repository.query.clone(),
                customer_command: customer_repository.command.clone(),
            },
            registry,
        );

        let cart_service = Arc::new(CartService::new(
            cart_repository.query.clone(),
            cart_repository.command,
            cart_item_repository.query.clone(),
            registry,
        )) as DynCartService;

        let cart_item_service = Arc::new(CartItemService::new(
            cart_repository.query.clone(),
            cart_item_repository.query.clone(),
            cart_item_repository.command,
            product_repository.query.clone(),
            registry,
        )) as DynCartItemService;

        let customer_service = CustomerService::new(
            customer_repository.query.clone(),
            customer_repository.command.clone(),
            registry,
        );

        let order_service = OrderService::new(
            OrderServiceDeps {
                query: order_repository.query,
                command: order_repository.command,
                cart_query: cart_repository.query,
                cart_item_query: cart_item_repository.query,
                product_query: product_repository.query,
                customer_query: customer_repository.query,
                customer_command: customer_repository.command,
            },
            registry,
        );

        Self {
            auth_service,
            user_service,
            category_service,
            product_service,
            review_service,
            cart_service,
            cart_item_service,
            customer_service,
            order_service,
        }
    }
}
