mod auth;
mod cart;
mod cart_item;
mod category;
mod customer;
mod order;
mod product;
mod review;
mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::auth::{AuthService, AuthServiceDeps};
pub use self::cart::CartService;
pub use self::cart_item::CartItemService;
pub use self::category::CategoryService;
pub use self::customer::CustomerService;
pub use self::order::{OrderService, OrderServiceDeps};
pub use self::product::ProductService;
pub use self::review::{ReviewService, ReviewServiceDeps};
pub use self::user::UserService;
