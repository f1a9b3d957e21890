mod api;
mod cart;
mod category;
mod customer;
mod order;
mod pagination;
mod product;
mod review;
mod token;
mod user;

pub use self::api::{ApiResponse, ApiResponsePagination};
pub use self::cart::{CartItemResponse, CartProductResponse, CartResponse};
pub use self::category::CategoryResponse;
pub use self::customer::CustomerResponse;
pub use self::order::{OrderItemResponse, OrderResponse};
pub use self::pagination::Pagination;
pub use self::product::ProductResponse;
pub use self::review::ReviewResponse;
pub use self::token::TokenResponse;
pub use self::user::UserResponse;
