mod auth;
mod cart;
mod category;
mod customer;
mod order;
mod product;
mod review;
mod user;
mod validation;

pub use self::auth::{LoginRequest, RefreshTokenRequest, RegisterRequest};
pub use self::cart::{CreateCartItemRequest, UpdateCartItemRequest};
pub use self::category::{CreateCategoryRequest, FindAllCategories, UpdateCategoryRequest};
pub use self::customer::{
    CreateCustomerRecord, CreateCustomerRequest, FindAllCustomers, UpdateCustomerRequest,
};
pub use self::order::{
    CreateOrderItemRecord, CreateOrderItemRequest, CreateOrderRequest, FindAllOrders,
    OrderLineRecord, PlaceOrderRecord, UpdateOrderRequest,
};
pub use self::product::{
    CreateProductRequest, FindAllProducts, ProductOrdering, UpdateProductRecord,
    UpdateProductRequest,
};
pub use self::review::{
    CreateReviewRecord, CreateReviewRequest, FindAllReviews, UpdateReviewRequest,
};
pub use self::user::{CreateUserRecord, FindAllUsers};

pub(crate) fn default_page() -> i32 {
    1
}

pub(crate) fn default_page_size() -> i32 {
    10
}

pub const MAX_PAGE_SIZE: i32 = 100;

/// Largest quantity a single cart or order line may hold.
pub const MAX_QUANTITY: i32 = 32767;

/// Clamps client paging input to `page >= 1` and `1..=MAX_PAGE_SIZE`.
pub fn normalize_page(page: i32, page_size: i32) -> (i32, i32) {
    let page = page.max(1);
    let page_size = if page_size <= 0 {
        default_page_size()
    } else {
        page_size.min(MAX_PAGE_SIZE)
    };
    (page, page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_is_capped() {
        assert_eq!(normalize_page(0, 500), (1, MAX_PAGE_SIZE));
        assert_eq!(normalize_page(3, 0), (3, 10));
        assert_eq!(normalize_page(2, 25), (2, 25));
    }
}
