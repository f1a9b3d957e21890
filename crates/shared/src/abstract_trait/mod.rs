mod auth;
mod cart;
mod cart_item;
mod category;
mod customer;
mod hashing;
mod jwt;
mod order;
mod product;
mod refresh_token;
mod review;
mod user;

pub use self::auth::{
    DynIdentityService, DynLoginService, DynRegisterService, DynTokenService,
    IdentityServiceTrait, LoginServiceTrait, RegisterServiceTrait, TokenServiceTrait,
};
pub use self::cart::{
    CartCommandRepositoryTrait, CartQueryRepositoryTrait, CartServiceTrait,
    DynCartCommandRepository, DynCartQueryRepository, DynCartService,
};
pub use self::cart_item::{
    CartItemCommandRepositoryTrait, CartItemQueryRepositoryTrait, CartItemServiceTrait,
    DynCartItemCommandRepository, DynCartItemQueryRepository, DynCartItemService,
};
pub use self::category::{
    CategoryCommandRepositoryTrait, CategoryCommandServiceTrait, CategoryQueryRepositoryTrait,
    CategoryQueryServiceTrait, DynCategoryCommandRepository, DynCategoryCommandService,
    DynCategoryQueryRepository, DynCategoryQueryService,
};
pub use self::customer::{
    CustomerCommandRepositoryTrait, CustomerCommandServiceTrait, CustomerQueryRepositoryTrait,
    CustomerQueryServiceTrait, DynCustomerCommandRepository, DynCustomerCommandService,
    DynCustomerQueryRepository, DynCustomerQueryService,
};
pub use self::hashing::{DynHashing, HashingTrait};
pub use self::jwt::{DynJwtService, JwtServiceTrait};
pub use self::order::{
    DynOrderCommandRepository, DynOrderCommandService, DynOrderQueryRepository,
    DynOrderQueryService, OrderCommandRepositoryTrait, OrderCommandServiceTrait,
    OrderQueryRepositoryTrait, OrderQueryServiceTrait,
};
pub use self::product::{
    DynProductCommandRepository, DynProductCommandService, DynProductQueryRepository,
    DynProductQueryService, ProductCommandRepositoryTrait, ProductCommandServiceTrait,
    ProductQueryRepositoryTrait, ProductQueryServiceTrait,
};
pub use self::refresh_token::{
    DynRefreshTokenCommandRepository, DynRefreshTokenQueryRepository,
    RefreshTokenCommandRepositoryTrait, RefreshTokenQueryRepositoryTrait,
};
pub use self::review::{
    DynReviewCommandRepository, DynReviewCommandService, DynReviewQueryRepository,
    DynReviewQueryService, ReviewCommandRepositoryTrait, ReviewCommandServiceTrait,
    ReviewQueryRepositoryTrait, ReviewQueryServiceTrait,
};
pub use self::user::{
    DynUserCommandRepository, DynUserQueryRepository, DynUserQueryService,
    UserCommandRepositoryTrait, UserQueryRepositoryTrait, UserQueryServiceTrait,
};

#[cfg(test)]
pub use self::{
    auth::MockTokenServiceTrait,
    cart::{MockCartCommandRepositoryTrait, MockCartQueryRepositoryTrait},
    cart_item::{MockCartItemCommandRepositoryTrait, MockCartItemQueryRepositoryTrait},
    category::{MockCategoryCommandRepositoryTrait, MockCategoryQueryRepositoryTrait},
    customer::{MockCustomerCommandRepositoryTrait, MockCustomerQueryRepositoryTrait},
    hashing::MockHashingTrait,
    jwt::MockJwtServiceTrait,
    order::{MockOrderCommandRepositoryTrait, MockOrderQueryRepositoryTrait},
    product::{MockProductCommandRepositoryTrait, MockProductQueryRepositoryTrait},
    refresh_token::{MockRefreshTokenCommandRepositoryTrait, MockRefreshTokenQueryRepositoryTrait},
    review::{MockReviewCommandRepositoryTrait, MockReviewQueryRepositoryTrait},
    user::{MockUserCommandRepositoryTrait, MockUserQueryRepositoryTrait},
};
