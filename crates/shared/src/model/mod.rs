mod cart;
mod category;
mod customer;
mod order;
mod product;
mod refresh_token;
mod review;
mod user;

pub use self::cart::{Cart, CartItem, CartItemWithProduct};
pub use self::category::Category;
pub use self::customer::{Customer, Membership};
pub use self::order::{Order, OrderItem, PaymentStatus};
pub use self::product::Product;
pub use self::refresh_token::RefreshToken;
pub use self::review::Review;
pub use self::user::User;
