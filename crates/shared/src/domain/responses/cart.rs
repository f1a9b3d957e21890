use crate::{
    model::{Cart, CartItemWithProduct},
    pricing,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CartProductResponse {
    pub id: i32,
    pub name: String,
    #[schema(value_type = String)]
    pub price: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CartItemResponse {
    pub id: i32,
    pub product: CartProductResponse,
    pub quantity: i32,
    #[schema(value_type = String)]
    pub total_price: Decimal,
}

impl From<CartItemWithProduct> for CartItemResponse {
    fn from(value: CartItemWithProduct) -> Self {
        CartItemResponse {
            id: value.cart_item_id,
            total_price: pricing::line_total(value.product_price, value.quantity),
            product: CartProductResponse {
                id: value.product_id,
                name: value.product_name,
                price: value.product_price,
            },
            quantity: value.quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CartResponse {
    pub id: Uuid,
    pub created_at: String,
    pub items: Vec<CartItemResponse>,
    #[schema(value_type = String)]
    pub total_price: Decimal,
}

impl CartResponse {
    pub fn new(cart: Cart, items: Vec<CartItemWithProduct>) -> Self {
        let total_price =
            pricing::cart_total(items.iter().map(|i| (i.product_price, i.quantity)));

        CartResponse {
            id: cart.cart_id,
            created_at: cart.created_at.to_string(),
            items: items.into_iter().map(CartItemResponse::from).collect(),
            total_price,
        }
    }
}
