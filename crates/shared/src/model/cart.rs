use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cart {
    pub cart_id: Uuid,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartItem {
    pub cart_item_id: i32,
    pub cart_id: Uuid,
    pub product_id: i32,
    pub quantity: i32,
}

/// A cart line joined with the product columns shown to the shopper.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartItemWithProduct {
    pub cart_item_id: i32,
    pub cart_id: Uuid,
    pub product_id: i32,
    pub product_name: String,
    pub product_price: Decimal,
    pub stock_quantity: i32,
    pub quantity: i32,
}
