use super::{default_page, default_page_size};
use super::validation::validate_price;
use crate::model::PaymentStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct FindAllOrders {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,

    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
}

/// Checkout of a cart into a new order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateOrderRequest {
    pub cart_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateOrderItemRequest {
    #[validate(range(min = 1, message = "Product ID is required"))]
    #[schema(example = 1)]
    pub product_id: i32,

    #[validate(range(min = 1, max = 32767, message = "Quantity must be between 1 and 32767"))]
    #[schema(example = 3)]
    pub quantity: i32,

    /// Defaults to the product's current price.
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = Option<String>)]
    pub unit_price: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateOrderRequest {
    pub payment_status: PaymentStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineRecord {
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone)]
pub struct PlaceOrderRecord {
    pub customer_id: i32,
    pub cart_id: Uuid,
    pub lines: Vec<OrderLineRecord>,
}

#[derive(Debug, Clone)]
pub struct CreateOrderItemRecord {
    pub order_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_quantity_is_capped() {
        let req = CreateOrderItemRequest {
            product_id: 1,
            quantity: 40000,
            unit_price: None,
        };
        assert!(req.validate().unwrap_err().field_errors().contains_key("quantity"));
    }
}
