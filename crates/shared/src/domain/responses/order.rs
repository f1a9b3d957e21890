use crate::{
    model::{Order, OrderItem, PaymentStatus},
    pricing,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderItemResponse {
    pub id: i32,
    pub product_id: i32,
    pub quantity: i32,
    #[schema(value_type = String)]
    pub unit_price: Decimal,
    #[schema(value_type = String)]
    pub total_price: Decimal,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(value: OrderItem) -> Self {
        OrderItemResponse {
            id: value.order_item_id,
            product_id: value.product_id,
            quantity: value.quantity,
            unit_price: value.unit_price,
            total_price: pricing::line_total(value.unit_price, value.quantity),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderResponse {
    pub id: i32,
    pub customer_id: i32,
    pub payment_status: PaymentStatus,
    pub placed_at: String,
    pub items: Vec<OrderItemResponse>,
    #[schema(value_type = String)]
    pub total_price: Decimal,
}

impl OrderResponse {
    /// Totals come from the stored unit prices only.
    pub fn new(order: Order, items: Vec<OrderItem>) -> Self {
        let total_price = pricing::order_total(items.iter().map(|i| (i.unit_price, i.quantity)));

        OrderResponse {
            id: order.order_id,
            customer_id: order.customer_id,
            payment_status: order.status(),
            placed_at: order.placed_at.to_string(),
            items: items.into_iter().map(OrderItemResponse::from).collect(),
            total_price,
        }
    }
}
