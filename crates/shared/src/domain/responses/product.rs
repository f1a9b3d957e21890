use crate::model::Product;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    #[schema(value_type = Option<String>)]
    pub discount_percent: Option<Decimal>,
    #[schema(value_type = String, example = "11.25")]
    pub discounted_price: Decimal,
    pub stock_quantity: i32,
    pub category_id: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        let discounted_price = value.discounted_price();
        ProductResponse {
            id: value.product_id,
            name: value.name,
            description: value.description,
            price: value.price,
            discount_percent: value.discount_percent,
            discounted_price,
            stock_quantity: value.stock_quantity,
            category_id: value.category_id,
            created_at: value.created_at.to_string(),
            updated_at: value.updated_at.to_string(),
        }
    }
}
