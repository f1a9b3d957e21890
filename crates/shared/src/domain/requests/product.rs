use super::validation::{validate_discount, validate_price};
use super::{default_page, default_page_size};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ProductOrdering {
    #[serde(rename = "price")]
    PriceAsc,
    #[serde(rename = "-price")]
    PriceDesc,
    #[serde(rename = "stock_quantity")]
    StockAsc,
    #[serde(rename = "-stock_quantity")]
    StockDesc,
}

impl ProductOrdering {
    pub fn as_sql(&self) -> &'static str {
        match self {
            ProductOrdering::PriceAsc => "p.price ASC, p.product_id ASC",
            ProductOrdering::PriceDesc => "p.price DESC, p.product_id ASC",
            ProductOrdering::StockAsc => "p.stock_quantity ASC, p.product_id ASC",
            ProductOrdering::StockDesc => "p.stock_quantity DESC, p.product_id ASC",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct FindAllProducts {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,

    /// Case-insensitive match on product name or category title.
    #[serde(default)]
    pub search: Option<String>,

    #[serde(default)]
    pub category_id: Option<i32>,

    #[serde(default)]
    pub price_min: Option<Decimal>,

    #[serde(default)]
    pub price_max: Option<Decimal>,

    #[serde(default)]
    pub stock_gt: Option<i32>,

    #[serde(default)]
    pub stock_lt: Option<i32>,

    #[serde(default)]
    pub ordering: Option<ProductOrdering>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    #[schema(example = "Green tea")]
    pub name: String,

    pub description: Option<String>,

    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,

    #[validate(custom(function = "validate_discount"))]
    #[schema(value_type = Option<String>, example = "10")]
    pub discount_percent: Option<Decimal>,

    #[validate(range(min = 0, message = "Stock quantity cannot be negative"))]
    pub stock_quantity: i32,

    #[validate(range(min = 1, message = "Category ID is required"))]
    pub category_id: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    pub description: Option<String>,

    /// Removes the description when set.
    #[serde(default)]
    pub clear_description: bool,

    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,

    #[validate(custom(function = "validate_discount"))]
    #[schema(value_type = Option<String>)]
    pub discount_percent: Option<Decimal>,

    /// Removes the discount when set.
    #[serde(default)]
    pub clear_discount: bool,

    #[validate(range(min = 0, message = "Stock quantity cannot be negative"))]
    pub stock_quantity: Option<i32>,

    #[validate(range(min = 1, message = "Category ID is required"))]
    pub category_id: Option<i32>,
}

/// Full column set written back after a partial update has been merged.
#[derive(Debug, Clone)]
pub struct UpdateProductRecord {
    pub product_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub discount_percent: Option<Decimal>,
    pub stock_quantity: i32,
    pub category_id: i32,
}
