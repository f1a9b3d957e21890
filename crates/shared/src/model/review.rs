use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub review_id: i32,
    pub product_id: i32,
    pub customer_id: i32,
    pub summary: String,
    pub details: Option<String>,
    pub rating: i16,
    pub created_at: NaiveDateTime,
}
