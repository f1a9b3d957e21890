use crate::model::Review;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ReviewResponse {
    pub id: i32,
    pub product_id: i32,
    pub customer_id: i32,
    pub summary: String,
    pub details: Option<String>,
    pub rating: i16,
    /// Calendar date the review was written.
    pub date: String,
}

impl From<Review> for ReviewResponse {
    fn from(value: Review) -> Self {
        ReviewResponse {
            id: value.review_id,
            product_id: value.product_id,
            customer_id: value.customer_id,
            summary: value.summary,
            details: value.details,
            rating: value.rating,
            date: value.created_at.date().to_string(),
        }
    }
}
