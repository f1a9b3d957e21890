use super::{default_page, default_page_size};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct FindAllReviews {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateReviewRequest {
    #[validate(length(min = 1, max = 255, message = "Summary must be 1-255 characters"))]
    pub summary: String,

    pub details: Option<String>,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    #[schema(example = 5)]
    pub rating: i16,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateReviewRequest {
    #[validate(length(min = 1, max = 255, message = "Summary must be 1-255 characters"))]
    pub summary: String,

    pub details: Option<String>,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,
}

#[derive(Debug, Clone)]
pub struct CreateReviewRecord {
    pub product_id: i32,
    pub customer_id: i32,
    pub summary: String,
    pub details: Option<String>,
    pub rating: i16,
}
