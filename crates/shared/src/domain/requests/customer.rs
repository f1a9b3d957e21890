use super::{default_page, default_page_size};
use crate::model::Membership;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct FindAllCustomers {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(max = 255, message = "Phone must be at most 255 characters"))]
    pub phone: Option<String>,

    pub birth_date: Option<NaiveDate>,

    pub membership: Option<Membership>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateCustomerRequest {
    #[validate(length(max = 255, message = "Phone must be at most 255 characters"))]
    pub phone: Option<String>,

    pub birth_date: Option<NaiveDate>,

    pub membership: Option<Membership>,
}

#[derive(Debug, Clone)]
pub struct CreateCustomerRecord {
    pub user_id: i32,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub membership: Membership,
}
